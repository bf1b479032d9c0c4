use super::{mirror_attributes, MappingOptions, FROM_CRM_KEY};
use crate::domain::model::{ContactRecord, CrmEntity, MetaRecord};
use crate::utils::sanitize::{is_truthy, sanitize_value, trim, trimmed, unique_values};
use serde_json::{Map, Value};

const CONSUMED: &[&str] = &[
    "mobilephone",
    "telephone1",
    "telephone2",
    "fut_bt_financeiro",
    "fullname",
    "fut_st_cpf",
    "jobtitle",
    "emailaddress1",
];

/// Builds the user-meta of a member account from a CRM contact.
pub fn map_contact(entity: &CrmEntity, options: &MappingOptions) -> ContactRecord {
    let phones = unique_values([
        sanitize_value(entity.attribute("mobilephone")),
        sanitize_value(entity.attribute("telephone1")),
        sanitize_value(entity.attribute("telephone2")),
    ]);

    let mut record = MetaRecord::default();

    record.insert(FROM_CRM_KEY, 1);
    record.insert("_ethos_crm_contact_id", entity.id.clone());
    record.insert("_pmpro_role", membership_role(entity));

    record.insert("nome_completo", trimmed(entity.attribute("fullname")));
    record.insert("cpf", sanitize_value(entity.attribute("fut_st_cpf")));
    record.insert("cargo", trimmed(entity.attribute("jobtitle")));
    record.insert("area", trim(entity.formatted("fut_pl_area").unwrap_or("")));
    record.insert("email", trimmed(entity.attribute("emailaddress1")));
    record.insert("celular", phones.first().cloned().unwrap_or_default());
    record.insert("celular_is_whatsapp", "");
    record.insert("telefone", phones.get(1).cloned().unwrap_or_default());

    mirror_attributes(&mut record, entity, CONSUMED, options.mirror);

    record
}

fn membership_role(entity: &CrmEntity) -> &'static str {
    if is_truthy(entity.attribute("fut_bt_financeiro")) {
        "financial"
    } else {
        "primary"
    }
}

/// Whether the CMS should send the "new user" e-mail.
///
/// Users created by the CRM import are never notified; everyone else keeps `send`.
pub fn should_notify_new_user(send: bool, user_meta: &Map<String, Value>) -> bool {
    let imported = match user_meta.get(FROM_CRM_KEY) {
        Some(Value::Number(n)) => n.as_f64() == Some(1.0),
        Some(Value::String(s)) => s == "1",
        Some(Value::Bool(b)) => *b,
        _ => false,
    };
    if imported {
        return false;
    }
    send
}
