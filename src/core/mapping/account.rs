use super::{mirror_attributes, MappingOptions, FROM_CRM_KEY};
use crate::domain::model::{AccountRecord, CrmEntity, MetaRecord};
use crate::utils::sanitize::{is_empty, is_truthy, sanitize_number, sanitize_value, to_text, trimmed};
use serde_json::Value;

/// Attributes read by the fixed post-meta fields.
const CONSUMED: &[&str] = &[
    "revenue_base",
    "entityimage_url",
    "fut_address1_logradouro",
    "fut_lk_tipologradouro",
    "originatingleadid",
    "fut_st_cnpjsemmascara",
    "fut_st_razaosocial",
    "name",
    "fut_lk_setor",
    "fut_st_inscricaoestadual",
    "fut_st_inscricaomunicipal",
    "websiteurl",
    "numberofemployees",
    "fut_address1_nro",
    "address1_line2",
    "address1_line3",
    "address1_city",
    "address1_postalcode",
];

const SMALL_REVENUE_LIMIT: f64 = 10_000_000.0;
const MEDIUM_REVENUE_LIMIT: f64 = 300_000_000.0;
const DEFAULT_COMPANY_SIZE: &str = "Microempresa";

/// Builds the post-meta of an `organizacao` post from a CRM account.
pub fn map_account(entity: &CrmEntity, options: &MappingOptions) -> AccountRecord {
    let mut record = MetaRecord::default();

    record.insert(FROM_CRM_KEY, 1);
    record.insert("_ethos_crm_account_id", entity.id.clone());
    record.insert("_ethos_crm_lead_id", lead_id(entity));

    record.insert("cnpj", trimmed(entity.attribute("fut_st_cnpjsemmascara")));
    record.insert("razao_social", trimmed(entity.attribute("fut_st_razaosocial")));
    record.insert("nome_fantasia", trimmed(entity.attribute("name")));
    record.insert("segmento", trimmed(entity.reference_field("fut_lk_setor", "Name")));
    record.insert(
        "cnae",
        sanitize_number(entity.formatted("fut_lk_cnae").unwrap_or("")),
    );
    record.insert("faturamento_anual", revenue_bracket(revenue_base(entity)));
    record.insert(
        "inscricao_estadual",
        trimmed(entity.attribute("fut_st_inscricaoestadual")),
    );
    record.insert(
        "inscricao_municipal",
        trimmed(entity.attribute("fut_st_inscricaomunicipal")),
    );
    record.insert("logomarca", logo_url(entity, &options.crm_server_url));
    record.insert("website", trimmed(entity.attribute("websiteurl")));
    record.insert(
        "num_funcionarios",
        entity
            .attribute("numberofemployees")
            .cloned()
            .unwrap_or_else(|| Value::from(0)),
    );
    record.insert("porte", company_size(entity.formatted("fut_pl_porte")));
    record.insert("end_logradouro", street_address(entity));
    record.insert("end_numero", trimmed(entity.attribute("fut_address1_nro")));
    record.insert("end_complemento", trimmed(entity.attribute("address1_line2")));
    record.insert("end_bairro", trimmed(entity.attribute("address1_line3")));
    record.insert("end_cidade", trimmed(entity.attribute("address1_city")));
    record.insert(
        "end_estado",
        entity.formatted("fut_pl_estado").unwrap_or("").to_string(),
    );
    record.insert(
        "end_cep",
        sanitize_value(entity.attribute("address1_postalcode")),
    );

    mirror_attributes(&mut record, entity, CONSUMED, options.mirror);

    record
}

pub fn revenue_bracket(revenue: f64) -> &'static str {
    if revenue < SMALL_REVENUE_LIMIT {
        "small"
    } else if revenue < MEDIUM_REVENUE_LIMIT {
        "medium"
    } else {
        "large"
    }
}

/// Buckets the formatted `fut_pl_porte` label; the first matching keyword wins.
pub fn company_size(label: Option<&str>) -> &'static str {
    let label = label.unwrap_or(DEFAULT_COMPANY_SIZE).to_lowercase();
    if label.contains("micro") {
        "micro"
    } else if label.contains("pequena") {
        "small"
    } else if label.contains("média") {
        "medium"
    } else {
        "large"
    }
}

fn revenue_base(entity: &CrmEntity) -> f64 {
    entity.attribute("revenue_base").map(numeric).unwrap_or(0.0)
}

// money attributes may arrive wrapped as {"Value": n}
fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        Value::Bool(true) => 1.0,
        Value::Object(fields) => fields.get("Value").map(numeric).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn lead_id(entity: &CrmEntity) -> Value {
    entity
        .reference_field("originatingleadid", "Id")
        .filter(|id| !is_empty(id))
        .cloned()
        .unwrap_or(Value::Null)
}

fn logo_url(entity: &CrmEntity, crm_server_url: &str) -> String {
    match entity.attribute("entityimage_url") {
        Some(path) if is_truthy(Some(path)) => format!("{}{}", crm_server_url, to_text(path)),
        _ => String::new(),
    }
}

/// Street name, prefixed with the street type unless it already starts with it.
fn street_address(entity: &CrmEntity) -> String {
    let street = trimmed(entity.attribute("fut_address1_logradouro"));

    let street_type = entity
        .reference_field("fut_lk_tipologradouro", "Name")
        .filter(|name| !is_empty(name));

    match street_type {
        Some(name) => {
            let prefix = trimmed(Some(name));
            if street.to_lowercase().starts_with(&prefix.to_lowercase()) {
                street
            } else {
                format!("{} {}", prefix, street)
            }
        }
        None => street,
    }
}
