use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A record fetched from the CRM, with raw and formatted attribute views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrmEntity {
    #[serde(rename = "Id", default)]
    pub id: String,

    #[serde(rename = "LogicalName", default, skip_serializing_if = "Option::is_none")]
    pub logical_name: Option<String>,

    /// Raw values in source order: scalars, `null`, or reference objects with `Id`/`Name`.
    #[serde(rename = "Attributes", default)]
    pub attributes: Map<String, Value>,

    #[serde(rename = "FormattedValues", default)]
    pub formatted_values: HashMap<String, String>,
}

impl CrmEntity {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: &str, value: Value) -> Self {
        self.attributes.insert(key.to_string(), value);
        self
    }

    pub fn with_formatted(mut self, key: &str, value: &str) -> Self {
        self.formatted_values
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Attribute value, with `null` treated as absent.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|v| !v.is_null())
    }

    /// A field of a reference attribute, e.g. `fut_lk_setor.Name`.
    pub fn reference_field(&self, key: &str, field: &str) -> Option<&Value> {
        self.attribute(key)
            .and_then(Value::as_object)
            .and_then(|reference| reference.get(field))
            .filter(|v| !v.is_null())
    }

    pub fn formatted(&self, key: &str) -> Option<&str> {
        self.formatted_values.get(key).map(String::as_str)
    }
}

/// Which CRM attributes are copied under the `_ethos_crm:` prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorMode {
    /// Attributes not already read by a fixed field.
    #[default]
    Unconsumed,
    /// Every attribute, including those behind fixed fields.
    All,
}

impl std::str::FromStr for MirrorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unconsumed" => Ok(MirrorMode::Unconsumed),
            "all" => Ok(MirrorMode::All),
            other => Err(format!(
                "unknown mirror mode '{}', expected 'unconsumed' or 'all'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Account,
    Contact,
}

impl EntityKind {
    pub fn logical_name(&self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Contact => "contact",
        }
    }

    /// Attribute the import walks entities by.
    pub fn order_by(&self) -> &'static str {
        match self {
            EntityKind::Account => "name",
            EntityKind::Contact => "fullname",
        }
    }

    pub fn collection_file(&self) -> &'static str {
        match self {
            EntityKind::Account => "accounts.json",
            EntityKind::Contact => "contacts.json",
        }
    }
}

/// Flat metadata derived from one entity: post-meta for accounts, user-meta for contacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaRecord {
    pub data: Map<String, Value>,
}

pub type AccountRecord = MetaRecord;
pub type ContactRecord = MetaRecord;

impl MetaRecord {
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn get_str(&self, key: &str) -> &str {
        self.data.get(key).and_then(Value::as_str).unwrap_or("")
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.data.keys()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExtractedEntities {
    pub accounts: Vec<CrmEntity>,
    pub contacts: Vec<CrmEntity>,
}

#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    pub accounts: Vec<AccountRecord>,
    pub contacts: Vec<ContactRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub accounts: usize,
    pub contacts: usize,
    /// `None` when nothing was written (dry run).
    pub output_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_crm_entity() {
        let entity: CrmEntity = serde_json::from_value(json!({
            "Id": "6f1c",
            "LogicalName": "account",
            "Attributes": {
                "name": "Ethos",
                "fut_lk_setor": {"Id": "s1", "Name": "Serviços", "LogicalName": "fut_setor"},
                "websiteurl": null
            },
            "FormattedValues": {"fut_pl_porte": "Grande Empresa"}
        }))
        .unwrap();

        assert_eq!(entity.id, "6f1c");
        assert_eq!(entity.logical_name.as_deref(), Some("account"));
        assert_eq!(
            entity.reference_field("fut_lk_setor", "Name"),
            Some(&json!("Serviços"))
        );
        assert!(entity.attribute("websiteurl").is_none());
        assert_eq!(entity.formatted("fut_pl_porte"), Some("Grande Empresa"));

        let keys: Vec<&String> = entity.attributes.keys().collect();
        assert_eq!(keys, vec!["name", "fut_lk_setor", "websiteurl"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let entity: CrmEntity = serde_json::from_value(json!({"Id": "x"})).unwrap();
        assert!(entity.attributes.is_empty());
        assert!(entity.formatted_values.is_empty());
        assert!(entity.reference_field("originatingleadid", "Id").is_none());
    }

    #[test]
    fn test_mirror_mode_from_str() {
        assert_eq!("all".parse::<MirrorMode>(), Ok(MirrorMode::All));
        assert_eq!("Unconsumed".parse::<MirrorMode>(), Ok(MirrorMode::Unconsumed));
        assert!("everything".parse::<MirrorMode>().is_err());
    }

    #[test]
    fn test_meta_record_serializes_flat() {
        let mut record = MetaRecord::default();
        record.insert("cnpj", "123");
        record.insert("num_funcionarios", 10);
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"cnpj":"123","num_funcionarios":10}"#
        );
    }
}
