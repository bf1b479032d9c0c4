//! CRM entity → flat metadata mappers.
//!
//! Both mappers are pure: the same entity and options always produce the same record.
//! Missing source data never fails a mapping; each field falls back to its own default.

pub mod account;
pub mod contact;

pub use crate::domain::model::MirrorMode;
pub use account::map_account;
pub use contact::{map_contact, should_notify_new_user};

use crate::domain::model::{CrmEntity, MetaRecord};
use crate::domain::ports::ConfigProvider;
use crate::utils::sanitize::{force_object_json, is_empty};

/// Prefix for attributes copied verbatim from the CRM.
pub const MIRROR_PREFIX: &str = "_ethos_crm:";

/// Marks records that came from the CRM import.
pub const FROM_CRM_KEY: &str = "_ethos_from_crm";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingOptions {
    /// Prepended to `entityimage_url` to build the logo URL.
    pub crm_server_url: String,
    pub mirror: MirrorMode,
}

impl MappingOptions {
    pub fn new(crm_server_url: impl Into<String>) -> Self {
        Self {
            crm_server_url: crm_server_url.into(),
            mirror: MirrorMode::default(),
        }
    }

    pub fn with_mirror(mut self, mirror: MirrorMode) -> Self {
        self.mirror = mirror;
        self
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self::new(config.crm_server_url()).with_mirror(config.mirror_mode())
    }
}

/// Appends `_ethos_crm:<name>` entries for the entity's attributes.
///
/// References are stored as JSON object strings, non-empty scalars as-is, empty scalars not at all.
pub(crate) fn mirror_attributes(
    record: &mut MetaRecord,
    entity: &CrmEntity,
    consumed: &[&str],
    mode: MirrorMode,
) {
    for (key, value) in &entity.attributes {
        if mode == MirrorMode::Unconsumed && consumed.contains(&key.as_str()) {
            continue;
        }

        let meta_key = format!("{}{}", MIRROR_PREFIX, key);
        if value.is_object() {
            record.insert(meta_key, force_object_json(value));
        } else if !is_empty(value) {
            record.insert(meta_key, value.clone());
        }
    }
}
