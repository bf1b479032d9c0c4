pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::crm::{FileCrmSource, HttpCrmSource};
pub use adapters::storage::LocalStorage;
pub use app::import::run_import;
pub use crate::core::mapping::{map_account, map_contact, MappingOptions};
pub use crate::core::{etl::EtlEngine, pipeline::ImportPipeline};
pub use domain::model::{CrmEntity, EntityKind, MetaRecord, MirrorMode};
pub use utils::error::{Result, SyncError};
