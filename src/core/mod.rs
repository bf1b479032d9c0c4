pub mod etl;
pub mod maintenance;
pub mod mapping;
pub mod pipeline;

pub use crate::domain::model::{CrmEntity, EntityKind, ImportBatch, ImportSummary, MetaRecord};
pub use crate::domain::ports::{ConfigProvider, CrmSource, Pipeline, Storage};
pub use crate::utils::error::Result;
