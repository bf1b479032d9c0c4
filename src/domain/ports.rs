use crate::domain::model::{
    CrmEntity, EntityKind, ExtractedEntities, ImportBatch, ImportSummary, MirrorMode,
};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Base URL prepended to entity image paths.
    fn crm_server_url(&self) -> &str;
    fn crm_endpoint(&self) -> Option<&str>;
    /// Directory holding `accounts.json`/`contacts.json` exports; wins over the endpoint.
    fn input_dir(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn dry_run(&self) -> bool;
    fn mirror_mode(&self) -> MirrorMode;
}

/// Where CRM entities come from.
#[async_trait]
pub trait CrmSource: Send + Sync {
    /// All entities of `kind`, ascending by [`EntityKind::order_by`].
    async fn iterate_entities(&self, kind: EntityKind) -> Result<Vec<CrmEntity>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractedEntities>;
    async fn transform(&self, data: ExtractedEntities) -> Result<ImportBatch>;
    async fn load(&self, batch: ImportBatch) -> Result<ImportSummary>;
}
