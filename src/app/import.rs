use crate::adapters::crm::{FileCrmSource, HttpCrmSource};
use crate::adapters::storage::LocalStorage;
use crate::core::etl::EtlEngine;
use crate::core::mapping::MappingOptions;
use crate::core::pipeline::ImportPipeline;
use crate::domain::model::ImportSummary;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SyncError};

/// Runs the account + contact import described by `config`.
///
/// An input directory takes precedence over the CRM endpoint.
pub async fn run_import<C: ConfigProvider + ?Sized>(config: &C) -> Result<ImportSummary> {
    let options = MappingOptions::from_config(config);
    let storage = LocalStorage::new(config.output_path().to_string());

    if let Some(dir) = config.input_dir() {
        ensure_input_dir(dir).await?;
        tracing::info!("Reading CRM exports from {}", dir);
        let source = FileCrmSource::new(LocalStorage::new(dir.to_string()));
        let pipeline = ImportPipeline::new(source, storage, options)
            .with_dry_run(config.dry_run())
            .with_output_path(config.output_path());
        return EtlEngine::new(pipeline).run().await;
    }

    let endpoint = config
        .crm_endpoint()
        .ok_or_else(|| SyncError::MissingConfigError {
            field: "crm.endpoint".to_string(),
        })?;

    tracing::info!("Fetching entities from CRM at {}", endpoint);
    let pipeline = ImportPipeline::new(HttpCrmSource::new(endpoint), storage, options)
        .with_dry_run(config.dry_run())
        .with_output_path(config.output_path());
    EtlEngine::new(pipeline).run().await
}

/// A missing export file inside the directory means "no entities"; a missing directory is an error.
async fn ensure_input_dir(dir: &str) -> Result<()> {
    let reason = match tokio::fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => "not a directory".to_string(),
        Err(e) => e.to_string(),
    };
    Err(SyncError::InvalidConfigValueError {
        field: "crm.input_dir".to_string(),
        value: dir.to_string(),
        reason,
    })
}
