use crate::domain::model::ImportSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<ImportSummary> {
        let started = Instant::now();
        tracing::info!("Starting CRM import...");

        // Extract
        let entities = self.pipeline.extract().await?;
        tracing::info!(
            "Extracted {} accounts and {} contacts",
            entities.accounts.len(),
            entities.contacts.len()
        );

        // Transform
        let batch = self.pipeline.transform(entities).await?;

        // Load
        let summary = self.pipeline.load(batch).await?;
        match &summary.output_path {
            Some(path) => tracing::info!("Output saved to: {}", path),
            None => tracing::info!("Nothing written"),
        }

        tracing::debug!("Import finished in {:?}", started.elapsed());
        Ok(summary)
    }
}
