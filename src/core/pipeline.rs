use crate::core::mapping::{map_account, map_contact, MappingOptions};
use crate::domain::model::{
    EntityKind, ExtractedEntities, ImportBatch, ImportSummary, MetaRecord,
};
use crate::domain::ports::{CrmSource, Pipeline, Storage};
use crate::utils::error::Result;
use serde::Serialize;

pub const ACCOUNTS_OUTPUT: &str = "post_meta/accounts.json";
pub const CONTACTS_OUTPUT: &str = "user_meta/contacts.json";
pub const MANIFEST_OUTPUT: &str = "manifest.json";

#[derive(Debug, Serialize)]
struct Manifest<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    crm_server_url: &'a str,
    accounts: usize,
    contacts: usize,
    files: [&'static str; 2],
}

/// Imports CRM accounts and contacts as flat metadata records.
///
/// Nothing is written back to the CMS. Records go to `storage` as JSON documents,
/// or nowhere at all in dry-run mode.
pub struct ImportPipeline<C: CrmSource, S: Storage> {
    source: C,
    storage: S,
    options: MappingOptions,
    dry_run: bool,
    output_path: String,
}

impl<C: CrmSource, S: Storage> ImportPipeline<C, S> {
    pub fn new(source: C, storage: S, options: MappingOptions) -> Self {
        Self {
            source,
            storage,
            options,
            dry_run: false,
            output_path: String::new(),
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Reported location of the output; the storage decides where files really go.
    pub fn with_output_path(mut self, output_path: impl Into<String>) -> Self {
        self.output_path = output_path.into();
        self
    }

    async fn write_json<T: Serialize + ?Sized>(&self, path: &str, value: &T) -> Result<()> {
        let json_data = serde_json::to_string_pretty(value)?;
        tracing::debug!("Writing {} ({} bytes) to storage", path, json_data.len());
        self.storage.write_file(path, json_data.as_bytes()).await
    }
}

#[async_trait::async_trait]
impl<C: CrmSource, S: Storage> Pipeline for ImportPipeline<C, S> {
    async fn extract(&self) -> Result<ExtractedEntities> {
        let accounts = self.source.iterate_entities(EntityKind::Account).await?;
        let contacts = self.source.iterate_entities(EntityKind::Contact).await?;
        Ok(ExtractedEntities { accounts, contacts })
    }

    async fn transform(&self, data: ExtractedEntities) -> Result<ImportBatch> {
        let mut accounts = Vec::with_capacity(data.accounts.len());
        for entity in &data.accounts {
            let record = map_account(entity, &self.options);
            tracing::debug!(
                "Importing account {} - {}",
                record.get_str("nome_fantasia"),
                record.get_str("cnpj")
            );
            accounts.push(record);
        }
        tracing::info!("Finished importing {} accounts.", accounts.len());

        let mut contacts = Vec::with_capacity(data.contacts.len());
        for entity in &data.contacts {
            let record = map_contact(entity, &self.options);
            tracing::debug!(
                "Importing contact {} - {}",
                record.get_str("nome_completo"),
                record.get_str("cpf")
            );
            contacts.push(record);
        }
        tracing::info!("Finished importing {} contacts.", contacts.len());

        Ok(ImportBatch { accounts, contacts })
    }

    async fn load(&self, batch: ImportBatch) -> Result<ImportSummary> {
        let accounts = batch.accounts.len();
        let contacts = batch.contacts.len();

        if self.dry_run {
            tracing::info!(
                "Dry run: {} account and {} contact records not written",
                accounts,
                contacts
            );
            return Ok(ImportSummary {
                accounts,
                contacts,
                output_path: None,
            });
        }

        self.write_json::<[MetaRecord]>(ACCOUNTS_OUTPUT, &batch.accounts)
            .await?;
        self.write_json::<[MetaRecord]>(CONTACTS_OUTPUT, &batch.contacts)
            .await?;

        let manifest = Manifest {
            generated_at: chrono::Utc::now(),
            crm_server_url: &self.options.crm_server_url,
            accounts,
            contacts,
            files: [ACCOUNTS_OUTPUT, CONTACTS_OUTPUT],
        };
        self.write_json(MANIFEST_OUTPUT, &manifest).await?;

        Ok(ImportSummary {
            accounts,
            contacts,
            output_path: Some(self.output_path.clone()),
        })
    }
}
