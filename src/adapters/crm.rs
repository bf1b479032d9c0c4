use crate::domain::model::{CrmEntity, EntityKind};
use crate::domain::ports::{CrmSource, Storage};
use crate::utils::error::{Result, SyncError};
use crate::utils::sanitize::trimmed;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Map, Value};

const NEXT_PAGE_KEYS: &[&str] = &["@odata.nextLink", "nextLink"];

/// Accepts a bare array of entities or a `{"value": [...]}` envelope.
fn parse_entities(body: Value, origin: &str) -> Result<Vec<CrmEntity>> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut envelope) => match envelope.remove("value") {
            Some(Value::Array(items)) => {
                if let Some(link) = next_page_link(&envelope) {
                    tracing::warn!(
                        "{} returned a paged response; only the first {} entities are imported (next page: {})",
                        origin,
                        items.len(),
                        link
                    );
                }
                items
            }
            _ => {
                return Err(SyncError::CrmResponseError {
                    endpoint: origin.to_string(),
                    message: "object response has no 'value' array".to_string(),
                })
            }
        },
        other => {
            return Err(SyncError::CrmResponseError {
                endpoint: origin.to_string(),
                message: format!("expected an array of entities, got {}", json_type(&other)),
            })
        }
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(SyncError::from))
        .collect()
}

fn next_page_link(envelope: &Map<String, Value>) -> Option<&str> {
    NEXT_PAGE_KEYS
        .iter()
        .filter_map(|key| envelope.get(*key))
        .find_map(|link| link.as_str().filter(|link| !link.is_empty()))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reads entities from the CRM web API: `GET {endpoint}/{logical_name}?orderby=..&order=ASC`.
pub struct HttpCrmSource {
    client: Client,
    endpoint: String,
}

impl HttpCrmSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn collection_url(&self, kind: EntityKind) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            kind.logical_name()
        )
    }
}

#[async_trait]
impl CrmSource for HttpCrmSource {
    async fn iterate_entities(&self, kind: EntityKind) -> Result<Vec<CrmEntity>> {
        let url = self.collection_url(kind);

        tracing::debug!("Making CRM request to: {}", url);
        let response = self
            .client
            .get(&url)
            .query(&[("orderby", kind.order_by()), ("order", "ASC")])
            .send()
            .await?;

        tracing::debug!("CRM response status: {}", response.status());
        let body: Value = response.error_for_status()?.json().await?;

        let entities = parse_entities(body, &url)?;
        tracing::info!("Fetched {} {} entities", entities.len(), kind.logical_name());
        Ok(entities)
    }
}

/// Reads `accounts.json` / `contacts.json` exports through a [`Storage`].
pub struct FileCrmSource<S: Storage> {
    storage: S,
}

impl<S: Storage> FileCrmSource<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl<S: Storage> CrmSource for FileCrmSource<S> {
    async fn iterate_entities(&self, kind: EntityKind) -> Result<Vec<CrmEntity>> {
        let file = kind.collection_file();

        let data = match self.storage.read_file(file).await {
            Ok(data) => data,
            Err(SyncError::IoError(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!("No {} export found, skipping", file);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let body: Value = serde_json::from_slice(&data)?;
        let mut entities = parse_entities(body, file)?;

        let order_by = kind.order_by();
        entities.sort_by_cached_key(|e| trimmed(e.attribute(order_by)).to_lowercase());

        tracing::info!("Loaded {} {} entities from {}", entities.len(), kind.logical_name(), file);
        Ok(entities)
    }
}
