#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_url};

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command, ImportArgs, MigratePostsArgs};
pub use toml_config::TomlConfig;

/// Checks shared by every [`ConfigProvider`]: a valid CRM server URL, a source, an output path.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_non_empty_string("crm.server_url", config.crm_server_url())?;
    validate_url("crm.server_url", config.crm_server_url())?;

    match (config.input_dir(), config.crm_endpoint()) {
        (Some(dir), _) => validate_path("crm.input_dir", dir)?,
        (None, Some(endpoint)) => validate_url("crm.endpoint", endpoint)?,
        (None, None) => {
            return Err(SyncError::MissingConfigError {
                field: "crm.endpoint or crm.input_dir".to_string(),
            })
        }
    }

    validate_path("load.output_path", config.output_path())
}
