use crate::config::validate_provider;
use crate::domain::model::MirrorMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SyncError};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub crm: CrmConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrmConfig {
    pub server_url: String,
    pub endpoint: Option<String>,
    pub input_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub mirror: MirrorMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
        }
    }
}

fn default_output_path() -> String {
    "./output".to_string()
}

impl TomlConfig {
    /// Loads and parses a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SyncError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SyncError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SyncError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn crm_server_url(&self) -> &str {
        &self.crm.server_url
    }

    fn crm_endpoint(&self) -> Option<&str> {
        self.crm.endpoint.as_deref()
    }

    fn input_dir(&self) -> Option<&str> {
        self.crm.input_dir.as_deref()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn dry_run(&self) -> bool {
        self.import.dry_run
    }

    fn mirror_mode(&self) -> MirrorMode {
        self.import.mirror
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[crm]
server_url = "https://crm.ethos.org.br"
endpoint = "https://crm.ethos.org.br/api/data"

[import]
dry_run = true
mirror = "all"

[load]
output_path = "./import-output"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.crm_server_url(), "https://crm.ethos.org.br");
        assert_eq!(config.crm_endpoint(), Some("https://crm.ethos.org.br/api/data"));
        assert!(config.dry_run());
        assert_eq!(config.mirror_mode(), MirrorMode::All);
        assert_eq!(config.output_path(), "./import-output");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let config = TomlConfig::from_toml_str(
            r#"
[crm]
server_url = "https://crm.ethos.org.br"
input_dir = "./exports"
"#,
        )
        .unwrap();

        assert!(!config.dry_run());
        assert_eq!(config.mirror_mode(), MirrorMode::Unconsumed);
        assert_eq!(config.output_path(), "./output");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("ETHOS_TEST_CRM_URL", "https://crm.test.ethos.org.br");

        let config = TomlConfig::from_toml_str(
            r#"
[crm]
server_url = "${ETHOS_TEST_CRM_URL}"
endpoint = "${ETHOS_TEST_CRM_URL}/api"
"#,
        )
        .unwrap();
        assert_eq!(config.crm.server_url, "https://crm.test.ethos.org.br");
        assert_eq!(
            config.crm.endpoint.as_deref(),
            Some("https://crm.test.ethos.org.br/api")
        );

        std::env::remove_var("ETHOS_TEST_CRM_URL");
    }

    #[test]
    fn test_config_validation() {
        let invalid_url = TomlConfig::from_toml_str(
            r#"
[crm]
server_url = "invalid-url"
endpoint = "https://crm.ethos.org.br/api"
"#,
        )
        .unwrap();
        assert!(invalid_url.validate().is_err());

        let no_source = TomlConfig::from_toml_str(
            r#"
[crm]
server_url = "https://crm.ethos.org.br"
"#,
        )
        .unwrap();
        assert!(matches!(
            no_source.validate(),
            Err(SyncError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_unknown_mirror_mode_is_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
[crm]
server_url = "https://crm.ethos.org.br"

[import]
mirror = "everything"
"#,
        );
        assert!(matches!(
            result,
            Err(SyncError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[crm]
server_url = "https://crm.ethos.org.br"
input_dir = "./exports"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.input_dir(), Some("./exports"));
    }
}
