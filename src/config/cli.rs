use crate::config::{validate_provider, TomlConfig};
use crate::core::maintenance::PostType;
use crate::domain::model::MirrorMode;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::{Args, Parser, Subcommand};

const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Parser)]
#[command(name = "ethos-crm-sync")]
#[command(about = "Imports CRM accounts and contacts as CMS metadata")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Import every CRM account, then every contact
    ImportAccounts(ImportArgs),
    /// Retype legacy posts and promote institutional tags to categories
    MigratePosts(MigratePostsArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ImportArgs {
    /// TOML configuration file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "CRM_SERVER_URL")]
    pub crm_server_url: Option<String>,

    #[arg(long, env = "CRM_ENDPOINT")]
    pub crm_endpoint: Option<String>,

    /// Directory with accounts.json / contacts.json exports, used instead of the endpoint
    #[arg(long)]
    pub input_dir: Option<String>,

    /// Output directory [default: ./output]
    #[arg(long)]
    pub output_path: Option<String>,

    /// Map entities and log them without writing any output
    #[arg(long)]
    pub dry_run: bool,

    /// Which CRM attributes to copy under `_ethos_crm:` (unconsumed | all)
    #[arg(long)]
    pub mirror: Option<MirrorMode>,
}

impl ImportArgs {
    /// Loads `--config` when given and applies the command line overrides on top.
    pub fn into_toml_config(self) -> Result<Option<TomlConfig>> {
        let Some(path) = &self.config else {
            return Ok(None);
        };

        let mut config = TomlConfig::from_file(path)?;
        if let Some(url) = self.crm_server_url {
            config.crm.server_url = url;
        }
        if let Some(endpoint) = self.crm_endpoint {
            config.crm.endpoint = Some(endpoint);
        }
        if let Some(dir) = self.input_dir {
            config.crm.input_dir = Some(dir);
        }
        if let Some(output_path) = self.output_path {
            config.load.output_path = output_path;
        }
        if self.dry_run {
            config.import.dry_run = true;
        }
        if let Some(mirror) = self.mirror {
            config.import.mirror = mirror;
        }
        Ok(Some(config))
    }
}

impl ConfigProvider for ImportArgs {
    fn crm_server_url(&self) -> &str {
        self.crm_server_url.as_deref().unwrap_or("")
    }

    fn crm_endpoint(&self) -> Option<&str> {
        self.crm_endpoint.as_deref()
    }

    fn input_dir(&self) -> Option<&str> {
        self.input_dir.as_deref()
    }

    fn output_path(&self) -> &str {
        self.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }

    fn mirror_mode(&self) -> MirrorMode {
        self.mirror.unwrap_or_default()
    }
}

impl Validate for ImportArgs {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[derive(Debug, Clone, Args)]
pub struct MigratePostsArgs {
    /// JSON array of posts
    #[arg(long)]
    pub input: String,

    #[arg(long)]
    pub output: String,

    /// New post type for every post (publicacao | post | page | iniciativa)
    #[arg(long)]
    pub post_type: Option<PostType>,

    /// Move institutional tags to the categories of the same slug
    #[arg(long)]
    pub tags_to_categories: bool,

    /// Category slugs that exist on the site
    #[arg(long, value_delimiter = ',')]
    pub categories: Vec<String>,
}

impl Validate for MigratePostsArgs {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)
    }
}
