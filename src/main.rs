use clap::Parser;
use ethos_crm_sync::app::migrate::{migrate_posts_file, MigrationPlan};
use ethos_crm_sync::config::{Command, ImportArgs, MigratePostsArgs};
use ethos_crm_sync::utils::error::{ErrorSeverity, SyncError};
use ethos_crm_sync::utils::{logger, validation::Validate};
use ethos_crm_sync::{run_import, CliConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ethos-crm-sync");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let outcome = match config.command {
        Command::ImportAccounts(args) => import_accounts(args).await,
        Command::MigratePosts(args) => migrate_posts(args).await,
    };

    if let Err(e) = outcome {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

async fn import_accounts(args: ImportArgs) -> Result<(), SyncError> {
    let summary = match args.clone().into_toml_config()? {
        Some(toml) => {
            toml.validate()?;
            run_import(&toml).await?
        }
        None => {
            args.validate()?;
            run_import(&args).await?
        }
    };

    println!("✅ Finished importing {} accounts.", summary.accounts);
    println!("✅ Finished importing {} contacts.", summary.contacts);
    if let Some(path) = summary.output_path {
        println!("📁 Output saved to: {}", path);
    }
    Ok(())
}

async fn migrate_posts(args: MigratePostsArgs) -> Result<(), SyncError> {
    args.validate()?;

    let plan = MigrationPlan {
        post_type: args.post_type,
        tags_to_categories: args.tags_to_categories,
        existing_categories: args.categories.iter().cloned().collect(),
    };

    let report = migrate_posts_file(&args.input, &args.output, &plan).await?;
    println!(
        "✅ Migrated {} posts ({} retyped, {} tags moved)",
        report.posts, report.retyped, report.tags_moved
    );
    Ok(())
}
