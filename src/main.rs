use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use client_registry::{DatabaseMode, Health, config, db, telemetry};

#[derive(Parser)]
#[command(
    name = "client-registry",
    about = "Database bootstrap for the client registry backend",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Build the database handle and report the liveness check (default)
    Check,
    /// Print the resolved database configuration, password redacted
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cli = Cli::parse();

    // Load configuration
    let config = config::init()?;

    match cli.command.unwrap_or(Command::Check) {
        Command::Check => check(&config).await,
        Command::Config => {
            match config.database() {
                DatabaseMode::Disabled => println!("database: disabled (mock mode)"),
                DatabaseMode::Enabled(settings) => println!("database: {settings:?}"),
            }
            Ok(())
        }
    }
}

async fn check(config: &config::Config) -> Result<()> {
    let Some(db) = db::init(config).await? else {
        return Ok(());
    };

    // A failed check is reported, it does not fail the command
    match db.wait_for_health().await {
        Health::Healthy { checked_at } => info!(%checked_at, "liveness check passed"),
        Health::Unhealthy { checked_at, error } => {
            warn!(%checked_at, %error, "liveness check failed")
        }
        Health::Pending => warn!("liveness check did not report"),
    }

    db.close().await;
    Ok(())
}
