//! Main entry point for the item service binary

use anyhow::Result;
use clap::{Parser, Subcommand};
use itemsvc_core::{
    create_app, get_database_pool, run_migrations, run_server, AppConfig, AppState,
    DatabaseManager,
};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Item service API
#[derive(Parser, Debug)]
#[command(name = "itemsvc")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short, global = true, env = "ITEMSVC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run migrations and serve the HTTP API (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = AppConfig::load_from(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;

    info!("Configuration loaded successfully");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Migrate => migrate(config).await,
    }
}

async fn serve(config: AppConfig) -> Result<()> {
    let addr: SocketAddr = config
        .bind_address()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    info!("Server will bind to: {}", addr);

    let db_manager = open_database(&config).await?;

    if config.database.migrate_on_start {
        run_migrations(db_manager.pool().clone())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;
    }

    let state = AppState::with_database(db_manager.clone());
    info!("App: {} v{}", state.app_name, state.version);

    let app = create_app(state);
    let served = run_server(app, addr).await;

    db_manager.close().await;
    served?;

    info!("Server shutdown complete");
    Ok(())
}

async fn migrate(config: AppConfig) -> Result<()> {
    let db_manager = open_database(&config).await?;

    let migrated = run_migrations(db_manager.pool().clone()).await;
    db_manager.close().await;
    migrated.map_err(|e| anyhow::anyhow!("Failed to run database migrations: {}", e))?;

    info!("Migrations complete");
    Ok(())
}

async fn open_database(config: &AppConfig) -> Result<DatabaseManager> {
    info!("Initializing database connection: {}", config.database.url);

    let pool = get_database_pool(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create database pool: {}", e))?;

    Ok(DatabaseManager::new(pool))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let default_level = if cfg!(debug_assertions) {
            "debug"
        } else {
            "info"
        };

        format!(
            "itemsvc={level},itemsvc_core={level},tower_http={level}",
            level = default_level
        )
        .into()
    });

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let is_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    if is_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.pretty())
            .init();
    }
}
