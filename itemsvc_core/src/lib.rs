//! Core library for the item service: business rules, storage and HTTP routes.

pub mod config;
pub mod database;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::{AppConfig, DatabaseConfig, ServerConfig};
pub use database::{
    get_database_pool, run_migrations, DatabaseManager, InMemoryItemRepository, ItemRepository,
    ItemRepositoryTrait,
};
pub use error::{AppError, ErrorKind, ItemError, RepositoryError, Result};
pub use handlers::routes::create_routes;
pub use models::{Item, ItemRequest};
pub use services::ItemManager;

use axum::Router;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub db_manager: Option<DatabaseManager>,
    pub item_manager: ItemManager,
}

impl AppState {
    pub fn new(item_manager: ItemManager) -> Self {
        Self {
            app_name: "Item Service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            db_manager: None,
            item_manager,
        }
    }

    /// Wires the SQLite-backed repository over the manager's pool.
    pub fn with_database(db_manager: DatabaseManager) -> Self {
        let item_repository = ItemRepository::new(db_manager.pool().clone());
        let mut state = Self::new(ItemManager::new(item_repository));
        state.db_manager = Some(db_manager);
        state
    }
}

pub fn create_app(state: AppState) -> Router {
    create_routes()
        .layer(middleware::logging_layer())
        .with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
