//! Signup Server
//!
//! Backend for the marketing site forms: demo requests and newsletter
//! signups, kept in memory or in an embedded SQLite database.

mod app;
mod config;
mod handlers;
mod storage;
mod validation;

use anyhow::{Context, Result};
use signup_core::SubmissionStore;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

pub use app::AppState;
use crate::config::{ServerConfig, StorageBackend};
use storage::{MemoryStore, SqliteStore};

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Signup Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        "Config loaded: bind={}, storage={:?}",
        config.bind_address, config.storage
    );

    let store = open_store(&config).await?;

    let app = app::router(AppState::new(store), config.static_dir.as_deref());
    if let Some(dir) = &config.static_dir {
        info!("Serving static files from: {}", dir.display());
    }

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Server listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

async fn open_store(config: &ServerConfig) -> Result<Arc<dyn SubmissionStore>> {
    match config.storage {
        StorageBackend::Memory => {
            info!("Using in-memory submission store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Sqlite => {
            let store = SqliteStore::open(&config.database_path)
                .await
                .context("Failed to initialize database")?;
            Ok(Arc::new(store))
        }
    }
}
