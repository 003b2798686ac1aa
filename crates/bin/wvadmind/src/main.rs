//! # wvadmind: wview admin console daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise tracing
//! - Open the configuration database (running migrations) and the read-only
//!   archive and NOAA databases
//! - Construct the host adapter and the HTTP state
//! - Bind to a TCP port and serve until SIGINT/SIGTERM
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use wvadmin_adapter_host::LocalHostSystem;
use wvadmin_adapter_http_axum::router;
use wvadmin_adapter_http_axum::state::AppState;
use wvadmin_adapter_storage_sqlite_sqlx::{
    Config as DbConfig, Database, SqliteArchiveStatistics, SqliteConfigStore,
};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Databases
    let db = DbConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await
    .with_context(|| format!("failed to open {}", config.database.url))?;
    let archive = Database::open_read_only(&config.database.archive_url)
        .with_context(|| format!("invalid archive database {}", config.database.archive_url))?;
    let noaa = Database::open_read_only(&config.database.noaa_url)
        .with_context(|| format!("invalid NOAA database {}", config.database.noaa_url))?;

    // Adapters
    let store = SqliteConfigStore::new(db.pool().clone());
    let statistics = SqliteArchiveStatistics::new(archive.pool().clone(), noaa.pool().clone());
    let host = LocalHostSystem::new(config.host_config());

    // HTTP
    let state = AppState::new(store, host, statistics, config.http_options());
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(addr = %bind_addr, "wvadmind listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("wvadmind stopped");
    Ok(())
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
