//! # mudstored: mudstore daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Initialise logging
//! - Open the connection pool and create the schema
//! - Construct storage implementations (adapters)
//! - Construct application services, injecting storages via port traits
//! - Build the axum router, injecting application services
//! - Bind to a TCP port and serve until SIGTERM/SIGINT
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer. No domain logic belongs here.

mod config;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mudstore_adapter_http_axum::state::AppState;
use mudstore_adapter_storage_sqlx::{
    SqlxItemStorage, SqlxLinkStorage, SqlxPlayerStorage, SqlxRoomStorage, SqlxUserStorage,
};
use mudstore_app::services::item_service::ItemService;
use mudstore_app::services::link_service::LinkService;
use mudstore_app::services::player_service::PlayerService;
use mudstore_app::services::room_service::RoomService;
use mudstore_app::services::user_service::UserService;

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("failed to load configuration")?;

    let filter = EnvFilter::try_new(&config.logging.filter)
        .with_context(|| format!("invalid log filter {:?}", config.logging.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Database
    let db = config
        .storage()
        .build()
        .await
        .context("failed to open database")?;
    let pool = db.pool().clone();
    let queries = db.query_builder();

    // Storages
    let rooms = SqlxRoomStorage::new(pool.clone(), queries);
    let links = SqlxLinkStorage::new(pool.clone(), queries);
    let items = SqlxItemStorage::new(pool.clone(), queries);
    let players = SqlxPlayerStorage::new(pool.clone(), queries);
    let users = SqlxUserStorage::new(pool, queries);

    // HTTP
    let state = AppState::new(
        RoomService::new(rooms),
        LinkService::new(links),
        ItemService::new(items),
        PlayerService::new(players),
        UserService::new(users),
    );
    let app = mudstore_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, dialect = ?db.dialect(), "mudstored listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shutdown complete");
    Ok(())
}

/// Resolve on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "cannot listen for Ctrl+C");
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
                tracing::error!(error = %err, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
