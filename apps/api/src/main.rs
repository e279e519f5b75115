mod chat;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profile;
mod registry;
mod routes;
mod services;
mod session;
mod skill_gap;
mod state;


use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::profile::store::{MemoryProfileStore, PgProfileStore, ProfileStore};
use crate::registry::store::{ApplicationStore, MemoryApplicationStore, PgApplicationStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Karyatra API v{}", env!("CARGO_PKG_VERSION"));

    let (applications, profiles): (Arc<dyn ApplicationStore>, Arc<dyn ProfileStore>) =
        match config.database_url.as_deref() {
            Some(url) => {
                let pool = create_pool(url).await?;
                (
                    Arc::new(PgApplicationStore::new(pool.clone())),
                    Arc::new(PgProfileStore::new(pool)),
                )
            }
            None => {
                warn!("DATABASE_URL not set; profiles and applications are kept in memory");
                (
                    Arc::new(MemoryApplicationStore::default()),
                    Arc::new(MemoryProfileStore::default()),
                )
            }
        };

    info!("Skill match mode: {:?}", config.match_mode);
    let state = AppState::new(config.clone(), applications, profiles)?;
    let session = state.session.clone();

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    session.teardown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
