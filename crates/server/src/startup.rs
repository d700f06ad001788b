use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Initialize logging via shared common utils
pub fn init_logging(cfg: &AppConfig) {
    common::utils::logging::init_logging(cfg.log.format == LogFormat::Json);
}

/// Load `.env`, then config file (or defaults + env when the file is missing)
pub fn load_config() -> Result<AppConfig, StartupError> {
    dotenv().ok();
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Resolves on Ctrl+C; the server then drains in-flight requests.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        return std::future::pending().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
}

/// Public entry: load config, init logging, then serve until Ctrl+C
pub async fn run() -> anyhow::Result<()> {
    let cfg = load_config()?;
    init_logging(&cfg);
    run_with_config(cfg).await
}

/// Connect, migrate if configured, build the app and serve it
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }

    let state = ServerState::from_db(db, cfg.search.clone());
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg.server.bind_addr().parse()?;
    info!(%addr, case_insensitive_search = cfg.search.case_insensitive, "starting contacts api");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
