//! Funnelbase Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Serves the CRM CRUD REST API on /api/*
//! - Drives the outbound export engine (schema bring-up, full dumps,
//!   request tracking) on /api/export/*
//!
//! Configuration is env-driven: FUNNELBASE_PORT, FUNNELBASE_DB,
//! FUNNELBASE_ADMIN_KEY and the FUNNELBASE_REMOTE_* credentials.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

mod api;
mod auth;
mod router;
mod state;

#[cfg(test)]
mod test_helpers;

use funnelbase_core::store::StoreSnapshots;
use funnelbase_core::{ExportService, Store, SyncConfig};
use state::AppState;

const DEFAULT_PORT: u16 = 8210;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let port: u16 = std::env::var("FUNNELBASE_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let db_path =
        std::env::var("FUNNELBASE_DB").unwrap_or_else(|_| "funnelbase.db".to_string());
    let store = Arc::new(
        Store::open(&db_path).map_err(|e| anyhow::anyhow!("failed to open {db_path}: {e}"))?,
    );
    info!("CRM store ready at {}", db_path);

    let export = match SyncConfig::from_env().map_err(|e| anyhow::anyhow!(e))? {
        Some(config) => {
            let snapshots = Arc::new(StoreSnapshots(Arc::clone(&store)));
            let service = ExportService::new(&config, snapshots)
                .map_err(|e| anyhow::anyhow!("failed to build export service: {e}"))?;
            info!("Export engine configured for {}", config.api_url);
            Some(Arc::new(service))
        }
        None => {
            warn!("FUNNELBASE_REMOTE_URL not set; export endpoints disabled");
            None
        }
    };

    let admin_key = std::env::var("FUNNELBASE_ADMIN_KEY").unwrap_or_default();
    if admin_key.is_empty() {
        warn!("FUNNELBASE_ADMIN_KEY not set; all /api requests will be rejected");
    }

    let state = AppState::new(store, export, admin_key);
    let app = router::build_router(state);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API available at http://localhost:{}/api/", port);

    axum::serve(listener, app).await?;

    Ok(())
}
