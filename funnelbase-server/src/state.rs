//! Application State
//!
//! Holds shared state for the server: the CRM store, the optional export
//! service, and the admin API key.

use axum::http::StatusCode;
use funnelbase_core::{ExportService, Store};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub store: Arc<Store>,
    /// `None` when the remote API is not configured; export endpoints then
    /// answer 503 instead of failing at startup.
    pub export: Option<Arc<ExportService>>,
    pub admin_key: String,
}

impl AppState {
    pub fn new(store: Arc<Store>, export: Option<Arc<ExportService>>, admin_key: String) -> Self {
        Self { inner: Arc::new(AppStateInner { store, export, admin_key }) }
    }

    pub fn store(&self) -> Arc<Store> {
        Arc::clone(&self.inner.store)
    }

    /// The export service, or a ready-made 503 for handlers.
    pub fn export(&self) -> Result<Arc<ExportService>, (StatusCode, String)> {
        self.inner.export.clone().ok_or_else(|| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "export is not configured; set FUNNELBASE_REMOTE_URL".to_string(),
            )
        })
    }
}
