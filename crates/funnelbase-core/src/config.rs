//! Sync configuration.
//!
//! The remote credentials and URLs are carried in an explicit struct that is
//! handed to [`crate::export::RemoteClient`] and
//! [`crate::export::ExportService`] at construction time. There is no
//! process-wide mutable configuration.

use serde::Deserialize;

/// Per-call HTTP timeout applied to every remote request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the outbound export engine.
#[derive(Debug, Clone, Deserialize)]
pub struct SyncConfig {
    /// Base URL of the remote CRM-ingestion API.
    pub api_url: String,
    /// Basic-auth access key.
    pub access_key: String,
    /// Basic-auth access key secret.
    pub access_key_secret: String,
    /// Public base URL of this CRM, used to build deep links back to
    /// exported entities.
    pub base_url: String,
    /// Per-call timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl SyncConfig {
    /// Reads the sync configuration from `FUNNELBASE_*` environment
    /// variables. Returns `None` when the remote API is not configured at
    /// all (the server then runs with export disabled), and an error when it
    /// is only partially configured.
    pub fn from_env() -> Result<Option<Self>, String> {
        let api_url = match std::env::var("FUNNELBASE_REMOTE_URL") {
            Ok(url) if !url.is_empty() => url,
            _ => return Ok(None),
        };
        let access_key = std::env::var("FUNNELBASE_ACCESS_KEY")
            .map_err(|_| "FUNNELBASE_REMOTE_URL is set but FUNNELBASE_ACCESS_KEY is missing")?;
        let access_key_secret = std::env::var("FUNNELBASE_ACCESS_KEY_SECRET").map_err(|_| {
            "FUNNELBASE_REMOTE_URL is set but FUNNELBASE_ACCESS_KEY_SECRET is missing"
        })?;
        let base_url = std::env::var("FUNNELBASE_PUBLIC_URL")
            .unwrap_or_else(|_| "http://localhost:8210".to_string());
        let timeout_secs = std::env::var("FUNNELBASE_REMOTE_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Ok(Some(Self {
            api_url,
            access_key,
            access_key_secret,
            base_url,
            timeout_secs,
        }))
    }
}
