//! Test helpers for funnelbase-server unit tests.

use std::sync::Arc;

use funnelbase_core::Store;

use crate::state::AppState;

/// Create a minimal `AppState` for testing: fresh in-memory store, no
/// export service, fixed admin key.
pub fn test_app_state() -> AppState {
    let store = Arc::new(Store::open_in_memory().expect("failed to open in-memory store"));
    AppState::new(store, None, "test-admin-key".to_string())
}
