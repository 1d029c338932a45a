//! API Routes
//!
//! REST endpoints: CRUD over the five entity tables plus export control.

mod companies;
mod contacts;
mod deals;
mod export;
mod leads;
mod users;

#[cfg(test)]
mod crud_tests;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use funnelbase_core::{Store, StoreError, SyncError};
use std::sync::Arc;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Users
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user).put(users::update_user).delete(users::delete_user),
        )
        // Companies
        .route("/companies", get(companies::list_companies).post(companies::create_company))
        .route(
            "/companies/:id",
            get(companies::get_company)
                .put(companies::update_company)
                .delete(companies::delete_company),
        )
        // Contacts
        .route("/contacts", get(contacts::list_contacts).post(contacts::create_contact))
        .route(
            "/contacts/:id",
            get(contacts::get_contact)
                .put(contacts::update_contact)
                .delete(contacts::delete_contact),
        )
        // Deals
        .route("/deals", get(deals::list_deals).post(deals::create_deal))
        .route(
            "/deals/:id",
            get(deals::get_deal).put(deals::update_deal).delete(deals::delete_deal),
        )
        // Leads
        .route("/leads", get(leads::list_leads).post(leads::create_lead))
        .route(
            "/leads/:id",
            get(leads::get_lead).put(leads::update_lead).delete(leads::delete_lead),
        )
        // Export control
        .route(
            "/export/integration",
            post(export::register_integration)
                .get(export::get_integration)
                .delete(export::delete_integration),
        )
        .route("/export/schema", post(export::update_schema))
        .route("/export/full-dump", post(export::full_dump))
        .route("/export/request-status/:request_id", get(export::request_status))
        .route("/export/objects", post(export::fetch_objects))
}

/// Runs a blocking store call off the async runtime and maps errors to
/// HTTP responses.
pub(crate) async fn blocking<T: Send + 'static>(
    store: Arc<Store>,
    f: impl FnOnce(&Store) -> Result<T, StoreError> + Send + 'static,
) -> Result<T, (StatusCode, String)> {
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("task panicked: {e}")))?
        .map_err(store_error)
}

pub(crate) fn store_error(err: StoreError) -> (StatusCode, String) {
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

pub(crate) fn sync_error(err: SyncError) -> (StatusCode, String) {
    let status = match &err {
        SyncError::NotConfigured => StatusCode::CONFLICT,
        SyncError::RemoteRejected { .. } => StatusCode::BAD_GATEWAY,
        SyncError::RemoteUnreachable(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}
