use axum::{http::StatusCode, middleware, response::IntoResponse, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::api;
use crate::auth::admin_auth_middleware;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let protected_api = Router::<AppState>::new()
        .nest("/api", api::router())
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware));

    let public_routes = Router::<AppState>::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check));

    protected_api
        .merge(public_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
}

async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, axum::Json(serde_json::json!({"status": "ok"})))
}
