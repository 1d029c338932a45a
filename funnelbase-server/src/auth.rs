//! Admin API-key authentication for the REST API.

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

use crate::state::AppState;

pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if request.method() == axum::http::Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    if state.inner.admin_key.is_empty() {
        tracing::error!("Admin auth is required but FUNNELBASE_ADMIN_KEY is empty");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let api_key = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").or(Some(s)))
        .or_else(|| request.headers().get("x-api-key").and_then(|h| h.to_str().ok()));

    let authorized = api_key.is_some_and(|k| constant_time_compare(k, &state.inner.admin_key));
    if !authorized {
        tracing::warn!("Rejected request to {} with bad or missing API key", request.uri().path());
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_rejects_different_lengths() {
        assert!(!constant_time_compare("short", "longer-key"));
    }

    #[test]
    fn compare_accepts_equal_keys() {
        assert!(constant_time_compare("the-key", "the-key"));
    }
}
