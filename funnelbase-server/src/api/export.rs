//! Export control handlers: integration lifecycle, schema bring-up, full
//! dump and async-request tracking.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use funnelbase_core::{DumpReport, ObjectType};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::sync_error;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RegisterIntegrationRequest {
    pub name: String,
    pub owner_email: String,
}

#[derive(Serialize)]
pub struct IntegrationResponse {
    pub integration_id: String,
}

#[derive(Deserialize)]
pub struct DeleteIntegrationRequest {
    pub integration_id: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

pub async fn register_integration(
    State(state): State<AppState>,
    Json(payload): Json<RegisterIntegrationRequest>,
) -> Result<Json<IntegrationResponse>, (StatusCode, String)> {
    let export = state.export()?;
    let integration_id = export
        .register_integration(&payload.name, &payload.owner_email)
        .await
        .map_err(sync_error)?;
    Ok(Json(IntegrationResponse { integration_id }))
}

pub async fn get_integration(
    State(state): State<AppState>,
) -> Result<Json<IntegrationResponse>, (StatusCode, String)> {
    let export = state.export()?;
    let integration_id = export.integration_id().await.map_err(sync_error)?;
    Ok(Json(IntegrationResponse { integration_id }))
}

pub async fn delete_integration(
    State(state): State<AppState>,
    Json(payload): Json<DeleteIntegrationRequest>,
) -> Result<Json<bool>, (StatusCode, String)> {
    let export = state.export()?;
    export.delete_integration(&payload.integration_id).await.map_err(sync_error)?;
    Ok(Json(true))
}

pub async fn update_schema(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, (StatusCode, String)> {
    let export = state.export()?;
    export.ensure_schema().await.map_err(sync_error)?;
    Ok(Json(MessageResponse { message: "Schema updated successfully.".to_string() }))
}

pub async fn full_dump(
    State(state): State<AppState>,
) -> Result<Json<DumpReport>, (StatusCode, String)> {
    let export = state.export()?;
    let report = export.run_full_dump().await.map_err(sync_error)?;
    Ok(Json(report))
}

pub async fn request_status(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let export = state.export()?;
    let outcome = export.request_status(&request_id).await.map_err(sync_error)?;
    Ok(Json(serde_json::json!({
        "status": outcome.status_str(),
        "errors": outcome.errors(),
    })))
}

#[derive(Deserialize)]
pub struct FetchObjectsRequest {
    pub object_type: ObjectType,
    pub object_ids: Vec<String>,
}

pub async fn fetch_objects(
    State(state): State<AppState>,
    Json(payload): Json<FetchObjectsRequest>,
) -> Result<Json<Value>, (StatusCode, String)> {
    let export = state.export()?;
    let objects = export
        .fetch_remote_objects(payload.object_type, &payload.object_ids)
        .await
        .map_err(sync_error)?;
    Ok(Json(objects))
}
