//! Lead management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use funnelbase_core::store::{LeadUpdate, NewLead};
use funnelbase_types::Lead;

use super::blocking;
use crate::state::AppState;

pub async fn list_leads(
    State(state): State<AppState>,
) -> Result<Json<Vec<Lead>>, (StatusCode, String)> {
    let leads = blocking(state.store(), |store| store.list_leads()).await?;
    Ok(Json(leads))
}

pub async fn get_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Lead>, (StatusCode, String)> {
    let lead = blocking(state.store(), move |store| store.get_lead(id)).await?;
    Ok(Json(lead))
}

pub async fn create_lead(
    State(state): State<AppState>,
    Json(new): Json<NewLead>,
) -> Result<Json<Lead>, (StatusCode, String)> {
    let lead = blocking(state.store(), move |store| store.create_lead(new)).await?;
    Ok(Json(lead))
}

pub async fn update_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<LeadUpdate>,
) -> Result<Json<Lead>, (StatusCode, String)> {
    let lead = blocking(state.store(), move |store| store.update_lead(id, update)).await?;
    Ok(Json(lead))
}

pub async fn delete_lead(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, (StatusCode, String)> {
    blocking(state.store(), move |store| store.delete_lead(id)).await?;
    Ok(Json(true))
}
