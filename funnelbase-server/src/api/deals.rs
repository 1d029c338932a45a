//! Deal management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use funnelbase_core::store::{DealUpdate, NewDeal};
use funnelbase_types::Deal;

use super::blocking;
use crate::state::AppState;

pub async fn list_deals(
    State(state): State<AppState>,
) -> Result<Json<Vec<Deal>>, (StatusCode, String)> {
    let deals = blocking(state.store(), |store| store.list_deals()).await?;
    Ok(Json(deals))
}

pub async fn get_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deal>, (StatusCode, String)> {
    let deal = blocking(state.store(), move |store| store.get_deal(id)).await?;
    Ok(Json(deal))
}

pub async fn create_deal(
    State(state): State<AppState>,
    Json(new): Json<NewDeal>,
) -> Result<Json<Deal>, (StatusCode, String)> {
    let deal = blocking(state.store(), move |store| store.create_deal(new)).await?;
    Ok(Json(deal))
}

pub async fn update_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<DealUpdate>,
) -> Result<Json<Deal>, (StatusCode, String)> {
    let deal = blocking(state.store(), move |store| store.update_deal(id, update)).await?;
    Ok(Json(deal))
}

pub async fn delete_deal(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, (StatusCode, String)> {
    blocking(state.store(), move |store| store.delete_deal(id)).await?;
    Ok(Json(true))
}
