//! Company management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use funnelbase_core::store::{CompanyUpdate, NewCompany};
use funnelbase_types::Company;

use super::blocking;
use crate::state::AppState;

pub async fn list_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<Company>>, (StatusCode, String)> {
    let companies = blocking(state.store(), |store| store.list_companies()).await?;
    Ok(Json(companies))
}

pub async fn get_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Company>, (StatusCode, String)> {
    let company = blocking(state.store(), move |store| store.get_company(id)).await?;
    Ok(Json(company))
}

pub async fn create_company(
    State(state): State<AppState>,
    Json(new): Json<NewCompany>,
) -> Result<Json<Company>, (StatusCode, String)> {
    let company = blocking(state.store(), move |store| store.create_company(new)).await?;
    Ok(Json(company))
}

pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CompanyUpdate>,
) -> Result<Json<Company>, (StatusCode, String)> {
    let company = blocking(state.store(), move |store| store.update_company(id, update)).await?;
    Ok(Json(company))
}

pub async fn delete_company(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, (StatusCode, String)> {
    blocking(state.store(), move |store| store.delete_company(id)).await?;
    Ok(Json(true))
}
