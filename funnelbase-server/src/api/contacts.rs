//! Contact management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use funnelbase_core::store::{ContactUpdate, NewContact};
use funnelbase_types::Contact;

use super::blocking;
use crate::state::AppState;

pub async fn list_contacts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Contact>>, (StatusCode, String)> {
    let contacts = blocking(state.store(), |store| store.list_contacts()).await?;
    Ok(Json(contacts))
}

pub async fn get_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Contact>, (StatusCode, String)> {
    let contact = blocking(state.store(), move |store| store.get_contact(id)).await?;
    Ok(Json(contact))
}

pub async fn create_contact(
    State(state): State<AppState>,
    Json(new): Json<NewContact>,
) -> Result<Json<Contact>, (StatusCode, String)> {
    let contact = blocking(state.store(), move |store| store.create_contact(new)).await?;
    Ok(Json(contact))
}

pub async fn update_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<ContactUpdate>,
) -> Result<Json<Contact>, (StatusCode, String)> {
    let contact = blocking(state.store(), move |store| store.update_contact(id, update)).await?;
    Ok(Json(contact))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, (StatusCode, String)> {
    blocking(state.store(), move |store| store.delete_contact(id)).await?;
    Ok(Json(true))
}
