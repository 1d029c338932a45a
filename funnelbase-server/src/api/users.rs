//! User management handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use base64::prelude::{Engine, BASE64_STANDARD};
use funnelbase_core::store::{NewUser, UserUpdate};
use funnelbase_types::{Role, User};
use rand::RngCore;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::blocking;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    /// Cleartext password; hashed before it reaches the store.
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<User>>, (StatusCode, String)> {
    let users = blocking(state.store(), |store| store.list_users()).await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = blocking(state.store(), move |store| store.get_user(id)).await?;
    Ok(Json(user))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<Json<User>, (StatusCode, String)> {
    let salt = generate_salt();
    let password = hash_password(&payload.password, &salt);
    let new = NewUser {
        username: payload.username,
        email: payload.email,
        phone: payload.phone,
        first_name: payload.first_name,
        last_name: payload.last_name,
        password,
        salt,
        role: payload.role,
        disabled: false,
    };
    let user = blocking(state.store(), move |store| store.create_user(new)).await?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<User>, (StatusCode, String)> {
    let user = blocking(state.store(), move |store| store.update_user(id, update)).await?;
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<bool>, (StatusCode, String)> {
    blocking(state.store(), move |store| store.delete_user(id)).await?;
    Ok(Json(true))
}

fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE64_STANDARD.encode(bytes)
}

fn hash_password(password: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    BASE64_STANDARD.encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashing_is_deterministic_per_salt() {
        let salt = generate_salt();
        assert_eq!(hash_password("secret", &salt), hash_password("secret", &salt));
        assert_ne!(hash_password("secret", &salt), hash_password("other", &salt));

        let other_salt = generate_salt();
        assert_ne!(hash_password("secret", &salt), hash_password("secret", &other_salt));
    }
}
