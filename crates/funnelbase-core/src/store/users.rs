//! User CRUD.

use super::{now, parse_enum, ts_from_sql, ts_to_sql, Store};
use crate::error::StoreError;
use funnelbase_types::{Role, User};
use rusqlite::{params, Connection, Row};
use serde::Deserialize;

/// Parameters for creating a user. `password` is the salted hash, never the
/// cleartext; hashing happens at the API boundary.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub salt: String,
    pub role: Role,
    pub disabled: bool,
}

/// Partial user update; `None` fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub disabled: Option<bool>,
}

impl Store {
    pub fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        self.with_conn(|conn| {
            let ts = ts_to_sql(now());
            conn.execute(
                "INSERT INTO users (username, email, phone, first_name, last_name, password, salt, role, disabled, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    new.username,
                    new.email,
                    new.phone,
                    new.first_name,
                    new.last_name,
                    new.password,
                    new.salt,
                    new.role.name(),
                    new.disabled,
                    ts,
                    ts,
                ],
            )?;
            get_user(conn, conn.last_insert_rowid())
        })
    }

    pub fn get_user(&self, id: i64) -> Result<User, StoreError> {
        self.with_conn(|conn| get_user(conn, id))
    }

    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, username, email, phone, first_name, last_name, password, salt, role, disabled, created_at, updated_at
                 FROM users ORDER BY id",
            )?;
            let users = stmt
                .query_and_then([], user_from_row)?
                .collect::<Result<Vec<_>, StoreError>>()?;
            Ok(users)
        })
    }

    pub fn update_user(&self, id: i64, update: UserUpdate) -> Result<User, StoreError> {
        self.with_conn(|conn| {
            let current = get_user(conn, id)?;
            let email = update.email.unwrap_or(current.email);
            let phone = update.phone.unwrap_or(current.phone);
            let first_name = update.first_name.unwrap_or(current.first_name);
            let last_name = update.last_name.unwrap_or(current.last_name);
            let role = update.role.unwrap_or(current.role);
            let disabled = update.disabled.unwrap_or(current.disabled);
            conn.execute(
                "UPDATE users SET email = ?1, phone = ?2, first_name = ?3, last_name = ?4, role = ?5, disabled = ?6, updated_at = ?7
                 WHERE id = ?8",
                params![email, phone, first_name, last_name, role.name(), disabled, ts_to_sql(now()), id],
            )?;
            get_user(conn, id)
        })
    }

    pub fn delete_user(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(StoreError::NotFound { entity: "user", id });
            }
            Ok(())
        })
    }
}

fn get_user(conn: &Connection, id: i64) -> Result<User, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, email, phone, first_name, last_name, password, salt, role, disabled, created_at, updated_at
         FROM users WHERE id = ?1",
    )?;
    let found = stmt
        .query_and_then(params![id], user_from_row)?
        .next()
        .unwrap_or(Err(StoreError::NotFound { entity: "user", id }));
    found
}

fn user_from_row(row: &Row<'_>) -> Result<User, StoreError> {
    let role_text: String = row.get("role")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        password: row.get("password")?,
        salt: row.get("salt")?,
        role: parse_enum("role", &role_text, Role::from_name)?,
        disabled: row.get("disabled")?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewUser {
        NewUser {
            username: "ada".into(),
            email: "ada@example.com".into(),
            phone: "+1-555-0100".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "hashed".into(),
            salt: "salted".into(),
            role: Role::Admin,
            disabled: false,
        }
    }

    #[test]
    fn create_get_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let created = store.create_user(sample()).unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.role, Role::Admin);

        let fetched = store.get_user(created.id).unwrap();
        assert_eq!(fetched, created);
    }

    #[test]
    fn update_changes_only_given_fields() {
        let store = Store::open_in_memory().unwrap();
        let created = store.create_user(sample()).unwrap();

        let updated = store
            .update_user(
                created.id,
                UserUpdate { disabled: Some(true), ..UserUpdate::default() },
            )
            .unwrap();
        assert!(updated.disabled);
        assert_eq!(updated.email, created.email);
        assert_eq!(updated.username, created.username);
    }

    #[test]
    fn delete_missing_is_not_found() {
        let store = Store::open_in_memory().unwrap();
        let err = store.delete_user(99).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "user", id: 99 }));
    }
}
