//! Contact CRUD.

use super::{now, ts_from_sql, ts_to_sql, Store};
use crate::error::StoreError;
use funnelbase_types::Contact;
use rusqlite::{params, Connection, Row};
use serde::Deserialize;

/// Parameters for creating a contact.
#[derive(Debug, Clone, Deserialize)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company_id: i64,
}

/// Partial contact update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company_id: Option<i64>,
}

impl Store {
    pub fn create_contact(&self, new: NewContact) -> Result<Contact, StoreError> {
        self.with_conn(|conn| {
            let ts = ts_to_sql(now());
            conn.execute(
                "INSERT INTO contacts (first_name, last_name, email, phone, company_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![new.first_name, new.last_name, new.email, new.phone, new.company_id, ts, ts],
            )?;
            get_contact(conn, conn.last_insert_rowid())
        })
    }

    pub fn get_contact(&self, id: i64) -> Result<Contact, StoreError> {
        self.with_conn(|conn| get_contact(conn, id))
    }

    pub fn list_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, email, phone, company_id, created_at, updated_at
                 FROM contacts ORDER BY id",
            )?;
            let contacts = stmt
                .query_and_then([], contact_from_row)?
                .collect::<Result<Vec<_>, StoreError>>()?;
            Ok(contacts)
        })
    }

    pub fn update_contact(&self, id: i64, update: ContactUpdate) -> Result<Contact, StoreError> {
        self.with_conn(|conn| {
            let current = get_contact(conn, id)?;
            let first_name = update.first_name.unwrap_or(current.first_name);
            let last_name = update.last_name.unwrap_or(current.last_name);
            let email = update.email.unwrap_or(current.email);
            let phone = update.phone.unwrap_or(current.phone);
            let company_id = update.company_id.unwrap_or(current.company_id);
            conn.execute(
                "UPDATE contacts SET first_name = ?1, last_name = ?2, email = ?3, phone = ?4, company_id = ?5, updated_at = ?6
                 WHERE id = ?7",
                params![first_name, last_name, email, phone, company_id, ts_to_sql(now()), id],
            )?;
            get_contact(conn, id)
        })
    }

    pub fn delete_contact(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM contacts WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(StoreError::NotFound { entity: "contact", id });
            }
            Ok(())
        })
    }
}

fn get_contact(conn: &Connection, id: i64) -> Result<Contact, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, email, phone, company_id, created_at, updated_at
         FROM contacts WHERE id = ?1",
    )?;
    let found = stmt
        .query_and_then(params![id], contact_from_row)?
        .next()
        .unwrap_or(Err(StoreError::NotFound { entity: "contact", id }));
    found
}

fn contact_from_row(row: &Row<'_>) -> Result<Contact, StoreError> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(Contact {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        company_id: row.get("company_id")?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewCompany;
    use funnelbase_types::Industry;

    fn store_with_company() -> (Store, i64) {
        let store = Store::open_in_memory().unwrap();
        let company = store
            .create_company(NewCompany {
                name: "Initech".into(),
                industry: Industry::Technology,
                domains: vec![],
            })
            .unwrap();
        (store, company.id)
    }

    #[test]
    fn create_and_update() {
        let (store, company_id) = store_with_company();
        let contact = store
            .create_contact(NewContact {
                first_name: "Samir".into(),
                last_name: "N.".into(),
                email: "samir@initech.com".into(),
                phone: "+1-555-0111".into(),
                company_id,
            })
            .unwrap();

        let updated = store
            .update_contact(
                contact.id,
                ContactUpdate { phone: Some("+1-555-0112".into()), ..ContactUpdate::default() },
            )
            .unwrap();
        assert_eq!(updated.phone, "+1-555-0112");
        assert_eq!(updated.email, contact.email);
    }

    #[test]
    fn create_without_company_fails() {
        let store = Store::open_in_memory().unwrap();
        let result = store.create_contact(NewContact {
            first_name: "No".into(),
            last_name: "Company".into(),
            email: "x@example.com".into(),
            phone: "+1-555-0000".into(),
            company_id: 42,
        });
        assert!(matches!(result, Err(StoreError::Database(_))));
    }
}
