//! Lead CRUD.

use super::{now, parse_enum, ts_from_sql, ts_to_sql, Store};
use crate::error::StoreError;
use funnelbase_types::{Lead, LeadStatus};
use rusqlite::{params, Connection, Row};
use serde::Deserialize;

/// Parameters for creating a lead.
#[derive(Debug, Clone, Deserialize)]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    /// Company name as free text; leads are not yet tied to an account.
    pub company: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub details: Option<String>,
    pub owner_id: i64,
    #[serde(default)]
    pub status: LeadStatus,
}

/// Partial lead update, including conversion links.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub details: Option<Option<String>>,
    pub owner_id: Option<i64>,
    pub converted_to_deal_id: Option<Option<i64>>,
    pub converted_to_contact_id: Option<Option<i64>>,
    pub converted_to_company_id: Option<Option<i64>>,
    pub status: Option<LeadStatus>,
}

impl Store {
    pub fn create_lead(&self, new: NewLead) -> Result<Lead, StoreError> {
        self.with_conn(|conn| {
            let ts = ts_to_sql(now());
            conn.execute(
                "INSERT INTO leads (first_name, last_name, company, email, phone, details, owner_id, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                params![
                    new.first_name,
                    new.last_name,
                    new.company,
                    new.email,
                    new.phone,
                    new.details,
                    new.owner_id,
                    new.status.name(),
                    ts,
                    ts,
                ],
            )?;
            get_lead(conn, conn.last_insert_rowid())
        })
    }

    pub fn get_lead(&self, id: i64) -> Result<Lead, StoreError> {
        self.with_conn(|conn| get_lead(conn, id))
    }

    pub fn list_leads(&self) -> Result<Vec<Lead>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, first_name, last_name, company, email, phone, details, owner_id,
                        converted_to_deal_id, converted_to_contact_id, converted_to_company_id,
                        status, created_at, updated_at
                 FROM leads ORDER BY id",
            )?;
            let leads = stmt
                .query_and_then([], lead_from_row)?
                .collect::<Result<Vec<_>, StoreError>>()?;
            Ok(leads)
        })
    }

    pub fn update_lead(&self, id: i64, update: LeadUpdate) -> Result<Lead, StoreError> {
        self.with_conn(|conn| {
            let current = get_lead(conn, id)?;
            let first_name = update.first_name.unwrap_or(current.first_name);
            let last_name = update.last_name.unwrap_or(current.last_name);
            let company = update.company.unwrap_or(current.company);
            let email = update.email.unwrap_or(current.email);
            let phone = update.phone.unwrap_or(current.phone);
            let details = update.details.unwrap_or(current.details);
            let owner_id = update.owner_id.unwrap_or(current.owner_id);
            let converted_to_deal_id =
                update.converted_to_deal_id.unwrap_or(current.converted_to_deal_id);
            let converted_to_contact_id =
                update.converted_to_contact_id.unwrap_or(current.converted_to_contact_id);
            let converted_to_company_id =
                update.converted_to_company_id.unwrap_or(current.converted_to_company_id);
            let status = update.status.unwrap_or(current.status);
            conn.execute(
                "UPDATE leads SET first_name = ?1, last_name = ?2, company = ?3, email = ?4, phone = ?5, details = ?6, owner_id = ?7,
                        converted_to_deal_id = ?8, converted_to_contact_id = ?9, converted_to_company_id = ?10, status = ?11, updated_at = ?12
                 WHERE id = ?13",
                params![
                    first_name,
                    last_name,
                    company,
                    email,
                    phone,
                    details,
                    owner_id,
                    converted_to_deal_id,
                    converted_to_contact_id,
                    converted_to_company_id,
                    status.name(),
                    ts_to_sql(now()),
                    id,
                ],
            )?;
            get_lead(conn, id)
        })
    }

    pub fn delete_lead(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM leads WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(StoreError::NotFound { entity: "lead", id });
            }
            Ok(())
        })
    }
}

fn get_lead(conn: &Connection, id: i64) -> Result<Lead, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, company, email, phone, details, owner_id,
                converted_to_deal_id, converted_to_contact_id, converted_to_company_id,
                status, created_at, updated_at
         FROM leads WHERE id = ?1",
    )?;
    let found = stmt
        .query_and_then(params![id], lead_from_row)?
        .next()
        .unwrap_or(Err(StoreError::NotFound { entity: "lead", id }));
    found
}

fn lead_from_row(row: &Row<'_>) -> Result<Lead, StoreError> {
    let status_text: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(Lead {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        company: row.get("company")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        details: row.get("details")?,
        owner_id: row.get("owner_id")?,
        converted_to_deal_id: row.get("converted_to_deal_id")?,
        converted_to_contact_id: row.get("converted_to_contact_id")?,
        converted_to_company_id: row.get("converted_to_company_id")?,
        status: parse_enum("status", &status_text, LeadStatus::from_name)?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}
