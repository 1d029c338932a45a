//! Embedded SQLite store for the CRM entities.
//!
//! One connection behind a mutex; callers in async contexts wrap store
//! calls in `spawn_blocking`. Enum columns hold the canonical wire names
//! from `funnelbase-types`, timestamps are naive UTC.

mod companies;
mod contacts;
mod deals;
mod leads;
mod users;

pub use companies::{CompanyUpdate, NewCompany};
pub use contacts::{ContactUpdate, NewContact};
pub use deals::{DealUpdate, NewDeal};
pub use leads::{LeadUpdate, NewLead};
pub use users::{NewUser, UserUpdate};

use crate::error::{StoreError, SyncError, SyncResult};
use crate::export::{EntitySnapshot, SnapshotSource};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// The CRM store.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (and if necessary creates) the database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Opens a fresh in-memory database. Used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        init_schema(&conn)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    pub(crate) fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let conn = self.conn.lock();
        f(&conn)
    }

    /// Reads all five entity tables in one pass.
    pub fn snapshot_sync(&self) -> Result<EntitySnapshot, StoreError> {
        Ok(EntitySnapshot {
            users: self.list_users()?,
            companies: self.list_companies()?,
            contacts: self.list_contacts()?,
            deals: self.list_deals()?,
            leads: self.list_leads()?,
        })
    }
}

/// [`SnapshotSource`] adapter that moves the blocking read off the async
/// runtime.
pub struct StoreSnapshots(pub Arc<Store>);

#[async_trait]
impl SnapshotSource for StoreSnapshots {
    async fn snapshot(&self) -> SyncResult<EntitySnapshot> {
        let store = Arc::clone(&self.0);
        tokio::task::spawn_blocking(move || store.snapshot_sync())
            .await
            .map_err(|e| SyncError::Snapshot(format!("snapshot task panicked: {e}")))?
            .map_err(|e| SyncError::Snapshot(e.to_string()))
    }
}

fn init_schema(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            password TEXT NOT NULL,
            salt TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user',
            disabled INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS companies (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            industry TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS domains (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            company_id INTEGER NOT NULL REFERENCES companies(id) ON DELETE CASCADE,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS contacts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL,
            company_id INTEGER NOT NULL REFERENCES companies(id),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS deals (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            amount INTEGER NOT NULL,
            open_date TEXT NOT NULL,
            close_date TEXT,
            company_id INTEGER NOT NULL REFERENCES companies(id),
            owner_id INTEGER NOT NULL REFERENCES users(id),
            stage TEXT NOT NULL DEFAULT 'prospecting',
            description TEXT,
            status TEXT NOT NULL DEFAULT 'open',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            company TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT NOT NULL,
            details TEXT,
            owner_id INTEGER NOT NULL REFERENCES users(id),
            converted_to_deal_id INTEGER REFERENCES deals(id),
            converted_to_contact_id INTEGER REFERENCES contacts(id),
            converted_to_company_id INTEGER REFERENCES companies(id),
            status TEXT NOT NULL DEFAULT 'new',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_domains_company ON domains (company_id);
        CREATE INDEX IF NOT EXISTS idx_contacts_company ON contacts (company_id);
        CREATE INDEX IF NOT EXISTS idx_deals_company ON deals (company_id);
        CREATE INDEX IF NOT EXISTS idx_deals_owner ON deals (owner_id);
        CREATE INDEX IF NOT EXISTS idx_leads_owner ON leads (owner_id);",
    )?;
    Ok(())
}

const SQL_TS: &str = "%Y-%m-%d %H:%M:%S%.f";

pub(crate) fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub(crate) fn ts_to_sql(ts: NaiveDateTime) -> String {
    ts.format(SQL_TS).to_string()
}

pub(crate) fn ts_from_sql(text: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(text, SQL_TS)
        .map_err(|_| StoreError::Corrupt { column: "timestamp", value: text.to_string() })
}

pub(crate) fn parse_enum<T>(
    column: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, StoreError> {
    parse(value).ok_or_else(|| StoreError::Corrupt { column, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_round_trip() {
        let ts = now();
        let text = ts_to_sql(ts);
        assert_eq!(ts_from_sql(&text).unwrap(), ts);
    }

    #[test]
    fn schema_initializes_twice() {
        let store = Store::open_in_memory().unwrap();
        store.with_conn(|conn| init_schema(conn)).unwrap();
    }

    #[test]
    fn open_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crm.db");
        {
            let store = Store::open(&path).unwrap();
            store
                .create_company(crate::store::NewCompany {
                    name: "Initech".into(),
                    industry: funnelbase_types::Industry::Technology,
                    domains: vec![],
                })
                .unwrap();
        }
        let store = Store::open(&path).unwrap();
        assert_eq!(store.list_companies().unwrap().len(), 1);
    }
}
