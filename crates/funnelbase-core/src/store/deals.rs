//! Deal CRUD.

use super::{now, parse_enum, ts_from_sql, ts_to_sql, Store};
use crate::error::StoreError;
use chrono::NaiveDateTime;
use funnelbase_types::{Deal, DealStage, DealStatus};
use rusqlite::{params, Connection, Row};
use serde::Deserialize;

/// Parameters for creating a deal. `open_date` defaults to now.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDeal {
    pub title: String,
    pub amount: i64,
    #[serde(default)]
    pub open_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub close_date: Option<NaiveDateTime>,
    pub company_id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub stage: DealStage,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: DealStatus,
}

/// Partial deal update. `close_date` and `description` use a double Option:
/// absent keeps the current value, explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DealUpdate {
    pub title: Option<String>,
    pub amount: Option<i64>,
    pub close_date: Option<Option<NaiveDateTime>>,
    pub company_id: Option<i64>,
    pub owner_id: Option<i64>,
    pub stage: Option<DealStage>,
    pub description: Option<Option<String>>,
    pub status: Option<DealStatus>,
}

impl Store {
    pub fn create_deal(&self, new: NewDeal) -> Result<Deal, StoreError> {
        self.with_conn(|conn| {
            let ts = ts_to_sql(now());
            let open_date = ts_to_sql(new.open_date.unwrap_or_else(now));
            conn.execute(
                "INSERT INTO deals (title, amount, open_date, close_date, company_id, owner_id, stage, description, status, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    new.title,
                    new.amount,
                    open_date,
                    new.close_date.map(ts_to_sql),
                    new.company_id,
                    new.owner_id,
                    new.stage.name(),
                    new.description,
                    new.status.name(),
                    ts,
                    ts,
                ],
            )?;
            get_deal(conn, conn.last_insert_rowid())
        })
    }

    pub fn get_deal(&self, id: i64) -> Result<Deal, StoreError> {
        self.with_conn(|conn| get_deal(conn, id))
    }

    pub fn list_deals(&self) -> Result<Vec<Deal>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, amount, open_date, close_date, company_id, owner_id, stage, description, status, created_at, updated_at
                 FROM deals ORDER BY id",
            )?;
            let deals = stmt
                .query_and_then([], deal_from_row)?
                .collect::<Result<Vec<_>, StoreError>>()?;
            Ok(deals)
        })
    }

    pub fn update_deal(&self, id: i64, update: DealUpdate) -> Result<Deal, StoreError> {
        self.with_conn(|conn| {
            let current = get_deal(conn, id)?;
            let title = update.title.unwrap_or(current.title);
            let amount = update.amount.unwrap_or(current.amount);
            let close_date = update.close_date.unwrap_or(current.close_date);
            let company_id = update.company_id.unwrap_or(current.company_id);
            let owner_id = update.owner_id.unwrap_or(current.owner_id);
            let stage = update.stage.unwrap_or(current.stage);
            let description = update.description.unwrap_or(current.description);
            let status = update.status.unwrap_or(current.status);
            conn.execute(
                "UPDATE deals SET title = ?1, amount = ?2, close_date = ?3, company_id = ?4, owner_id = ?5, stage = ?6, description = ?7, status = ?8, updated_at = ?9
                 WHERE id = ?10",
                params![
                    title,
                    amount,
                    close_date.map(ts_to_sql),
                    company_id,
                    owner_id,
                    stage.name(),
                    description,
                    status.name(),
                    ts_to_sql(now()),
                    id,
                ],
            )?;
            get_deal(conn, id)
        })
    }

    pub fn delete_deal(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM deals WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(StoreError::NotFound { entity: "deal", id });
            }
            Ok(())
        })
    }
}

fn get_deal(conn: &Connection, id: i64) -> Result<Deal, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, title, amount, open_date, close_date, company_id, owner_id, stage, description, status, created_at, updated_at
         FROM deals WHERE id = ?1",
    )?;
    let found = stmt
        .query_and_then(params![id], deal_from_row)?
        .next()
        .unwrap_or(Err(StoreError::NotFound { entity: "deal", id }));
    found
}

fn deal_from_row(row: &Row<'_>) -> Result<Deal, StoreError> {
    let open_date: String = row.get("open_date")?;
    let close_date: Option<String> = row.get("close_date")?;
    let stage_text: String = row.get("stage")?;
    let status_text: String = row.get("status")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(Deal {
        id: row.get("id")?,
        title: row.get("title")?,
        amount: row.get("amount")?,
        open_date: ts_from_sql(&open_date)?,
        close_date: close_date.as_deref().map(ts_from_sql).transpose()?,
        company_id: row.get("company_id")?,
        owner_id: row.get("owner_id")?,
        stage: parse_enum("stage", &stage_text, DealStage::from_name)?,
        description: row.get("description")?,
        status: parse_enum("status", &status_text, DealStatus::from_name)?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NewCompany, NewUser};
    use funnelbase_types::{Industry, Role};

    fn seeded_store() -> (Store, i64, i64) {
        let store = Store::open_in_memory().unwrap();
        let owner = store
            .create_user(NewUser {
                username: "ada".into(),
                email: "ada@example.com".into(),
                phone: "+1-555-0100".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                password: "h".into(),
                salt: "s".into(),
                role: Role::User,
                disabled: false,
            })
            .unwrap();
        let company = store
            .create_company(NewCompany {
                name: "Initech".into(),
                industry: Industry::Technology,
                domains: vec![],
            })
            .unwrap();
        (store, company.id, owner.id)
    }

    #[test]
    fn defaults_apply_on_create() {
        let (store, company_id, owner_id) = seeded_store();
        let deal = store
            .create_deal(NewDeal {
                title: "Pilot".into(),
                amount: 9_500,
                open_date: None,
                close_date: None,
                company_id,
                owner_id,
                stage: DealStage::default(),
                description: None,
                status: DealStatus::default(),
            })
            .unwrap();
        assert_eq!(deal.stage, DealStage::Prospecting);
        assert_eq!(deal.status, DealStatus::Open);
        assert!(deal.close_date.is_none());
    }

    #[test]
    fn closing_a_deal() {
        let (store, company_id, owner_id) = seeded_store();
        let deal = store
            .create_deal(NewDeal {
                title: "Rollout".into(),
                amount: 3_000_000,
                open_date: None,
                close_date: None,
                company_id,
                owner_id,
                stage: DealStage::NegotiationReview,
                description: Some("Year one".into()),
                status: DealStatus::Open,
            })
            .unwrap();

        let closed = store
            .update_deal(
                deal.id,
                DealUpdate {
                    stage: Some(DealStage::ClosedWon),
                    status: Some(DealStatus::Won),
                    close_date: Some(Some(now())),
                    ..DealUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(closed.status, DealStatus::Won);
        assert_eq!(closed.stage, DealStage::ClosedWon);
        assert!(closed.close_date.is_some());
    }
}
