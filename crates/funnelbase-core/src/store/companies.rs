//! Company CRUD. Domains are owned rows: created with the company, replaced
//! wholesale on update, cascaded on delete.

use super::{now, parse_enum, ts_from_sql, ts_to_sql, Store};
use crate::error::StoreError;
use funnelbase_types::{Company, Domain, Industry};
use rusqlite::{params, Connection, Row};
use serde::Deserialize;
use std::collections::HashMap;

/// Parameters for creating a company.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCompany {
    pub name: String,
    pub industry: Industry,
    /// Domain names; insertion order is preserved as relationship order.
    #[serde(default)]
    pub domains: Vec<String>,
}

/// Partial company update; `Some(domains)` replaces the whole domain set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub industry: Option<Industry>,
    pub domains: Option<Vec<String>>,
}

impl Store {
    pub fn create_company(&self, new: NewCompany) -> Result<Company, StoreError> {
        self.with_conn(|conn| {
            let ts = ts_to_sql(now());
            conn.execute(
                "INSERT INTO companies (name, industry, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
                params![new.name, new.industry.name(), ts, ts],
            )?;
            let id = conn.last_insert_rowid();
            insert_domains(conn, id, &new.domains, &ts)?;
            get_company(conn, id)
        })
    }

    pub fn get_company(&self, id: i64) -> Result<Company, StoreError> {
        self.with_conn(|conn| get_company(conn, id))
    }

    pub fn list_companies(&self) -> Result<Vec<Company>, StoreError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, industry, created_at, updated_at FROM companies ORDER BY id",
            )?;
            let mut companies = stmt
                .query_and_then([], company_from_row)?
                .collect::<Result<Vec<Company>, StoreError>>()?;

            let mut stmt = conn.prepare(
                "SELECT id, name, company_id, created_at, updated_at FROM domains ORDER BY id",
            )?;
            let domains = stmt
                .query_and_then([], domain_from_row)?
                .collect::<Result<Vec<Domain>, StoreError>>()?;

            let mut by_company: HashMap<i64, Vec<Domain>> = HashMap::new();
            for domain in domains {
                by_company.entry(domain.company_id).or_default().push(domain);
            }
            for company in &mut companies {
                company.domains = by_company.remove(&company.id).unwrap_or_default();
            }
            Ok(companies)
        })
    }

    pub fn update_company(&self, id: i64, update: CompanyUpdate) -> Result<Company, StoreError> {
        self.with_conn(|conn| {
            let current = get_company(conn, id)?;
            let name = update.name.unwrap_or(current.name);
            let industry = update.industry.unwrap_or(current.industry);
            let ts = ts_to_sql(now());
            conn.execute(
                "UPDATE companies SET name = ?1, industry = ?2, updated_at = ?3 WHERE id = ?4",
                params![name, industry.name(), ts, id],
            )?;
            if let Some(domains) = update.domains {
                conn.execute("DELETE FROM domains WHERE company_id = ?1", params![id])?;
                insert_domains(conn, id, &domains, &ts)?;
            }
            get_company(conn, id)
        })
    }

    pub fn delete_company(&self, id: i64) -> Result<(), StoreError> {
        self.with_conn(|conn| {
            let affected = conn.execute("DELETE FROM companies WHERE id = ?1", params![id])?;
            if affected == 0 {
                return Err(StoreError::NotFound { entity: "company", id });
            }
            Ok(())
        })
    }
}

fn insert_domains(
    conn: &Connection,
    company_id: i64,
    names: &[String],
    ts: &str,
) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "INSERT INTO domains (name, company_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
    )?;
    for name in names {
        stmt.execute(params![name, company_id, ts, ts])?;
    }
    Ok(())
}

fn get_company(conn: &Connection, id: i64) -> Result<Company, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, industry, created_at, updated_at FROM companies WHERE id = ?1",
    )?;
    let mut company = stmt
        .query_and_then(params![id], company_from_row)?
        .next()
        .unwrap_or(Err(StoreError::NotFound { entity: "company", id }))?;

    let mut stmt = conn.prepare(
        "SELECT id, name, company_id, created_at, updated_at FROM domains WHERE company_id = ?1 ORDER BY id",
    )?;
    company.domains = stmt
        .query_and_then(params![id], domain_from_row)?
        .collect::<Result<Vec<_>, StoreError>>()?;
    Ok(company)
}

fn company_from_row(row: &Row<'_>) -> Result<Company, StoreError> {
    let industry_text: String = row.get("industry")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(Company {
        id: row.get("id")?,
        name: row.get("name")?,
        industry: parse_enum("industry", &industry_text, Industry::from_name)?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
        domains: Vec::new(),
    })
}

fn domain_from_row(row: &Row<'_>) -> Result<Domain, StoreError> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;
    Ok(Domain {
        id: row.get("id")?,
        name: row.get("name")?,
        company_id: row.get("company_id")?,
        created_at: ts_from_sql(&created_at)?,
        updated_at: ts_from_sql(&updated_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewCompany {
        NewCompany {
            name: "Initech".into(),
            industry: Industry::Technology,
            domains: vec!["initech.com".into(), "initech.io".into()],
        }
    }

    #[test]
    fn create_keeps_domain_order() {
        let store = Store::open_in_memory().unwrap();
        let company = store.create_company(sample()).unwrap();
        let names: Vec<&str> = company.domains.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["initech.com", "initech.io"]);
    }

    #[test]
    fn update_replaces_domain_set() {
        let store = Store::open_in_memory().unwrap();
        let company = store.create_company(sample()).unwrap();
        let updated = store
            .update_company(
                company.id,
                CompanyUpdate {
                    domains: Some(vec!["initech.dev".into()]),
                    ..CompanyUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.domains.len(), 1);
        assert_eq!(updated.domains[0].name, "initech.dev");
        assert_eq!(updated.name, "Initech");
    }

    #[test]
    fn delete_cascades_domains() {
        let store = Store::open_in_memory().unwrap();
        let company = store.create_company(sample()).unwrap();
        store.delete_company(company.id).unwrap();
        let count: i64 = store
            .with_conn(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM domains", [], |row| row.get(0))?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn list_attaches_domains() {
        let store = Store::open_in_memory().unwrap();
        store.create_company(sample()).unwrap();
        store
            .create_company(NewCompany {
                name: "Globex".into(),
                industry: Industry::Energy,
                domains: vec![],
            })
            .unwrap();
        let companies = store.list_companies().unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].domains.len(), 2);
        assert!(companies[1].domains.is_empty());
    }
}
