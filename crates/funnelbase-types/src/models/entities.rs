//! CRM entity models.
//!
//! Timestamps are naive UTC (`NaiveDateTime`): the store keeps wall-clock
//! UTC without an offset, and the export engine's wire formatter appends the
//! `Z` suffix for exactly this case.

use super::{DealStage, DealStatus, Industry, LeadStatus, Role};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A CRM business user: a seller or manager who owns deals and leads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Local primary key
    pub id: i64,
    /// Unique login name
    pub username: String,
    /// Unique email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Salted password hash; never serialized
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Per-user salt; never serialized
    #[serde(skip_serializing, default)]
    pub salt: String,
    /// Access role
    #[serde(default)]
    pub role: Role,
    /// Whether the user may log in
    #[serde(default)]
    pub disabled: bool,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

/// An active customer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    /// Local primary key
    pub id: i64,
    /// Unique company name
    pub name: String,
    /// Industry classification
    pub industry: Industry,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
    /// Associated web domains, in relationship order
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// A web domain owned by a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Domain {
    /// Local primary key
    pub id: i64,
    /// Unique domain name
    pub name: String,
    /// Owning company
    pub company_id: i64,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

/// A person associated with a customer account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Local primary key
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Unique email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Owning company
    pub company_id: i64,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

/// A qualified opportunity or contract in a specific account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deal {
    /// Local primary key
    pub id: i64,
    /// Deal title
    pub title: String,
    /// Deal amount in minor currency units
    pub amount: i64,
    /// When the deal was opened (UTC)
    pub open_date: NaiveDateTime,
    /// When the deal was closed (UTC); `None` while still open
    pub close_date: Option<NaiveDateTime>,
    /// Account the deal belongs to
    pub company_id: i64,
    /// Owning business user
    pub owner_id: i64,
    /// Pipeline stage
    #[serde(default)]
    pub stage: DealStage,
    /// Free-text description
    pub description: Option<String>,
    /// Outcome
    #[serde(default)]
    pub status: DealStatus,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

/// A potential customer not yet associated with an account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Lead {
    /// Local primary key
    pub id: i64,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Company name as free text, NOT a foreign key
    pub company: String,
    /// Unique email address
    pub email: String,
    /// Phone number
    pub phone: String,
    /// Free-text notes
    pub details: Option<String>,
    /// Owning business user
    pub owner_id: i64,
    /// Deal this lead converted into, if any
    pub converted_to_deal_id: Option<i64>,
    /// Contact this lead converted into, if any
    pub converted_to_contact_id: Option<i64>,
    /// Company this lead converted into, if any
    pub converted_to_company_id: Option<i64>,
    /// Lifecycle status
    #[serde(default)]
    pub status: LeadStatus,
    /// Creation timestamp (UTC)
    pub created_at: NaiveDateTime,
    /// Last modification timestamp (UTC)
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(9, 30, 0).unwrap()
    }

    #[test]
    fn user_never_serializes_credentials() {
        let user = User {
            id: 1,
            username: "ada".into(),
            email: "ada@example.com".into(),
            phone: "+1-555-0100".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            password: "hash".into(),
            salt: "salt".into(),
            role: Role::Admin,
            disabled: false,
            created_at: ts(),
            updated_at: ts(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("hash"));
        assert!(!json.contains("salt"));
        assert!(json.contains("ada@example.com"));
    }
}
