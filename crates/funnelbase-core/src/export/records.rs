//! Wire-shape records for the remote system.
//!
//! One struct per [`ObjectType`], camelCase on the wire. Every record
//! carries the four common fields: `objectId` (string form of the local
//! primary key), `modifiedDate`, `isDeleted` (always false, hard deletes are
//! not propagated) and `url` (deep link back into this CRM).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of remote record. Fixed, not extensible at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ObjectType {
    Account,
    BusinessUser,
    Contact,
    Deal,
    Lead,
    Stage,
}

impl ObjectType {
    /// Wire form, used as the `objectType` query parameter.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Account => "ACCOUNT",
            Self::BusinessUser => "BUSINESS_USER",
            Self::Contact => "CONTACT",
            Self::Deal => "DEAL",
            Self::Lead => "LEAD",
            Self::Stage => "STAGE",
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// BUSINESS_USER record. Only the email address is propagated; name fields
/// deliberately are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessUserRecord {
    pub object_id: String,
    pub modified_date: String,
    pub is_deleted: bool,
    pub url: String,
    pub email_address: String,
}

/// ACCOUNT record for a company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub object_id: String,
    pub modified_date: String,
    pub is_deleted: bool,
    pub url: String,
    pub name: String,
    /// Domain names in relationship order; not guaranteed sorted.
    pub domains: Vec<String>,
    /// Industry enum name (wire name, not display label).
    pub industry: String,
}

/// CONTACT record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub object_id: String,
    pub modified_date: String,
    pub is_deleted: bool,
    pub url: String,
    pub account_id: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// DEAL record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealRecord {
    pub object_id: String,
    pub modified_date: String,
    pub is_deleted: bool,
    pub url: String,
    pub account_id: String,
    pub owner_id: String,
    pub name: String,
    pub created_date: String,
    /// Omitted entirely while the deal is still open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close_date: Option<String>,
    /// Status enum name, upper-cased.
    pub status: String,
    /// Stage enum name, case preserved.
    pub stage: String,
    pub amount: i64,
    pub description: Option<String>,
}

/// LEAD record. `account` is the free-text company name, not a foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRecord {
    pub object_id: String,
    pub modified_date: String,
    pub is_deleted: bool,
    pub url: String,
    pub email_address: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub owner_id: String,
    pub status: String,
    pub account: String,
    pub details: Option<String>,
}

/// STAGE reference record. Stages are not a local entity; the fixed
/// [`funnelbase_types::DealStage`] enumeration is exported so the remote
/// system can present stages in business order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageRecord {
    /// Ordinal of the stage in business order, as a string.
    pub object_id: String,
    pub name: String,
    pub is_active: bool,
    /// Ordinal + 1, so sort orders start at 1.
    pub sort_order: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_type_wire_names() {
        assert_eq!(ObjectType::BusinessUser.as_str(), "BUSINESS_USER");
        assert_eq!(
            serde_json::to_string(&ObjectType::BusinessUser).unwrap(),
            "\"BUSINESS_USER\""
        );
        let parsed: ObjectType = serde_json::from_str("\"ACCOUNT\"").unwrap();
        assert_eq!(parsed, ObjectType::Account);
    }

    #[test]
    fn open_deal_omits_close_date() {
        let record = DealRecord {
            object_id: "7".into(),
            modified_date: "2024-01-01T10:00:00Z".into(),
            is_deleted: false,
            url: "http://localhost:8210/deals/7".into(),
            account_id: "3".into(),
            owner_id: "1".into(),
            name: "Pilot".into(),
            created_date: "2024-01-01T09:00:00Z".into(),
            close_date: None,
            status: "OPEN".into(),
            stage: "prospecting".into(),
            amount: 1500,
            description: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("closeDate"));
        assert!(json.contains("\"description\":null"));
    }
}
