//! Schema registrar.
//!
//! The remote system must recognize our custom fields per object type
//! before it accepts records carrying them. The desired state is a fixed
//! table; the actual remote state is fetched and diffed against it.

use crate::error::SyncResult;
use crate::export::client::RemoteClient;
use crate::export::records::ObjectType;
use crate::export::timefmt::WireTimestamp;
use chrono::Utc;
use funnelbase_types::{Industry, LeadStatus};
use serde::Serialize;

/// Declaration of one custom field for an object type.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaField {
    /// Unique field name, stable across redeclarations.
    pub unique_name: String,
    /// Human-readable label.
    pub label: String,
    /// Type tag.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Ordered value list; picklists only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordered_value_list: Option<Vec<String>>,
    /// Referenced object type; references only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<ObjectType>,
    /// Declaration timestamp in wire format.
    pub last_modified: String,
    pub is_deleted: bool,
}

/// Custom field type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    String,
    Picklist,
    Reference,
}

impl SchemaField {
    fn string(unique_name: &str, label: &str, last_modified: &str) -> Self {
        Self {
            unique_name: unique_name.to_string(),
            label: label.to_string(),
            field_type: FieldType::String,
            ordered_value_list: None,
            reference_to: None,
            last_modified: last_modified.to_string(),
            is_deleted: false,
        }
    }

    fn picklist(unique_name: &str, label: &str, values: Vec<String>, last_modified: &str) -> Self {
        Self {
            unique_name: unique_name.to_string(),
            label: label.to_string(),
            field_type: FieldType::Picklist,
            ordered_value_list: Some(values),
            reference_to: None,
            last_modified: last_modified.to_string(),
            is_deleted: false,
        }
    }

    fn reference(
        unique_name: &str,
        label: &str,
        target: ObjectType,
        last_modified: &str,
    ) -> Self {
        Self {
            unique_name: unique_name.to_string(),
            label: label.to_string(),
            field_type: FieldType::Reference,
            ordered_value_list: None,
            reference_to: Some(target),
            last_modified: last_modified.to_string(),
            is_deleted: false,
        }
    }
}

/// The desired custom-field table. Fixed; not user-configurable at runtime.
pub fn desired_fields() -> Vec<(ObjectType, Vec<SchemaField>)> {
    let now = Utc::now().to_wire();
    vec![
        (
            ObjectType::Account,
            vec![SchemaField::picklist(
                "industry",
                "Industry",
                Industry::ALL.iter().map(|i| i.name().to_string()).collect(),
                &now,
            )],
        ),
        (
            ObjectType::Deal,
            vec![SchemaField::string("description", "Description", &now)],
        ),
        (
            ObjectType::Lead,
            vec![
                SchemaField::reference("ownerId", "Owner", ObjectType::BusinessUser, &now),
                SchemaField::picklist(
                    "status",
                    "Status",
                    LeadStatus::ALL.iter().map(|s| s.name().to_string()).collect(),
                    &now,
                ),
                SchemaField::string("account", "Account", &now),
                SchemaField::string("details", "Details", &now),
            ],
        ),
    ]
}

/// Checks whether every desired field is already selected remotely.
///
/// Short-circuits on the first missing field across any object type, so a
/// `false` return says nothing about the remaining types. Callers wanting a
/// full diff must not rely on this; [`ensure`] redeclares everything anyway.
pub async fn check(client: &RemoteClient, integration_id: &str) -> SyncResult<bool> {
    for (object_type, fields) in desired_fields() {
        let selected = client.selected_field_names(integration_id, object_type).await?;
        for field in &fields {
            if !selected.contains(&field.unique_name) {
                tracing::debug!(
                    object_type = %object_type,
                    field = %field.unique_name,
                    "schema field missing remotely"
                );
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Brings the remote schema up to the desired state.
///
/// When [`check`] reports a gap, the *entire* desired table is redeclared
/// for *every* object type, not just the missing fields; redeclaring
/// already-present fields is a no-op on the remote side by API contract.
pub async fn ensure(client: &RemoteClient, integration_id: &str) -> SyncResult<()> {
    if check(client, integration_id).await? {
        return Ok(());
    }
    for (object_type, fields) in desired_fields() {
        client.declare_fields(integration_id, object_type, &fields).await?;
        tracing::info!(object_type = %object_type, fields = fields.len(), "schema declared");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desired_table_covers_three_types() {
        let table = desired_fields();
        let types: Vec<ObjectType> = table.iter().map(|(t, _)| *t).collect();
        assert_eq!(
            types,
            vec![ObjectType::Account, ObjectType::Deal, ObjectType::Lead]
        );
    }

    #[test]
    fn industry_picklist_lists_all_values_in_order() {
        let table = desired_fields();
        let (_, account_fields) = &table[0];
        let industry = &account_fields[0];
        let values = industry.ordered_value_list.as_ref().unwrap();
        assert_eq!(values.len(), 31);
        assert_eq!(values[0], "agriculture");
        assert_eq!(values[30], "utilities");
    }

    #[test]
    fn lead_owner_references_business_user() {
        let table = desired_fields();
        let (_, lead_fields) = &table[2];
        let owner = &lead_fields[0];
        assert_eq!(owner.field_type, FieldType::Reference);
        assert_eq!(owner.reference_to, Some(ObjectType::BusinessUser));

        let json = serde_json::to_value(owner).unwrap();
        assert_eq!(json["uniqueName"], "ownerId");
        assert_eq!(json["type"], "REFERENCE");
        assert_eq!(json["referenceTo"], "BUSINESS_USER");
        assert!(json.get("orderedValueList").is_none());
    }

    #[test]
    fn string_fields_omit_optional_keys() {
        let table = desired_fields();
        let (_, deal_fields) = &table[1];
        let json = serde_json::to_value(&deal_fields[0]).unwrap();
        assert_eq!(json["uniqueName"], "description");
        assert_eq!(json["type"], "STRING");
        assert!(json.get("referenceTo").is_none());
        assert!(json.get("orderedValueList").is_none());
        assert_eq!(json["isDeleted"], false);
    }
}
