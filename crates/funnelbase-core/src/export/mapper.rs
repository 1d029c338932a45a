//! Entity → wire record projections.
//!
//! Pure functions: no side effects, no network or disk access. Mapping the
//! same entity twice yields identical output.

use crate::export::records::{
    AccountRecord, BusinessUserRecord, ContactRecord, DealRecord, LeadRecord, StageRecord,
};
use crate::export::timefmt::WireTimestamp;
use funnelbase_types::{Company, Contact, Deal, DealStage, Lead, User};

pub fn map_user(user: &User, base_url: &str) -> BusinessUserRecord {
    BusinessUserRecord {
        object_id: user.id.to_string(),
        modified_date: user.updated_at.to_wire(),
        is_deleted: false,
        url: format!("{base_url}/users/{}", user.id),
        email_address: user.email.clone(),
    }
}

pub fn map_company(company: &Company, base_url: &str) -> AccountRecord {
    AccountRecord {
        object_id: company.id.to_string(),
        modified_date: company.updated_at.to_wire(),
        is_deleted: false,
        url: format!("{base_url}/companies/{}", company.id),
        name: company.name.clone(),
        domains: company.domains.iter().map(|d| d.name.clone()).collect(),
        industry: company.industry.name().to_string(),
    }
}

pub fn map_contact(contact: &Contact, base_url: &str) -> ContactRecord {
    ContactRecord {
        object_id: contact.id.to_string(),
        modified_date: contact.updated_at.to_wire(),
        is_deleted: false,
        url: format!("{base_url}/contacts/{}", contact.id),
        account_id: contact.company_id.to_string(),
        email_address: contact.email.clone(),
        first_name: contact.first_name.clone(),
        last_name: contact.last_name.clone(),
        phone_number: contact.phone.clone(),
    }
}

pub fn map_deal(deal: &Deal, base_url: &str) -> DealRecord {
    DealRecord {
        object_id: deal.id.to_string(),
        modified_date: deal.updated_at.to_wire(),
        is_deleted: false,
        url: format!("{base_url}/deals/{}", deal.id),
        account_id: deal.company_id.to_string(),
        owner_id: deal.owner_id.to_string(),
        name: deal.title.clone(),
        created_date: deal.open_date.to_wire(),
        close_date: deal.close_date.map(|d| d.to_wire()),
        status: deal.status.name().to_uppercase(),
        stage: deal.stage.name().to_string(),
        amount: deal.amount,
        description: deal.description.clone(),
    }
}

pub fn map_lead(lead: &Lead, base_url: &str) -> LeadRecord {
    LeadRecord {
        object_id: lead.id.to_string(),
        modified_date: lead.updated_at.to_wire(),
        is_deleted: false,
        url: format!("{base_url}/leads/{}", lead.id),
        email_address: lead.email.clone(),
        first_name: lead.first_name.clone(),
        last_name: lead.last_name.clone(),
        phone_number: lead.phone.clone(),
        owner_id: lead.owner_id.to_string(),
        status: lead.status.name().to_string(),
        account: lead.company.clone(),
        details: lead.details.clone(),
    }
}

/// Reference data for the fixed stage enumeration, in business order.
pub fn stage_records() -> Vec<StageRecord> {
    DealStage::ALL
        .iter()
        .enumerate()
        .map(|(ordinal, stage)| StageRecord {
            object_id: ordinal.to_string(),
            name: stage.name().to_string(),
            is_active: true,
            sort_order: ordinal + 1,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use funnelbase_types::{DealStatus, Domain, Industry, LeadStatus, Role};

    const BASE: &str = "http://localhost:8210";

    fn ts(h: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    fn company() -> Company {
        Company {
            id: 11,
            name: "Initech".into(),
            industry: Industry::Technology,
            created_at: ts(8),
            updated_at: ts(9),
            domains: vec![
                Domain {
                    id: 1,
                    name: "initech.com".into(),
                    company_id: 11,
                    created_at: ts(8),
                    updated_at: ts(8),
                },
                Domain {
                    id: 2,
                    name: "initech.io".into(),
                    company_id: 11,
                    created_at: ts(8),
                    updated_at: ts(8),
                },
            ],
        }
    }

    #[test]
    fn mapping_is_idempotent() {
        let company = company();
        assert_eq!(map_company(&company, BASE), map_company(&company, BASE));
    }

    #[test]
    fn user_maps_email_only() {
        let user = User {
            id: 5,
            username: "pgibbons".into(),
            email: "peter@initech.com".into(),
            phone: "+1-555-0105".into(),
            first_name: "Peter".into(),
            last_name: "Gibbons".into(),
            password: String::new(),
            salt: String::new(),
            role: Role::User,
            disabled: false,
            created_at: ts(8),
            updated_at: ts(10),
        };
        let record = map_user(&user, BASE);
        assert_eq!(record.object_id, "5");
        assert_eq!(record.email_address, "peter@initech.com");
        assert_eq!(record.url, "http://localhost:8210/users/5");
        assert_eq!(record.modified_date, "2024-03-15T10:00:00Z");
        assert!(!record.is_deleted);

        // No name fields are propagated for business users.
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("firstName").is_none());
        assert!(json.get("lastName").is_none());
    }

    #[test]
    fn company_preserves_domain_names() {
        let company = company();
        let record = map_company(&company, BASE);
        assert_eq!(record.industry, "technology");

        let expected: std::collections::HashSet<&str> =
            company.domains.iter().map(|d| d.name.as_str()).collect();
        let actual: std::collections::HashSet<&str> =
            record.domains.iter().map(String::as_str).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn won_deal_maps_status_stage_and_close_date() {
        let deal = Deal {
            id: 42,
            title: "Enterprise rollout".into(),
            amount: 3_000_000,
            open_date: ts(9),
            close_date: Some(ts(17)),
            company_id: 11,
            owner_id: 5,
            stage: DealStage::ClosedWon,
            description: Some("Multi-year".into()),
            status: DealStatus::Won,
            created_at: ts(9),
            updated_at: ts(18),
        };
        let record = map_deal(&deal, BASE);
        assert_eq!(record.status, "WON");
        assert_eq!(record.stage, "closed_won");
        assert_eq!(record.amount, 3_000_000);
        assert_eq!(record.close_date.as_deref(), Some("2024-03-15T17:00:00Z"));
        assert_eq!(record.account_id, "11");
        assert_eq!(record.owner_id, "5");
        assert_eq!(record.name, "Enterprise rollout");
    }

    #[test]
    fn open_deal_has_no_close_date() {
        let deal = Deal {
            id: 43,
            title: "Pilot".into(),
            amount: 9_500,
            open_date: ts(9),
            close_date: None,
            company_id: 11,
            owner_id: 5,
            stage: DealStage::Prospecting,
            description: None,
            status: DealStatus::Open,
            created_at: ts(9),
            updated_at: ts(9),
        };
        let record = map_deal(&deal, BASE);
        assert_eq!(record.status, "OPEN");
        assert!(record.close_date.is_none());
    }

    #[test]
    fn lead_account_is_free_text() {
        let lead = Lead {
            id: 9,
            first_name: "Joanna".into(),
            last_name: "Smith".into(),
            company: "Chotchkie's".into(),
            email: "joanna@example.com".into(),
            phone: "+1-555-0109".into(),
            details: Some("Met at expo".into()),
            owner_id: 5,
            converted_to_deal_id: None,
            converted_to_contact_id: None,
            converted_to_company_id: None,
            status: LeadStatus::Contacted,
            created_at: ts(8),
            updated_at: ts(11),
        };
        let record = map_lead(&lead, BASE);
        assert_eq!(record.account, "Chotchkie's");
        assert_eq!(record.status, "contacted");
        assert_eq!(record.owner_id, "5");
    }

    #[test]
    fn stage_records_are_ordinal() {
        let stages = stage_records();
        assert_eq!(stages.len(), 10);
        assert_eq!(stages[0].object_id, "0");
        assert_eq!(stages[0].name, "prospecting");
        assert_eq!(stages[0].sort_order, 1);
        assert_eq!(stages[9].name, "closed_lost");
        assert_eq!(stages[9].sort_order, 10);
        assert!(stages.iter().all(|s| s.is_active));
    }
}
