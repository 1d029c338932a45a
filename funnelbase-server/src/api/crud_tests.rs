use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use funnelbase_core::store::NewCompany;
use funnelbase_types::{DealStage, DealStatus, Industry, Role};

use super::companies::{create_company, delete_company, get_company, list_companies};
use super::deals::{create_deal, update_deal};
use super::export::full_dump;
use super::users::{create_user, list_users, CreateUserRequest};
use crate::test_helpers::test_app_state;

fn user_payload() -> CreateUserRequest {
    CreateUserRequest {
        username: "ada".into(),
        email: "ada@example.com".into(),
        phone: "+1-555-0100".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password: "hunter2".into(),
        role: Role::Admin,
    }
}

#[tokio::test]
async fn test_create_and_list_users() {
    let state = test_app_state();
    let Json(created) =
        create_user(State(state.clone()), Json(user_payload())).await.expect("create user");
    assert_eq!(created.username, "ada");
    // The stored hash is never the cleartext and never leaves the API.
    assert_ne!(created.password, "hunter2");

    let Json(users) = list_users(State(state)).await.expect("list users");
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_company_crud_round_trip() {
    let state = test_app_state();
    let Json(company) = create_company(
        State(state.clone()),
        Json(NewCompany {
            name: "Initech".into(),
            industry: Industry::Technology,
            domains: vec!["initech.com".into()],
        }),
    )
    .await
    .expect("create company");

    let Json(fetched) =
        get_company(State(state.clone()), Path(company.id)).await.expect("get company");
    assert_eq!(fetched.domains.len(), 1);

    delete_company(State(state.clone()), Path(company.id)).await.expect("delete company");
    let err = get_company(State(state.clone()), Path(company.id)).await.unwrap_err();
    assert_eq!(err.0, StatusCode::NOT_FOUND);

    let Json(companies) = list_companies(State(state)).await.expect("list companies");
    assert!(companies.is_empty());
}

#[tokio::test]
async fn test_close_a_deal() {
    let state = test_app_state();
    let Json(owner) = create_user(State(state.clone()), Json(user_payload())).await.unwrap();
    let Json(company) = create_company(
        State(state.clone()),
        Json(NewCompany {
            name: "Initech".into(),
            industry: Industry::Technology,
            domains: vec![],
        }),
    )
    .await
    .unwrap();

    let Json(deal) = create_deal(
        State(state.clone()),
        Json(serde_json::from_value(serde_json::json!({
            "title": "Rollout",
            "amount": 3_000_000,
            "company_id": company.id,
            "owner_id": owner.id,
        })).unwrap()),
    )
    .await
    .expect("create deal");
    assert_eq!(deal.status, DealStatus::Open);

    let Json(closed) = update_deal(
        State(state),
        Path(deal.id),
        Json(serde_json::from_value(serde_json::json!({
            "status": "won",
            "stage": "closed_won",
            "close_date": "2024-03-15T17:00:00",
        })).unwrap()),
    )
    .await
    .expect("close deal");
    assert_eq!(closed.status, DealStatus::Won);
    assert_eq!(closed.stage, DealStage::ClosedWon);
    assert!(closed.close_date.is_some());
}

#[tokio::test]
async fn test_export_disabled_returns_503() {
    let state = test_app_state();
    let err = full_dump(State(state)).await.unwrap_err();
    assert_eq!(err.0, StatusCode::SERVICE_UNAVAILABLE);
}
