//! Integration tests for the investment workflow: creation, slot
//! accounting, listing and the projection quote.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_profile, get, get_auth, post_json_auth, test_app};
use serde_json::json;

const PHONE: &str = "9876543210";

async fn available_slots(app: &axum::Router, project_id: &str, model_id: &str) -> i64 {
    let response = get(app, &format!("/api/projects/{project_id}/models")).await;
    let body = body_json(response).await;
    body.as_array()
        .unwrap()
        .iter()
        .find(|m| m["id"] == model_id)
        .expect("model listed")["availableSlots"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn creating_an_investment_computes_and_decrements() {
    let (app, _state) = test_app();
    let cookie = create_profile(&app, PHONE, "Asha Rao").await;

    let response = post_json_auth(
        &app,
        "/api/investments",
        json!({ "projectId": "aura", "modelId": "aura-gold", "slots": 2 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["amount"], 200_000);
    assert_eq!(body["slots"], 2);
    assert_eq!(body["projectName"], "Aura");
    assert_eq!(body["modelName"], "Gold");
    assert_eq!(body["expectedReturns"], 12.0);
    assert_eq!(body["lockInPeriod"], 3);
    assert_eq!(body["status"], "active");
    assert!(body["maturityDate"].is_string());

    assert_eq!(available_slots(&app, "aura", "aura-gold").await, 3);

    let listed = get_auth(&app, "/api/investments", &cookie).await;
    assert_eq!(listed.status(), StatusCode::OK);
    let listed = body_json(listed).await;
    assert_eq!(listed.as_array().map(|a| a.len()), Some(1));
    assert_eq!(listed[0]["id"], body["id"]);
}

#[tokio::test]
async fn oversized_request_fails_and_leaves_state_alone() {
    let (app, _state) = test_app();
    let cookie = create_profile(&app, PHONE, "Asha Rao").await;

    // subha-gold seeds with 10 slots; asking for 11 must change nothing.
    let response = post_json_auth(
        &app,
        "/api/investments",
        json!({ "projectId": "subha", "modelId": "subha-gold", "slots": 11 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INSUFFICIENT_SLOTS");
    assert_eq!(body["message"], "Not enough slots available");

    assert_eq!(available_slots(&app, "subha", "subha-gold").await, 10);

    let listed = body_json(get_auth(&app, "/api/investments", &cookie).await).await;
    assert_eq!(listed.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn unknown_references_are_404() {
    let (app, _state) = test_app();
    let cookie = create_profile(&app, PHONE, "Asha Rao").await;

    let cases = [
        json!({ "projectId": "atlantis", "modelId": "aura-gold", "slots": 1 }),
        json!({ "projectId": "aura", "modelId": "aura-diamond", "slots": 1 }),
        // A real model, but of the other project.
        json!({ "projectId": "aura", "modelId": "subha-gold", "slots": 1 }),
    ];
    for body in cases {
        let response = post_json_auth(&app, "/api/investments", body, &cookie).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    assert_eq!(available_slots(&app, "aura", "aura-gold").await, 5);
    assert_eq!(available_slots(&app, "subha", "subha-gold").await, 10);
}

#[tokio::test]
async fn zero_slots_are_a_validation_error() {
    let (app, _state) = test_app();
    let cookie = create_profile(&app, PHONE, "Asha Rao").await;

    let response = post_json_auth(
        &app,
        "/api/investments",
        json!({ "projectId": "aura", "modelId": "aura-gold", "slots": 0 }),
        &cookie,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn investments_require_a_session() {
    let (app, _state) = test_app();

    let response = get(&app, "/api/investments").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = common::post_json(
        &app,
        "/api/investments",
        json!({ "projectId": "aura", "modelId": "aura-gold", "slots": 1 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn investments_are_scoped_to_their_owner() {
    let (app, _state) = test_app();
    let asha = create_profile(&app, PHONE, "Asha Rao").await;
    let ravi = create_profile(&app, "9123456780", "Ravi Kumar").await;

    post_json_auth(
        &app,
        "/api/investments",
        json!({ "projectId": "aura", "modelId": "aura-virtual", "slots": 1 }),
        &asha,
    )
    .await;

    let mine = body_json(get_auth(&app, "/api/investments", &asha).await).await;
    assert_eq!(mine.as_array().map(|a| a.len()), Some(1));

    let theirs = body_json(get_auth(&app, "/api/investments", &ravi).await).await;
    assert_eq!(theirs.as_array().map(|a| a.len()), Some(0));
}

#[tokio::test]
async fn projection_quote_matches_the_compound_formula() {
    let (app, _state) = test_app();

    let response = get(&app, "/api/projects/aura/models/aura-gold/projection?slots=2").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["principal"], 200_000);
    // 200000 * 1.12^3, rounded.
    assert_eq!(body["projectedValue"], 280_986);
    assert_eq!(body["roi"], 12.0);
    assert_eq!(body["lockInPeriod"], 3);
    assert!(body["maturityDate"].is_string());
}

#[tokio::test]
async fn projection_quote_defaults_to_one_slot() {
    let (app, _state) = test_app();
    let response = get(&app, "/api/projects/aura/models/aura-gold/projection").await;
    let body = body_json(response).await;
    assert_eq!(body["slots"], 1);
    assert_eq!(body["principal"], 100_000);
}

#[tokio::test]
async fn projection_quote_rejects_bad_slots_and_unknown_models() {
    let (app, _state) = test_app();

    let response = get(&app, "/api/projects/aura/models/aura-gold/projection?slots=0").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(&app, "/api/projects/aura/models/subha-gold/projection").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
