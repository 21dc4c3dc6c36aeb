mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_ticket() {
    let app = TestApp::new().await;
    let (owner, token) = app.customer_with_token("owner@example.com").await;

    let (status, body) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "Brake job", "vehicle": "Toyota Camry", "status": "open" }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["description"], "Brake job");
    assert_eq!(body["vehicle"], "Toyota Camry");
    assert_eq!(body["status"], "open");
    assert_eq!(body["customer_id"], owner.id);
    assert!(body["mechanics"].as_array().unwrap().is_empty());
    assert!(body["parts"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn create_ticket_defaults_status_to_open() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (status, body) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "No status given" }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "open");
}

#[tokio::test]
async fn create_ticket_requires_description() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (status, body) = app
        .post_auth("/service-tickets", json!({ "vehicle": "Car" }), &token)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "description is required");
}

#[tokio::test]
async fn create_ticket_requires_token() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/service-tickets", json!({ "description": "Nope" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_tickets() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    app.post_auth(
        "/service-tickets",
        json!({ "description": "Seed ticket", "vehicle": "Honda" }),
        &token,
    )
    .await;

    let (status, body) = app.get("/service-tickets").await;
    assert_eq!(status, StatusCode::OK);
    let tickets = body.as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["description"], "Seed ticket");
}

#[tokio::test]
async fn edit_ticket_mechanics() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (_, m1) = app
        .post("/mechanics", json!({ "name": "Mech1", "specialization": "Engine" }))
        .await;
    let (_, m2) = app
        .post("/mechanics", json!({ "name": "Mech2", "specialization": "Brakes" }))
        .await;
    let m1_id = m1["id"].as_i64().unwrap();
    let m2_id = m2["id"].as_i64().unwrap();

    let (_, ticket) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "Job", "vehicle": "Car" }),
            &token,
        )
        .await;
    let tid = ticket["id"].as_i64().unwrap();

    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/edit"),
            json!({ "add_ids": [m1_id, m2_id], "remove_ids": [] }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mechanics"].as_array().unwrap().len(), 2);

    // Remove one, re-add the other: set semantics, no duplicates.
    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/edit"),
            json!({ "add_ids": [m1_id], "remove_ids": [m2_id] }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let mechanics = body["mechanics"].as_array().unwrap();
    assert_eq!(mechanics.len(), 1);
    assert_eq!(mechanics[0], json!(m1_id));
}

#[tokio::test]
async fn edit_ticket_skips_unknown_mechanics() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (_, ticket) = app
        .post_auth("/service-tickets", json!({ "description": "Job" }), &token)
        .await;
    let tid = ticket["id"].as_i64().unwrap();

    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/edit"),
            json!({ "add_ids": [12345], "remove_ids": [99999] }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["mechanics"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn edit_ticket_of_another_customer_is_forbidden() {
    let app = TestApp::new().await;
    let (_, owner_token) = app.customer_with_token("owner@example.com").await;
    let (_, intruder_token) = app.customer_with_token("intruder@example.com").await;

    let (_, ticket) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "Private job" }),
            &owner_token,
        )
        .await;
    let tid = ticket["id"].as_i64().unwrap();

    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/edit"),
            json!({ "add_ids": [], "remove_ids": [] }),
            &intruder_token,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized to modify this ticket");
}

#[tokio::test]
async fn edit_missing_ticket_is_404() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (status, body) = app
        .put_auth(
            "/service-tickets/999/edit",
            json!({ "add_ids": [], "remove_ids": [] }),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Service ticket not found");
}

#[tokio::test]
async fn add_part_to_ticket() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (_, ticket) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "Job with parts", "vehicle": "Car" }),
            &token,
        )
        .await;
    let tid = ticket["id"].as_i64().unwrap();

    let (_, part) = app
        .post_auth(
            "/inventory",
            json!({ "name": "Brake Pad Set", "price": 89.99 }),
            &token,
        )
        .await;
    let part_id = part["id"].as_i64().unwrap();

    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/add-part/{part_id}"),
            json!({}),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parts"].as_array().unwrap().len(), 1);

    // Adding the same part again is a no-op.
    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/add-part/{part_id}"),
            json!({}),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["parts"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_missing_part_is_404() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("owner@example.com").await;

    let (_, ticket) = app
        .post_auth("/service-tickets", json!({ "description": "Job" }), &token)
        .await;
    let tid = ticket["id"].as_i64().unwrap();

    let (status, body) = app
        .put_auth(
            &format!("/service-tickets/{tid}/add-part/424242"),
            json!({}),
            &token,
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Inventory item not found");
}
