mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestApp;

#[tokio::test]
async fn create_mechanic() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/mechanics",
            json!({ "name": "Alex Wrench", "specialization": "Engine" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Alex Wrench");
    assert_eq!(body["specialization"], "Engine");
    assert_eq!(body["is_active"], true);
}

#[tokio::test]
async fn get_mechanics() {
    let app = TestApp::new().await;
    app.post("/mechanics", json!({ "name": "Mech1", "specialization": "Brakes" }))
        .await;

    let (status, body) = app.get("/mechanics").await;
    assert_eq!(status, StatusCode::OK);
    let mechanics = body.as_array().unwrap();
    assert_eq!(mechanics.len(), 1);
    assert_eq!(mechanics[0]["name"], "Mech1");
}

#[tokio::test]
async fn mechanic_listing_cache_is_invalidated_on_create() {
    let app = TestApp::new().await;
    app.post("/mechanics", json!({ "name": "First" })).await;

    // Prime the cache.
    let (status, body) = app.get("/mechanics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    // A mutation must bust the cached listing, not wait out the TTL.
    app.post("/mechanics", json!({ "name": "Second" })).await;

    let (status, body) = app.get("/mechanics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_mechanic() {
    let app = TestApp::new().await;
    let (_, created) = app
        .post(
            "/mechanics",
            json!({ "name": "Old Name", "specialization": "General" }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app
        .put(&format!("/mechanics/{id}"), json!({ "name": "New Name" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "New Name");
    // Untouched fields keep their values.
    assert_eq!(body["specialization"], "General");
}

#[tokio::test]
async fn update_missing_mechanic_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.put("/mechanics/999", json!({ "name": "X" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Mechanic not found");
}

#[tokio::test]
async fn delete_mechanic() {
    let app = TestApp::new().await;
    let (_, created) = app
        .post(
            "/mechanics",
            json!({ "name": "Delete Me", "specialization": "None" }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = app.delete(&format!("/mechanics/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], format!("Mechanic {id} deleted"));

    let (status, body) = app.get("/mechanics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn mechanics_by_ticket_count() {
    let app = TestApp::new().await;
    let (_, token) = app.customer_with_token("cust@example.com").await;

    let (_, busy) = app
        .post("/mechanics", json!({ "name": "Busy Mech", "specialization": "Engine" }))
        .await;
    app.post("/mechanics", json!({ "name": "Free Mech", "specialization": "Brakes" }))
        .await;
    let busy_id = busy["id"].as_i64().unwrap();

    let (_, t1) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "Job 1", "vehicle": "Car" }),
            &token,
        )
        .await;
    let (_, t2) = app
        .post_auth(
            "/service-tickets",
            json!({ "description": "Job 2", "vehicle": "Car" }),
            &token,
        )
        .await;

    for ticket in [&t1, &t2] {
        let tid = ticket["id"].as_i64().unwrap();
        let (status, _) = app
            .put_auth(
                &format!("/service-tickets/{tid}/edit"),
                json!({ "add_ids": [busy_id], "remove_ids": [] }),
                &token,
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = app.get("/mechanics/by-ticket-count").await;
    assert_eq!(status, StatusCode::OK);

    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Busiest first; mechanics without tickets still appear.
    assert_eq!(rows[0]["name"], "Busy Mech");
    assert_eq!(rows[0]["ticket_count"], 2);
    assert_eq!(rows[1]["name"], "Free Mech");
    assert_eq!(rows[1]["ticket_count"], 0);
}
