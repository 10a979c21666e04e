mod common;

use axum::http::StatusCode;
use common::{PASSWORD, TestApp, data_id, hospital_payload, ids, message, unique_email};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn super_admin_manages_hospitals() {
    let app = TestApp::new();
    let token = app.super_admin().await;

    let (status, body) = app
        .post("/api/hospitals", &token, hospital_payload("Mercy General"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = data_id(&body);
    assert!(body["data"]["createdBy"].is_string());
    assert_eq!(body["data"]["bedCapacity"], 250);

    let (status, body) = app
        .put(
            &format!("/api/hospitals/{id}"),
            &token,
            json!({ "bedCapacity": 300, "website": "https://mercy.example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["bedCapacity"], 300);
    assert_eq!(body["data"]["name"], "Mercy General");

    let (status, body) = app.get(&format!("/api/hospitals/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["website"], "https://mercy.example.com");

    let (status, body) = app.delete(&format!("/api/hospitals/{id}"), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), "Hospital deleted successfully");

    let (status, _) = app.get(&format!("/api/hospitals/{id}"), &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_license_number_conflicts() {
    let app = TestApp::new();
    let token = app.super_admin().await;

    let mut payload = hospital_payload("First");
    payload["licenseNumber"] = json!("LIC-SHARED");
    let (status, _) = app.post("/api/hospitals", &token, payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    payload["name"] = json!("Second");
    let (status, body) = app.post("/api/hospitals", &token, payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(message(&body).contains("license"), "{body}");
}

#[tokio::test]
async fn hospital_scoped_roles_see_only_their_hospital() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let h2 = app.hospital(&super_token, "H2").await;
    let admin_token = app.hospital_admin(&super_token, &h1).await;

    let (status, body) = app.get("/api/hospitals", &super_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);

    let (status, body) = app.get("/api/hospitals", &admin_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![h1.clone()]);

    let (status, _) = app.get(&format!("/api/hospitals/{h1}"), &admin_token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/hospitals/{h2}"), &admin_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message(&body), "Unauthorized to view this hospital");
}

#[tokio::test]
async fn hospital_role_reads_its_own_hospital() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;

    let email = unique_email("front-desk");
    let (status, _) = app
        .register(json!({
            "name": "Front Desk",
            "email": email,
            "password": PASSWORD,
            "role": "HOSPITAL",
            "hospitalId": h1
        }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let token = app.token_for(&email).await;

    let (status, body) = app.get("/api/hospitals", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![h1]);

    let (status, _) = app
        .post("/api/hospitals", &token, hospital_payload("Nope"))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn missing_hospital_is_not_found_before_forbidden() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let admin_token = app.hospital_admin(&super_token, &h1).await;

    let missing = Uuid::new_v4();
    for token in [&super_token, &admin_token] {
        let (status, body) = app.get(&format!("/api/hospitals/{missing}"), token).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message(&body), "Hospital not found");
    }

    let (status, _) = app
        .put(&format!("/api/hospitals/{missing}"), &super_token, json!({ "name": "X" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.delete(&format!("/api/hospitals/{missing}"), &super_token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_super_admin_mutates_hospitals() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let admin_token = app.hospital_admin(&super_token, &h1).await;

    let (status, body) = app
        .put(&format!("/api/hospitals/{h1}"), &admin_token, json!({ "name": "Mine" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(message(&body), "Access denied: role HOSPITAL_ADMIN is not permitted");

    let (status, _) = app.delete(&format!("/api/hospitals/{h1}"), &admin_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn hospital_with_dependents_cannot_be_deleted() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    app.hospital_admin(&super_token, &h1).await;

    let (status, body) = app.delete(&format!("/api/hospitals/{h1}"), &super_token).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), "Record is linked to other records");

    let (status, _) = app.get(&format!("/api/hospitals/{h1}"), &super_token).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn malformed_ids_and_bodies_are_bad_requests() {
    let app = TestApp::new();
    let token = app.super_admin().await;

    let (status, body) = app.get("/api/hospitals/not-a-uuid", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message(&body), "Invalid ID format");

    let mut payload = hospital_payload("Bad Year");
    payload["establishedYear"] = json!(12);
    let (status, body) = app.post("/api/hospitals", &token, payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(message(&body).starts_with("Validation Error"), "{body}");
}
