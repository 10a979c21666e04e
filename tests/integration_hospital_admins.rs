mod common;

use axum::http::StatusCode;
use common::{PASSWORD, TestApp, assert_no_password, data_id, ids, message, unique_email};
use serde_json::json;
use uuid::Uuid;

fn admin_payload(email: &str, hospital_id: &str) -> serde_json::Value {
    json!({
        "name": "Ward Manager",
        "email": email,
        "password": PASSWORD,
        "hospitalId": hospital_id
    })
}

#[tokio::test]
async fn create_and_list_admins_with_hospital() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "North General").await;

    let email = unique_email("admin");
    let (status, body) = app
        .post("/api/hospital-admins", &super_token, admin_payload(&email, &h1))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["role"], "HOSPITAL_ADMIN");
    assert_eq!(body["data"]["hospital"]["name"], "North General");
    assert_no_password(&body);
    let admin_id = data_id(&body);

    let (status, body) = app.get("/api/hospital-admins", &super_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![admin_id]);
    assert_eq!(body["data"][0]["hospital"]["id"], h1.as_str());
    assert_no_password(&body);
}

#[tokio::test]
async fn create_rejects_conflicts_and_unknown_hospital() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let h2 = app.hospital(&super_token, "H2").await;

    let email = unique_email("admin");
    let (status, _) = app
        .post("/api/hospital-admins", &super_token, admin_payload(&email, &h1))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .post(
            "/api/hospital-admins",
            &super_token,
            admin_payload(&unique_email("second"), &h1),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), "This hospital already has an admin");

    let (status, body) = app
        .post("/api/hospital-admins", &super_token, admin_payload(&email, &h2))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), "User already exists with this email");

    let (status, body) = app
        .post(
            "/api/hospital-admins",
            &super_token,
            admin_payload(&unique_email("lost"), &Uuid::new_v4().to_string()),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Hospital not found");
}

#[tokio::test]
async fn update_moves_admin_only_to_a_free_hospital() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let h2 = app.hospital(&super_token, "H2").await;
    let h3 = app.hospital(&super_token, "H3").await;

    let (_, body) = app
        .post(
            "/api/hospital-admins",
            &super_token,
            admin_payload(&unique_email("a1"), &h1),
        )
        .await;
    let a1 = data_id(&body);
    let a2_email = unique_email("a2");
    app.post("/api/hospital-admins", &super_token, admin_payload(&a2_email, &h2))
        .await;

    let (status, body) = app
        .put(
            &format!("/api/hospital-admins/{a1}"),
            &super_token,
            json!({ "hospitalId": h2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), "This hospital already has an admin");

    let (status, body) = app
        .put(
            &format!("/api/hospital-admins/{a1}"),
            &super_token,
            json!({ "email": a2_email }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(message(&body), "User already exists with this email");

    let (status, body) = app
        .put(
            &format!("/api/hospital-admins/{a1}"),
            &super_token,
            json!({ "hospitalId": h3, "name": "Moved Manager" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["hospitalId"], h3.as_str());
    assert_eq!(body["data"]["hospital"]["name"], "H3");
    assert_eq!(body["data"]["name"], "Moved Manager");

    let (status, _) = app
        .put(
            &format!("/api/hospital-admins/{a1}"),
            &super_token,
            json!({ "hospitalId": h3 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn update_and_delete_only_touch_hospital_admins() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let (doctor_id, _) = app.doctor(&super_token, &h1).await;

    let (_, body) = app.get(&format!("/api/doctors/{doctor_id}"), &super_token).await;
    let doctor_user = body["data"]["userId"].as_str().unwrap().to_string();

    let (status, body) = app
        .delete(&format!("/api/hospital-admins/{doctor_user}"), &super_token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(message(&body), "Hospital admin not found");

    let (_, body) = app
        .post(
            "/api/hospital-admins",
            &super_token,
            admin_payload(&unique_email("a1"), &h1),
        )
        .await;
    let a1 = data_id(&body);

    let (status, body) = app
        .delete(&format!("/api/hospital-admins/{a1}"), &super_token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(message(&body), "Hospital admin deleted successfully");

    let (_, body) = app.get("/api/hospital-admins", &super_token).await;
    assert_eq!(body["count"], 0);

    let (status, _) = app
        .post(
            "/api/hospital-admins",
            &super_token,
            admin_payload(&unique_email("a1b"), &h1),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn my_hospital_reports_statistics_and_recent_records() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let h2 = app.hospital(&super_token, "H2").await;
    let a1_token = app.hospital_admin(&super_token, &h1).await;

    let mut doctor_tokens = Vec::new();
    for _ in 0..6 {
        let (_, token) = app.doctor(&a1_token, &h1).await;
        doctor_tokens.push(token);
    }
    let (_, outsider) = app.doctor(&super_token, &h2).await;
    app.patient(&outsider, "Elsewhere").await;

    for (index, token) in doctor_tokens.iter().take(2).enumerate() {
        let patient = app.patient(token, &format!("Patient {index}")).await;
        let (status, _) = app
            .post(
                "/api/prescriptions",
                token,
                json!({
                    "patientEnrollmentId": patient,
                    "medication": "Ibuprofen",
                    "dosage": "200mg",
                    "instructions": "As needed"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/hospital-admins/my-hospital", &a1_token).await;
    assert_eq!(status, StatusCode::OK);
    let dashboard = &body["data"];
    assert_eq!(dashboard["hospital"]["id"], h1.as_str());
    assert_eq!(dashboard["statistics"]["doctors"], 6);
    assert_eq!(dashboard["statistics"]["patients"], 2);
    assert_eq!(dashboard["statistics"]["prescriptions"], 2);
    assert_eq!(dashboard["recentDoctors"].as_array().unwrap().len(), 5);
    let recent_patients = dashboard["recentPatients"].as_array().unwrap();
    assert_eq!(recent_patients.len(), 2);
    assert!(recent_patients.iter().all(|p| p["doctor"]["name"].is_string()));
    assert_no_password(&body);
}

#[tokio::test]
async fn management_routes_are_super_admin_only() {
    let app = TestApp::new();
    let super_token = app.super_admin().await;
    let h1 = app.hospital(&super_token, "H1").await;
    let a1_token = app.hospital_admin(&super_token, &h1).await;
    let (_, doctor_token) = app.doctor(&a1_token, &h1).await;

    let (status, _) = app.get("/api/hospital-admins", &a1_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .post(
            "/api/hospital-admins",
            &a1_token,
            admin_payload(&unique_email("x"), &h1),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for token in [&super_token, &doctor_token] {
        let (status, _) = app.get("/api/hospital-admins/my-hospital", token).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    let (status, _) = app
        .request(
            axum::http::Method::GET,
            "/api/hospital-admins/my-hospital",
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
