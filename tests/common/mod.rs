#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;
use wardline::router::init_router;
use wardline::state::AppState;
use wardline_config::{CorsConfig, JwtConfig};
use wardline_db::MemoryStore;

pub const PASSWORD: &str = "password123";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(
            store.clone(),
            JwtConfig::from_lookup(|_| None),
            CorsConfig::from_lookup(|_| None),
        );
        Self {
            store,
            router: init_router(state),
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(token), Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, Some(token), None).await
    }

    pub async fn register(&self, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, "/api/auth/register", None, Some(body))
            .await
    }

    pub async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    /// Logs in and returns the token.
    pub async fn token_for(&self, email: &str) -> String {
        let (status, body) = self.login(email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "login {email}: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    pub async fn super_admin(&self) -> String {
        let email = unique_email("root");
        let (status, body) = self
            .register(json!({
                "name": "Root Admin",
                "email": email,
                "password": PASSWORD,
                "role": "SUPER_ADMIN"
            }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Creates a hospital and returns its id.
    pub async fn hospital(&self, super_token: &str, name: &str) -> String {
        let (status, body) = self
            .post("/api/hospitals", super_token, hospital_payload(name))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        data_id(&body)
    }

    /// Creates the hospital's admin and returns their token.
    pub async fn hospital_admin(&self, super_token: &str, hospital_id: &str) -> String {
        let email = unique_email("admin");
        let (status, body) = self
            .post(
                "/api/hospital-admins",
                super_token,
                json!({
                    "name": "Hospital Admin",
                    "email": email,
                    "password": PASSWORD,
                    "hospitalId": hospital_id
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        self.token_for(&email).await
    }

    /// Creates a doctor and returns `(doctor id, doctor token)`.
    pub async fn doctor(&self, manager_token: &str, hospital_id: &str) -> (String, String) {
        let email = unique_email("doctor");
        let (status, body) = self
            .post(
                "/api/doctors",
                manager_token,
                json!({
                    "name": "Dr. Test",
                    "email": email,
                    "specialization": "General Practice",
                    "hospitalId": hospital_id,
                    "password": PASSWORD
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        (data_id(&body), self.token_for(&email).await)
    }

    /// Enrolls a patient as a doctor and returns its id.
    pub async fn patient(&self, doctor_token: &str, name: &str) -> String {
        let (status, body) = self
            .post(
                "/api/patients",
                doctor_token,
                json!({ "name": name, "age": 40, "gender": "Female" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        data_id(&body)
    }
}

pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@test.io", Uuid::new_v4().simple())
}

pub fn hospital_payload(name: &str) -> Value {
    json!({
        "name": name,
        "address": "1 Infirmary Road",
        "phone": "+1-555-0100",
        "email": "contact@hospital.io",
        "licenseNumber": format!("LIC-{}", Uuid::new_v4().simple()),
        "establishedYear": 1998,
        "bedCapacity": 250,
        "emergencyContact": "+1-555-0199"
    })
}

pub fn data_id(body: &Value) -> String {
    body["data"]["id"]
        .as_str()
        .unwrap_or_else(|| panic!("no data.id in {body}"))
        .to_string()
}

pub fn ids(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap_or_else(|| panic!("no data array in {body}"))
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}

/// Fails if any key or string anywhere in `body` mentions a password.
pub fn assert_no_password(body: &Value) {
    let text = body.to_string().to_lowercase();
    assert!(!text.contains("password"), "password leaked: {body}");
    assert!(!text.contains("$2b$"), "hash leaked: {body}");
}
