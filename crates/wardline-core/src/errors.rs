use std::fmt;
use std::sync::OnceLock;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

static DIAGNOSTICS: OnceLock<bool> = OnceLock::new();

/// Include the underlying error as `detail` in 500 responses.
///
/// Only the first call takes effect. Enabled in development builds.
pub fn enable_diagnostics(enabled: bool) {
    let _ = DIAGNOSTICS.set(enabled);
}

fn diagnostics_enabled() -> bool {
    DIAGNOSTICS.get().copied().unwrap_or(false)
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
        }
    }

    fn with_message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, Error::msg(message.into()))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::with_message(StatusCode::CONFLICT, message)
    }

    /// A write that would break a reference between records.
    pub fn linked_records() -> Self {
        Self::conflict("Record is linked to other records")
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn is_not_found(&self) -> bool {
        self.status == StatusCode::NOT_FOUND
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status.as_u16(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = if self.status.is_server_error() {
            error!(error = ?self.error, status = %self.status, "Request failed");
            if diagnostics_enabled() {
                json!({
                    "success": false,
                    "message": "Internal Server Error",
                    "detail": self.error.to_string(),
                })
            } else {
                json!({
                    "success": false,
                    "message": "Internal Server Error",
                })
            }
        } else {
            json!({
                "success": false,
                "message": self.error.to_string(),
            })
        };

        (self.status, Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        classify(err.into())
    }
}

/// Maps store failures onto the client-facing taxonomy.
fn classify(err: Error) -> AppError {
    if let Some(sqlx_err) = err.downcast_ref::<sqlx::Error>() {
        match sqlx_err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                return AppError::conflict(unique_violation_message(db_err.constraint()));
            }
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                return AppError::linked_records();
            }
            sqlx::Error::Database(db_err) if db_err.is_check_violation() => {
                return AppError::bad_request("Validation Error");
            }
            sqlx::Error::RowNotFound => return AppError::not_found("Resource not found"),
            _ => {}
        }
    }
    if let Some(validation) = err.downcast_ref::<validator::ValidationErrors>() {
        return AppError::bad_request(format!("Validation Error: {validation}"));
    }
    AppError::internal(err)
}

pub fn unique_violation_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("users_one_admin_per_hospital") => "This hospital already has an admin".to_string(),
        Some(name) if name.contains("license_number") => {
            "Duplicate field value: licenseNumber already exists".to_string()
        }
        Some(name) if name.contains("user_id") => {
            "Duplicate field value: userId already exists".to_string()
        }
        Some(name) if name.contains("email") => {
            "Duplicate field value: email already exists".to_string()
        }
        _ => "Duplicate field value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn client_errors_expose_their_message() {
        let (status, body) =
            body_json(AppError::forbidden("Unauthorized to view this patient")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Unauthorized to view this patient");
    }

    #[tokio::test]
    async fn internal_errors_hide_their_cause() {
        let (status, body) =
            body_json(AppError::internal(anyhow::anyhow!("connection reset by peer"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
        assert!(!body.to_string().contains("connection reset"));
    }

    #[test]
    fn anyhow_errors_convert_to_internal() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn row_not_found_converts_to_not_found() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn unique_violation_names_the_field() {
        assert_eq!(
            unique_violation_message(Some("hospitals_license_number_key")),
            "Duplicate field value: licenseNumber already exists"
        );
        assert_eq!(
            unique_violation_message(Some("users_email_key")),
            "Duplicate field value: email already exists"
        );
        assert_eq!(
            unique_violation_message(Some("users_one_admin_per_hospital")),
            "This hospital already has an admin"
        );
        assert_eq!(unique_violation_message(None), "Duplicate field value");
    }

    #[test]
    fn constructors_set_status() {
        assert_eq!(AppError::bad_request("x").status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::unauthorized("x").status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::not_found("x").status, StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict("x").status, StatusCode::CONFLICT);
        assert!(AppError::not_found("x").is_not_found());
    }
}
