use std::collections::BTreeMap;
use std::fmt::Display;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::user::errors::UserError;

pub mod get_my_profile;
pub mod get_my_sessions;
pub mod get_public_profile;
pub mod health;
pub mod login;
pub mod register;
pub mod update_my_profile;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    PasswordMismatch(String),
    Validation(FieldErrors),
    EmailExists(String),
    InvalidCredentials,
    Unauthorized,
    NotFound(String),
    InternalServerError(String),
}

impl ApiError {
    /// Single-field validation failure.
    pub fn invalid_field(field: &str, message: impl Display) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, field_errors) = match self {
            ApiError::PasswordMismatch(msg) => {
                (StatusCode::BAD_REQUEST, "password_mismatch", msg, None)
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Validation failed".to_string(),
                Some(errors.0),
            ),
            ApiError::EmailExists(msg) => (StatusCode::CONFLICT, "email_exists", msg, None),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid email or password".to_string(),
                None,
            ),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "Authentication required".to_string(),
                None,
            ),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "user_not_found", msg, None),
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An unexpected error occurred".to_string(),
                    None,
                )
            }
        };

        let body = ApiErrorBody {
            error: code,
            message,
            timestamp: Utc::now(),
            field_errors,
        };

        (status, Json(body)).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::InvalidUserId(e) => ApiError::invalid_field("userId", e),
            UserError::InvalidEmail(e) => ApiError::invalid_field("email", e),
            UserError::InvalidFullName(e) => ApiError::invalid_field("fullName", e),
            UserError::InvalidSkillLevel(e) => ApiError::invalid_field("skillLevel", e),
            UserError::PasswordMismatch => ApiError::PasswordMismatch(err.to_string()),
            UserError::EmailAlreadyExists(_) => ApiError::EmailExists(err.to_string()),
            UserError::InvalidCredentials => ApiError::InvalidCredentials,
            UserError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_field("body", rejection.body_text())
    }
}

/// Per-field validation messages, keyed by the camelCase request field.
///
/// The first message recorded for a field wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Display) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Record the error of `result` against `field`, keeping the value on success.
    pub fn capture<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.add(field, e);
                None
            }
        }
    }

    /// Record a missing required field and return the value when present.
    pub fn require<'a>(&mut self, field: &str, value: &'a Option<String>) -> Option<&'a str> {
        match value.as_deref() {
            Some(v) if !v.trim().is_empty() => Some(v),
            _ => {
                self.add(field, format!("{} is required", field));
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn into_result(self) -> Result<(), ApiError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(self))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorBody {
    pub error: &'static str,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::user::errors::EmailError;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::from(UserError::DatabaseError("connection refused".to_string()));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "internal_error");
        assert_eq!(body["message"], "An unexpected error occurred");
        assert!(body.get("fieldErrors").is_none());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let error = ApiError::from(UserError::InvalidEmail(EmailError::Empty));
        let response = error.into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["fieldErrors"]["email"], "Email is required");
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(
            ApiError::from(UserError::InvalidCredentials),
            ApiError::InvalidCredentials
        );
        assert!(matches!(
            ApiError::from(UserError::EmailAlreadyExists("a@b.com".to_string())),
            ApiError::EmailExists(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::PasswordMismatch),
            ApiError::PasswordMismatch(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFound("7".to_string())),
            ApiError::NotFound(_)
        ));
    }

    #[test]
    fn test_field_errors_first_message_wins() {
        let mut errors = FieldErrors::new();
        errors.add("password", "first");
        errors.add("password", "second");
        assert_eq!(errors.get("password"), Some("first"));

        let missing: Option<String> = Some("   ".to_string());
        assert!(errors.require("email", &missing).is_none());
        assert_eq!(errors.get("email"), Some("email is required"));
        assert!(errors.into_result().is_err());
    }
}
