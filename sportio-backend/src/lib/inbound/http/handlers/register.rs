use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::FullName;
use crate::domain::user::models::RegisterCommand;
use crate::inbound::http::messages::AuthResponseData;
use crate::inbound::http::router::AppState;

pub const MIN_PASSWORD_LENGTH: usize = 8;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestBody {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    confirm_password: Option<String>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let mut errors = FieldErrors::new();

        let full_name = errors
            .require("fullName", &self.full_name)
            .and_then(|v| errors.capture("fullName", FullName::new(v)));
        let email = errors
            .require("email", &self.email)
            .and_then(|v| errors.capture("email", EmailAddress::new(v)));
        let password = errors.require("password", &self.password).and_then(|v| {
            if v.chars().count() < MIN_PASSWORD_LENGTH {
                errors.add(
                    "password",
                    format!(
                        "Password must be at least {} characters",
                        MIN_PASSWORD_LENGTH
                    ),
                );
                None
            } else {
                Some(v.to_string())
            }
        });
        let confirm_password = errors
            .require("confirmPassword", &self.confirm_password)
            .map(str::to_string);

        match (email, password, confirm_password, full_name) {
            (Some(email), Some(password), Some(confirm_password), Some(full_name))
                if errors.is_empty() =>
            {
                Ok(RegisterCommand {
                    email,
                    password,
                    confirm_password,
                    full_name,
                })
            }
            _ => Err(ApiError::Validation(errors)),
        }
    }
}
