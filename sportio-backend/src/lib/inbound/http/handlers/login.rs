use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::LoginCommand;
use crate::inbound::http::messages::AuthResponseData;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref session| ApiSuccess::new(StatusCode::OK, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<String>,
}

impl LoginRequestBody {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let mut errors = FieldErrors::new();

        let email = errors
            .require("email", &self.email)
            .and_then(|v| errors.capture("email", EmailAddress::new(v)));
        let password = errors
            .require("password", &self.password)
            .map(str::to_string);

        match (email, password) {
            (Some(email), Some(password)) => Ok(LoginCommand { email, password }),
            _ => Err(ApiError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_password_rejected() {
        let body = LoginRequestBody {
            email: Some("alex@sportio.com".to_string()),
            password: Some("  ".to_string()),
        };

        let Err(ApiError::Validation(errors)) = body.try_into_command() else {
            panic!("expected validation error");
        };
        assert!(errors.get("email").is_none());
        assert_eq!(errors.get("password"), Some("password is required"));
    }

    #[test]
    fn test_password_is_not_trimmed() {
        let body = LoginRequestBody {
            email: Some("ALEX@sportio.com".to_string()),
            password: Some(" secret ".to_string()),
        };

        let command = body.try_into_command().unwrap();
        assert_eq!(command.email.as_str(), "alex@sportio.com");
        assert_eq!(command.password, " secret ");
    }
}
