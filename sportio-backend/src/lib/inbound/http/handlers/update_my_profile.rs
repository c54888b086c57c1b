use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::FieldErrors;
use crate::domain::profile::models::UpdateProfileCommand;
use crate::domain::user::models::FullName;
use crate::domain::user::models::SkillLevel;
use crate::inbound::http::messages::ProfileData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

const MAX_AVATAR_URL_LENGTH: usize = 500;
const MAX_BIO_LENGTH: usize = 1000;

pub async fn update_my_profile(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    body: Result<Json<UpdateProfileRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ProfileData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .profile_service
        .update_profile(&user.id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// Partial update; absent or null fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequestBody {
    full_name: Option<String>,
    avatar_url: Option<String>,
    skill_level: Option<String>,
    bio: Option<String>,
}

impl UpdateProfileRequestBody {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ApiError> {
        let mut errors = FieldErrors::new();

        let full_name = self
            .full_name
            .and_then(|v| errors.capture("fullName", FullName::new(v)));
        let skill_level = self
            .skill_level
            .and_then(|v| errors.capture("skillLevel", v.parse::<SkillLevel>()));
        let avatar_url = self
            .avatar_url
            .and_then(|v| bounded(&mut errors, "avatarUrl", v, MAX_AVATAR_URL_LENGTH));
        let bio = self
            .bio
            .and_then(|v| bounded(&mut errors, "bio", v, MAX_BIO_LENGTH));

        errors.into_result()?;

        Ok(UpdateProfileCommand {
            full_name,
            avatar_url,
            skill_level,
            bio,
        })
    }
}

fn bounded(errors: &mut FieldErrors, field: &str, value: String, max: usize) -> Option<String> {
    if value.chars().count() > max {
        errors.add(field, format!("{} must be at most {} characters", field, max));
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_changes_nothing() {
        let body: UpdateProfileRequestBody = serde_json::from_str("{}").unwrap();
        let command = body.try_into_command().unwrap();

        assert!(command.full_name.is_none());
        assert!(command.avatar_url.is_none());
        assert!(command.skill_level.is_none());
        assert!(command.bio.is_none());
    }

    #[test]
    fn test_fields_are_parsed() {
        let body: UpdateProfileRequestBody = serde_json::from_str(
            r#"{"fullName": " Updated Name ", "skillLevel": "All levels", "bio": "I love sports!"}"#,
        )
        .unwrap();
        let command = body.try_into_command().unwrap();

        assert_eq!(command.full_name.unwrap().as_str(), "Updated Name");
        assert_eq!(command.skill_level, Some(SkillLevel::AllLevels));
        assert_eq!(command.bio.as_deref(), Some("I love sports!"));
    }

    #[test]
    fn test_out_of_range_fields_rejected() {
        let body = UpdateProfileRequestBody {
            full_name: Some("X".to_string()),
            avatar_url: Some("a".repeat(MAX_AVATAR_URL_LENGTH + 1)),
            skill_level: Some("Expert".to_string()),
            bio: Some("b".repeat(MAX_BIO_LENGTH + 1)),
        };

        let Err(ApiError::Validation(errors)) = body.try_into_command() else {
            panic!("expected validation error");
        };
        assert!(errors.get("fullName").is_some());
        assert!(errors.get("skillLevel").is_some());
        assert_eq!(
            errors.get("avatarUrl"),
            Some("avatarUrl must be at most 500 characters")
        );
        assert_eq!(errors.get("bio"), Some("bio must be at most 1000 characters"));
    }
}
