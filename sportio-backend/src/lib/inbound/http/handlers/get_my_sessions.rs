use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::messages::SessionHistoryData;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_my_sessions(
    State(state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<ApiSuccess<Vec<SessionHistoryData>>, ApiError> {
    let history = state
        .profile_service
        .session_history(&user.id)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        history.iter().map(SessionHistoryData::from).collect(),
    ))
}
