use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity resolved for the current request, `None` when anonymous.
#[derive(Debug, Clone, Default)]
pub struct RequestIdentity(pub Option<User>);

/// Extractor for handlers that require a signed-in user.
///
/// Rejects with `401 unauthorized` when the request carried no usable token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<RequestIdentity>() {
            Some(RequestIdentity(Some(user))) => Ok(AuthenticatedUser(user.clone())),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

/// Middleware that resolves a bearer token to a user, if it can.
///
/// Never rejects: a missing, malformed or stale token leaves the request anonymous.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&req);
    let identity = match token {
        Some(token) => identify(&state, &token).await,
        None => None,
    };

    req.extensions_mut().insert(RequestIdentity(identity));

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();

    (!token.is_empty()).then(|| token.to_string())
}

async fn identify(state: &AppState, token: &str) -> Option<User> {
    let claims = match state.authenticator.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring invalid bearer token");
            return None;
        }
    };

    let email = match EmailAddress::new(&claims.email) {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring token with malformed email claim");
            return None;
        }
    };

    match state.user_repository.find_by_email(&email).await {
        Ok(Some(user)) => {
            tracing::debug!(user_id = %user.id, "Request authenticated");
            Some(user)
        }
        Ok(None) => {
            tracing::warn!(email = %email, "Token subject no longer exists");
            None
        }
        Err(e) => {
            tracing::error!(error = %e, "User lookup failed while resolving identity");
            None
        }
    }
}
