use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::get_my_profile::get_my_profile;
use super::handlers::get_my_sessions::get_my_sessions;
use super::handlers::get_public_profile::get_public_profile;
use super::handlers::health::health;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_my_profile::update_my_profile;
use super::middleware::resolve_identity;
use crate::domain::profile::ports::ProfileServicePort;
use crate::domain::user::ports::AuthServicePort;
use crate::domain::user::ports::UserRepository;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub profile_service: Arc<dyn ProfileServicePort>,
    pub user_repository: Arc<dyn UserRepository>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    profile_service: Arc<dyn ProfileServicePort>,
    user_repository: Arc<dyn UserRepository>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        profile_service,
        user_repository,
        authenticator,
    };

    let auth_routes = Router::new()
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login));

    let user_routes = Router::new()
        .route("/api/v1/users/me", get(get_my_profile).put(update_my_profile))
        .route("/api/v1/users/me/sessions", get(get_my_sessions))
        .route("/api/v1/users/:user_id", get(get_public_profile));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(auth_routes)
        .merge(user_routes)
        .route("/api/v1/health", get(health))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            resolve_identity,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
