use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// Endpoints callable without credentials. Note that `/accounts/register`
/// is not merely ungated: its `Anonymous` requirement (see
/// `ROUTE_PERMISSIONS`) actively rejects authenticated callers, so an
/// existing account cannot be used to re-register.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Bare liveness probe for load balancers; returns "ok" immediately.
        .route("/health", get(|| async { "ok" }))
        // GET /status
        // The application-level status endpoint with a JSON body.
        .route("/status", get(handlers::get_status))
        // POST /accounts/register
        // Self-registration. Requirement: Anonymous. New accounts are always
        // created with the USER role.
        .route("/accounts/register", post(handlers::register_account))
}
