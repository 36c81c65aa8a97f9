use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Authenticated Router Module
///
/// Routes requiring any resolved identity (`Authenticated` in
/// `ROUTE_PERMISSIONS`). Handlers receive the identity through the
/// `CurrentAccount` extractor, populated once per request by the
/// `authenticate` middleware.
pub fn authenticated_routes() -> Router<AppState> {
    Router::new()
        // GET /accounts/my
        // The caller's own account data, as resolved from their credentials.
        // PUT /accounts/my
        // Updates the caller's login and/or display name.
        .route(
            "/accounts/my",
            get(handlers::get_my_account).put(handlers::update_my_account),
        )
        // PUT /accounts/my/password
        // Replaces the caller's stored credential.
        .route("/accounts/my/password", put(handlers::update_my_password))
        // GET /accounts?page=...&size=...
        // Paged listing of all accounts.
        .route("/accounts", get(handlers::list_accounts))
        // GET /accounts/{id}
        // Single account lookup by id.
        .route("/accounts/{id}", get(handlers::get_account_by_id))
}
