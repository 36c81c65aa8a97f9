use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{post, put},
};

/// Admin Router Module
///
/// Routes restricted to the administrative role tiers (`IsAdmin` in
/// `ROUTE_PERMISSIONS`). Account creation additionally enforces the
/// role-escalation rule inside the handler, after the gate passes.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // POST /accounts
        // Creates an account with a caller-chosen role. MAIN_ADMIN may
        // assign USER or ADMIN; ADMIN may assign only USER.
        .route("/accounts", post(handlers::create_account))
        // PUT /accounts/{id}
        // Updates any account's login/name by id.
        .route("/accounts/{id}", put(handlers::update_account_by_id))
}
