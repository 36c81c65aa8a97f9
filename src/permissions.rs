use axum::{
    Extension,
    extract::{MatchedPath, Request},
    http::Method,
    middleware::Next,
    response::Response,
};

use crate::{auth::CurrentAccount, error::ApiError, models::Account};

/// Permission
///
/// The closed set of named permission requirements a route can declare. Each
/// is a pure, stateless predicate over the resolved identity (or its
/// absence), evaluated exactly once per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Satisfied only by an anonymous caller. Used for routes that must not
    /// be reachable by an already-authenticated actor (self-registration).
    Anonymous,
    /// Satisfied by any resolved identity, regardless of role.
    Authenticated,
    /// Satisfied by a resolved identity with role `Admin` or `MainAdmin`.
    IsAdmin,
}

impl Permission {
    /// The gate decision: allow (`true`) or deny (`false`). No side effects.
    pub fn check(&self, account: Option<&Account>) -> bool {
        match self {
            Permission::Anonymous => account.is_none(),
            Permission::Authenticated => account.is_some(),
            Permission::IsAdmin => account.is_some_and(|a| a.role.is_admin()),
        }
    }
}

/// ROUTE_PERMISSIONS
///
/// The explicit route-to-requirement mapping, declared in one place at
/// registration time rather than scattered across handlers. Each protected
/// operation carries exactly one requirement; routes without an entry
/// (status, health, Swagger UI) are ungated.
///
/// Patterns must match the route templates registered in `src/routes/`.
pub const ROUTE_PERMISSIONS: &[(Method, &str, Permission)] = &[
    (Method::POST, "/accounts/register", Permission::Anonymous),
    (Method::POST, "/accounts", Permission::IsAdmin),
    (Method::GET, "/accounts", Permission::Authenticated),
    (Method::GET, "/accounts/my", Permission::Authenticated),
    (Method::GET, "/accounts/{id}", Permission::Authenticated),
    (Method::PUT, "/accounts/my", Permission::Authenticated),
    (
        Method::PUT,
        "/accounts/my/password",
        Permission::Authenticated,
    ),
    (Method::PUT, "/accounts/{id}", Permission::IsAdmin),
];

/// Looks up the requirement declared for a `(method, route template)` pair.
pub fn required_permission(method: &Method, route: &str) -> Option<Permission> {
    ROUTE_PERMISSIONS
        .iter()
        .find(|(m, pattern, _)| m == method && *pattern == route)
        .map(|(_, _, permission)| *permission)
}

/// check_route_permission
///
/// Route-layer middleware implementing the permission gate. It reads the
/// matched route template and the identity resolved by the `authenticate`
/// middleware, consults `ROUTE_PERMISSIONS`, and denies with the fixed 403
/// outcome before the handler body runs.
///
/// Must be installed with `route_layer` so `MatchedPath` is available.
pub async fn check_route_permission(
    matched_path: MatchedPath,
    Extension(current): Extension<CurrentAccount>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(permission) = required_permission(request.method(), matched_path.as_str()) {
        if !permission.check(current.account()) {
            tracing::debug!(
                route = matched_path.as_str(),
                requirement = ?permission,
                "permission gate denied request"
            );
            return Err(ApiError::Forbidden);
        }
    }

    Ok(next.run(request).await)
}
