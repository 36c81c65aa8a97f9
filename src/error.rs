use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// ApiError
///
/// The request-terminal error taxonomy. Every variant maps to exactly one
/// HTTP status code; none of them is retried or recovered from within a
/// request.
///
/// The two authentication/authorization outcomes are deliberately distinct:
/// `Unauthenticated` (401) means credentials were supplied but did not
/// resolve to an account, while `Forbidden` (403) means the resolved identity
/// (or its absence) failed a permission requirement or the role-escalation
/// rule. An absent Basic-auth header is *not* an error at all — it resolves
/// to an anonymous caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Supplied credentials are present but invalid (unknown login or wrong
    /// password).
    #[error("invalid credentials")]
    Unauthenticated,

    /// The identity fails the declared permission requirement or the
    /// role-escalation rule.
    #[error("permission denied")]
    Forbidden,

    #[error("account not found")]
    NotFound,

    #[error("login is already taken")]
    LoginTaken,

    /// Request payload violated an input constraint.
    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::LoginTaken => StatusCode::CONFLICT,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
