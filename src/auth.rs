use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::STANDARD};

use crate::{AppState, error::ApiError, models::Account, repository::AccountRepository};

/// Credentials
///
/// The transient username/password pair carried by an HTTP Basic-auth header.
/// It exists only for the duration of credential resolution and is never
/// persisted or logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// CurrentAccount
///
/// The resolved identity of a request: `Some(account)` after successful
/// credential resolution, `None` for an anonymous caller. Inserted into the
/// request extensions by the `authenticate` middleware and read from there by
/// the permission gate and by handlers (via the extractor impl below).
///
/// The value is fixed for the lifetime of one request.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Option<Account>);

impl CurrentAccount {
    pub fn account(&self) -> Option<&Account> {
        self.0.as_ref()
    }
}

/// CurrentAccount Extractor Implementation
///
/// Lets handlers take `CurrentAccount` as a function argument. The heavy
/// lifting (header parsing, store lookup) already happened in the
/// `authenticate` middleware; the extractor only reads the stored result.
///
/// Rejection: 500 if the middleware was not installed on the router — that is
/// a wiring bug, not a client error.
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .cloned()
            .ok_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// parse_basic_auth
///
/// Extracts the Basic-auth credentials from a request's headers.
///
/// - No `Authorization` header at all → `Ok(None)`: a valid, non-error
///   outcome representing an anonymous caller.
/// - Header present but malformed (wrong scheme, bad base64, non-UTF-8
///   payload, missing `:` separator) → `ApiError::Unauthenticated`. A
///   malformed header is treated as a failed match, never as "absent".
pub fn parse_basic_auth(headers: &HeaderMap) -> Result<Option<Credentials>, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| ApiError::Unauthenticated)?;
    // Auth scheme tokens are case-insensitive (RFC 7235): "basic" and
    // "BASIC" are as well-formed as "Basic".
    let encoded = match value.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("Basic") => rest,
        _ => return Err(ApiError::Unauthenticated),
    };

    let decoded = STANDARD
        .decode(encoded)
        .map_err(|_| ApiError::Unauthenticated)?;
    let decoded = String::from_utf8(decoded).map_err(|_| ApiError::Unauthenticated)?;

    let (username, password) = decoded.split_once(':').ok_or(ApiError::Unauthenticated)?;

    Ok(Some(Credentials {
        username: username.to_string(),
        password: password.to_string(),
    }))
}

/// resolve
///
/// The credential resolution step: looks up the account by login
/// (case-sensitive exact match) and verifies the supplied password against
/// the stored credential. Read-only against the account store.
///
/// Unknown login and wrong password both yield `ApiError::Unauthenticated`;
/// the two cases are indistinguishable to the caller.
pub async fn resolve(
    repo: &dyn AccountRepository,
    credentials: &Credentials,
) -> Result<Account, ApiError> {
    let account = repo
        .find_by_login(&credentials.username)
        .await
        .ok_or(ApiError::Unauthenticated)?;

    if account.password != credentials.password {
        return Err(ApiError::Unauthenticated);
    }

    Ok(account)
}

/// authenticate
///
/// Router-level middleware that runs credential resolution for every inbound
/// request and stores the outcome as a `CurrentAccount` request extension.
///
/// Failure semantics match the error taxonomy: an absent header flows through
/// as an anonymous `CurrentAccount(None)`, while present-but-invalid
/// credentials short-circuit the request with 401 before any permission gate
/// or handler body executes.
pub async fn authenticate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resolved = match parse_basic_auth(request.headers())? {
        None => None,
        Some(credentials) => {
            let account = resolve(state.repo.as_ref(), &credentials)
                .await
                .inspect_err(|_| {
                    tracing::debug!(login = %credentials.username, "credential resolution failed");
                })?;
            Some(account)
        }
    };

    request.extensions_mut().insert(CurrentAccount(resolved));
    Ok(next.run(request).await)
}
