use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ApiError;

// --- Core Application Schemas ---

/// Role
///
/// The privilege tier assigned to every account. The three tiers are ordered:
/// `User < Admin < MainAdmin`. The wire representation is the upper-case
/// snake form ("USER", "ADMIN", "MAIN_ADMIN").
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
    MainAdmin,
}

impl Role {
    /// True for the two administrative tiers (`Admin` and `MainAdmin`).
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::MainAdmin)
    }
}

/// Account
///
/// The canonical account record held by the account store. This is the
/// internal shape: it carries the stored credential and therefore never
/// derives `Serialize`. Handlers convert it to `AccountResponse` before
/// anything leaves the process.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Account {
    pub id: i64,
    // The unique login, matched case-sensitively during credential resolution.
    pub login: String,
    pub name: String,
    pub role: Role,
    // Stored credential. Hashing is out of scope for this service.
    pub password: String,
}

/// AccountResponse
///
/// The public projection of an `Account` (id, login, name, role). Used by
/// every endpoint that returns account data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Default)]
pub struct AccountResponse {
    pub id: i64,
    pub login: String,
    pub name: String,
    pub role: Role,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            login: account.login,
            name: account.name,
            role: account.role,
        }
    }
}

/// StatusResponse
///
/// Payload of the `/status` liveness endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    #[schema(example = "ok")]
    pub status: String,
}

impl StatusResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

// --- Request Payloads (Input Schemas) ---

/// RegisterAccountRequest
///
/// Input payload for self-registration (POST /accounts/register). The role is
/// not part of the payload: registered accounts are always created as `USER`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterAccountRequest {
    pub login: String,
    pub password: String,
    pub name: String,
}

/// CreateAccountRequest
///
/// Input payload for administrative account creation (POST /accounts).
/// Unlike registration, the caller chooses the new account's role; the
/// privilege-escalation rule in the handler constrains which roles a given
/// caller may assign.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateAccountRequest {
    pub login: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// UpdateAccountRequest
///
/// Partial update payload for account data (PUT /accounts/my and
/// PUT /accounts/{id}). Only provided fields are changed.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateAccountRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// UpdatePasswordRequest
///
/// Input payload for PUT /accounts/my/password.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdatePasswordRequest {
    pub password: String,
}

// --- Pagination ---

/// PageQuery
///
/// Query parameters accepted by list endpoints. `page` is zero-based.
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
pub struct PageQuery {
    /// Zero-based page number.
    #[serde(default)]
    pub page: u32,
    /// Page size.
    #[serde(default = "default_page_size")]
    pub size: u32,
}

fn default_page_size() -> u32 {
    10
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: default_page_size(),
        }
    }
}

/// Page
///
/// Envelope for paginated list responses: the total item count plus the
/// items of the requested page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct Page<T> {
    pub count: u64,
    pub items: Vec<T>,
}

// --- Input Validation ---

/// Validates a login or display name: must be non-empty once trimmed.
/// Returns the trimmed value.
pub fn validate_name(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::Validation(format!("{field} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Validates a password: at least 8 characters, each drawn from
/// `[A-Za-z0-9_-]`.
pub fn validate_password(value: &str) -> Result<(), ApiError> {
    if value.len() < 8 {
        return Err(ApiError::Validation(
            "password must be at least 8 characters".to_string(),
        ));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ApiError::Validation(
            "password may only contain letters, digits, '_' and '-'".to_string(),
        ));
    }
    Ok(())
}
