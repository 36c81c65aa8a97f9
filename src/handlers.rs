use crate::{
    AppState,
    auth::CurrentAccount,
    error::ApiError,
    models::{
        self, AccountResponse, CreateAccountRequest, Page, PageQuery, RegisterAccountRequest,
        Role, StatusResponse, UpdateAccountRequest, UpdatePasswordRequest,
    },
    repository::{AccountChanges, NewAccount, UpdateError},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

// --- Shared helpers ---

/// Normalizes and validates a partial account update: provided fields are
/// trimmed and must be non-empty.
fn normalize_changes(payload: UpdateAccountRequest) -> Result<AccountChanges, ApiError> {
    let login = payload
        .login
        .as_deref()
        .map(|v| models::validate_name("login", v))
        .transpose()?;
    let name = payload
        .name
        .as_deref()
        .map(|v| models::validate_name("name", v))
        .transpose()?;
    Ok(AccountChanges { login, name })
}

impl From<UpdateError> for ApiError {
    fn from(err: UpdateError) -> Self {
        match err {
            UpdateError::NotFound => ApiError::NotFound,
            UpdateError::LoginTaken => ApiError::LoginTaken,
        }
    }
}

// --- Handlers ---

/// get_status
///
/// [Public Route] Reports that the server is up. Used by monitoring and
/// load-balancer checks.
#[utoipa::path(
    get,
    path = "/status",
    responses((status = 200, description = "Server status", body = StatusResponse))
)]
pub async fn get_status() -> Json<StatusResponse> {
    Json(StatusResponse::ok())
}

/// register_account
///
/// [Anonymous Route] Self-registration for new users. The route's `Anonymous`
/// requirement means an already-authenticated actor cannot re-register
/// through this path. Registered accounts always get the `USER` role; there
/// is no way to self-assign privileges here.
#[utoipa::path(
    post,
    path = "/accounts/register",
    request_body = RegisterAccountRequest,
    responses(
        (status = 201, description = "Account registered", body = AccountResponse),
        (status = 403, description = "Caller is already authenticated"),
        (status = 409, description = "Login already taken"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn register_account(
    State(state): State<AppState>,
    Json(payload): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let login = models::validate_name("login", &payload.login)?;
    let name = models::validate_name("name", &payload.name)?;
    models::validate_password(&payload.password)?;

    let account = state
        .repo
        .create(NewAccount {
            login,
            password: payload.password,
            name,
            role: Role::User,
        })
        .await
        .ok_or(ApiError::LoginTaken)?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// create_account
///
/// [Admin Route] Creates an account with a caller-chosen role.
///
/// *Escalation rule*, evaluated after the `IsAdmin` gate passes: a
/// `MAIN_ADMIN` may not create another `MAIN_ADMIN`; an `ADMIN` may create
/// only `USER` accounts. A violation yields the same forbidden outcome as a
/// gate denial.
#[utoipa::path(
    post,
    path = "/accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 403, description = "Escalation rule violated"),
        (status = 409, description = "Login already taken"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn create_account(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AccountResponse>), ApiError> {
    let caller = current.account().ok_or(ApiError::Forbidden)?;

    let escalates = match caller.role {
        Role::MainAdmin => payload.role == Role::MainAdmin,
        Role::Admin => payload.role.is_admin(),
        // The IsAdmin gate admits only admin tiers; a USER caller never
        // reaches this point through the router.
        Role::User => true,
    };
    if escalates {
        return Err(ApiError::Forbidden);
    }

    let login = models::validate_name("login", &payload.login)?;
    let name = models::validate_name("name", &payload.name)?;
    models::validate_password(&payload.password)?;

    let account = state
        .repo
        .create(NewAccount {
            login,
            password: payload.password,
            name,
            role: payload.role,
        })
        .await
        .ok_or(ApiError::LoginTaken)?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// get_my_account
///
/// [Authenticated Route] Returns the caller's own account, exactly as
/// resolved by the credential resolver.
#[utoipa::path(
    get,
    path = "/accounts/my",
    responses((status = 200, description = "Own account", body = AccountResponse))
)]
pub async fn get_my_account(current: CurrentAccount) -> Result<Json<AccountResponse>, ApiError> {
    let account = current.account().cloned().ok_or(ApiError::Forbidden)?;
    Ok(Json(account.into()))
}

/// get_account_by_id
///
/// [Authenticated Route] Retrieves a single account by its id.
#[utoipa::path(
    get,
    path = "/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Found", body = AccountResponse),
        (status = 404, description = "No such account")
    )
)]
pub async fn get_account_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountResponse>, ApiError> {
    let account = state.repo.find_by_id(id).await.ok_or(ApiError::NotFound)?;
    Ok(Json(account.into()))
}

/// list_accounts
///
/// [Authenticated Route] Lists accounts page by page. `count` always carries
/// the total number of accounts, not the page length.
#[utoipa::path(
    get,
    path = "/accounts",
    params(PageQuery),
    responses((status = 200, description = "Account page", body = Page<AccountResponse>))
)]
pub async fn list_accounts(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Json<Page<AccountResponse>> {
    let (count, items) = state.repo.list(query.page, query.size).await;
    Json(Page {
        count,
        items: items.into_iter().map(AccountResponse::from).collect(),
    })
}

/// update_my_account
///
/// [Authenticated Route] Updates the caller's own login and/or display name.
#[utoipa::path(
    put,
    path = "/accounts/my",
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated", body = AccountResponse),
        (status = 409, description = "Login already taken"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_my_account(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let caller = current.account().ok_or(ApiError::Forbidden)?;
    let changes = normalize_changes(payload)?;

    let account = state.repo.update(caller.id, changes).await?;
    Ok(Json(account.into()))
}

/// update_my_password
///
/// [Authenticated Route] Replaces the caller's stored credential. The new
/// password must satisfy the same constraints as at registration.
#[utoipa::path(
    put,
    path = "/accounts/my/password",
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Updated", body = AccountResponse),
        (status = 422, description = "Invalid password")
    )
)]
pub async fn update_my_password(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let caller = current.account().ok_or(ApiError::Forbidden)?;
    models::validate_password(&payload.password)?;

    let account = state
        .repo
        .update_password(caller.id, &payload.password)
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(Json(account.into()))
}

/// update_account_by_id
///
/// [Admin Route] Updates any account's login and/or display name by id.
#[utoipa::path(
    put,
    path = "/accounts/{id}",
    params(("id" = i64, Path, description = "Account id")),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Updated", body = AccountResponse),
        (status = 404, description = "No such account"),
        (status = 409, description = "Login already taken"),
        (status = 422, description = "Invalid payload")
    )
)]
pub async fn update_account_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateAccountRequest>,
) -> Result<Json<AccountResponse>, ApiError> {
    let changes = normalize_changes(payload)?;

    let account = state.repo.update(id, changes).await?;
    Ok(Json(account.into()))
}
