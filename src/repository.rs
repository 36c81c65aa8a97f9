use async_trait::async_trait;
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicI64, Ordering},
};

use crate::models::{Account, Role};

/// NewAccount
///
/// The data needed to create an account record. Built by the registration
/// handler (role forced to `User`) and the administrative creation handler
/// (role chosen by the caller, constrained by the escalation rule).
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub login: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

/// AccountChanges
///
/// Partial update applied to an existing account. `None` fields are left
/// untouched.
#[derive(Debug, Clone, Default)]
pub struct AccountChanges {
    pub login: Option<String>,
    pub name: Option<String>,
}

/// UpdateError
///
/// Why a partial update was not applied. `LoginTaken` is decided by the
/// store itself, under the same lock as the write, so a login change can
/// never race another update or creation into a duplicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateError {
    NotFound,
    LoginTaken,
}

/// AccountRepository Trait
///
/// The abstract contract for the account store. Handlers and the credential
/// resolver interact with it through `RepositoryState` without knowing the
/// concrete implementation (in-memory, mock, a future database).
///
/// **Send + Sync + async_trait** are required to make the trait object
/// (`Arc<dyn AccountRepository>`) safely shareable across Axum's
/// asynchronous task boundaries.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Case-sensitive exact lookup by login. This is the read-only call the
    /// credential resolver depends on.
    async fn find_by_login(&self, login: &str) -> Option<Account>;

    async fn find_by_id(&self, id: i64) -> Option<Account>;

    /// Inserts a new account. Returns `None` when the login is already taken.
    async fn create(&self, new: NewAccount) -> Option<Account>;

    /// Returns the total account count plus the requested page (zero-based).
    async fn list(&self, page: u32, size: u32) -> (u64, Vec<Account>);

    /// Applies a partial update. A login change that would collide with
    /// another account's login fails with `LoginTaken`; the check happens
    /// atomically with the write.
    async fn update(&self, id: i64, changes: AccountChanges) -> Result<Account, UpdateError>;

    /// Replaces the stored credential. Returns `None` when no account has
    /// the id.
    async fn update_password(&self, id: i64, password: &str) -> Option<Account>;
}

/// RepositoryState
///
/// The concrete type used to share the account store across the application
/// state.
pub type RepositoryState = Arc<dyn AccountRepository>;

/// InMemoryAccountRepository
///
/// The shipped `AccountRepository` implementation: a lock-guarded vector of
/// accounts. Credential resolution only ever reads; writes happen on the
/// account management endpoints, serialized by the `RwLock`.
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
    next_id: AtomicI64,
}

impl InMemoryAccountRepository {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Creates a store pre-populated with the three well-known sample
    /// accounts (`owner`, `admin`, `user1`), one per role tier.
    pub fn seeded() -> Self {
        let seeds = vec![
            Account {
                id: 1,
                login: "owner".to_string(),
                name: "Peter Ivanov".to_string(),
                role: Role::MainAdmin,
                password: "owner_secret".to_string(),
            },
            Account {
                id: 2,
                login: "admin".to_string(),
                name: "Ivan Petrov".to_string(),
                role: Role::Admin,
                password: "admin_secret".to_string(),
            },
            Account {
                id: 3,
                login: "user1".to_string(),
                name: "Vasya Pupkin".to_string(),
                role: Role::User,
                password: "user1_secret".to_string(),
            },
        ];

        Self {
            next_id: AtomicI64::new(seeds.len() as i64 + 1),
            accounts: RwLock::new(seeds),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_login(&self, login: &str) -> Option<Account> {
        let accounts = self.accounts.read().expect("account store lock poisoned");
        accounts.iter().find(|a| a.login == login).cloned()
    }

    async fn find_by_id(&self, id: i64) -> Option<Account> {
        let accounts = self.accounts.read().expect("account store lock poisoned");
        accounts.iter().find(|a| a.id == id).cloned()
    }

    async fn create(&self, new: NewAccount) -> Option<Account> {
        let mut accounts = self.accounts.write().expect("account store lock poisoned");

        // Login uniqueness is checked under the same write lock as the
        // insert, so concurrent registrations cannot race each other.
        if accounts.iter().any(|a| a.login == new.login) {
            return None;
        }

        let account = Account {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            login: new.login,
            name: new.name,
            role: new.role,
            password: new.password,
        };
        accounts.push(account.clone());
        Some(account)
    }

    async fn list(&self, page: u32, size: u32) -> (u64, Vec<Account>) {
        let accounts = self.accounts.read().expect("account store lock poisoned");
        let count = accounts.len() as u64;
        let items = accounts
            .iter()
            .skip(page as usize * size as usize)
            .take(size as usize)
            .cloned()
            .collect();
        (count, items)
    }

    async fn update(&self, id: i64, changes: AccountChanges) -> Result<Account, UpdateError> {
        let mut accounts = self.accounts.write().expect("account store lock poisoned");

        // Uniqueness is decided under the same write lock as the change,
        // like `create` does for inserts, so two updates (or an update and
        // an insert) cannot interleave into a duplicate login.
        if let Some(login) = changes.login.as_deref() {
            if accounts.iter().any(|a| a.login == login && a.id != id) {
                return Err(UpdateError::LoginTaken);
            }
        }

        let account = accounts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(UpdateError::NotFound)?;

        if let Some(login) = changes.login {
            account.login = login;
        }
        if let Some(name) = changes.name {
            account.name = name;
        }
        Ok(account.clone())
    }

    async fn update_password(&self, id: i64, password: &str) -> Option<Account> {
        let mut accounts = self.accounts.write().expect("account store lock poisoned");
        let account = accounts.iter_mut().find(|a| a.id == id)?;
        account.password = password.to_string();
        Some(account.clone())
    }
}
