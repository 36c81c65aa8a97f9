use latte_gallery::{
    models::Role,
    repository::{
        AccountChanges, AccountRepository, InMemoryAccountRepository, NewAccount, UpdateError,
    },
};

fn new_account(login: &str, role: Role) -> NewAccount {
    NewAccount {
        login: login.to_string(),
        password: "some_secret".to_string(),
        name: format!("Account {login}"),
        role,
    }
}

#[tokio::test]
async fn test_create_assigns_sequential_ids() {
    let repo = InMemoryAccountRepository::new();

    let first = repo.create(new_account("first", Role::User)).await.unwrap();
    let second = repo.create(new_account("second", Role::User)).await.unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_create_rejects_duplicate_login() {
    let repo = InMemoryAccountRepository::new();

    repo.create(new_account("taken", Role::User)).await.unwrap();
    let duplicate = repo.create(new_account("taken", Role::Admin)).await;

    assert!(duplicate.is_none());
}

#[tokio::test]
async fn test_seeded_store_contains_one_account_per_tier() {
    let repo = InMemoryAccountRepository::seeded();

    let owner = repo.find_by_login("owner").await.unwrap();
    let admin = repo.find_by_login("admin").await.unwrap();
    let user = repo.find_by_login("user1").await.unwrap();

    assert_eq!(owner.role, Role::MainAdmin);
    assert_eq!(admin.role, Role::Admin);
    assert_eq!(user.role, Role::User);

    // Seeds occupy ids 1..=3; new accounts continue after them.
    let created = repo.create(new_account("fourth", Role::User)).await.unwrap();
    assert_eq!(created.id, 4);
}

#[tokio::test]
async fn test_find_by_login_is_case_sensitive() {
    let repo = InMemoryAccountRepository::seeded();

    assert!(repo.find_by_login("owner").await.is_some());
    assert!(repo.find_by_login("Owner").await.is_none());
    assert!(repo.find_by_login("OWNER").await.is_none());
}

#[tokio::test]
async fn test_list_paginates_and_reports_total_count() {
    let repo = InMemoryAccountRepository::new();
    for i in 0..5 {
        repo.create(new_account(&format!("login{i}"), Role::User))
            .await
            .unwrap();
    }

    let (count, first_page) = repo.list(0, 2).await;
    assert_eq!(count, 5);
    assert_eq!(first_page.len(), 2);
    assert_eq!(first_page[0].login, "login0");

    let (_, second_page) = repo.list(1, 2).await;
    assert_eq!(second_page[0].login, "login2");

    // Past the end: the total count is unchanged, the page is empty.
    let (count, empty) = repo.list(10, 2).await;
    assert_eq!(count, 5);
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_update_applies_only_provided_fields() {
    let repo = InMemoryAccountRepository::new();
    let created = repo.create(new_account("mutable", Role::User)).await.unwrap();

    let updated = repo
        .update(
            created.id,
            AccountChanges {
                login: None,
                name: Some("Renamed".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.login, "mutable");
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.role, created.role);
}

#[tokio::test]
async fn test_update_unknown_id_fails() {
    let repo = InMemoryAccountRepository::new();
    let result = repo.update(99, AccountChanges::default()).await;
    assert_eq!(result, Err(UpdateError::NotFound));
}

#[tokio::test]
async fn test_update_rejects_login_taken_by_another_account() {
    let repo = InMemoryAccountRepository::new();
    repo.create(new_account("alice", Role::User)).await.unwrap();
    let bob = repo.create(new_account("bob", Role::User)).await.unwrap();

    // The store itself must refuse the collision; it owns the uniqueness
    // invariant, under the same lock as the write.
    let result = repo
        .update(
            bob.id,
            AccountChanges {
                login: Some("alice".to_string()),
                name: None,
            },
        )
        .await;
    assert_eq!(result, Err(UpdateError::LoginTaken));

    // Nothing was committed.
    let reloaded = repo.find_by_id(bob.id).await.unwrap();
    assert_eq!(reloaded.login, "bob");
}

#[tokio::test]
async fn test_update_allows_keeping_own_login() {
    let repo = InMemoryAccountRepository::new();
    let alice = repo.create(new_account("alice", Role::User)).await.unwrap();

    // Re-submitting the account's own login is not a collision.
    let updated = repo
        .update(
            alice.id,
            AccountChanges {
                login: Some("alice".to_string()),
                name: Some("Still Alice".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.login, "alice");
    assert_eq!(updated.name, "Still Alice");
}

#[tokio::test]
async fn test_update_password_replaces_stored_credential() {
    let repo = InMemoryAccountRepository::new();
    let created = repo.create(new_account("rotating", Role::User)).await.unwrap();

    let updated = repo
        .update_password(created.id, "rotated_secret")
        .await
        .unwrap();

    assert_eq!(updated.password, "rotated_secret");
    let reloaded = repo.find_by_id(created.id).await.unwrap();
    assert_eq!(reloaded.password, "rotated_secret");
}
