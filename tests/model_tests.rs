use latte_gallery::models::{
    Account, AccountResponse, Page, PageQuery, Role, StatusResponse, validate_name,
    validate_password,
};

#[test]
fn test_role_wire_format_is_screaming_snake() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), r#""USER""#);
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), r#""ADMIN""#);
    assert_eq!(
        serde_json::to_string(&Role::MainAdmin).unwrap(),
        r#""MAIN_ADMIN""#
    );

    let role: Role = serde_json::from_str(r#""MAIN_ADMIN""#).unwrap();
    assert_eq!(role, Role::MainAdmin);
}

#[test]
fn test_role_privilege_ordering() {
    assert!(Role::User < Role::Admin);
    assert!(Role::Admin < Role::MainAdmin);
    assert!(!Role::User.is_admin());
    assert!(Role::Admin.is_admin());
    assert!(Role::MainAdmin.is_admin());
}

#[test]
fn test_account_response_never_exposes_password() {
    let account = Account {
        id: 1,
        login: "user1".to_string(),
        name: "Vasya Pupkin".to_string(),
        role: Role::User,
        password: "user1_secret".to_string(),
    };

    let response = AccountResponse::from(account);
    let json_output = serde_json::to_string(&response).unwrap();

    assert!(json_output.contains(r#""login":"user1""#));
    assert!(!json_output.contains("password"));
    assert!(!json_output.contains("user1_secret"));
}

#[test]
fn test_status_response_serialization() {
    let json_output = serde_json::to_string(&StatusResponse::ok()).unwrap();
    assert_eq!(json_output, r#"{"status":"ok"}"#);
}

#[test]
fn test_page_envelope_serialization() {
    let page = Page {
        count: 42,
        items: vec![AccountResponse {
            id: 1,
            login: "owner".to_string(),
            name: "Peter Ivanov".to_string(),
            role: Role::MainAdmin,
        }],
    };

    let json_output = serde_json::to_string(&page).unwrap();
    assert!(json_output.contains(r#""count":42"#));
    assert!(json_output.contains(r#""role":"MAIN_ADMIN""#));
}

#[test]
fn test_page_query_defaults() {
    let query: PageQuery = serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(query.page, 0);
    assert_eq!(query.size, 10);
}

#[test]
fn test_validate_name_trims_and_rejects_empty() {
    assert_eq!(validate_name("login", "  user1  ").unwrap(), "user1");
    assert!(validate_name("login", "").is_err());
    assert!(validate_name("login", "   ").is_err());
}

#[test]
fn test_validate_password_rules() {
    assert!(validate_password("abcd1234").is_ok());
    assert!(validate_password("with_underscore-and-dash1").is_ok());

    // Too short.
    assert!(validate_password("abc123").is_err());
    // Disallowed characters.
    assert!(validate_password("has spaces!").is_err());
    assert!(validate_password("p@ssword!").is_err());
}
