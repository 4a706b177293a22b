use serde_json::json;

use super::*;
use crate::api::mock::MockBackend;
use crate::web::storage::MemoryTokens;

fn user_json(username: &str, is_staff: bool) -> serde_json::Value {
    json!({
        "id": 7,
        "username": username,
        "email": format!("{username}@scuffers.com"),
        "is_staff": is_staff,
        "is_superuser": false,
    })
}

#[tokio::test]
async fn login_stores_tokens_then_loads_profile() {
    let backend = MockBackend::new();
    backend.mock_ok("login", json!({ "access": "acc-1", "refresh": "ref-1" }));
    backend.mock_ok("me", user_json("lucas", false));
    let tokens = MemoryTokens::new();

    let user = login_with(&backend, &tokens, "lucas@scuffers.com", "secret")
        .await
        .unwrap();

    assert_eq!(user.username, "lucas");
    assert_eq!(tokens.access().as_deref(), Some("acc-1"));
    assert_eq!(tokens.refresh().as_deref(), Some("ref-1"));
    assert_eq!(backend.recorded_calls(), vec!["login lucas@scuffers.com", "me"]);
}

#[tokio::test]
async fn login_bad_credentials_leaves_no_session() {
    let backend = MockBackend::new();
    backend.mock_err(
        "login",
        ApiError::Http {
            status: 401,
            detail: Some("Credenciales inválidas".into()),
        },
    );
    let tokens = MemoryTokens::new();

    let err = login_with(&backend, &tokens, "lucas@scuffers.com", "wrong")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert!(tokens.access().is_none());
}

#[tokio::test]
async fn login_profile_failure_clears_fresh_tokens() {
    // token 已落盘但 me() 失败：不能留下半个会话
    let backend = MockBackend::new();
    backend.mock_ok("login", json!({ "access": "acc-1", "refresh": "ref-1" }));
    backend.mock_err(
        "me",
        ApiError::Http {
            status: 500,
            detail: None,
        },
    );
    let tokens = MemoryTokens::new();

    let result = login_with(&backend, &tokens, "lucas@scuffers.com", "secret").await;

    assert!(result.is_err());
    assert!(tokens.access().is_none());
    assert!(tokens.refresh().is_none());
}

#[tokio::test]
async fn register_returns_authenticated_user() {
    let backend = MockBackend::new();
    backend.mock_ok(
        "register",
        json!({
            "user": user_json("nueva", false),
            "access": "acc-r",
            "refresh": "ref-r",
        }),
    );
    let tokens = MemoryTokens::new();

    let request = RegisterRequest {
        username: "nueva".into(),
        email: "nueva@scuffers.com".into(),
        password: "secret".into(),
        first_name: String::new(),
    };
    let user = register_with(&backend, &tokens, request).await.unwrap();

    assert_eq!(user.username, "nueva");
    assert_eq!(tokens.access().as_deref(), Some("acc-r"));
}

#[tokio::test]
async fn restore_without_token_skips_network() {
    let backend = MockBackend::new();
    let tokens = MemoryTokens::new();

    assert!(restore_with(&backend, &tokens).await.is_none());
    assert!(backend.recorded_calls().is_empty());
}

#[tokio::test]
async fn restore_with_stale_token_clears_it() {
    let backend = MockBackend::new();
    backend.mock_err(
        "me",
        ApiError::Http {
            status: 401,
            detail: None,
        },
    );
    let tokens = MemoryTokens::with_tokens("stale", "stale-r");

    assert!(restore_with(&backend, &tokens).await.is_none());
    assert!(tokens.access().is_none());
    assert!(tokens.refresh().is_none());
}

#[tokio::test]
async fn restore_with_valid_token_returns_user() {
    let backend = MockBackend::new();
    backend.mock_ok("me", user_json("admin", true));
    let tokens = MemoryTokens::with_tokens("acc", "ref");

    let user = restore_with(&backend, &tokens).await.unwrap();
    assert!(user.is_admin());
    assert_eq!(tokens.access().as_deref(), Some("acc"));
}

#[test]
fn logout_is_idempotent() {
    let tokens = MemoryTokens::with_tokens("acc", "ref");
    logout_with(&tokens);
    logout_with(&tokens);
    assert!(tokens.access().is_none());
    assert!(tokens.refresh().is_none());
}

#[test]
fn default_state_starts_loading() {
    let state = AuthState::default();
    assert!(state.is_loading);
    assert!(!state.is_authenticated);
    assert!(!state.is_admin());
}
