//! Session context integration tests
//!
//! Sign in, sign up, sign out and restore against a mock backend, checking
//! both the published session and the persisted record.

use std::sync::Arc;

use assert_matches::assert_matches;
use marketsquare::egui_app::navigation::{AuthRoute, NavState, Navigator};
use marketsquare::egui_app::storage::{MemoryStore, SessionRecord};
use marketsquare::egui_app::{is_admin, Session, SessionContext};
use marketsquare::shared::{ClientError, RegisterRequest, Role};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

async fn mount_login(server: &MockServer, username: &str, password: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": username, "password": password })))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_sign_in_persists_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "alice",
        "secret",
        ResponseTemplate::new(200).set_body_json(auth_body("alice", Some("customer"), "tok123")),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let context = SessionContext::new(config_for(&server), store.clone());
    let mut updates = context.subscribe();

    let session = assert_ok!(context.sign_in("alice", "secret").await);
    assert_eq!(session.role(), Some(&Role::Customer));
    assert_eq!(session.user().map(|u| u.username()).as_deref(), Some("alice"));
    assert_eq!(session.token().map(|t| t.expose()), Some("tok123"));
    assert!(!is_admin(&session));

    let record = assert_ok!(SessionRecord::load(store.as_ref()).await).expect("record saved");
    assert_eq!(record.token, "tok123");
    assert_eq!(record.role, "customer");
    assert_contains!(record.user_json, "\"username\":\"alice\"");

    assert!(updates.has_changed().unwrap_or(false));
    assert_eq!(updates.borrow_and_update().clone(), Some(session.clone()));
    assert_eq!(context.current(), session);
}

#[tokio::test]
async fn test_sign_out_clears_store_and_navigation() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "root",
        "hunter2",
        ResponseTemplate::new(200).set_body_json(auth_body("root", Some("admin"), "admintok")),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let context = SessionContext::new(config_for(&server), store.clone());
    let session = assert_ok!(context.sign_in("root", "hunter2").await);
    assert!(is_admin(&session));

    let mut navigator = Navigator::new();
    assert!(navigator.sync(Some(&context.current())));
    assert_matches!(navigator.state(), NavState::Authenticated { .. });

    assert_ok!(context.sign_out().await);
    assert!(store.is_empty().await);
    assert_eq!(context.current(), Session::Anonymous);

    assert!(navigator.sync(Some(&context.current())));
    assert_eq!(
        navigator.state(),
        &NavState::Unauthenticated {
            route: AuthRoute::Login
        }
    );
}

#[tokio::test]
async fn test_failed_sign_in_keeps_previous_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "alice",
        "secret",
        ResponseTemplate::new(200).set_body_json(auth_body("alice", Some("customer"), "tok123")),
    )
    .await;
    mount_login(
        &server,
        "mallory",
        "guess",
        ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let context = SessionContext::new(config_for(&server), store.clone());
    let alice = assert_ok!(context.sign_in("alice", "secret").await);

    let result = context.sign_in("mallory", "guess").await;
    assert_eq!(
        result,
        Err(ClientError::authentication("Invalid credentials"))
    );
    assert_eq!(context.current(), alice);

    let record = assert_ok!(SessionRecord::load(store.as_ref()).await).expect("record kept");
    assert_eq!(record.token, "tok123");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    let context = SessionContext::new(unreachable_config(), Arc::new(MemoryStore::new()));
    context.restore().await;

    assert_err!(
        context.sign_in("alice", "secret").await,
        ClientError::Transport { .. }
    );
    assert_eq!(context.current(), Session::Anonymous);
}

#[tokio::test]
async fn test_store_failure_does_not_publish_session() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "alice",
        "secret",
        ResponseTemplate::new(200).set_body_json(auth_body("alice", Some("customer"), "tok123")),
    )
    .await;

    let context = SessionContext::new(config_for(&server), Arc::new(FailingStore));
    assert_eq!(context.restore().await, Session::Anonymous);

    assert_err!(
        context.sign_in("alice", "secret").await,
        ClientError::Storage { .. }
    );
    assert_eq!(context.current(), Session::Anonymous);
}

#[tokio::test]
async fn test_restore_does_not_contact_backend() {
    let store = seeded_store("root", "admin", "admintok").await;
    let context = SessionContext::new(unreachable_config(), store);

    let session = context.restore().await;
    assert!(context.is_restored());
    assert!(is_admin(&session));
    assert_eq!(session.token().map(|t| t.expose()), Some("admintok"));
    assert_eq!(session.user().map(|u| u.username()).as_deref(), Some("root"));
}

#[tokio::test]
async fn test_sign_up_role_fallbacks() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "username": "carol",
            "password": "pw",
            "email": "carol@example.com"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("carol", None, "c-tok")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .and(body_json(json!({
            "username": "dave",
            "password": "pw",
            "email": "dave@example.com",
            "role": "admin"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(auth_body("dave", None, "d-tok")))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryStore::new());
    let context = SessionContext::new(config_for(&server), store.clone());

    let carol = assert_ok!(
        context
            .sign_up(RegisterRequest::new("carol", "pw", "carol@example.com"))
            .await
    );
    assert_eq!(carol.role(), Some(&Role::Customer));

    let dave = assert_ok!(
        context
            .sign_up(RegisterRequest::new("dave", "pw", "dave@example.com").with_role("admin"))
            .await
    );
    assert_eq!(dave.role(), Some(&Role::Admin));

    let record = assert_ok!(SessionRecord::load(store.as_ref()).await).expect("record saved");
    assert_eq!(record.token, "d-tok");
    assert_eq!(record.role, "admin");
}

#[tokio::test]
async fn test_sign_up_rejection_keeps_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Username taken" })),
        )
        .mount(&server)
        .await;

    let context = SessionContext::new(config_for(&server), Arc::new(MemoryStore::new()));
    let error = context
        .sign_up(RegisterRequest::new("carol", "pw", "carol@example.com"))
        .await
        .unwrap_err();

    assert_eq!(error, ClientError::registration("Username taken"));
    assert_eq!(error.notice(), "Signup failed: Username taken");
    assert_eq!(context.current(), Session::Anonymous);
}

#[tokio::test]
async fn test_profile_round_trips_through_restore() {
    let user = json!({
        "username": "alice",
        "role": "customer",
        "first_name": null,
        "number": 7700900123u64,
        "loyalty": { "tier": "gold" }
    });
    let server = MockServer::start().await;
    mount_login(
        &server,
        "alice",
        "secret",
        ResponseTemplate::new(200).set_body_json(json!({ "user": user.clone(), "token": "tok123" })),
    )
    .await;

    let store = Arc::new(MemoryStore::new());
    let context = SessionContext::new(config_for(&server), store.clone());
    let signed_in = assert_ok!(context.sign_in("alice", "secret").await);

    let record = assert_ok!(SessionRecord::load(store.as_ref()).await).expect("record saved");
    let persisted: serde_json::Value = assert_ok!(serde_json::from_str(&record.user_json));
    assert_eq!(persisted, user);

    let restored = SessionContext::new(unreachable_config(), store.clone())
        .restore()
        .await;
    assert_eq!(restored, signed_in);
    let profile = restored.user().expect("authenticated");
    assert_eq!(assert_ok!(serde_json::to_string(profile)), record.user_json);
    assert_eq!(profile.number().as_deref(), Some("7700900123"));
    assert_eq!(profile.first_name(), None);
}

#[tokio::test]
async fn test_sign_out_store_failure_still_signs_out() {
    let server = MockServer::start().await;
    mount_login(
        &server,
        "alice",
        "secret",
        ResponseTemplate::new(200).set_body_json(auth_body("alice", Some("customer"), "tok123")),
    )
    .await;

    let store = Arc::new(StickyStore::default());
    let context = SessionContext::new(config_for(&server), store.clone());
    assert_ok!(context.sign_in("alice", "secret").await);
    let mut updates = context.subscribe();

    assert_err!(context.sign_out().await, ClientError::Storage { .. });
    assert_eq!(context.current(), Session::Anonymous);
    assert_eq!(updates.borrow_and_update().clone(), Some(Session::Anonymous));

    let record = assert_ok!(SessionRecord::load(store.as_ref()).await);
    assert_eq!(record.map(|r| r.token).as_deref(), Some("tok123"));
}
