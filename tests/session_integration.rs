mod common;

use std::time::Duration;

use common::{build_session, json_response, read_request_head, token_json, user_json, write_response};
use elms_client::api::ApiError;
use elms_client::models::{Credentials, RegistrationRequest, Role, TokenPair};
use elms_client::routing::{navigate, Navigation, DASHBOARD_PATH, LOGIN_PATH};
use elms_client::session::{SessionError, SessionState};
use elms_client::store::TokenStore;
use mockito::{Matcher, Server};
use serde_json::json;
use tokio::net::TcpListener;

#[tokio::test]
async fn integration_login_attaches_new_bearer_token() {
    let mut server = Server::new_async().await;

    let token_mock = server
        .mock("POST", "/api/auth/token/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "username": "landlord", "password": "secret" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(token_json("A", "R"))
        .create_async()
        .await;

    let profile_mock = server
        .mock("GET", "/api/users/profile/")
        .match_header("authorization", "Bearer A")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(1, "landlord", "LANDLORD").to_string())
        .create_async()
        .await;

    let properties_mock = server
        .mock("GET", "/api/properties/")
        .match_header("authorization", "Bearer A")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), None);
    manager.check_auth().await.expect("check_auth should succeed");
    assert_eq!(manager.state(), &SessionState::Anonymous);

    let pair = manager
        .login(&Credentials::new("landlord", "secret"))
        .await
        .expect("login should succeed");
    assert_eq!(pair, TokenPair::new("A", "R"));
    assert_eq!(store.access().unwrap().as_deref(), Some("A"));
    assert_eq!(store.refresh().unwrap().as_deref(), Some("R"));

    let user = manager.user().expect("user should be resolved");
    assert_eq!(user.username, "landlord");
    assert_eq!(user.role, Role::Landlord);

    let properties = manager.client().properties().list().await.unwrap();
    assert!(properties.is_empty());

    token_mock.assert_async().await;
    profile_mock.assert_async().await;
    properties_mock.assert_async().await;
}

#[tokio::test]
async fn integration_rejected_profile_clears_tokens() {
    let mut server = Server::new_async().await;
    let profile_mock = server
        .mock("GET", "/api/users/profile/")
        .match_header("authorization", "Bearer expired")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Given token not valid for any token type"}"#)
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), Some(TokenPair::new("expired", "R")));
    let state = manager.check_auth().await.expect("check_auth should not fail");

    assert_eq!(state, &SessionState::Anonymous);
    assert_eq!(store.access().unwrap(), None);
    assert_eq!(store.refresh().unwrap(), None);
    assert_eq!(navigate(manager.state(), "/dashboard"), Navigation::Redirect(LOGIN_PATH));

    profile_mock.assert_async().await;
}

#[tokio::test]
async fn integration_profile_server_error_also_resets() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/users/profile/")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    manager.check_auth().await.unwrap();

    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(!store.has_access());
}

#[tokio::test]
async fn integration_user_present_iff_token_stored() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/users/profile/")
        .match_header("authorization", "Bearer A")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(2, "tenant", "TENANT").to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/api/auth/token/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(token_json("A", "R"))
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));

    let state = manager.init().await.unwrap();
    assert!(state.is_authenticated());
    assert_eq!(manager.user().is_some(), store.has_access());

    manager.logout().unwrap();
    assert_eq!(manager.user().is_some(), store.has_access());
    assert!(manager.user().is_none());

    manager.login(&Credentials::new("tenant", "pw")).await.unwrap();
    assert_eq!(manager.user().is_some(), store.has_access());
    assert!(manager.user().is_some());

    manager.check_auth().await.unwrap();
    assert_eq!(manager.user().is_some(), store.has_access());
}

#[tokio::test]
async fn integration_init_runs_once() {
    let mut server = Server::new_async().await;
    let profile_mock = server
        .mock("GET", "/api/users/profile/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(3, "caretaker", "CARETAKER").to_string())
        .expect(1)
        .create_async()
        .await;

    let (mut manager, _store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    manager.init().await.unwrap();
    manager.init().await.unwrap();

    assert_eq!(manager.state().role(), Some(&Role::Caretaker));
    profile_mock.assert_async().await;
}

#[tokio::test]
async fn integration_logout_then_check_auth_stays_anonymous() {
    let mut server = Server::new_async().await;
    let profile_mock = server
        .mock("GET", "/api/users/profile/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(1, "admin", "ADMIN").to_string())
        .expect(1)
        .create_async()
        .await;

    let (mut manager, _store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    manager.check_auth().await.unwrap();
    assert!(manager.state().is_authenticated());

    manager.logout().unwrap();
    let state = manager.check_auth().await.unwrap();
    assert_eq!(state, &SessionState::Anonymous);

    // The second check_auth must not have reached the backend.
    profile_mock.assert_async().await;
}

#[tokio::test]
async fn integration_failed_login_propagates_and_keeps_session() {
    let mut server = Server::new_async().await;
    let token_mock = server
        .mock("POST", "/api/auth/token/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "No active account found with the given credentials"}"#)
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), None);
    manager.check_auth().await.unwrap();

    let result = manager.login(&Credentials::new("nobody", "wrong")).await;
    match result {
        Err(SessionError::Api(ApiError::Unauthorized { body, .. })) => {
            assert!(body.contains("No active account"));
        }
        other => panic!("expected unauthorized error, got {:?}", other),
    }
    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(!store.has_access());

    token_mock.assert_async().await;
}

#[tokio::test]
async fn integration_register_does_not_touch_session() {
    let mut server = Server::new_async().await;
    let register_mock = server
        .mock("POST", "/api/users/register/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::PartialJson(json!({
            "username": "newlord",
            "role": "LANDLORD",
            "password2": "pw"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(user_json(9, "newlord", "LANDLORD").to_string())
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), None);
    manager.check_auth().await.unwrap();

    let request = RegistrationRequest {
        username: "newlord".to_string(),
        email: "newlord@example.com".to_string(),
        password: "pw".to_string(),
        password2: "pw".to_string(),
        first_name: "New".to_string(),
        last_name: "Lord".to_string(),
        phone: "0711111111".to_string(),
        role: Role::Landlord,
    };
    let created = manager.register(&request).await.expect("register should succeed");
    assert_eq!(created["username"], "newlord");

    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(!store.has_access());
    register_mock.assert_async().await;
}

#[tokio::test]
async fn integration_register_validation_errors_are_returned() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/users/register/")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username": ["A user with that username already exists."]}"#)
        .create_async()
        .await;

    let (manager, _store) = build_session(&server.url(), None);
    let request = RegistrationRequest {
        username: "taken".to_string(),
        email: "taken@example.com".to_string(),
        password: "pw".to_string(),
        password2: "pw".to_string(),
        first_name: "T".to_string(),
        last_name: "K".to_string(),
        phone: "0722222222".to_string(),
        role: Role::Tenant,
    };

    let error = manager.register(&request).await.unwrap_err();
    match error {
        SessionError::Api(api) => {
            let fields = api.field_errors().expect("validation errors expected");
            assert!(fields["username"][0]
                .as_str()
                .unwrap()
                .contains("already exists"));
        }
        other => panic!("expected api error, got {:?}", other),
    }
}

#[tokio::test]
async fn integration_refresh_access_rotates_access_token() {
    let mut server = Server::new_async().await;
    let refresh_mock = server
        .mock("POST", "/api/auth/token/refresh/")
        .match_header("authorization", Matcher::Missing)
        .match_body(Matcher::Json(json!({ "refresh": "R" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access": "B"}"#)
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    manager.refresh_access().await.expect("refresh should succeed");

    assert_eq!(store.access().unwrap().as_deref(), Some("B"));
    assert_eq!(store.refresh().unwrap().as_deref(), Some("R"));
    refresh_mock.assert_async().await;
}

#[tokio::test]
async fn integration_rejected_refresh_logs_out() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/auth/token/refresh/")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "Token is blacklisted"}"#)
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    let result = manager.refresh_access().await;

    assert!(matches!(result, Err(SessionError::Api(ApiError::Unauthorized { .. }))));
    assert_eq!(manager.state(), &SessionState::Anonymous);
    assert!(!store.has_access());
}

#[tokio::test]
async fn integration_expired_token_on_endpoint_resets_session() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/users/profile/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(1, "admin", "ADMIN").to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/api/tenants/")
        .with_status(401)
        .with_body(r#"{"detail": "expired"}"#)
        .create_async()
        .await;

    let (mut manager, store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    manager.check_auth().await.unwrap();
    assert!(matches!(
        navigate(manager.state(), "/tenants/new"),
        Navigation::Render(_)
    ));

    let error = manager.client().tenants().list().await.unwrap_err();
    assert!(manager.handle_api_error(&error));

    assert!(!store.has_access());
    assert_eq!(navigate(manager.state(), "/tenants/new"), Navigation::Redirect(LOGIN_PATH));
}

#[tokio::test]
async fn integration_gate_uses_resolved_role() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/users/profile/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(user_json(4, "tenant", "TENANT").to_string())
        .create_async()
        .await;

    let (mut manager, _store) = build_session(&server.url(), Some(TokenPair::new("A", "R")));
    assert_eq!(navigate(manager.state(), "/properties"), Navigation::Pending);

    manager.init().await.unwrap();
    assert_eq!(
        navigate(manager.state(), "/properties"),
        Navigation::Redirect(DASHBOARD_PATH)
    );
    assert!(matches!(
        navigate(manager.state(), "/consultation"),
        Navigation::Render(_)
    ));
}

#[tokio::test]
async fn integration_cancelled_init_is_retried() {
    // First connection is accepted and never answered; the second gets a profile.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let backend = tokio::spawn(async move {
        let (stalled, _) = listener.accept().await.unwrap();
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request_head(&mut socket).await;
        let body = user_json(5, "landlord", "LANDLORD").to_string();
        write_response(&mut socket, &json_response(&body)).await;
        drop(stalled);
    });

    let (mut manager, store) =
        build_session(&format!("http://{}", addr), Some(TokenPair::new("A", "R")));

    let cancelled = tokio::time::timeout(Duration::from_millis(200), manager.init()).await;
    assert!(cancelled.is_err(), "init should still be waiting on the backend");
    assert_eq!(manager.state(), &SessionState::Unresolved);
    assert!(store.has_access());
    assert_eq!(navigate(manager.state(), "/dashboard"), Navigation::Pending);

    let state = tokio::time::timeout(Duration::from_secs(5), manager.init())
        .await
        .expect("second init should complete")
        .unwrap();
    assert!(state.is_authenticated());
    assert_eq!(manager.state().role(), Some(&Role::Landlord));
    assert!(matches!(
        navigate(manager.state(), "/dashboard"),
        Navigation::Render(_)
    ));

    backend.await.unwrap();
}
