//! Root-only session administration.

use http::StatusCode;

use shiftdesk_core::error::ErrorKind;
use shiftdesk_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_non_root_callers_are_forbidden() {
    let app = TestApp::new();
    let target = app
        .create_user("alice", "password123", UserRole::Assistant)
        .await;
    app.create_user("senior", "password123", UserRole::SeniorAssistant)
        .await;
    let (token, _) = app.login("senior", "password123").await;

    let path = format!("/api/v1/admin/users/{}/sessions", target.id);
    let response = app.request("GET", &path, None, Some(&token), None).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.error_code(),
        Some(u64::from(ErrorKind::Forbidden.client_code()))
    );

    let response = app
        .request("POST", &format!("{path}/revoke"), None, Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_routes_require_authentication() {
    let app = TestApp::new();

    let response = app
        .request("GET", "/api/v1/admin/users/1/sessions", None, None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_root_lists_and_revokes_sessions() {
    let app = TestApp::new();
    app.create_user("root", "rootpass", UserRole::BlackCore)
        .await;
    let target = app
        .create_user("bob", "password123", UserRole::Assistant)
        .await;
    let (root_token, _) = app.login("root", "rootpass").await;
    let (_, first) = app.login("bob", "password123").await;
    let (_, second) = app.login("bob", "password123").await;

    let path = format!("/api/v1/admin/users/{}/sessions", target.id);
    let response = app
        .request("GET", &path, None, Some(&root_token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let sessions = response.body["data"].as_array().unwrap();
    assert_eq!(sessions.len(), 2);
    assert!(sessions[0]["id"].as_i64() > sessions[1]["id"].as_i64());
    assert!(sessions[0].get("refreshTokenHash").is_none());

    let response = app
        .request(
            "POST",
            &format!("{path}/revoke"),
            None,
            Some(&root_token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["revoked"], 2);

    for cookie in [first, second] {
        let response = app
            .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    }

    let response = app
        .request("GET", &path, None, Some(&root_token), None)
        .await;
    assert_eq!(response.body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_sessions_of_unknown_user_are_not_found() {
    let app = TestApp::new();
    app.create_user("root", "rootpass", UserRole::BlackCore)
        .await;
    let (root_token, _) = app.login("root", "rootpass").await;

    let response = app
        .request(
            "GET",
            "/api/v1/admin/users/9999/sessions",
            None,
            Some(&root_token),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
