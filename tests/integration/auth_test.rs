//! Login, authenticator, and cookie behaviour.

use http::StatusCode;

use shiftdesk_core::config::Environment;
use shiftdesk_core::error::{ErrorKind, INVALID_CREDENTIALS_MESSAGE};
use shiftdesk_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user = app
        .create_user("alice", "password123", UserRole::SeniorAssistant)
        .await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "password123",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["user"]["username"], "alice");
    assert!(response.body["data"].get("refreshToken").is_none());
    assert_eq!(response.body["data"]["expiresIn"], 15 * 60);

    let token = response.access_token().unwrap();
    let claims = app.issuer.parse_access_token(&token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.role, UserRole::SeniorAssistant);
    assert_eq!(claims.level, 2);
    assert_eq!(claims.exp - claims.iat, 15 * 60);

    let cookie = response.refresh_set_cookie().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Path=/"));
    assert!(response.refresh_cookie().is_some());
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    app.create_user("bob", "password123", UserRole::Assistant)
        .await;

    let mut bodies = Vec::new();
    for (username, password) in [("bob", "wrong-password"), ("nobody", "password123")] {
        let response = app
            .request(
                "POST",
                "/api/v1/auth/login",
                Some(serde_json::json!({
                    "username": username,
                    "password": password,
                })),
                None,
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert!(response.refresh_set_cookie().is_none());
        bodies.push(response.body);
    }

    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["message"], INVALID_CREDENTIALS_MESSAGE);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_login_rejects_malformed_body() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({ "username": "" , "password": "x" })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error_code(),
        Some(u64::from(ErrorKind::Validation.client_code()))
    );

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({ "user": "alice" })),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_protected_route_requires_bearer_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/v1/me", None, None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.error_code(),
        Some(u64::from(ErrorKind::Unauthenticated.client_code()))
    );
}

#[tokio::test]
async fn test_expired_and_forged_tokens_are_told_apart() {
    let app = TestApp::new();
    let user = app
        .create_user("carol", "password123", UserRole::Assistant)
        .await;

    let expired = app
        .issuer
        .issue_access_token_at(
            user.id,
            user.role,
            user.level(),
            chrono::Utc::now() - chrono::Duration::hours(1),
        )
        .unwrap();
    let response = app
        .request("GET", "/api/v1/me", None, Some(&expired), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.error_code(),
        Some(u64::from(ErrorKind::TokenExpired.client_code()))
    );

    let forged = TestApp::with(Environment::Development, |auth| {
        auth.jwt_secret = "a-completely-different-signing-secret".to_string();
    })
    .issuer
    .issue_access_token(user.id, UserRole::BlackCore, 3)
    .unwrap();
    let response = app
        .request("GET", "/api/v1/me", None, Some(&forged), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.error_code(),
        Some(u64::from(ErrorKind::InvalidToken.client_code()))
    );
}

#[tokio::test]
async fn test_me_returns_profile() {
    let app = TestApp::new();
    app.create_user("dave", "password123", UserRole::Assistant)
        .await;
    let (token, _) = app.login("dave", "password123").await;

    let response = app
        .request("GET", "/api/v1/me", None, Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["username"], "dave");
    assert_eq!(response.body["data"]["level"], 1);
    assert!(response.body["data"].get("passwordHash").is_none());
    assert!(response.body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_for_deleted_account_is_not_found() {
    let app = TestApp::new();
    let user = app
        .create_user("erin", "password123", UserRole::Assistant)
        .await;
    let (token, _) = app.login("erin", "password123").await;
    assert!(app.directory.remove(user.id).await);

    let response = app
        .request("GET", "/api/v1/me", None, Some(&token), None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_production_cookie_attributes() {
    let app = TestApp::with(Environment::Production, |_| {});
    app.create_user("frank", "password123", UserRole::Assistant)
        .await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/login",
            Some(serde_json::json!({
                "username": "frank",
                "password": "password123",
            })),
            None,
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cookie = response.refresh_set_cookie().unwrap();
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Expires="));
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/v1/health", None, None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
