//! Refresh and logout flows.

use std::time::Duration;

use chrono::Utc;
use http::StatusCode;

use shiftdesk_auth::RefreshTokenStore;
use shiftdesk_auth::token::{generate_secret, hash_secret};
use shiftdesk_core::config::{Environment, LogoutScope};
use shiftdesk_core::error::ErrorKind;
use shiftdesk_entity::user::UserRole;

use crate::helpers::TestApp;

fn code(kind: ErrorKind) -> Option<u64> {
    Some(u64::from(kind.client_code()))
}

#[tokio::test]
async fn test_refresh_rotates_cookie() {
    let app = TestApp::new();
    app.create_user("alice", "password123", UserRole::Assistant)
        .await;
    let (_, cookie) = app.login("alice", "password123").await;

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.access_token().is_some());
    assert_eq!(response.body["data"]["expiresIn"], 15 * 60);
    let rotated = response.refresh_cookie().unwrap();
    assert_ne!(rotated, cookie);

    // The replaced token is single-use
    let replay = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(replay.status, StatusCode::UNAUTHORIZED);
    assert_eq!(replay.error_code(), code(ErrorKind::InvalidRefreshToken));

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&rotated))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_with_expired_access_token() {
    let app = TestApp::new();
    let user = app
        .create_user("bob", "password123", UserRole::SeniorAssistant)
        .await;
    let (_, cookie) = app.login("bob", "password123").await;
    let expired = app
        .issuer
        .issue_access_token_at(
            user.id,
            user.role,
            user.level(),
            Utc::now() - chrono::Duration::hours(2),
        )
        .unwrap();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(&expired),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let claims = app
        .issuer
        .parse_access_token(&response.access_token().unwrap())
        .unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert_eq!(claims.role, UserRole::SeniorAssistant);
    assert_eq!(claims.level, 2);
}

#[tokio::test]
async fn test_refresh_token_of_another_user_is_rejected() {
    let app = TestApp::new();
    app.create_user("carol", "password123", UserRole::Assistant)
        .await;
    app.create_user("dave", "password123", UserRole::Assistant)
        .await;
    let (carol_token, _) = app.login("carol", "password123").await;
    let (_, dave_cookie) = app.login("dave", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(&carol_token),
            Some(&dave_cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code(ErrorKind::InvalidRefreshToken));
}

#[tokio::test]
async fn test_refresh_with_forged_access_token() {
    let app = TestApp::new();
    let user = app
        .create_user("zoe", "password123", UserRole::Assistant)
        .await;
    let (_, cookie) = app.login("zoe", "password123").await;
    let forged = TestApp::with(Environment::Development, |auth| {
        auth.jwt_secret = "a-completely-different-signing-secret".to_string();
    })
    .issuer
    .issue_access_token(user.id, UserRole::BlackCore, 3)
    .unwrap();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            None,
            Some(&forged),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code(ErrorKind::InvalidToken));

    // The cookie was not consumed by the rejected attempt
    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_cookie_is_unauthenticated() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code(ErrorKind::Unauthenticated));
}

#[tokio::test]
async fn test_refresh_with_unknown_cookie() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/v1/auth/refresh",
            None,
            None,
            Some(&generate_secret()),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code(ErrorKind::InvalidRefreshToken));
}

#[tokio::test]
async fn test_expired_unrevoked_refresh_token_is_rejected() {
    let app = TestApp::new();
    let user = app
        .create_user("erin", "password123", UserRole::Assistant)
        .await;
    let raw = generate_secret();
    app.store
        .insert(
            user.id,
            &hash_secret(&raw),
            Utc::now() - chrono::Duration::minutes(1),
        )
        .await
        .unwrap();

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&raw))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code(ErrorKind::InvalidRefreshToken));
}

#[tokio::test]
async fn test_logout_revokes_refresh_token_and_clears_cookie() {
    let app = TestApp::new();
    app.create_user("frank", "password123", UserRole::Assistant)
        .await;
    let (token, cookie) = app.login("frank", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/logout",
            None,
            Some(&token),
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let cleared = response.refresh_set_cookie().unwrap();
    assert!(cleared.starts_with("__session_refresh_token=;"));
    assert!(response.refresh_cookie().is_none());

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), code(ErrorKind::InvalidRefreshToken));
}

#[tokio::test]
async fn test_logout_requires_access_token() {
    let app = TestApp::new();

    let response = app
        .request("POST", "/api/v1/auth/logout", None, None, None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_all_revokes_every_device() {
    let app = TestApp::new();
    app.create_user("grace", "password123", UserRole::Assistant)
        .await;
    let (token, laptop) = app.login("grace", "password123").await;
    let (_, phone) = app.login("grace", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/logout",
            None,
            Some(&token),
            Some(&laptop),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&phone))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_session_scope_keeps_other_devices() {
    let app = TestApp::with(Environment::Development, |auth| {
        auth.logout_scope = LogoutScope::Session;
    });
    app.create_user("heidi", "password123", UserRole::Assistant)
        .await;
    let (token, laptop) = app.login("heidi", "password123").await;
    let (_, phone) = app.login("heidi", "password123").await;

    let response = app
        .request(
            "POST",
            "/api/v1/auth/logout",
            None,
            Some(&token),
            Some(&laptop),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&laptop))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&phone))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_without_rotation_keeps_cookie() {
    let app = TestApp::with(Environment::Development, |auth| {
        auth.rotate_refresh_tokens = false;
        auth.access_token_ttl_minutes = 5;
    });
    app.create_user("ivan", "password123", UserRole::Assistant)
        .await;
    let (_, cookie) = app.login("ivan", "password123").await;

    for _ in 0..2 {
        let response = app
            .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["data"]["expiresIn"], 5 * 60);
        assert!(response.refresh_set_cookie().is_none());
    }
    assert_eq!(app.store.len().await, 1);
}

#[tokio::test]
async fn test_refreshed_token_is_issued_later() {
    let app = TestApp::new();
    app.create_user("judy", "password123", UserRole::Assistant)
        .await;
    let (token, cookie) = app.login("judy", "password123").await;
    let first = app.issuer.parse_access_token(&token).unwrap();

    tokio::time::sleep(Duration::from_millis(1100)).await;

    let response = app
        .request("POST", "/api/v1/auth/refresh", None, None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let second = app
        .issuer
        .parse_access_token(&response.access_token().unwrap())
        .unwrap();

    assert!(second.iat > first.iat);
    assert!(second.exp > first.exp);
}
