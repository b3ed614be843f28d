//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE, SET_COOKIE};
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use shiftdesk_auth::{
    MemoryRefreshTokenStore, MemoryUserDirectory, PasswordHasher, SessionManager, TokenIssuer,
    UserDirectory,
};
use shiftdesk_core::config::{
    AppConfig, AuthConfig, DatabaseConfig, Environment, InitialAdminConfig, LoggingConfig,
    ServerConfig, SweeperConfig,
};
use shiftdesk_entity::user::{CreateUser, User, UserRole};

pub const COOKIE_NAME: &str = "__session_refresh_token";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Refresh-token store shared with the router
    pub store: MemoryRefreshTokenStore,
    /// User directory shared with the router
    pub directory: MemoryUserDirectory,
    /// Issuer with the same secret as the router
    pub issuer: Arc<TokenIssuer>,
    hasher: PasswordHasher,
}

impl TestApp {
    /// Development environment, default auth settings
    pub fn new() -> Self {
        Self::with(Environment::Development, |_| {})
    }

    /// Build the app with a custom environment and auth section
    pub fn with(environment: Environment, configure: impl FnOnce(&mut AuthConfig)) -> Self {
        let mut auth = AuthConfig {
            jwt_secret: "integration-test-secret-0123456789abcdef".to_string(),
            password_hash_memory_kib: 1024,
            password_hash_iterations: 1,
            ..AuthConfig::default()
        };
        configure(&mut auth);

        let config = AppConfig {
            environment,
            server: ServerConfig::default(),
            database: DatabaseConfig {
                url: "postgres://unused@localhost/unused".to_string(),
                max_connections: 1,
                min_connections: 0,
                connect_timeout_seconds: 1,
                idle_timeout_seconds: 1,
            },
            auth,
            sweeper: SweeperConfig::default(),
            initial_admin: InitialAdminConfig::default(),
            logging: LoggingConfig::default(),
        };

        let store = MemoryRefreshTokenStore::new();
        let directory = MemoryUserDirectory::new();
        let hasher = PasswordHasher::new(&config.auth).expect("Invalid test hash params");
        let issuer = Arc::new(TokenIssuer::new(&config.auth).expect("Invalid test secret"));

        let sessions = Arc::new(
            SessionManager::new(
                Arc::clone(&issuer),
                Arc::new(store.clone()),
                Arc::new(directory.clone()),
                Arc::new(hasher.clone()),
                &config.auth,
            )
            .expect("Invalid test auth config"),
        );

        let router = shiftdesk_api::build_router(shiftdesk_api::AppState::new(
            Arc::new(config),
            sessions,
        ));

        Self {
            router,
            store,
            directory,
            issuer,
            hasher,
        }
    }

    /// Create a test user and return it
    pub async fn create_user(&self, username: &str, password: &str, role: UserRole) -> User {
        self.directory
            .create(&CreateUser {
                username: username.to_string(),
                email: format!("{username}@test.com"),
                full_name: username.to_string(),
                password_hash: self.hasher.hash_password(password).expect("Failed to hash"),
                role,
            })
            .await
            .expect("Failed to create test user")
    }

    /// Login and return the access token and the raw refresh cookie value
    pub async fn login(&self, username: &str, password: &str) -> (String, String) {
        let response = self
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

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        let token = response.access_token().expect("No accessToken in login response");
        let cookie = response
            .refresh_cookie()
            .expect("No refresh cookie in login response");
        (token, cookie)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        refresh_cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(cookie) = refresh_cookie {
            req = req.header(COOKIE, format!("{COOKIE_NAME}={cookie}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            set_cookies,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
    /// Raw `Set-Cookie` header values
    pub set_cookies: Vec<String>,
}

impl TestResponse {
    /// `data.accessToken` of a success body
    pub fn access_token(&self) -> Option<String> {
        self.body["data"]["accessToken"].as_str().map(str::to_string)
    }

    /// Numeric error code of a failure body
    pub fn error_code(&self) -> Option<u64> {
        self.body["code"].as_u64()
    }

    /// Full `Set-Cookie` line for the refresh cookie
    pub fn refresh_set_cookie(&self) -> Option<&str> {
        self.set_cookies
            .iter()
            .map(String::as_str)
            .find(|c| c.starts_with(&format!("{COOKIE_NAME}=")))
    }

    /// Value of the refresh cookie, if set to a non-empty value
    pub fn refresh_cookie(&self) -> Option<String> {
        let line = self.refresh_set_cookie()?;
        let value = line[COOKIE_NAME.len() + 1..]
            .split(';')
            .next()
            .unwrap_or_default();
        (!value.is_empty()).then(|| value.to_string())
    }
}
