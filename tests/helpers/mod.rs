//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use stockroom_api::{AppState, build_app};
use stockroom_core::config::AppConfig;
use stockroom_database::MemoryIdentityStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Identity store behind the router, for direct inspection
    pub store: MemoryIdentityStore,
    /// Application config
    pub config: AppConfig,
}

impl TestApp {
    /// Create a new test application over an empty in-memory store
    pub fn new() -> Self {
        let config =
            AppConfig::load_from("tests/fixtures", "test").expect("Failed to load test config");
        let store = MemoryIdentityStore::new();

        let state = AppState::new(config.clone(), Arc::new(store.clone()))
            .expect("Failed to build app state");

        Self {
            router: build_app(state),
            store,
            config,
        }
    }

    /// Sign up and return the issued token
    pub async fn signup(&self, email: &str, password: &str) -> String {
        let response = self
            .request("POST", "/signup", Some(credentials(email, password)), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Signup failed: {:?}",
            response.body
        );
        response.token()
    }

    /// Sign in and return the issued token
    pub async fn signin(&self, email: &str, password: &str) -> String {
        let response = self
            .request("POST", "/signin", Some(credentials(email, password)), None)
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Signin failed: {:?}",
            response.body
        );
        response.token()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = match body {
            Some(body) => req
                .header("Content-Type", "application/json")
                .body(Body::from(
                    serde_json::to_string(&body).expect("Failed to serialize body"),
                )),
            None => req.body(Body::empty()),
        }
        .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a fully built request
    pub async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// `{email, password}` request body
pub fn credentials(email: &str, password: &str) -> Value {
    serde_json::json!({ "email": email, "password": password })
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `token` field of a session response
    pub fn token(&self) -> String {
        self.body
            .get("token")
            .and_then(|v| v.as_str())
            .expect("No token in response")
            .to_string()
    }

    /// The `error` code of an error response
    pub fn error_code(&self) -> &str {
        self.body
            .get("error")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
    }
}
