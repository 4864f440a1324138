//! Shared harness: in-memory store, real router, wiremock standing in for
//! GitHub and Atlas.

#![allow(dead_code)]

use access_server::core::DeleteMode;
use access_server::{Config, ServerState};
use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery";
pub const GITHUB_TOKEN: &str = "ghp_test_token";

pub struct TestApp {
    pub app: Router,
    pub state: ServerState,
    pub mock: MockServer,
}

pub fn test_config(mock_uri: &str) -> Config {
    Config {
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        github_api_url: mock_uri.to_string(),
        atlas_api_url: format!("{mock_uri}/api/atlas/v2"),
        platform_timeout_secs: 5,
        ..Config::in_memory()
    }
}

pub async fn spawn() -> TestApp {
    spawn_with(DeleteMode::Hard).await
}

pub async fn spawn_with(delete_mode: DeleteMode) -> TestApp {
    spawn_configured(|config| config.delete_mode = delete_mode).await
}

/// Spawn with a tweaked config; URLs already point at the mock server
pub async fn spawn_configured(tweak: impl FnOnce(&mut Config)) -> TestApp {
    let mock = MockServer::start().await;
    let mut config = test_config(&mock.uri());
    tweak(&mut config);
    let state = ServerState::initialize(&config)
        .await
        .expect("state should initialize");
    let app = access_server::api::build_app(&state);
    TestApp { app, state, mock }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// Log in as the bootstrap admin, returning (accessToken, refreshToken)
    pub async fn login(&self) -> (String, String) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {body}");
        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["refreshToken"].as_str().unwrap().to_string(),
        )
    }

    /// Answer GitHub's public user lookup for `account`
    pub async fn github_user_exists(&self, account: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{account}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": account })))
            .mount(&self.mock)
            .await;
    }

    pub async fn github_user_missing(&self, account: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/users/{account}")))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
            .mount(&self.mock)
            .await;
    }

    pub async fn store_github_credential(&self, token: &str) {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/platforms",
                Some(token),
                Some(json!({
                    "name": "GitHub",
                    "apiEndpoint": "https://api.github.com",
                    "authMethod": "token",
                    "credentials": { "apiKey": GITHUB_TOKEN }
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "platform create failed: {body}");
    }

    /// Create an employee; GitHub links must already be mocked
    pub async fn create_employee(&self, token: &str, payload: Value) -> Value {
        let (status, body) = self
            .send(Method::POST, "/api/employees", Some(token), Some(payload))
            .await;
        assert_eq!(status, StatusCode::CREATED, "employee create failed: {body}");
        body["employee"].clone()
    }
}
