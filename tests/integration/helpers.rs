//! Shared test helpers for integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use hourbook_api::{AppState, build_app};
use hourbook_auth::JwtEncoder;
use hourbook_core::config::{AppConfig, DatabaseProvider};
use hourbook_database::Store;
use hourbook_database::store::{ClassStore, UserStore};
use hourbook_entity::class::CreateClass;
use hourbook_entity::user::{CreateUser, User, UserRole};

pub const IDENTITY_KEY: &str = "integration-identity-key";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// In-memory store shared with the router
    pub store: Store,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

/// A seeded account and a valid access token for it.
pub struct TestUser {
    pub user: User,
    pub token: String,
}

impl TestUser {
    pub fn id(&self) -> String {
        self.user.id.to_string()
    }
}

impl TestApp {
    /// Create a new test application on the in-memory store
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = DatabaseProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret-0123456789".to_string();
        config.auth.identity_key = IDENTITY_KEY.to_string();

        let store = Store::memory();
        let encoder = JwtEncoder::new(&config.auth);
        let router = build_app(AppState::new(config.clone(), store.clone()));

        Self {
            router,
            store,
            config,
            encoder,
        }
    }

    /// Insert a user directly and mint a token for them
    pub async fn create_user(
        &self,
        email: &str,
        first: &str,
        last: &str,
        role: UserRole,
    ) -> TestUser {
        let user = self
            .store
            .users
            .create(&CreateUser::new(email, first, last, role))
            .await
            .expect("Failed to create test user");
        let token = self
            .encoder
            .generate_token_pair(user.id, user.role, &user.email)
            .expect("Failed to mint token")
            .access_token;
        TestUser { user, token }
    }

    /// Insert a class
    pub async fn create_class(&self, class_name: &str, hour_requirement: f64) {
        self.store
            .classes
            .create(&CreateClass {
                class_name: class_name.to_string(),
                hour_requirement,
            })
            .await
            .expect("Failed to create test class");
    }

    /// Volunteer, supervisor and admin plus class RSSW290.
    pub async fn seeded(&self) -> (TestUser, TestUser, TestUser) {
        self.create_class("RSSW290", 20.0).await;
        let volunteer = self
            .create_user("vera@x.org", "Vera", "Lunde", UserRole::Volunteer)
            .await;
        let supervisor = self
            .create_user("sam@x.org", "Sam", "Reyes", UserRole::Supervisor)
            .await;
        let admin = self
            .create_user("ada@x.org", "Ada", "Okafor", UserRole::Admin)
            .await;
        (volunteer, supervisor, admin)
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_with_headers(method, path, body, token, &[]).await
    }

    /// Make an HTTP request with extra headers
    pub async fn request_with_headers(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        for (name, value) in headers {
            req = req.header(*name, *value);
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
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Submit the canonical RSSW290 registration as `volunteer`, returning its id
    pub async fn submit_registration(&self, volunteer: &TestUser) -> String {
        let response = self
            .request(
                "POST",
                "/api/registration-requests",
                Some(serde_json::json!({
                    "course_name": "RSSW290",
                    "semester": "Fall",
                    "year": 2024,
                    "organization": "Food Bank",
                    "supervisor_email": "sam@x.org",
                })),
                Some(&volunteer.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.data()["id"]
            .as_str()
            .expect("registration id")
            .to_string()
    }

    /// Submit an hours request from `from` to `to` on 2024-10-03
    pub async fn submit_hours(&self, volunteer: &TestUser, from: &str, to: &str) -> TestResponse {
        self.request(
            "POST",
            "/api/hours-requests",
            Some(serde_json::json!({
                "supervisor_email": "sam@x.org",
                "class_name": "RSSW290",
                "date": "2024-10-03",
                "from_time": from,
                "to_time": to,
                "activity": "Tutoring",
            })),
            Some(&volunteer.token),
        )
        .await
    }
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
    /// The `data` field of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
