//! Integration test helpers
//!
//! Spawns the demo server on an ephemeral port in front of an in-process fake
//! Hand-E API that records every call it receives.

#![allow(dead_code)]

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use hande_core::HandEConfig;
use hande_web::{create_app, AppState, WebConfig};
use serde_json::{json, Value};
use std::sync::{Arc, LazyLock, Mutex};
use tokio::net::TcpListener;

pub const SECRET: &str = "deploy-secret";
pub const USER_TOKEN: &str = "user-token";
pub const OWNER_TOKEN: &str = "owner-token";
/// Token whose usage reports Hand-E refuses
pub const BROKE_TOKEN: &str = "broke-token";

static TRACING: LazyLock<()> = LazyLock::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    } else {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::sink)
            .finish();
        tracing::subscriber::set_global_default(subscriber).ok();
    }
});

/// One request seen by the fake Hand-E API
#[derive(Debug, Clone)]
pub struct UpstreamCall {
    pub path: String,
    pub secret: Option<String>,
    pub token: Option<String>,
    pub body: Value,
}

/// Calls received by the fake Hand-E API
#[derive(Debug, Default)]
pub struct FakeHandE {
    calls: Mutex<Vec<UpstreamCall>>,
}

impl FakeHandE {
    fn record(&self, path: &str, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.calls.lock().unwrap().push(UpstreamCall {
            path: path.to_string(),
            secret: header("x-hande-secret"),
            token: header("x-hande-user-token"),
            body,
        });
    }

    pub fn calls(&self) -> Vec<UpstreamCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, path: &str) -> Vec<UpstreamCall> {
        self.calls().into_iter().filter(|c| c.path == path).collect()
    }
}

fn user_token(headers: &HeaderMap) -> Option<&str> {
    headers.get("x-hande-user-token").and_then(|v| v.to_str().ok())
}

async fn me(State(fake): State<Arc<FakeHandE>>, headers: HeaderMap) -> Json<Value> {
    fake.record("/sdk/me", &headers, Value::Null);
    Json(json!({
        "owner": {
            "email": "owner@example.com",
            "name": "Olivia",
            "company": "<script>alert('company')</script>"
        },
        "plan": {"name": "<b>Gold</b>"},
        "access_mode": "PUBLIC",
        "resources": {"cpu": "0.5", "memory": "512Mi"}
    }))
}

async fn me_user(State(fake): State<Arc<FakeHandE>>, headers: HeaderMap) -> impl IntoResponse {
    fake.record("/sdk/me/user", &headers, Value::Null);
    match user_token(&headers) {
        Some(USER_TOKEN) | Some(BROKE_TOKEN) => (
            StatusCode::OK,
            Json(json!({"user": {"id": 7, "email": "ada@example.com", "name": "Ada"}})),
        ),
        Some(OWNER_TOKEN) => (
            StatusCode::OK,
            Json(json!({"user": {"id": 1, "email": "owner@example.com", "name": "Olivia"}})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid token"})),
        ),
    }
}

async fn login(
    State(fake): State<Arc<FakeHandE>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    fake.record("/sdk/auth/login", &headers, body.clone());
    match body["email"].as_str() {
        Some("ada@example.com") if body["password"] == "secret" => {
            (StatusCode::OK, Json(json!({"token": USER_TOKEN})))
        }
        Some("owner@example.com") => (StatusCode::OK, Json(json!({"token": OWNER_TOKEN}))),
        Some("tokenless@example.com") => (StatusCode::OK, Json(json!({"user": {"id": 3}}))),
        Some("mangled@example.com") => (StatusCode::OK, Json(json!({"token": "abc; def,ghi"}))),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "bad credentials"})),
        ),
    }
}

async fn usage(
    State(fake): State<Arc<FakeHandE>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    fake.record("/sdk/usage", &headers, body);
    if user_token(&headers) == Some(BROKE_TOKEN) {
        return (StatusCode::PAYMENT_REQUIRED, "quota exhausted".to_string());
    }
    (StatusCode::CREATED, String::new())
}

async fn consumption(
    State(fake): State<Arc<FakeHandE>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    fake.record("/sdk/consumption-by-user", &headers, Value::Null);
    match user_token(&headers) {
        Some(OWNER_TOKEN) => (
            StatusCode::OK,
            Json(json!({"users": [
                {"email": "ada@example.com", "task_execution": 3, "chat_message": 12},
                {"email": "owner@example.com", "task_execution": 1, "chat_message": 0}
            ]})),
        ),
        _ => (
            StatusCode::FORBIDDEN,
            Json(json!({"error": "only the deployment owner may view consumption"})),
        ),
    }
}

/// Start the fake Hand-E API, returning its base URL (without `/api`)
pub async fn spawn_fake_hande() -> (String, Arc<FakeHandE>) {
    let fake = Arc::new(FakeHandE::default());
    let app = Router::new()
        .route("/api/sdk/me", get(me))
        .route("/api/sdk/me/user", get(me_user))
        .route("/api/sdk/auth/login", post(login))
        .route("/api/sdk/usage", post(usage))
        .route("/api/sdk/consumption-by-user", get(consumption))
        .with_state(fake.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), fake)
}

/// Address nothing listens on
pub async fn closed_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Demo server under test
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub upstream: Arc<FakeHandE>,
}

impl TestApp {
    pub async fn get_page(&self, cookie: Option<&str>) -> reqwest::Response {
        self.get("/", cookie).await
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self.api_client.get(format!("{}{}", self.address, path));
        if let Some(token) = cookie {
            request = request.header("Cookie", session_cookie(token));
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_login(&self, email: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/login", self.address))
            .form(&[("email", email), ("password", password)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_logout(&self, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self.api_client.post(format!("{}/logout", self.address));
        if let Some(token) = cookie {
            request = request.header("Cookie", session_cookie(token));
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_execute_task(&self, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self
            .api_client
            .post(format!("{}/execute-task", self.address));
        if let Some(token) = cookie {
            request = request.header("Cookie", session_cookie(token));
        }
        request.send().await.expect("Failed to execute request.")
    }

    pub async fn post_chat(&self, body: &Value, cookie: Option<&str>) -> reqwest::Response {
        let mut request = self
            .api_client
            .post(format!("{}/chat", self.address))
            .json(body);
        if let Some(token) = cookie {
            request = request.header("Cookie", session_cookie(token));
        }
        request.send().await.expect("Failed to execute request.")
    }
}

pub fn session_cookie(token: &str) -> String {
    format!("hande_user_token={}", token)
}

/// `Set-Cookie` header for the session cookie, if the response has one
pub fn set_cookie(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("hande_user_token="))
        .map(str::to_string)
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Demo server configured with a deployment secret, talking to the fake API
pub async fn spawn_app() -> TestApp {
    let (upstream_url, upstream) = spawn_fake_hande().await;
    let hande = HandEConfig::default()
        .with_api_url(format!("{}/api", upstream_url))
        .with_secret(SECRET);
    spawn_app_with(hande, upstream).await
}

/// Demo server without a deployment secret, still pointed at the fake API
pub async fn spawn_offline_app() -> TestApp {
    let (upstream_url, upstream) = spawn_fake_hande().await;
    let hande = HandEConfig::default().with_api_url(format!("{}/api", upstream_url));
    spawn_app_with(hande, upstream).await
}

/// Demo server whose Hand-E API cannot be reached
pub async fn spawn_unreachable_app() -> TestApp {
    let hande = HandEConfig::default()
        .with_api_url(format!("{}/api", closed_address().await))
        .with_secret(SECRET)
        .with_timeout(1);
    spawn_app_with(hande, Arc::new(FakeHandE::default())).await
}

async fn spawn_app_with(hande: HandEConfig, upstream: Arc<FakeHandE>) -> TestApp {
    LazyLock::force(&TRACING);

    let config = WebConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        dev_mode: true,
        task_delay_ms: 0,
    };

    let state = AppState::new(config, hande).expect("Failed to build application state");
    let app = create_app(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let api_client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TestApp {
        address: format!("http://{}", addr),
        api_client,
        upstream,
    }
}
