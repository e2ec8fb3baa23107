//! Hand-E Demo Web Server
//!
//! A minimal backend showing how an application integrates Hand-E: usage
//! reporting, a dashboard, cookie sessions, a toy chatbot and an admin
//! consumption view. Identity, authorization and billing all live upstream.

pub mod chatbot;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod session;
pub mod state;
pub mod templates;

// Re-export main types
pub use error::ApiError;
pub use server::HandEServer;
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, Router};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::page_routes())
        .merge(routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(64 * 1024)),
        )
        .with_state(state)
}

/// Configuration for the web server
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable development mode
    pub dev_mode: bool,
    /// Simulated work performed by `/execute-task`
    pub task_delay_ms: u64,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            dev_mode: false,
            task_delay_ms: 500,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HAND_E_HOST").unwrap_or(defaults.host),
            port: std::env::var("HAND_E_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            dev_mode: std::env::var("HAND_E_DEV_MODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.dev_mode),
            task_delay_ms: std::env::var("HAND_E_TASK_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.task_delay_ms),
        }
    }

    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn task_delay(&self) -> Duration {
        Duration::from_millis(self.task_delay_ms)
    }
}

/// Error types for the web server
#[derive(thiserror::Error, Debug)]
pub enum WebError {
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),

    #[error("Hand-E error: {0}")]
    HandE(#[from] hande_core::HandEError),
}

/// Result type for web operations
pub type WebResult<T> = Result<T, WebError>;
