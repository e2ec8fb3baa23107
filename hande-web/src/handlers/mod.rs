//! HTTP request handlers for the Hand-E demo server
//!
//! Page handlers render HTML or redirect; the JSON handlers answer with
//! [`ApiError`](crate::ApiError) bodies on failure.

pub mod admin;
pub mod auth;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod types;
pub mod usage;

pub use admin::*;
pub use auth::*;
pub use chat::*;
pub use dashboard::*;
pub use health::*;
pub use usage::*;

pub use types::*;
