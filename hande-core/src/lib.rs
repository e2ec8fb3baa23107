//! Hand-E Core - configuration, errors, logging and the shared data model
//!
//! Everything authoritative (identity, authorization, usage totals) lives in the
//! external Hand-E service. This crate only describes how the local process talks
//! about it.

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use types::*;

// Re-export commonly used external types
pub use tracing;
