//! Unified error handling
//!
//! Every upstream failure is caught at the call site and converted into one of
//! these variants. Nothing here is retried: each failure is terminal for the
//! request that produced it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tracing::{error, warn};

pub type HandEResult<T> = Result<T, HandEError>;

/// Error context providing additional information for debugging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Unique error ID for tracking
    pub error_id: String,
    /// Timestamp when error occurred
    pub timestamp: DateTime<Utc>,
    /// Component where error originated
    pub component: String,
    /// Operation being performed when error occurred
    pub operation: Option<String>,
    /// Additional metadata
    pub metadata: HashMap<String, String>,
}

impl ErrorContext {
    pub fn new(component: &str) -> Self {
        Self {
            error_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            component: component.to_string(),
            operation: None,
            metadata: HashMap::new(),
        }
    }

    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = Some(operation.to_string());
        self
    }

    pub fn with_metadata(mut self, key: &str, value: &str) -> Self {
        self.metadata.insert(key.to_string(), value.to_string());
        self
    }
}

/// Main error type for the Hand-E integration
#[derive(Error, Debug)]
pub enum HandEError {
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        context: ErrorContext,
    },

    /// Timeout or connection failure while talking to Hand-E
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        context: ErrorContext,
    },

    /// Hand-E answered with a non-success status
    #[error("Hand-E returned HTTP {status}: {body}")]
    Upstream {
        status: u16,
        body: String,
        context: ErrorContext,
    },

    /// Hand-E refused the caller (HTTP 403)
    #[error("Forbidden by Hand-E: {body}")]
    Forbidden { body: String, context: ErrorContext },

    /// Hand-E answered with a body that is not valid JSON
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl HandEError {
    /// Get the error context
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            HandEError::Config { context, .. } => Some(context),
            HandEError::Network { context, .. } => Some(context),
            HandEError::Upstream { context, .. } => Some(context),
            HandEError::Forbidden { context, .. } => Some(context),
            _ => None,
        }
    }

    /// Body returned by Hand-E, when the failure came with one
    pub fn upstream_body(&self) -> Option<&str> {
        match self {
            HandEError::Upstream { body, .. } | HandEError::Forbidden { body, .. } => {
                Some(body.as_str())
            }
            _ => None,
        }
    }

    /// Whether the request never got an answer from Hand-E
    pub fn is_transport(&self) -> bool {
        matches!(self, HandEError::Network { .. })
    }

    /// Log the error with appropriate level
    pub fn log(&self) {
        let error_id = self.context().map(|c| c.error_id.as_str());
        match self {
            HandEError::Network { .. } => {
                warn!(error_id = ?error_id, error = %self, "Hand-E unreachable");
            }
            HandEError::Upstream { status, .. } => {
                warn!(error_id = ?error_id, status, error = %self, "Hand-E rejected the request");
            }
            HandEError::Forbidden { .. } => {
                warn!(error_id = ?error_id, error = %self, "Hand-E denied access");
            }
            _ => {
                error!(error_id = ?error_id, error = %self, "Error occurred");
            }
        }
    }
}

/// Build a configuration error with context
#[macro_export]
macro_rules! config_error {
    ($msg:expr, $operation:expr) => {
        $crate::HandEError::Config {
            message: $msg.to_string(),
            context: $crate::ErrorContext::new("config").with_operation($operation),
        }
    };
}
