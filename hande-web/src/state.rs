//! Application state shared by every handler
//!
//! Read-only after startup: configuration plus one gateway client.

use crate::{WebConfig, WebResult};
use hande_core::HandEConfig;
use hande_sdk::{HandEApi, HandEClient};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    /// Web server configuration
    pub config: WebConfig,
    /// Hand-E connection settings
    pub hande: Arc<HandEConfig>,
    /// Gateway to the Hand-E API
    pub api: Arc<dyn HandEApi>,
}

impl AppState {
    /// Create a new application state backed by a live Hand-E client
    pub fn new(config: WebConfig, hande: HandEConfig) -> WebResult<Self> {
        let client = HandEClient::new(hande.clone())?;
        Ok(Self::with_api(config, hande, Arc::new(client)))
    }

    /// Create a state around an existing gateway implementation
    pub fn with_api(config: WebConfig, hande: HandEConfig, api: Arc<dyn HandEApi>) -> Self {
        info!(
            offline = api.is_offline(),
            deployment_id = hande.deployment_id.as_deref().unwrap_or("-"),
            "Application state initialized"
        );

        Self {
            config,
            hande: Arc::new(hande),
            api,
        }
    }

    /// Deployment id for display
    pub fn deployment_id(&self) -> Option<&str> {
        self.hande.deployment_id.as_deref()
    }
}
