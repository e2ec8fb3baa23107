//! Hand-E demo web server
//!
//! Binds the listener and serves the router until Ctrl-C.

use crate::{create_app, AppState, WebConfig, WebError, WebResult};
use axum::serve;
use hande_core::HandEConfig;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

/// Main demo server
pub struct HandEServer {
    config: WebConfig,
    state: AppState,
}

impl HandEServer {
    /// Create a new server talking to the Hand-E API described by `hande`
    pub fn new(config: WebConfig, hande: HandEConfig) -> WebResult<Self> {
        let state = AppState::new(config.clone(), hande)?;
        Ok(Self { config, state })
    }

    /// Start the web server
    pub async fn start(self) -> WebResult<()> {
        let address = self.config.address();

        info!("Starting Hand-E demo server");
        info!("Server address: http://{}", address);
        info!("Development mode: {}", self.config.dev_mode);
        if self.state.api.is_offline() {
            warn!("No deployment secret configured, usage will only be logged locally");
        }

        let app = create_app(self.state.clone());

        let listener = TcpListener::bind(&address)
            .await
            .map_err(WebError::Server)?;

        info!("Server listening on http://{}", address);

        if let Err(e) = serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
        {
            error!("Server error: {}", e);
            return Err(WebError::Server(e));
        }

        info!("Server shut down");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &WebConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// Builder for HandEServer
pub struct HandEServerBuilder {
    config: WebConfig,
    hande: HandEConfig,
}

impl HandEServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self {
            config: WebConfig::default(),
            hande: HandEConfig::default(),
        }
    }

    /// Start from an existing web configuration
    pub fn config(mut self, config: WebConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the server host
    pub fn host<S: Into<String>>(mut self, host: S) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the server port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Enable development mode
    pub fn dev_mode(mut self, dev_mode: bool) -> Self {
        self.config.dev_mode = dev_mode;
        self
    }

    /// Simulated work for `/execute-task`, in milliseconds
    pub fn task_delay_ms(mut self, task_delay_ms: u64) -> Self {
        self.config.task_delay_ms = task_delay_ms;
        self
    }

    /// Set the Hand-E connection settings
    pub fn hande(mut self, hande: HandEConfig) -> Self {
        self.hande = hande;
        self
    }

    /// Build the server
    pub fn build(self) -> WebResult<HandEServer> {
        HandEServer::new(self.config, self.hande)
    }
}

impl Default for HandEServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
