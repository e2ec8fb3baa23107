//! Hand-E connection settings
//!
//! The deployment secret is process-wide and immutable. When it is absent the
//! process runs in offline mode: usage is logged locally and nothing is sent.

use crate::{config_error, HandEResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://backend:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

pub const ENV_API_URL: &str = "HAND_E_API_URL";
pub const ENV_APP_SECRET: &str = "HAND_E_APP_SECRET";
pub const ENV_DEPLOYMENT_ID: &str = "HAND_E_DEPLOYMENT_ID";
pub const ENV_TIMEOUT_SECS: &str = "HAND_E_TIMEOUT_SECS";

/// Settings injected by the Hand-E platform
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandEConfig {
    /// Base URL of the Hand-E API, e.g. `http://backend:3000/api`
    pub api_url: String,
    /// Deployment secret sent as `X-HandE-Secret`
    pub app_secret: Option<String>,
    /// Deployment id, shown on the dashboard only
    pub deployment_id: Option<String>,
    /// Timeout applied to every outbound call
    pub timeout_secs: u64,
}

impl Default for HandEConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            app_secret: None,
            deployment_id: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keep the secret out of logs.
impl fmt::Debug for HandEConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandEConfig")
            .field("api_url", &self.api_url)
            .field("app_secret", &self.app_secret.as_ref().map(|_| "<redacted>"))
            .field("deployment_id", &self.deployment_id)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl HandEConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> HandEResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> HandEResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(api_url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = api_url;
        }
        config.app_secret = lookup(ENV_APP_SECRET).filter(|v| !v.is_empty());
        config.deployment_id = lookup(ENV_DEPLOYMENT_ID).filter(|v| !v.is_empty());

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            config.timeout_secs = raw.trim().parse().map_err(|e| {
                config_error!(
                    format!(
                        "{} must be a positive integer, got '{}': {}",
                        ENV_TIMEOUT_SECS, raw, e
                    ),
                    "from_env"
                )
            })?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> HandEResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            config_error!(
                format!("Failed to read config file {}: {}", path.display(), e),
                "read_file"
            )
        })?;

        let config: HandEConfig = toml::from_str(&content).map_err(|e| {
            config_error!(format!("Failed to parse config: {}", e), "parse_toml")
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> HandEResult<()> {
        let parsed = url::Url::parse(&self.api_url).map_err(|e| {
            config_error!(
                format!("api_url '{}' is not a valid URL: {}", self.api_url, e),
                "validate"
            )
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(config_error!(
                format!("api_url must use http or https, got '{}'", parsed.scheme()),
                "validate"
            ));
        }

        if self.timeout_secs == 0 {
            return Err(config_error!("timeout_secs must be greater than 0", "validate"));
        }

        Ok(())
    }

    /// Deployment secret, if one is configured
    pub fn secret(&self) -> Option<&str> {
        self.app_secret.as_deref().filter(|s| !s.is_empty())
    }

    /// Offline mode: no secret, nothing is sent to Hand-E
    pub fn is_offline(&self) -> bool {
        self.secret().is_none()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Absolute URL of an SDK endpoint
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn with_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.app_secret = Some(secret.into());
        self
    }

    pub fn with_api_url<S: Into<String>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
