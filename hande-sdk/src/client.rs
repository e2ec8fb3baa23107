//! reqwest implementation of [`HandEApi`]

use async_trait::async_trait;
use hande_core::{CurrentUser, HandEConfig, HandEError, HandEResult, Metric, UsageEvent};
use reqwest::StatusCode;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::http::{auth_headers, create_http_client, handle_response_error, transport_error};
use crate::{endpoints, HandEApi, LoginError};

/// Gateway client talking to a live Hand-E API
pub struct HandEClient {
    client: reqwest::Client,
    config: HandEConfig,
}

impl HandEClient {
    /// Create a new client; no request is made until an operation is called
    pub fn new(config: HandEConfig) -> HandEResult<Self> {
        let client = create_http_client(&config)?;

        if config.is_offline() {
            info!(
                "Hand-E client created in offline mode (no {} set)",
                hande_core::ENV_APP_SECRET
            );
        } else {
            info!("Hand-E client created for {}", config.api_url);
        }

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HandEConfig {
        &self.config
    }

    pub(crate) fn url(&self, endpoint: &str) -> String {
        self.config.endpoint(endpoint)
    }
}

#[async_trait]
impl HandEApi for HandEClient {
    fn is_offline(&self) -> bool {
        self.config.is_offline()
    }

    async fn get_context(&self) -> Value {
        if self.config.is_offline() {
            return json!({
                "status": "offline",
                "message": "Deployment secret not configured"
            });
        }

        let url = self.url(endpoints::CONTEXT);
        debug!("Fetching Hand-E context from {}", url);

        let response = match self
            .client
            .get(&url)
            .headers(auth_headers(self.config.secret(), None))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let error = transport_error(e, "get_context");
                error.log();
                return json!({ "error": error.to_string() });
            }
        };

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let error = transport_error(e, "get_context");
                error.log();
                return json!({ "error": error.to_string() });
            }
        };

        match serde_json::from_str::<Value>(&body) {
            Ok(context) => context,
            Err(e) => {
                let error = HandEError::from(e);
                error.log();
                json!({ "error": error.to_string() })
            }
        }
    }

    async fn get_current_user(&self, token: Option<&str>) -> Option<CurrentUser> {
        let token = token.filter(|t| !t.is_empty())?;
        let secret = self.config.secret()?;

        let response = match self
            .client
            .get(self.url(endpoints::CURRENT_USER))
            .headers(auth_headers(Some(secret), Some(token)))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                debug!("Could not resolve current user: {}", e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            debug!(
                status = response.status().as_u16(),
                "Session token not accepted by Hand-E"
            );
            return None;
        }

        let mut body: Value = response.json().await.ok()?;
        match body.get_mut("user").map(Value::take) {
            Some(user) if !user.is_null() => serde_json::from_value(user).ok(),
            _ => None,
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, LoginError> {
        info!("Login attempt for {}", email);

        let response = self
            .client
            .post(self.url(endpoints::LOGIN))
            .headers(auth_headers(self.config.secret(), None))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| {
                warn!("Login request failed: {}", e);
                LoginError::Unreachable(e.to_string())
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LoginError::Invalid {
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|e| {
            warn!("Login response is not valid JSON: {}", e);
            LoginError::NoToken
        })?;

        body.get("token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(LoginError::NoToken)
    }

    async fn report_usage(
        &self,
        metric: Metric,
        value: f64,
        token: Option<&str>,
    ) -> HandEResult<()> {
        if self.config.is_offline() {
            info!(
                metric = %metric,
                value,
                attributed = token.is_some(),
                "[offline] usage reported"
            );
            return Ok(());
        }

        let event = UsageEvent::new(metric, value);
        let response = self
            .client
            .post(self.url(endpoints::USAGE))
            .headers(auth_headers(self.config.secret(), token))
            .json(&event)
            .send()
            .await
            .map_err(|e| transport_error(e, "report_usage"))
            .inspect_err(HandEError::log)?;

        if !response.status().is_success() {
            let error = handle_response_error(response, "report_usage").await;
            error.log();
            return Err(error);
        }

        debug!(metric = %metric, value, attributed = token.is_some(), "Usage reported");
        Ok(())
    }

    async fn get_consumption_by_user(&self, token: &str) -> HandEResult<Value> {
        let response = self
            .client
            .get(self.url(endpoints::CONSUMPTION_BY_USER))
            .headers(auth_headers(self.config.secret(), Some(token)))
            .send()
            .await
            .map_err(|e| transport_error(e, "get_consumption_by_user"))
            .inspect_err(HandEError::log)?;

        let status = response.status();
        if status == StatusCode::FORBIDDEN {
            let body = response.text().await.unwrap_or_default();
            return Err(HandEError::Forbidden {
                body,
                context: hande_core::ErrorContext::new("hande_sdk")
                    .with_operation("get_consumption_by_user"),
            });
        }

        if !status.is_success() {
            let error = handle_response_error(response, "get_consumption_by_user").await;
            error.log();
            return Err(error);
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| HandEError::Upstream {
                status: status.as_u16(),
                body: format!("invalid JSON body: {}", e),
                context: hande_core::ErrorContext::new("hande_sdk")
                    .with_operation("get_consumption_by_user"),
            })
    }
}
