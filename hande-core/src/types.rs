//! Data model shared by the SDK client and the web layer

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Metered actions reported to Hand-E
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    TaskExecution,
    ChatMessage,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::TaskExecution => "task_execution",
            Metric::ChatMessage => "chat_message",
        }
    }

    /// Every metered action is worth exactly one unit
    pub fn unit_value(&self) -> f64 {
        1.0
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /sdk/usage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageEvent {
    pub metric: String,
    pub value: f64,
}

impl UsageEvent {
    pub fn new(metric: Metric, value: f64) -> Self {
        Self {
            metric: metric.as_str().to_string(),
            value,
        }
    }
}

/// The `user` object returned by `/sdk/me/user`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Numeric or string id, depending on the Hand-E deployment
    #[serde(default)]
    pub id: Value,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CurrentUser {
    /// Name to greet the user with
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("user")
    }
}

/// Read-only projection of the `/sdk/me` payload used for rendering
///
/// The payload shape is owned by Hand-E, so every field is looked up
/// leniently and missing values simply stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SdkContextView {
    pub owner_email: Option<String>,
    pub owner_name: Option<String>,
    pub company: Option<String>,
    pub plan: Option<String>,
    pub access_mode: Option<String>,
    pub cpu: Option<String>,
    pub memory: Option<String>,
    /// `{"error": ...}` returned when Hand-E could not be reached
    pub error: Option<String>,
    /// `{"status": "offline"}` returned without a deployment secret
    pub offline: bool,
}

impl SdkContextView {
    pub fn from_value(context: &Value) -> Self {
        Self {
            owner_email: first_text(context, &[&["owner", "email"], &["owner_email"], &["email"]]),
            owner_name: first_text(context, &[&["owner", "name"], &["owner_name"]]),
            company: first_text(
                context,
                &[&["owner", "company"], &["company"], &["organization", "name"]],
            ),
            plan: first_text(
                context,
                &[
                    &["plan", "name"],
                    &["plan"],
                    &["pricing_plan", "name"],
                    &["pricing_plan"],
                ],
            ),
            access_mode: first_text(
                context,
                &[&["access_mode"], &["accessMode"], &["deployment", "access_mode"]],
            ),
            cpu: first_text(context, &[&["resources", "cpu"], &["allocation", "cpu"]]),
            memory: first_text(
                context,
                &[&["resources", "memory"], &["allocation", "memory"]],
            ),
            error: first_text(context, &[&["error"]]),
            offline: context.get("status").and_then(Value::as_str) == Some("offline"),
        }
    }

    /// Whether the deployment is open to anyone
    pub fn is_public(&self) -> bool {
        self.access_mode
            .as_deref()
            .map(|m| m.eq_ignore_ascii_case("PUBLIC"))
            .unwrap_or(false)
    }
}

/// First path that resolves to a scalar, rendered as text
fn first_text(root: &Value, paths: &[&[&str]]) -> Option<String> {
    paths.iter().find_map(|path| {
        let value = path.iter().try_fold(root, |node, key| node.get(*key))?;
        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    })
}
