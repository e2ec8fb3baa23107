//! Template system for server-side rendering
//!
//! Pages are rendered with Askama; every interpolated value is HTML-escaped by
//! the `.html` template extension, including fields that come from Hand-E.

use crate::session::Session;
use askama::Template;
use hande_core::SdkContextView;

pub const APP_NAME: &str = "Hand-E Demo Application";

/// Dashboard: deployment context, login form or user panel, chat and admin table
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub version: String,
    pub deployment_id: Option<String>,
    pub offline: bool,
    pub context: SdkContextView,
    /// Raw `/sdk/me` payload, pretty printed
    pub context_json: String,
    pub user_name: Option<String>,
    pub user_email: Option<String>,
    pub login_error: Option<String>,
    pub dev_mode: bool,
}

impl DashboardTemplate {
    pub fn new(
        deployment_id: Option<String>,
        offline: bool,
        context: &serde_json::Value,
        session: &Session,
    ) -> Self {
        let user = session.user();
        Self {
            title: APP_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            deployment_id,
            offline,
            context: SdkContextView::from_value(context),
            context_json: serde_json::to_string_pretty(context).unwrap_or_default(),
            user_name: user.map(|u| u.display_name().to_string()),
            user_email: user.and_then(|u| u.email.clone()),
            login_error: None,
            dev_mode: false,
        }
    }

    /// Show the message for a `?error=<code>` redirect
    pub fn with_login_error(mut self, code: Option<&str>) -> Self {
        self.login_error = code.map(login_error_message);
        self
    }

    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_name.is_some()
    }
}

/// Human readable text for a login error code
pub fn login_error_message(code: &str) -> String {
    match code {
        "invalid" => "Invalid email or password.".to_string(),
        "no_token" => "Login succeeded but Hand-E issued no session token.".to_string(),
        "injoignable" => "Hand-E is unreachable, please try again later.".to_string(),
        other => format!("Login failed ({}).", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hande_core::CurrentUser;
    use serde_json::json;

    #[test]
    fn test_anonymous_dashboard() {
        let context = json!({"status": "offline"});
        let html = DashboardTemplate::new(None, true, &context, &Session::Anonymous)
            .render()
            .unwrap();

        assert!(html.contains(r#"data-session="anonymous""#));
        assert!(html.contains(r#"action="/login""#));
        assert!(!html.contains(r#"action="/logout""#));
        assert!(html.contains("offline"));
    }

    #[test]
    fn test_authenticated_dashboard() {
        let session = Session::Authenticated {
            token: "tok".to_string(),
            user: CurrentUser {
                name: Some("Ada".to_string()),
                email: Some("ada@example.com".to_string()),
                ..CurrentUser::default()
            },
        };
        let template =
            DashboardTemplate::new(Some("dep-1".to_string()), false, &json!({}), &session);
        assert!(template.is_authenticated());

        let html = template.render().unwrap();
        assert!(html.contains(r#"data-session="authenticated""#));
        assert!(html.contains(r#"action="/logout""#));
        assert!(html.contains("Ada"));
        assert!(html.contains("dep-1"));
    }

    #[test]
    fn test_user_supplied_fields_are_escaped() {
        let context = json!({
            "owner": {
                "email": "<script>alert('email')</script>",
                "company": "<script>alert('company')</script>"
            },
            "plan": {"name": "<b>Gold</b>"}
        });
        let session = Session::Authenticated {
            token: "tok".to_string(),
            user: CurrentUser {
                name: Some("<script>alert('name')</script>".to_string()),
                ..CurrentUser::default()
            },
        };

        let html = DashboardTemplate::new(None, false, &context, &session)
            .with_login_error(Some("<script>x</script>"))
            .render()
            .unwrap();

        assert!(!html.contains("<script>alert("));
        assert!(!html.contains("<b>Gold</b>"));
        assert!(!html.contains("<script>x"));
        assert!(html.contains("&#60;script&#62;alert(&#39;name&#39;)"));
        assert!(html.contains("&#60;b&#62;Gold"));
    }

    #[test]
    fn test_login_error_messages() {
        assert_eq!(login_error_message("invalid"), "Invalid email or password.");
        assert!(login_error_message("injoignable").contains("unreachable"));
        assert_eq!(login_error_message("weird"), "Login failed (weird).");
    }
}
