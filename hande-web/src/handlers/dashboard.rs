//! Dashboard page

use super::types::DashboardQuery;
use crate::{
    session::{Session, SessionToken},
    templates::DashboardTemplate,
    ApiError, AppState,
};
use askama::Template;
use axum::{
    extract::{Query, State},
    response::Html,
};
use tracing::debug;

/// Render the dashboard for the current session
pub async fn dashboard(
    State(state): State<AppState>,
    SessionToken(token): SessionToken,
    Query(query): Query<DashboardQuery>,
) -> Result<Html<String>, ApiError> {
    let (context, session) = tokio::join!(
        state.api.get_context(),
        Session::resolve(state.api.as_ref(), token.as_deref())
    );

    if token.is_some() && !session.is_authenticated() {
        debug!("Session token not recognised by Hand-E, serving anonymous view");
    }

    let login_error = query.error.as_deref().filter(|code| !code.is_empty());
    let page = DashboardTemplate::new(
        state.deployment_id().map(str::to_string),
        state.api.is_offline(),
        &context,
        &session,
    )
    .with_login_error(login_error)
    .with_dev_mode(state.config.dev_mode);

    Ok(Html(page.render()?))
}
