use axum::{extract::State, response::Html};

use super::{ApiError, AppState, render};

/// Lists every account in the table. Both variants mount this handler; the
/// page exists so a successful injection has something visible to leak.
pub async fn list_users(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let users = state.store.list_users().await?;
    Ok(Html(render::users_page(&users)))
}
