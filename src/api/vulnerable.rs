use axum::{Form, extract::State, response::Html};
use serde::Deserialize;
use tracing::info;

use super::{ApiError, AppState, render};

#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    pub search: String,
}

pub async fn index() -> &'static str {
    "Welcome to the SQL Injection Demo"
}

pub async fn login_form() -> Html<String> {
    Html(render::login_form(None))
}

pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginPayload>,
) -> Result<String, ApiError> {
    let query = login_query(&payload.username, &payload.password);
    info!("Executing query: {query}");

    let user = state.store.find_one_by_raw_sql(&query).await?;
    Ok(match user {
        Some(user) => format!("Welcome, {}! Your role is: {}", payload.username, user.role),
        None => "Login failed.".to_owned(),
    })
}

pub async fn search_form() -> Html<String> {
    Html(render::search_form(None))
}

pub async fn search(
    State(state): State<AppState>,
    Form(payload): Form<SearchPayload>,
) -> Result<Html<String>, ApiError> {
    let query = search_query(&payload.search);
    info!("Executing query: {query}");

    let users = state.store.find_all_by_raw_sql(&query).await?;
    Ok(Html(render::search_results_page(&users)))
}

/// Splices raw form input straight into the SQL text. A quote in either
/// field rewrites the statement itself, which is the whole demonstration.
#[must_use]
pub fn login_query(username: &str, password: &str) -> String {
    format!("SELECT * FROM user WHERE username = '{username}' AND password = '{password}'")
}

#[must_use]
pub fn search_query(term: &str) -> String {
    format!("SELECT * FROM user WHERE username LIKE '%{term}%'")
}
