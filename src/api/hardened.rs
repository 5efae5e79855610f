use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use rand::distr::{Alphanumeric, SampleString};
use serde::Deserialize;
use tower_sessions::Session;

use super::{
    ApiError, AppState, render,
    validation::{PASSWORD_MAX_CHARS, SEARCH_MAX_CHARS, USERNAME_MAX_CHARS, field_is_valid},
};

const CSRF_SESSION_KEY: &str = "csrf_token";
const CSRF_TOKEN_LEN: usize = 32;

/// All fields optional: a missing or tampered field re-renders the form
/// instead of bubbling up as a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub username: Option<String>,
    pub password: Option<String>,
    pub csrf_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchPayload {
    pub search: Option<String>,
    pub csrf_token: Option<String>,
}

pub async fn index() -> &'static str {
    "Welcome to the SQL Injection Demo (Secure Version)"
}

pub async fn login_form(session: Session) -> Result<Html<String>, ApiError> {
    let token = session_csrf_token(&session).await?;
    Ok(Html(render::login_form(Some(&token))))
}

pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<LoginPayload>,
) -> Result<Response, ApiError> {
    let username = payload.username.as_deref().unwrap_or_default();
    let password = payload.password.as_deref().unwrap_or_default();

    let accepted = csrf_token_matches(&session, payload.csrf_token.as_deref()).await?
        && field_is_valid(username, USERNAME_MAX_CHARS)
        && field_is_valid(password, PASSWORD_MAX_CHARS);

    if !accepted {
        let token = session_csrf_token(&session).await?;
        return Ok(Html(render::login_form(Some(&token))).into_response());
    }

    let user = state.store.find_by_credentials(username, password).await?;
    Ok(match user {
        Some(user) => {
            format!("Welcome, {username}! Your role is: {}", user.role).into_response()
        }
        None => "Login failed.".into_response(),
    })
}

pub async fn search_form(session: Session) -> Result<Html<String>, ApiError> {
    let token = session_csrf_token(&session).await?;
    Ok(Html(render::search_form(Some(&token))))
}

pub async fn search(
    State(state): State<AppState>,
    session: Session,
    Form(payload): Form<SearchPayload>,
) -> Result<Response, ApiError> {
    let term = payload.search.as_deref().unwrap_or_default();

    let accepted = csrf_token_matches(&session, payload.csrf_token.as_deref()).await?
        && field_is_valid(term, SEARCH_MAX_CHARS);

    if !accepted {
        let token = session_csrf_token(&session).await?;
        return Ok(Html(render::search_form(Some(&token))).into_response());
    }

    let users = state.store.search_by_username(term).await?;
    Ok(Html(render::search_results_page(&users)).into_response())
}

/// Returns the session's CSRF token, minting and storing one the first
/// time a form is rendered. Later renders reuse it, so a form left open in
/// an older tab stays submittable.
async fn session_csrf_token(session: &Session) -> Result<String, ApiError> {
    if let Some(token) = session.get::<String>(CSRF_SESSION_KEY).await? {
        return Ok(token);
    }

    let token = Alphanumeric.sample_string(&mut rand::rng(), CSRF_TOKEN_LEN);
    session.insert(CSRF_SESSION_KEY, token.clone()).await?;
    Ok(token)
}

/// A submission with no session token on record never matches, so posting
/// without first fetching the form always re-renders.
async fn csrf_token_matches(
    session: &Session,
    submitted: Option<&str>,
) -> Result<bool, ApiError> {
    let expected: Option<String> = session.get(CSRF_SESSION_KEY).await?;
    Ok(match (expected, submitted) {
        (Some(expected), Some(submitted)) => expected == submitted,
        _ => false,
    })
}
