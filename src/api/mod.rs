use axum::{Router, middleware, routing::get};
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::Key};

use time;

use crate::config::AppConfig;
use crate::db::Store;

mod error;
mod gate;
mod hardened;
mod render;
mod users;
mod validation;
mod vulnerable;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,

    pub config: AppConfig,
}

/// The variant that splices form input straight into SQL text. No gate, no
/// sessions, no input validation.
#[must_use]
pub fn vulnerable_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(vulnerable::index))
        .route(
            "/login",
            get(vulnerable::login_form).post(vulnerable::login),
        )
        .route(
            "/search",
            get(vulnerable::search_form).post(vulnerable::search),
        )
        .route("/users", get(users::list_users))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// The variant with the request gate, signed sessions carrying CSRF tokens,
/// and parameter-bound queries. The gate sits inside the session layer so
/// every form submission is screened before any handler or the 404 fallback
/// sees it.
#[must_use]
pub fn hardened_router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(60)))
        .with_signed(Key::from(state.config.secret_key.as_bytes()));

    Router::new()
        .route("/", get(hardened::index))
        .route("/login", get(hardened::login_form).post(hardened::login))
        .route(
            "/search",
            get(hardened::search_form).post(hardened::search),
        )
        .route("/users", get(users::list_users))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            gate::reject_sql_injection,
        ))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
