use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors surfaced by route handlers and middleware.
///
/// Responses carry the full error text as a plain-text body. Storage
/// failures stay visible to the caller, which is what makes the injectable
/// variant's broken-statement behavior observable.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Failed to read request body: {0}")]
    BodyRead(String),
}

/// Store operations are the only `anyhow` sources reachable from handlers.
/// The alternate formatter keeps the cause chain in the message, so the
/// underlying SQLite error text survives into the response body.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Session(err.to_string())
    }
}

impl From<axum::Error> for ApiError {
    fn from(err: axum::Error) -> Self {
        Self::BodyRead(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BodyRead(_) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Session(_) => {
                tracing::error!("{self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}
