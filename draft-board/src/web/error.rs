// Errors raised while serving a request.
//
// Command rejections never get here; they are shown inline on the page.
// What remains are infrastructure failures, answered with a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    /// Reading or writing the per-session state failed.
    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}

/// Logs the wrapped error and answers 500 without leaking its detail.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        error!("{}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}
