use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

/// Errors that can occur while handling a request.
#[derive(Debug, Error)]
pub enum Error {
    /// The user operation or its publish failed.
    #[error(transparent)]
    Users(#[from] userbus_users::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        error!("request failed: {}", self);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to send message to RabbitMQ: {self}"),
        )
            .into_response()
    }
}
