//! Abstract interface for HTTP servers serving an axum router.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use axum::Router;
use tokio::task::JoinHandle;

/// Marker trait for `HttpServer` errors
pub trait HttpServerError: Debug + Error + Send + Sync + 'static {}

/// A server that serves one router until shut down.
#[async_trait]
pub trait HttpServer: Send + Sync + 'static {
    /// The error type for the server.
    type Error: HttpServerError;

    /// Binds and starts serving `router` on a background task.
    async fn start(&self, router: Router) -> Result<JoinHandle<()>, Self::Error>;

    /// Stops serving and waits for the background task to finish.
    async fn shutdown(&self);
}
