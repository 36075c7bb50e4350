use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// AMQP connection error.
    #[error(transparent)]
    Amqp(#[from] userbus_messaging_amqp::Error),

    /// Broker error, from whichever broker is configured.
    #[error("broker error: {0}")]
    Broker(String),

    /// HTTP server error.
    #[error(transparent)]
    Http(#[from] userbus_http_insecure::Error),

    /// IO error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Could not set global default subscriber.
    #[error("could not set global default subscriber: {0}")]
    SetTracing(#[from] tracing::dispatcher::SetGlobalDefaultError),

    /// Subscribing to a queue failed.
    #[error("failed to subscribe: {0}")]
    Subscribe(String),

    /// Cancelling a subscription failed.
    #[error("failed to unsubscribe: {0}")]
    Unsubscribe(String),
}
