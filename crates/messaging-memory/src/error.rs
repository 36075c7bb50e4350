use thiserror::Error;
use userbus_messaging::broker::BrokerError;

/// Errors raised by the in-memory broker itself.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The broker has been shut down.
    #[error("broker is shut down")]
    Closed,

    /// The exchange was never declared.
    #[error("exchange not found: {0}")]
    ExchangeNotFound(String),

    /// The queue was never declared.
    #[error("queue not found: {0}")]
    QueueNotFound(String),
}

impl BrokerError for Error {}
