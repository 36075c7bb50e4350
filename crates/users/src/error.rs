use thiserror::Error;
use userbus_messaging::subscription_handler::SubscriptionHandlerError;

/// The result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The broker client refused the message.
    #[error("publish error: {0}")]
    Publish(String),

    /// A user could not be serialized.
    #[error(transparent)]
    Serialize(#[from] serde_json::Error),
}

impl SubscriptionHandlerError for Error {}
