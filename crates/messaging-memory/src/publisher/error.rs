use thiserror::Error;
use userbus_messaging::publisher::PublisherError;

/// Errors that can occur when publishing.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The message could not be routed.
    #[error(transparent)]
    Broker(#[from] crate::Error),

    /// The payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialize(String),
}

impl PublisherError for Error {}
