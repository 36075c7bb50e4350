use thiserror::Error;
use userbus_messaging::publisher::PublisherError;

/// Errors that can occur when publishing.
#[derive(Debug, Error)]
pub enum Error {
    /// The client refused the publish.
    #[error("failed to publish: {0}")]
    Publish(lapin::Error),

    /// The payload could not be serialized.
    #[error("failed to serialize payload: {0}")]
    Serialize(String),
}

impl PublisherError for Error {}
