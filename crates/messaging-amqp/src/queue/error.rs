use thiserror::Error;
use userbus_messaging::queue::QueueError;

/// Errors that can occur when subscribing to a queue.
#[derive(Debug, Error)]
pub enum Error {
    /// The broker refused the consumer.
    #[error("failed to subscribe: {0}")]
    Subscribe(lapin::Error),
}

impl QueueError for Error {}
