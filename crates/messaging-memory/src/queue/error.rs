use thiserror::Error;
use userbus_messaging::queue::QueueError;

/// Errors that can occur when subscribing to a queue.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The queue could not be consumed.
    #[error("failed to subscribe: {0}")]
    Subscribe(crate::Error),
}

impl QueueError for Error {}
