use thiserror::Error;
use userbus_messaging::subscription::SubscriptionError;

/// Errors that can occur when managing a subscription.
#[derive(Debug, Error)]
pub enum Error {
    /// The consumer is not running anymore.
    #[error("subscription already stopped")]
    AlreadyStopped,

    /// The broker refused to cancel the consumer.
    #[error("failed to cancel consumer: {0}")]
    Cancel(lapin::Error),
}

impl SubscriptionError for Error {}
