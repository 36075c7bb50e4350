use thiserror::Error;
use userbus_messaging::subscription::SubscriptionError;

/// Errors that can occur when managing a subscription.
#[derive(Clone, Debug, Error)]
pub enum Error {
    /// The consumer is not running anymore.
    #[error("subscription already stopped")]
    AlreadyStopped,
}

impl SubscriptionError for Error {}
