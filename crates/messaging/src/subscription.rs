use crate::subscription_handler::SubscriptionHandler;

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

/// Marker trait for subscription errors
pub trait SubscriptionError: Error + Send + Sync + 'static {}

/// A handle to a running consumer of a queue.
///
/// The consumer stops when `cancel` is called or when every clone of the
/// handle has been dropped.
#[async_trait]
pub trait Subscription<X, T, D, S>
where
    Self: Clone + Debug + Send + Sync + 'static,
    X: SubscriptionHandler<T>,
    T: Clone
        + Debug
        + Send
        + Sync
        + TryFrom<Bytes, Error = D>
        + TryInto<Bytes, Error = S>
        + 'static,
    D: Debug + Error + Send + Sync + 'static,
    S: Debug + Error + Send + Sync + 'static,
{
    /// The error type for the subscription.
    type Error: SubscriptionError;

    /// Name of the consumed queue.
    fn queue_name(&self) -> &str;

    /// Whether the consumer is still running.
    fn is_active(&self) -> bool;

    /// Stops the consumer.
    async fn cancel(&self) -> Result<(), Self::Error>;
}
