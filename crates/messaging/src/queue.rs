use crate::subscription::Subscription;
use crate::subscription_handler::SubscriptionHandler;

use std::convert::Infallible;
use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

/// Marker trait for queue errors
pub trait QueueError: Error + Send + Sync + 'static {}

/// A trait representing a named queue that can be consumed.
#[async_trait]
pub trait Queue<T = Bytes, D = Infallible, S = Infallible>
where
    Self: Clone + Debug + Send + Sync + 'static,
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
    /// The error type for the queue.
    type Error: QueueError;

    /// The type of subscription returned by `subscribe`.
    type SubscriptionType<X>: Subscription<X, T, D, S>
    where
        X: SubscriptionHandler<T>;

    /// Name of the queue.
    fn name(&self) -> &str;

    /// Starts a consumer on a dedicated worker which passes every decoded
    /// delivery to `handler`.
    async fn subscribe<X>(&self, handler: X) -> Result<Self::SubscriptionType<X>, Self::Error>
    where
        X: SubscriptionHandler<T>;
}
