use crate::Message;

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

/// Marker trait for subscription handler errors
pub trait SubscriptionHandlerError: Error + Send + Sync + 'static {}

/// A trait representing the callback of a subscription.
#[async_trait]
pub trait SubscriptionHandler<T = Bytes>
where
    Self: Clone + Debug + Send + Sync + 'static,
    T: Clone + Debug + Send + Sync + 'static,
{
    /// The error type for the handler.
    type Error: SubscriptionHandlerError;

    /// Handles a message delivered from `queue`.
    async fn handle(&self, queue: String, message: Message<T>) -> Result<(), Self::Error>;
}
