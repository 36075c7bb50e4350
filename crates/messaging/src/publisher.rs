use crate::Message;
use crate::destination::Destination;

use std::convert::Infallible;
use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

/// Marker trait for publisher errors
pub trait PublisherError: Error + Send + Sync + 'static {}

/// A trait representing a sender of messages to a fixed destination.
#[async_trait]
pub trait Publisher<T = Bytes, D = Infallible, S = Infallible>
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
    /// The error type for the publisher.
    type Error: PublisherError;

    /// The destination messages are published to.
    fn destination(&self) -> &Destination;

    /// Serializes and publishes a message.
    ///
    /// Returns once the broker client has accepted the message. Broker-side
    /// receipt is not awaited.
    async fn publish(&self, message: Message<T>) -> Result<(), Self::Error>;
}
