use crate::destination::Destination;
use crate::publisher::Publisher;
use crate::queue::Queue;
use crate::topology::Topology;

use std::error::Error;
use std::fmt::Debug;

use async_trait::async_trait;
use bytes::Bytes;

/// Marker trait for broker errors
pub trait BrokerError: Error + Send + Sync + 'static {}

/// A connection to a message broker.
#[async_trait]
pub trait Broker
where
    Self: Clone + Debug + Send + Sync + 'static,
{
    /// The error type for the broker.
    type Error: BrokerError;

    /// The publisher type handed out by `publisher`.
    type PublisherType<T, D, S>: Publisher<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + Error + Send + Sync + 'static,
        S: Debug + Error + Send + Sync + 'static;

    /// The queue type handed out by `queue`.
    type QueueType<T, D, S>: Queue<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + Error + Send + Sync + 'static,
        S: Debug + Error + Send + Sync + 'static;

    /// Declares exchanges, queues and bindings. Declaring something that
    /// already exists is not an error.
    async fn declare(&self, topology: &Topology) -> Result<(), Self::Error>;

    /// Returns a publisher for `destination`.
    fn publisher<T, D, S>(&self, destination: Destination) -> Self::PublisherType<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + Error + Send + Sync + 'static,
        S: Debug + Error + Send + Sync + 'static;

    /// Returns a handle to the queue called `name`.
    fn queue<T, D, S>(&self, name: String) -> Self::QueueType<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + Error + Send + Sync + 'static,
        S: Debug + Error + Send + Sync + 'static;

    /// Closes the connection to the broker.
    async fn shutdown(&self) -> Result<(), Self::Error>;
}
