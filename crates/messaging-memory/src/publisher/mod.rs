mod error;

use crate::MemoryBroker;
pub use error::Error;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::debug;
use userbus_messaging::Message;
use userbus_messaging::destination::Destination;
use userbus_messaging::publisher::Publisher;

/// Publishes to a destination on a `MemoryBroker`.
#[derive(Debug)]
pub struct MemoryPublisher<T = Bytes, D = std::convert::Infallible, S = std::convert::Infallible> {
    broker: MemoryBroker,
    destination: Destination,
    _marker: PhantomData<(T, D, S)>,
}

impl<T, D, S> Clone for MemoryPublisher<T, D, S> {
    fn clone(&self) -> Self {
        Self {
            broker: self.broker.clone(),
            destination: self.destination.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, D, S> MemoryPublisher<T, D, S> {
    pub(crate) const fn new(broker: MemoryBroker, destination: Destination) -> Self {
        Self {
            broker,
            destination,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, D, S> Publisher<T, D, S> for MemoryPublisher<T, D, S>
where
    T: Clone
        + Debug
        + Send
        + Sync
        + TryFrom<Bytes, Error = D>
        + TryInto<Bytes, Error = S>
        + 'static,
    D: Debug + Send + StdError + Sync + 'static,
    S: Debug + Send + StdError + Sync + 'static,
{
    type Error = Error;

    fn destination(&self) -> &Destination {
        &self.destination
    }

    async fn publish(&self, message: Message<T>) -> Result<(), Error> {
        let message = message
            .try_map(TryInto::<Bytes>::try_into)
            .map_err(|e| Error::Serialize(e.to_string()))?;

        let delivered = self.broker.deliver(&self.destination, message).await?;

        if delivered == 0 {
            debug!("dropped unroutable message for {}", self.destination);
        }

        Ok(())
    }
}
