mod error;

use crate::properties::to_properties;
pub use error::Error;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use bytes::Bytes;
use lapin::Channel;
use lapin::options::BasicPublishOptions;
use userbus_messaging::Message;
use userbus_messaging::destination::Destination;
use userbus_messaging::publisher::Publisher;

/// Publishes to an exchange with a fixed routing key.
#[derive(Debug)]
pub struct AmqpPublisher<T = Bytes, D = std::convert::Infallible, S = std::convert::Infallible> {
    channel: Channel,
    destination: Destination,
    _marker: PhantomData<(T, D, S)>,
}

impl<T, D, S> Clone for AmqpPublisher<T, D, S> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            destination: self.destination.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, D, S> AmqpPublisher<T, D, S> {
    pub(crate) const fn new(channel: Channel, destination: Destination) -> Self {
        Self {
            channel,
            destination,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, D, S> Publisher<T, D, S> for AmqpPublisher<T, D, S>
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
        let payload: Bytes = message
            .payload
            .try_into()
            .map_err(|e: S| Error::Serialize(e.to_string()))?;

        // Publisher confirms are not enabled on the channel, so the returned
        // confirmation resolves immediately and is not awaited.
        let _confirm = self
            .channel
            .basic_publish(
                &self.destination.exchange,
                &self.destination.routing_key,
                BasicPublishOptions::default(),
                &payload,
                to_properties(message.headers),
            )
            .await
            .map_err(Error::Publish)?;

        Ok(())
    }
}
