mod error;

use crate::subscription::AmqpSubscription;
pub use error::Error;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use bytes::Bytes;
use lapin::Channel;
use lapin::options::BasicConsumeOptions;
use lapin::types::FieldTable;
use tracing::info;
use userbus_messaging::queue::Queue;
use userbus_messaging::subscription_handler::SubscriptionHandler;
use uuid::Uuid;

/// A queue on the broker, assumed to exist unless declared through
/// `AmqpBroker::declare`.
#[derive(Debug)]
pub struct AmqpQueue<T = Bytes, D = std::convert::Infallible, S = std::convert::Infallible> {
    channel: Channel,
    name: String,
    _marker: PhantomData<(T, D, S)>,
}

impl<T, D, S> Clone for AmqpQueue<T, D, S> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, D, S> From<AmqpQueue<T, D, S>> for String {
    fn from(queue: AmqpQueue<T, D, S>) -> Self {
        queue.name
    }
}

impl<T, D, S> AmqpQueue<T, D, S> {
    pub(crate) const fn new(channel: Channel, name: String) -> Self {
        Self {
            channel,
            name,
            _marker: PhantomData,
        }
    }
}

pub(crate) fn consumer_tag(queue: &str) -> String {
    format!("userbus-{queue}-{}", Uuid::new_v4().simple())
}

#[async_trait]
impl<T, D, S> Queue<T, D, S> for AmqpQueue<T, D, S>
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

    type SubscriptionType<X>
        = AmqpSubscription<X, T, D, S>
    where
        X: SubscriptionHandler<T>;

    fn name(&self) -> &str {
        &self.name
    }

    async fn subscribe<X>(&self, handler: X) -> Result<AmqpSubscription<X, T, D, S>, Error>
    where
        X: SubscriptionHandler<T>,
    {
        let consumer_tag = consumer_tag(&self.name);

        let consumer = self
            .channel
            .basic_consume(
                &self.name,
                &consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(Error::Subscribe)?;

        info!("consuming {} as {}", self.name, consumer_tag);

        Ok(AmqpSubscription::spawn(
            self.channel.clone(),
            self.name.clone(),
            consumer_tag,
            consumer,
            handler,
        ))
    }
}
