mod error;

use crate::MemoryBroker;
use crate::subscription::MemorySubscription;
pub use error::Error;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::marker::PhantomData;

use async_trait::async_trait;
use bytes::Bytes;
use userbus_messaging::queue::Queue;
use userbus_messaging::subscription_handler::SubscriptionHandler;

/// A queue on a `MemoryBroker`.
#[derive(Debug)]
pub struct MemoryQueue<T = Bytes, D = std::convert::Infallible, S = std::convert::Infallible> {
    broker: MemoryBroker,
    name: String,
    _marker: PhantomData<(T, D, S)>,
}

impl<T, D, S> Clone for MemoryQueue<T, D, S> {
    fn clone(&self) -> Self {
        Self {
            broker: self.broker.clone(),
            name: self.name.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, D, S> From<MemoryQueue<T, D, S>> for String {
    fn from(queue: MemoryQueue<T, D, S>) -> Self {
        queue.name
    }
}

impl<T, D, S> MemoryQueue<T, D, S> {
    pub(crate) const fn new(broker: MemoryBroker, name: String) -> Self {
        Self {
            broker,
            name,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<T, D, S> Queue<T, D, S> for MemoryQueue<T, D, S>
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
        = MemorySubscription<X, T, D, S>
    where
        X: SubscriptionHandler<T>;

    fn name(&self) -> &str {
        &self.name
    }

    async fn subscribe<X>(&self, handler: X) -> Result<MemorySubscription<X, T, D, S>, Error>
    where
        X: SubscriptionHandler<T>,
    {
        let receiver = self
            .broker
            .receiver(&self.name)
            .await
            .map_err(Error::Subscribe)?;

        Ok(MemorySubscription::spawn(
            self.name.clone(),
            receiver,
            handler,
        ))
    }
}
