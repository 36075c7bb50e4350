mod error;

use crate::properties::from_properties;
pub use error::Error;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;
use lapin::options::{BasicAckOptions, BasicCancelOptions};
use lapin::{Channel, Consumer};
use tokio::sync::watch;
use tracing::{debug, warn};
use userbus_messaging::Message;
use userbus_messaging::subscription::Subscription;
use userbus_messaging::subscription_handler::SubscriptionHandler;

/// Why a consumer worker stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stop {
    /// `cancel` stopped the worker and cancelled the consumer itself.
    Cancelled,

    /// Every handle was dropped. The consumer is still registered.
    Dropped,

    /// The consumer stream ended or failed.
    StreamEnded,
}

impl Stop {
    fn from_changed(changed: Result<(), watch::error::RecvError>) -> Self {
        match changed {
            Ok(()) => Self::Cancelled,
            Err(_) => Self::Dropped,
        }
    }

    const fn needs_cancel(self) -> bool {
        matches!(self, Self::Dropped)
    }
}

/// A running consumer of an `AmqpQueue`.
#[derive(Debug)]
pub struct AmqpSubscription<X, T, D, S> {
    channel: Channel,
    consumer_tag: String,
    queue_name: String,
    stop_sender: Arc<watch::Sender<bool>>,
    _marker: PhantomData<(X, T, D, S)>,
}

impl<X, T, D, S> Clone for AmqpSubscription<X, T, D, S> {
    fn clone(&self) -> Self {
        Self {
            channel: self.channel.clone(),
            consumer_tag: self.consumer_tag.clone(),
            queue_name: self.queue_name.clone(),
            stop_sender: self.stop_sender.clone(),
            _marker: PhantomData,
        }
    }
}

impl<X, T, D, S> AmqpSubscription<X, T, D, S>
where
    X: SubscriptionHandler<T>,
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
    pub(crate) fn spawn(
        channel: Channel,
        queue_name: String,
        consumer_tag: String,
        mut consumer: Consumer,
        handler: X,
    ) -> Self {
        let (stop_sender, mut stop_receiver) = watch::channel(false);

        let worker_channel = channel.clone();
        let worker_consumer_tag = consumer_tag.clone();
        let worker_queue_name = queue_name.clone();
        tokio::spawn(async move {
            let stop = loop {
                tokio::select! {
                    changed = stop_receiver.changed() => {
                        break Stop::from_changed(changed);
                    }
                    delivery = consumer.next() => {
                        let mut delivery = match delivery {
                            Some(Ok(delivery)) => delivery,
                            Some(Err(e)) => {
                                warn!("consumer for {} failed: {}", worker_queue_name, e);
                                break Stop::StreamEnded;
                            }
                            None => break Stop::StreamEnded,
                        };

                        let payload = Bytes::from(std::mem::take(&mut delivery.data));
                        let headers = from_properties(&delivery.properties);

                        match T::try_from(payload) {
                            Ok(payload) => {
                                let message = Message { headers, payload };
                                if let Err(e) = handler.handle(worker_queue_name.clone(), message).await {
                                    warn!("handler for {} failed: {}", worker_queue_name, e);
                                }
                            }
                            Err(e) => {
                                warn!("dropped undecodable message on {}: {}", worker_queue_name, e);
                            }
                        }

                        if let Err(e) = delivery.acker.ack(BasicAckOptions::default()).await {
                            warn!("failed to ack delivery on {}: {}", worker_queue_name, e);
                        }
                    }
                }
            };

            if stop.needs_cancel() {
                if let Err(e) = worker_channel
                    .basic_cancel(&worker_consumer_tag, BasicCancelOptions::default())
                    .await
                {
                    warn!("failed to cancel consumer {}: {}", worker_consumer_tag, e);
                }
            }

            debug!("consumer for {} stopped: {:?}", worker_queue_name, stop);
        });

        Self {
            channel,
            consumer_tag,
            queue_name,
            stop_sender: Arc::new(stop_sender),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<X, T, D, S> Subscription<X, T, D, S> for AmqpSubscription<X, T, D, S>
where
    X: SubscriptionHandler<T>,
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

    fn queue_name(&self) -> &str {
        &self.queue_name
    }

    fn is_active(&self) -> bool {
        !*self.stop_sender.borrow() && !self.stop_sender.is_closed()
    }

    async fn cancel(&self) -> Result<(), Error> {
        if !self.is_active() {
            return Err(Error::AlreadyStopped);
        }

        self.stop_sender.send_replace(true);

        self.channel
            .basic_cancel(&self.consumer_tag, BasicCancelOptions::default())
            .await
            .map_err(Error::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dropped_handles_need_broker_cancel() {
        let (sender, mut receiver) = watch::channel(false);
        drop(sender);

        let stop = Stop::from_changed(receiver.changed().await);

        assert_eq!(stop, Stop::Dropped);
        assert!(stop.needs_cancel());
    }

    #[tokio::test]
    async fn test_cancelled_consumer_is_not_cancelled_twice() {
        let (sender, mut receiver) = watch::channel(false);
        sender.send_replace(true);

        let stop = Stop::from_changed(receiver.changed().await);

        assert_eq!(stop, Stop::Cancelled);
        assert!(!stop.needs_cancel());
        assert!(!Stop::StreamEnded.needs_cancel());
    }
}
