mod error;

use crate::SharedReceiver;
pub use error::Error;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::watch;
use tracing::{debug, warn};
use userbus_messaging::subscription::Subscription;
use userbus_messaging::subscription_handler::SubscriptionHandler;

/// A running consumer of a `MemoryQueue`.
#[derive(Debug)]
pub struct MemorySubscription<X, T, D, S> {
    queue_name: String,
    stop_sender: Arc<watch::Sender<bool>>,
    _marker: PhantomData<(X, T, D, S)>,
}

impl<X, T, D, S> Clone for MemorySubscription<X, T, D, S> {
    fn clone(&self) -> Self {
        Self {
            queue_name: self.queue_name.clone(),
            stop_sender: self.stop_sender.clone(),
            _marker: PhantomData,
        }
    }
}

impl<X, T, D, S> MemorySubscription<X, T, D, S>
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
    pub(crate) fn spawn(queue_name: String, receiver: SharedReceiver, handler: X) -> Self {
        let (stop_sender, mut stop_receiver) = watch::channel(false);

        let worker_queue_name = queue_name.clone();
        tokio::spawn(async move {
            loop {
                let next = async { receiver.lock().await.recv().await };

                tokio::select! {
                    _ = stop_receiver.changed() => {
                        break;
                    }
                    delivery = next => {
                        let Some(delivery) = delivery else {
                            break;
                        };

                        match delivery.try_map(<T as TryFrom<Bytes>>::try_from) {
                            Ok(message) => {
                                if let Err(e) = handler.handle(worker_queue_name.clone(), message).await {
                                    warn!("handler for {} failed: {}", worker_queue_name, e);
                                }
                            }
                            Err(e) => {
                                warn!("dropped undecodable message on {}: {}", worker_queue_name, e);
                            }
                        }
                    }
                }
            }

            debug!("consumer for {} stopped", worker_queue_name);
        });

        Self {
            queue_name,
            stop_sender: Arc::new(stop_sender),
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<X, T, D, S> Subscription<X, T, D, S> for MemorySubscription<X, T, D, S>
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

        Ok(())
    }
}
