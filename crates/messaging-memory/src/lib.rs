//! In-memory implementation of the messaging crate.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

/// Publishers send messages through the in-memory exchanges.
pub mod publisher;

/// Queues buffer routed messages until they are consumed.
pub mod queue;

/// Subscriptions consume queues on spawned workers.
pub mod subscription;

pub use error::Error;
pub use publisher::MemoryPublisher;
pub use queue::MemoryQueue;
pub use subscription::MemorySubscription;

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info};
use userbus_messaging::Message;
use userbus_messaging::broker::Broker;
use userbus_messaging::destination::Destination;
use userbus_messaging::topology::{Binding, Topology};

type Delivery = Message<Bytes>;
type SharedReceiver = Arc<Mutex<mpsc::UnboundedReceiver<Delivery>>>;

#[derive(Debug)]
struct QueueState {
    sender: mpsc::UnboundedSender<Delivery>,
    receiver: SharedReceiver,
}

impl QueueState {
    fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver: Arc::new(Mutex::new(receiver)),
        }
    }
}

#[derive(Debug, Default)]
struct BrokerState {
    bindings: HashSet<Binding>,
    closed: bool,
    exchanges: HashSet<String>,
    queues: HashMap<String, QueueState>,
}

impl BrokerState {
    fn routed_queues(&self, destination: &Destination) -> Result<Vec<&QueueState>, Error> {
        if destination.is_default_exchange() {
            return Ok(self.queues.get(&destination.routing_key).into_iter().collect());
        }

        if !self.exchanges.contains(&destination.exchange) {
            return Err(Error::ExchangeNotFound(destination.exchange.clone()));
        }

        Ok(self
            .bindings
            .iter()
            .filter(|binding| {
                binding.exchange == destination.exchange
                    && binding.routing_key == destination.routing_key
            })
            .filter_map(|binding| self.queues.get(&binding.queue))
            .collect())
    }
}

/// An in-process broker with direct exchanges and buffered queues.
///
/// Clones share the same exchanges and queues.
#[derive(Clone, Debug, Default)]
pub struct MemoryBroker {
    state: Arc<Mutex<BrokerState>>,
}

impl MemoryBroker {
    /// Creates a new `MemoryBroker` with nothing declared.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a copy of `message` in every queue `destination` routes to
    /// and returns how many queues received it.
    async fn deliver(&self, destination: &Destination, message: Delivery) -> Result<usize, Error> {
        let state = self.state.lock().await;
        if state.closed {
            return Err(Error::Closed);
        }

        let mut delivered = 0;
        for queue in state.routed_queues(destination)? {
            if queue.sender.send(message.clone()).is_ok() {
                delivered += 1;
            }
        }
        drop(state);

        Ok(delivered)
    }

    async fn receiver(&self, queue: &str) -> Result<SharedReceiver, Error> {
        let state = self.state.lock().await;
        if state.closed {
            return Err(Error::Closed);
        }

        state
            .queues
            .get(queue)
            .map(|queue| queue.receiver.clone())
            .ok_or_else(|| Error::QueueNotFound(queue.to_string()))
    }
}

#[async_trait]
impl Broker for MemoryBroker {
    type Error = Error;

    type PublisherType<T, D, S>
        = MemoryPublisher<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + StdError + Send + Sync + 'static,
        S: Debug + StdError + Send + Sync + 'static;

    type QueueType<T, D, S>
        = MemoryQueue<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + StdError + Send + Sync + 'static,
        S: Debug + StdError + Send + Sync + 'static;

    async fn declare(&self, topology: &Topology) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(Error::Closed);
        }

        for exchange in &topology.exchanges {
            state.exchanges.insert(exchange.clone());
        }

        for queue in &topology.queues {
            state
                .queues
                .entry(queue.clone())
                .or_insert_with(QueueState::new);
        }

        for binding in &topology.bindings {
            if !state.exchanges.contains(&binding.exchange) {
                return Err(Error::ExchangeNotFound(binding.exchange.clone()));
            }
            if !state.queues.contains_key(&binding.queue) {
                return Err(Error::QueueNotFound(binding.queue.clone()));
            }

            debug!(
                "binding {} to {} with {}",
                binding.queue, binding.exchange, binding.routing_key
            );
            state.bindings.insert(binding.clone());
        }
        drop(state);

        Ok(())
    }

    fn publisher<T, D, S>(&self, destination: Destination) -> MemoryPublisher<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + StdError + Send + Sync + 'static,
        S: Debug + StdError + Send + Sync + 'static,
    {
        MemoryPublisher::new(self.clone(), destination)
    }

    fn queue<T, D, S>(&self, name: String) -> MemoryQueue<T, D, S>
    where
        T: Clone
            + Debug
            + Send
            + Sync
            + TryFrom<Bytes, Error = D>
            + TryInto<Bytes, Error = S>
            + 'static,
        D: Debug + StdError + Send + Sync + 'static,
        S: Debug + StdError + Send + Sync + 'static,
    {
        MemoryQueue::new(self.clone(), name)
    }

    async fn shutdown(&self) -> Result<(), Error> {
        let mut state = self.state.lock().await;
        if state.closed {
            return Err(Error::Closed);
        }

        // Dropping the senders ends every consumer once its queue drains.
        state.closed = true;
        state.queues.clear();
        state.bindings.clear();
        drop(state);

        info!("memory broker shut down");

        Ok(())
    }
}
