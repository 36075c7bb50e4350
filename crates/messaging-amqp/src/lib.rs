//! RabbitMQ implementation of the messaging crate, built on `lapin`.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;
mod properties;

/// Publishers send messages to an exchange with a routing key.
pub mod publisher;

/// Queues are consumed with `basic.consume`.
pub mod queue;

/// Subscriptions are running consumers with their own consumer tag.
pub mod subscription;

pub use error::Error;
pub use publisher::AmqpPublisher;
pub use queue::AmqpQueue;
pub use subscription::AmqpSubscription;

use std::error::Error as StdError;
use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use lapin::options::{ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::{Channel, Connection, ConnectionProperties, ExchangeKind};
use tracing::{debug, info};
use userbus_messaging::broker::Broker;
use userbus_messaging::destination::Destination;
use userbus_messaging::topology::Topology;

/// AMQP reply code for a normal connection close.
const REPLY_SUCCESS: u16 = 200;

/// A connection to a RabbitMQ broker with one shared channel.
#[derive(Clone, Debug)]
pub struct AmqpBroker {
    channel: Channel,
    connection: Arc<Connection>,
}

impl AmqpBroker {
    /// Connects to the broker at `uri` and opens a channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or the channel cannot be opened.
    pub async fn connect(uri: &str) -> Result<Self, Error> {
        let connection = Connection::connect(uri, ConnectionProperties::default())
            .await
            .map_err(Error::Connect)?;

        let channel = connection
            .create_channel()
            .await
            .map_err(Error::Channel)?;

        info!("connected to amqp broker");

        Ok(Self {
            channel,
            connection: Arc::new(connection),
        })
    }
}

#[async_trait]
impl Broker for AmqpBroker {
    type Error = Error;

    type PublisherType<T, D, S>
        = AmqpPublisher<T, D, S>
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
        = AmqpQueue<T, D, S>
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
        let durable_exchange = ExchangeDeclareOptions {
            durable: true,
            ..ExchangeDeclareOptions::default()
        };
        for exchange in &topology.exchanges {
            self.channel
                .exchange_declare(
                    exchange,
                    ExchangeKind::Direct,
                    durable_exchange,
                    FieldTable::default(),
                )
                .await
                .map_err(|e| Error::Declare(format!("exchange {exchange}"), e))?;
            debug!("declared exchange {}", exchange);
        }

        let durable_queue = QueueDeclareOptions {
            durable: true,
            ..QueueDeclareOptions::default()
        };
        for queue in &topology.queues {
            self.channel
                .queue_declare(queue, durable_queue, FieldTable::default())
                .await
                .map_err(|e| Error::Declare(format!("queue {queue}"), e))?;
            debug!("declared queue {}", queue);
        }

        for binding in &topology.bindings {
            self.channel
                .queue_bind(
                    &binding.queue,
                    &binding.exchange,
                    &binding.routing_key,
                    QueueBindOptions::default(),
                    FieldTable::default(),
                )
                .await
                .map_err(|e| {
                    Error::Declare(
                        format!("binding {} -> {}", binding.exchange, binding.queue),
                        e,
                    )
                })?;
            debug!(
                "bound {} to {} with {}",
                binding.queue, binding.exchange, binding.routing_key
            );
        }

        info!(
            "declared {} exchanges, {} queues, {} bindings",
            topology.exchanges.len(),
            topology.queues.len(),
            topology.bindings.len()
        );

        Ok(())
    }

    fn publisher<T, D, S>(&self, destination: Destination) -> AmqpPublisher<T, D, S>
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
        AmqpPublisher::new(self.channel.clone(), destination)
    }

    fn queue<T, D, S>(&self, name: String) -> AmqpQueue<T, D, S>
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
        AmqpQueue::new(self.channel.clone(), name)
    }

    async fn shutdown(&self) -> Result<(), Error> {
        info!("closing amqp connection...");

        self.connection
            .close(REPLY_SUCCESS, "shutdown")
            .await
            .map_err(Error::Close)?;

        info!("amqp connection closed");

        Ok(())
    }
}
