use crate::config::Args;
use crate::error::{Error, Result};

use std::convert::Infallible;
use std::net::SocketAddr;
use std::string::FromUtf8Error;

use tracing::{info, warn};
use userbus_api::ApiContext;
use userbus_http::HttpServer;
use userbus_http_insecure::InsecureHttpServer;
use userbus_messaging::broker::Broker;
use userbus_messaging::queue::Queue;
use userbus_messaging::subscription::Subscription;
use userbus_users::consumer::{JsonMessageLogger, TextMessageLogger};
use userbus_users::producer::{TextProducer, UserProducer};
use userbus_users::{TextMessage, User, UserService};

type TextQueue<B> = <B as Broker>::QueueType<TextMessage, FromUtf8Error, Infallible>;
type JsonQueue<B> = <B as Broker>::QueueType<User, serde_json::Error, serde_json::Error>;

type TextSubscription<B> =
    <TextQueue<B> as Queue<TextMessage, FromUtf8Error, Infallible>>::SubscriptionType<TextMessageLogger>;
type JsonSubscription<B> =
    <JsonQueue<B> as Queue<User, serde_json::Error, serde_json::Error>>::SubscriptionType<JsonMessageLogger>;

/// A running node: both loggers subscribed and the API served.
pub(crate) struct Node<B>
where
    B: Broker,
{
    broker: B,
    http_server: InsecureHttpServer,
    json_subscription: JsonSubscription<B>,
    text_subscription: TextSubscription<B>,
}

impl<B> Node<B>
where
    B: Broker,
{
    pub async fn start(broker: B, args: &Args) -> Result<Self> {
        if args.declares_topology() {
            broker
                .declare(&args.topology())
                .await
                .map_err(|e| Error::Broker(e.to_string()))?;

            info!("declared topology on exchange {}", args.exchange);
        }

        let text_queue: TextQueue<B> =
            broker.queue::<TextMessage, FromUtf8Error, Infallible>(args.queue.clone());
        let text_subscription = text_queue
            .subscribe(TextMessageLogger)
            .await
            .map_err(|e| Error::Subscribe(e.to_string()))?;

        let json_queue: JsonQueue<B> =
            broker.queue::<User, serde_json::Error, serde_json::Error>(args.json_queue.clone());
        let json_subscription = json_queue
            .subscribe(JsonMessageLogger)
            .await
            .map_err(|e| Error::Subscribe(e.to_string()))?;

        let json_publisher = broker
            .publisher::<User, serde_json::Error, serde_json::Error>(args.json_destination());
        let text_publisher =
            broker.publisher::<TextMessage, FromUtf8Error, Infallible>(args.text_destination());

        let router = userbus_api::router(ApiContext {
            users: UserService::new(UserProducer::new(json_publisher)),
            text: TextProducer::new(text_publisher),
        });

        let http_server = InsecureHttpServer::new(args.listen_addr());
        http_server.start(router).await?;

        Ok(Self {
            broker,
            http_server,
            json_subscription,
            text_subscription,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.http_server.local_addr()
    }

    /// Stops the server first so no request publishes into a closed broker.
    ///
    /// Every step runs even if an earlier one fails. The first error is
    /// returned once the broker has been shut down.
    pub async fn shutdown(self) -> Result<()> {
        self.http_server.shutdown().await;

        let mut first_error = None;

        if let Err(e) = self.text_subscription.cancel().await {
            warn!(
                "failed to cancel subscription to {}: {}",
                self.text_subscription.queue_name(),
                e
            );
            first_error.get_or_insert(Error::Unsubscribe(e.to_string()));
        }
        if let Err(e) = self.json_subscription.cancel().await {
            warn!(
                "failed to cancel subscription to {}: {}",
                self.json_subscription.queue_name(),
                e
            );
            first_error.get_or_insert(Error::Unsubscribe(e.to_string()));
        }

        if let Err(e) = self.broker.shutdown().await {
            warn!("failed to shut down broker: {}", e);
            first_error.get_or_insert(Error::Broker(e.to_string()));
        }

        info!("node shutdown");

        first_error.map_or(Ok(()), Err)
    }
}
