use crate::error::{Error, Result};
use crate::text::TextMessage;
use crate::user::{DELETED_EVENT, EVENT_HEADER, User};

use std::convert::Infallible;
use std::string::FromUtf8Error;

use tracing::info;
use userbus_messaging::publisher::Publisher;
use userbus_messaging::{CONTENT_TYPE_HEADER, Message};

/// Any publisher of JSON users.
pub trait UserPublisher: Publisher<User, serde_json::Error, serde_json::Error> {}

impl<P> UserPublisher for P where P: Publisher<User, serde_json::Error, serde_json::Error> {}

/// Any publisher of raw text.
pub trait TextPublisher: Publisher<TextMessage, FromUtf8Error, Infallible> {}

impl<P> TextPublisher for P where P: Publisher<TextMessage, FromUtf8Error, Infallible> {}

/// Sends users as JSON to the configured exchange and routing key.
#[derive(Clone, Debug)]
pub struct UserProducer<P> {
    publisher: P,
}

impl<P> UserProducer<P>
where
    P: UserPublisher,
{
    /// Creates a new `UserProducer`.
    pub const fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Logs and publishes `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be serialized or the broker
    /// client refuses the message.
    pub async fn send(&self, user: &User) -> Result<()> {
        self.publish(user.clone(), None).await
    }

    /// Logs and publishes the deletion notification for `id`, flagged with
    /// the deletion event header.
    ///
    /// # Errors
    ///
    /// Returns an error if the broker client refuses the message.
    pub async fn send_deletion(&self, id: &str) -> Result<()> {
        self.publish(User::deletion_marker(id), Some(DELETED_EVENT)).await
    }

    async fn publish(&self, user: User, event: Option<&str>) -> Result<()> {
        info!("JSON message sent -> {}", serde_json::to_string(&user)?);

        let mut message = Message::new(user).with_header(CONTENT_TYPE_HEADER, "application/json");
        if let Some(event) = event {
            message = message.with_header(EVENT_HEADER, event);
        }

        self.publisher
            .publish(message)
            .await
            .map_err(|e| Error::Publish(e.to_string()))
    }
}

/// Sends raw text to the configured exchange and routing key.
#[derive(Clone, Debug)]
pub struct TextProducer<P> {
    publisher: P,
}

impl<P> TextProducer<P>
where
    P: TextPublisher,
{
    /// Creates a new `TextProducer`.
    pub const fn new(publisher: P) -> Self {
        Self { publisher }
    }

    /// Logs and publishes `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if the broker client refuses the message.
    pub async fn send(&self, text: &str) -> Result<()> {
        info!("Message sent -> {}", text);

        self.publisher
            .publish(
                Message::new(TextMessage::from(text))
                    .with_header(CONTENT_TYPE_HEADER, "text/plain"),
            )
            .await
            .map_err(|e| Error::Publish(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use bytes::Bytes;
    use tokio::sync::mpsc;
    use tokio::time::{Duration, timeout};
    use tracing_test::traced_test;
    use userbus_messaging::broker::Broker;
    use userbus_messaging::destination::Destination;
    use userbus_messaging::queue::Queue;
    use userbus_messaging::subscription_handler::SubscriptionHandler;
    use userbus_messaging::topology::Topology;
    use userbus_messaging_memory::{MemoryBroker, MemoryPublisher, MemoryQueue, MemorySubscription};

    #[derive(Clone, Debug)]
    struct Forward(mpsc::Sender<Message<Bytes>>);

    #[async_trait]
    impl SubscriptionHandler for Forward {
        type Error = Error;

        async fn handle(&self, _queue: String, message: Message<Bytes>) -> Result<()> {
            self.0
                .send(message)
                .await
                .map_err(|e| Error::Publish(e.to_string()))
        }
    }

    async fn setup() -> (
        MemoryBroker,
        mpsc::Receiver<Message<Bytes>>,
        MemorySubscription<Forward, Bytes, Infallible, Infallible>,
    ) {
        let broker = MemoryBroker::new();
        broker
            .declare(&Topology::new().bind("out", "users", "key"))
            .await
            .unwrap();

        let (sender, receiver) = mpsc::channel(10);
        let queue: MemoryQueue<Bytes, Infallible, Infallible> = broker.queue("out".to_string());
        let subscription = queue.subscribe(Forward(sender)).await.unwrap();

        (broker, receiver, subscription)
    }

    #[tokio::test]
    #[traced_test]
    async fn test_user_producer_sends_json() {
        let (broker, mut receiver, _subscription) = setup().await;
        let publisher: MemoryPublisher<User, serde_json::Error, serde_json::Error> =
            broker.publisher(Destination::new("users", "key"));
        let producer = UserProducer::new(publisher);

        let user = User {
            id: "g1".to_string(),
            name: Some("Alice".to_string()),
            email: None,
        };
        producer.send(&user).await.unwrap();

        let message = timeout(Duration::from_secs(1), receiver.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message.payload, Bytes::from(r#"{"id":"g1","name":"Alice"}"#));
        assert_eq!(message.header(CONTENT_TYPE_HEADER), Some("application/json"));
        assert!(logs_contain(r#"JSON message sent -> {"id":"g1","name":"Alice"}"#));
    }

    #[tokio::test]
    async fn test_deletion_carries_event_header() {
        let (broker, mut receiver, _subscription) = setup().await;
        let publisher: MemoryPublisher<User, serde_json::Error, serde_json::Error> =
            broker.publisher(Destination::new("users", "key"));
        let producer = UserProducer::new(publisher);

        producer.send(&User::deletion_marker("g1")).await.unwrap();
        producer.send_deletion("g1").await.unwrap();

        let stored_named_deleted = timeout(Duration::from_secs(1), receiver.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_named_deleted.header(EVENT_HEADER), None);

        let deletion = timeout(Duration::from_secs(1), receiver.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(deletion.payload, Bytes::from(r#"{"id":"g1","name":"DELETED"}"#));
        assert_eq!(deletion.header(EVENT_HEADER), Some(DELETED_EVENT));
        assert_eq!(deletion.header(CONTENT_TYPE_HEADER), Some("application/json"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_text_producer_sends_text() {
        let (broker, mut receiver, _subscription) = setup().await;
        let publisher: MemoryPublisher<TextMessage, FromUtf8Error, Infallible> =
            broker.publisher(Destination::new("users", "key"));
        let producer = TextProducer::new(publisher);

        producer.send("hello").await.unwrap();

        let message = timeout(Duration::from_secs(1), receiver.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message.payload, Bytes::from("hello"));
        assert_eq!(message.header(CONTENT_TYPE_HEADER), Some("text/plain"));
        assert!(logs_contain("Message sent -> hello"));
    }

    #[tokio::test]
    async fn test_publish_failure_is_reported() {
        let broker = MemoryBroker::new();
        let publisher: MemoryPublisher<User, serde_json::Error, serde_json::Error> =
            broker.publisher(Destination::new("missing", "key"));
        let producer = UserProducer::new(publisher);

        let result = producer.send(&User::default()).await;

        assert!(matches!(result, Err(Error::Publish(_))));
    }
}
