use crate::error::{Error, Result};
use crate::text::TextMessage;
use crate::user::{DELETED_EVENT, EVENT_HEADER, User};

use async_trait::async_trait;
use tracing::info;
use userbus_messaging::Message;
use userbus_messaging::subscription_handler::SubscriptionHandler;

/// Logs every text message delivered from the text queue.
#[derive(Clone, Debug, Default)]
pub struct TextMessageLogger;

#[async_trait]
impl SubscriptionHandler<TextMessage> for TextMessageLogger {
    type Error = Error;

    async fn handle(&self, _queue: String, message: Message<TextMessage>) -> Result<()> {
        info!("Received message -> {}", message.payload);

        Ok(())
    }
}

/// Logs every user delivered from the JSON queue. Messages flagged as
/// deletions are logged separately.
#[derive(Clone, Debug, Default)]
pub struct JsonMessageLogger;

#[async_trait]
impl SubscriptionHandler<User> for JsonMessageLogger {
    type Error = Error;

    async fn handle(&self, _queue: String, message: Message<User>) -> Result<()> {
        if message.header(EVENT_HEADER) == Some(DELETED_EVENT) {
            info!("Received deletion notification -> {}", message.payload.id);
        } else {
            info!("Received JSON message -> {}", message.payload);
        }

        Ok(())
    }
}
