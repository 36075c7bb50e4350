//! Abstract interface for publishing to and consuming from a message broker.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Brokers hand out publishers and queues and own the topology.
pub mod broker;

/// Destinations address a published message (exchange plus routing key).
pub mod destination;

/// Publishers send messages to a destination.
pub mod publisher;

/// Queues are named buffers that subscriptions consume from.
pub mod queue;

/// Subscriptions are handles to running consumers.
pub mod subscription;

/// Subscription handlers process messages for subscriptions.
pub mod subscription_handler;

/// Exchanges, queues and the bindings between them.
pub mod topology;

use std::collections::HashMap;

/// Message headers.
pub type Headers = HashMap<String, String>;

/// Header carrying the MIME type of the payload. Backends with a native
/// content type property map it there.
pub const CONTENT_TYPE_HEADER: &str = "content-type";

/// A payload together with optional headers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message<T> {
    /// Optional headers carried alongside the payload.
    pub headers: Option<Headers>,

    /// The payload.
    pub payload: T,
}

impl<T> Message<T> {
    /// Wraps a payload without headers.
    pub const fn new(payload: T) -> Self {
        Self {
            headers: None,
            payload,
        }
    }

    /// Adds a header, creating the header map if needed.
    #[must_use]
    pub fn with_header<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Returns the value of a header, if present.
    #[must_use]
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .as_ref()
            .and_then(|headers| headers.get(key))
            .map(String::as_str)
    }

    /// Converts the payload, keeping the headers.
    ///
    /// # Errors
    ///
    /// Returns whatever error the conversion returns.
    pub fn try_map<U, E, F>(self, f: F) -> Result<Message<U>, E>
    where
        F: FnOnce(T) -> Result<U, E>,
    {
        Ok(Message {
            headers: self.headers,
            payload: f(self.payload)?,
        })
    }
}

impl<T> From<T> for Message<T> {
    fn from(payload: T) -> Self {
        Self::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_header() {
        let message = Message::new("payload")
            .with_header("a", "1")
            .with_header("b", "2");

        assert_eq!(message.header("a"), Some("1"));
        assert_eq!(message.header("b"), Some("2"));
        assert_eq!(message.header("c"), None);
    }

    #[test]
    fn test_try_map_keeps_headers() {
        let message = Message::new("42").with_header("kind", "number");

        let mapped: Message<i32> = message.try_map(str::parse).unwrap();

        assert_eq!(mapped.payload, 42);
        assert_eq!(
            mapped.headers.unwrap().get("kind").map(String::as_str),
            Some("number")
        );
    }

    #[test]
    fn test_try_map_error() {
        let message = Message::new("not a number");

        let mapped: Result<Message<i32>, _> = message.try_map(str::parse);

        assert!(mapped.is_err());
    }
}
