use std::fmt;

/// The (exchange, routing key) pair a message is published to.
///
/// The empty exchange name is the default exchange, which routes a message
/// to the queue whose name equals the routing key.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Destination {
    /// Exchange name.
    pub exchange: String,

    /// Routing key.
    pub routing_key: String,
}

impl Destination {
    /// Creates a new `Destination`.
    pub fn new<E, R>(exchange: E, routing_key: R) -> Self
    where
        E: Into<String>,
        R: Into<String>,
    {
        Self {
            exchange: exchange.into(),
            routing_key: routing_key.into(),
        }
    }

    /// Addresses a queue directly through the default exchange.
    pub fn queue<Q>(queue: Q) -> Self
    where
        Q: Into<String>,
    {
        Self {
            exchange: String::new(),
            routing_key: queue.into(),
        }
    }

    /// Whether this destination goes through the default exchange.
    #[must_use]
    pub const fn is_default_exchange(&self) -> bool {
        self.exchange.is_empty()
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_default_exchange() {
            write!(f, "(default)/{}", self.routing_key)
        } else {
            write!(f, "{}/{}", self.exchange, self.routing_key)
        }
    }
}
