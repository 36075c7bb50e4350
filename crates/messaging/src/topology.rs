/// A queue bound to an exchange under a routing key.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Binding {
    /// Queue receiving the routed messages.
    pub queue: String,

    /// Exchange the queue is bound to.
    pub exchange: String,

    /// Routing key the binding matches.
    pub routing_key: String,
}

/// The exchanges, queues and bindings a service expects to exist.
///
/// Exchanges are direct: a binding matches when the routing key is equal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Topology {
    /// Exchange names.
    pub exchanges: Vec<String>,

    /// Queue names.
    pub queues: Vec<String>,

    /// Bindings between them.
    pub bindings: Vec<Binding>,
}

impl Topology {
    /// Creates an empty topology.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            exchanges: Vec::new(),
            queues: Vec::new(),
            bindings: Vec::new(),
        }
    }

    /// Adds an exchange. Duplicates are ignored.
    #[must_use]
    pub fn exchange<E: Into<String>>(mut self, exchange: E) -> Self {
        let exchange = exchange.into();
        if !self.exchanges.contains(&exchange) {
            self.exchanges.push(exchange);
        }
        self
    }

    /// Adds a queue. Duplicates are ignored.
    #[must_use]
    pub fn queue<Q: Into<String>>(mut self, queue: Q) -> Self {
        let queue = queue.into();
        if !self.queues.contains(&queue) {
            self.queues.push(queue);
        }
        self
    }

    /// Binds `queue` to `exchange` under `routing_key`, adding both if
    /// they are missing.
    #[must_use]
    pub fn bind<Q, E, R>(self, queue: Q, exchange: E, routing_key: R) -> Self
    where
        Q: Into<String>,
        E: Into<String>,
        R: Into<String>,
    {
        let binding = Binding {
            queue: queue.into(),
            exchange: exchange.into(),
            routing_key: routing_key.into(),
        };

        let mut topology = self
            .queue(binding.queue.clone())
            .exchange(binding.exchange.clone());

        if !topology.bindings.contains(&binding) {
            topology.bindings.push(binding);
        }

        topology
    }
}
