use thiserror::Error;
use userbus_messaging::broker::BrokerError;

/// Errors raised by the broker connection.
#[derive(Debug, Error)]
pub enum Error {
    /// Failed to open a channel.
    #[error("failed to open channel: {0}")]
    Channel(lapin::Error),

    /// Failed to close the connection.
    #[error("failed to close connection: {0}")]
    Close(lapin::Error),

    /// Failed to connect to the broker.
    #[error("failed to connect: {0}")]
    Connect(lapin::Error),

    /// Failed to declare part of the topology.
    #[error("failed to declare {0}: {1}")]
    Declare(String, lapin::Error),
}

impl BrokerError for Error {}
