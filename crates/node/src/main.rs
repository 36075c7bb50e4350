//! Serves the user API and runs the message loggers against the configured
//! broker.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]

mod config;
mod error;
mod node;

use config::{Args, BrokerKind};
use error::Result;
use node::Node;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use userbus_messaging::broker::Broker;
use userbus_messaging_amqp::AmqpBroker;
use userbus_messaging_memory::MemoryBroker;

async fn run<B>(broker: B, args: &Args) -> Result<()>
where
    B: Broker,
{
    let node = Node::start(broker, args).await?;

    if let Some(addr) = node.local_addr() {
        info!("userbus listening on {}", addr);
    }

    tokio::signal::ctrl_c().await?;

    info!("shutting down...");

    node.shutdown().await
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .finish(),
    )?;

    let args = Args::parse();

    let result = match args.broker {
        BrokerKind::Memory => run(MemoryBroker::new(), &args).await,
        BrokerKind::Amqp => match AmqpBroker::connect(&args.amqp_uri).await {
            Ok(broker) => run(broker, &args).await,
            Err(e) => Err(e.into()),
        },
    };

    if let Err(e) = &result {
        error!("userbus failed: {}", e);
    }

    result
}
