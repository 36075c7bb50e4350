//! HTTP surface for the user CRUD operations and the raw text publisher.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_pub_crate)]

mod error;
mod handlers;
mod router;
mod state;

pub use error::Error;
pub use router::router;
pub use state::ApiContext;
