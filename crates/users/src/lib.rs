//! Users, the in-memory user store, and the producers and consumers that
//! move users and text through the broker.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod error;

/// Subscription handlers that log what the queues deliver.
pub mod consumer;

/// Producers that log and publish users and text.
pub mod producer;

/// CRUD operations that publish every mutation.
pub mod service;

/// Shared, insertion-ordered user store.
pub mod store;

/// Raw text payloads.
pub mod text;

/// The user envelope and its request shapes.
pub mod user;

pub use error::{Error, Result};
pub use service::UserService;
pub use store::UserStore;
pub use text::TextMessage;
pub use user::{
    DELETED_EVENT, DELETION_MARKER, EVENT_HEADER, NewUser, User, UserPatch, UserUpdate,
};
