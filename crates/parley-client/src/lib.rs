//! Parley client.
//!
//! A [`Client`] is a router participant wrapping a stack of
//! [`ClientLayer`]s. The [`BaseClient`] handles the server handshake and
//! plain display; decorators add colored display ([`ColoringClient`]),
//! credential submission ([`AuthenticatingClient`]), inbound decryption
//! ([`EncryptingClient`]) and event logging ([`LoggingClient`]).
//!
//! Outbound messages are always built by the client's factory chain, so a
//! client can only send what its factory chain enables.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod client;
mod coloring;
mod encrypting;
mod layer;
mod logging;
mod stack;

pub use auth::AuthenticatingClient;
pub use client::{Client, ClientSession};
pub use coloring::ColoringClient;
pub use encrypting::EncryptingClient;
pub use layer::{BaseClient, ClientLayer};
pub use logging::LoggingClient;
pub use stack::client_stack;
