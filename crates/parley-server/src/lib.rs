//! Parley server.
//!
//! A server is a stack of [`ServerLayer`]s wrapped in a [`Server`]
//! participant:
//!
//! ```text
//! Server (participant, executes actions)
//!   ├─ LoggingServer          records outcome lines
//!   ├─ EncryptingServer       decrypts inbound payloads
//!   ├─ AuthenticatingServer   owns pending/authenticated state
//!   └─ BaseServer             membership, handshakes, broadcast
//! ```
//!
//! Every decorator is optional and may be nested in any order; the order
//! above is what [`server_stack`] builds from a [`ChatConfig`].
//!
//! [`ChatConfig`]: parley_core::ChatConfig

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod auth;
mod encrypting;
mod executor;
mod layer;
mod logging;
mod server;
mod stack;

pub use action::{ServerAction, ServerOutcome};
pub use auth::{
    AUTHENTICATION_FAILED, AUTHENTICATION_REQUIRED, AuthStatus, AuthenticatingServer,
    AuthenticationState, CredentialStore,
};
pub use encrypting::EncryptingServer;
pub use executor::{BroadcastPolicy, execute_actions};
pub use layer::{BaseServer, ServerLayer};
pub use logging::LoggingServer;
pub use server::Server;
pub use stack::server_stack;
