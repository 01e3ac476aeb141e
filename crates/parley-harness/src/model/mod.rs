//! Reference model for model-based testing.
//!
//! The model captures what a chat session should look like from the outside
//! (who sees which line, what the server records) with none of the layering,
//! factories or routing of the real participants.
//!
//! # Design Principles
//!
//! - Simplicity: the model should be obviously correct
//! - Observable behavior only: display lines, server log, authentication
//! - Deterministic: same inputs produce same outputs
//!
//! Encryption is invisible to the model. Both methods are lossless, so a
//! session displays the same lines with or without it.

mod client;
pub mod operation;
mod server;
mod world;

pub use client::ModelClient;
pub use operation::{ACCOUNTS, ClientId, Operation, OperationError, OperationResult, SmallMessage};
pub use server::ModelServer;
pub use world::{ModelWorld, ObservableState};
