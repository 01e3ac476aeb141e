//! Reference model for Parley protocol testing.
//!
//! # Model-Based Testing
//!
//! The `model` module provides a reference implementation of a single chat
//! room: one server, a fixed set of clients, and the feature selection of a
//! [`ChatConfig`](parley_core::ChatConfig). Operations are applied to both
//! the model and real participants on a router, and their observable states
//! are compared.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;

pub use model::{
    ACCOUNTS, ClientId, ModelClient, ModelServer, ModelWorld, ObservableState, Operation,
    OperationError, OperationResult, SmallMessage,
};
