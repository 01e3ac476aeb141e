//! Parley core.
//!
//! Everything a server or client stack is built on:
//!
//! - [`Router`]: in-process network that registers participants and
//!   delivers messages synchronously
//! - [`Participant`]: capability the router dispatches to
//! - [`Endpoint`]: a participant's address, router handle and outbound
//!   factory chain
//! - [`MessageFactory`]: layered construction of outbound messages
//! - [`View`] and [`Logger`]: display and log collaborators
//! - [`ChatConfig`]: runtime selection of optional layers
//!
//! ## Architecture
//!
//! ```text
//! caller ─▶ factory chain ─▶ Router::send_message ─▶ Participant
//!                                  ▲                     │
//!                                  └──── replies ────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod factory;
mod logger;
mod router;
pub mod view;

pub use config::ChatConfig;
pub use error::ChatError;
pub use factory::{
    AuthenticatingMessageFactory, BaseMessageFactory, ColoringMessageFactory,
    EncryptingMessageFactory, MessageFactory, factory_for,
};
pub use logger::Logger;
pub use parley_proto::{Address, EncryptionMethod, Features, Message, MessageKind};
pub use router::{AddressSlot, Endpoint, Participant, Router, RouterConfig};
pub use view::View;
