//! Parley protocol types.
//!
//! The message model shared by every participant of a Parley network:
//!
//! - [`Message`]: tagged union of connection, authentication and text messages
//! - [`EncryptionMethod`]: reversible text obfuscations applied to message
//!   payloads
//! - [`Features`]: the optional protocol features a stack can enable
//!
//! Messages are plain values. Transforms produce new instances and never
//! mutate the original.
//!
//! # Wire Format
//!
//! Messages serialize to CBOR via [`Message::encode`] and
//! [`Message::decode`]. The in-process router can push every delivery through
//! this codec to simulate crossing a wire.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod encryption;
mod error;
mod features;
mod message;

pub use encryption::EncryptionMethod;
pub use error::ProtoError;
pub use features::Features;
pub use message::{Address, Message, MessageKind};
