//! Core error types.

use parley_proto::{Address, MessageKind, ProtoError};
use thiserror::Error;

/// Errors from routing, message construction and message handling.
///
/// Expected protocol rejections (bad credentials, unauthenticated sends) are
/// not errors: they are answered in-band and reported as `Ok(false)`.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The operation needs a feature layer that is not in the active stack.
    #[error("configuration error: {operation} requires a feature that is not enabled")]
    Configuration {
        /// Operation that was refused.
        operation: &'static str,
    },

    /// No participant is bound to the receiver address.
    #[error("unknown receiver: {0}")]
    UnknownReceiver(Address),

    /// Client tried to send before learning its server's address.
    #[error("not connected to a server")]
    NotConnected,

    /// A layer received a message kind it can never handle in this stack.
    #[error("{layer} cannot handle {kind} messages")]
    UnexpectedMessage {
        /// Layer that received the message.
        layer: &'static str,
        /// Kind of the offending message.
        kind: MessageKind,
    },

    /// The router this participant was registered on no longer exists.
    #[error("network unavailable")]
    NetworkUnavailable,

    /// Wire codec failure.
    #[error("codec error: {0}")]
    Codec(#[from] ProtoError),
}

impl ChatError {
    /// Returns true if this error is fatal (unrecoverable).
    ///
    /// Fatal errors indicate a broken network or a stack that was assembled
    /// inconsistently. Configuration errors and sends before the handshake
    /// completes leave every participant usable.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::UnknownReceiver(_)
            | Self::UnexpectedMessage { .. }
            | Self::NetworkUnavailable
            | Self::Codec(_) => true,

            Self::Configuration { .. } | Self::NotConnected => false,
        }
    }
}
