//! Encrypting server layer.

use parley_core::{ChatError, EncryptionMethod, Endpoint, Logger, Message};

use crate::{ServerLayer, action::ServerOutcome};

/// Decrypts inbound messages before the inner layers see them.
///
/// Outbound messages are encrypted by the server's factory chain, which must
/// contain an `EncryptingMessageFactory` with the same method.
pub struct EncryptingServer<L> {
    inner: L,
    method: EncryptionMethod,
}

impl<L: ServerLayer> EncryptingServer<L> {
    /// Wrap `inner`, decrypting with `method`.
    pub const fn new(inner: L, method: EncryptionMethod) -> Self {
        Self { inner, method }
    }
}

impl<L: ServerLayer> ServerLayer for EncryptingServer<L> {
    fn process(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        self.inner.process(message.decrypt(self.method), endpoint)
    }

    fn logger(&self) -> Option<&Logger> {
        self.inner.logger()
    }
}
