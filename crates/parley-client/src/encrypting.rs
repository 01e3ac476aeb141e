//! Encrypting client layer.

use parley_core::{Address, ChatError, EncryptionMethod, Logger, Message};

use crate::{ClientLayer, ClientSession};

/// Decrypts inbound messages before the inner layers see them.
///
/// Outbound encryption is the factory chain's job, so every outbound
/// operation is forwarded unchanged.
pub struct EncryptingClient<L> {
    inner: L,
    method: EncryptionMethod,
}

impl<L: ClientLayer> EncryptingClient<L> {
    /// Wrap `inner`, decrypting with `method`.
    pub const fn new(inner: L, method: EncryptionMethod) -> Self {
        Self { inner, method }
    }
}

impl<L: ClientLayer> ClientLayer for EncryptingClient<L> {
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError> {
        self.inner.handle(message.decrypt(self.method), session)
    }

    fn connect(&self, server: Address, session: &ClientSession) -> Result<bool, ChatError> {
        self.inner.connect(server, session)
    }

    fn send(&self, body: &str, session: &ClientSession) -> Result<bool, ChatError> {
        self.inner.send(body, session)
    }

    fn send_colored(
        &self,
        body: &str,
        color: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        self.inner.send_colored(body, color, session)
    }

    fn authenticate(
        &self,
        username: &str,
        password: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        self.inner.authenticate(username, password, session)
    }

    fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    fn logger(&self) -> Option<&Logger> {
        self.inner.logger()
    }

    fn colors_enabled(&self) -> bool {
        self.inner.colors_enabled()
    }
}
