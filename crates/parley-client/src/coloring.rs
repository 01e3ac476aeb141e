//! Coloring client layer.

use parley_core::{Address, ChatError, Logger, Message};

use crate::{ClientLayer, ClientSession};

/// Enables sending colored text and displaying it in color.
///
/// Every call passes through untouched. The base layer reads
/// [`colors_enabled`](ClientLayer::colors_enabled) when it displays or
/// builds colored text, so layers nested inside this one still see every
/// arrival and every send.
pub struct ColoringClient<L> {
    inner: L,
}

impl<L: ClientLayer> ColoringClient<L> {
    /// Wrap `inner`.
    pub const fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: ClientLayer> ClientLayer for ColoringClient<L> {
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError> {
        self.inner.handle(message, session)
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
        true
    }
}
