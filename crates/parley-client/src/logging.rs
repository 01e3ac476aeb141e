//! Logging client layer.

use parley_core::{Address, ChatError, Logger, Message};

use crate::{ClientLayer, ClientSession};

/// Records inbound arrivals and outbound requests before forwarding them.
pub struct LoggingClient<L> {
    inner: L,
    logger: Logger,
}

impl<L: ClientLayer> LoggingClient<L> {
    /// Wrap `inner` with a fresh logger.
    pub fn new(inner: L) -> Self {
        Self { inner, logger: Logger::new() }
    }
}

impl<L: ClientLayer> ClientLayer for LoggingClient<L> {
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError> {
        self.logger.log(format!("Received message from sender {}", message.sender()));
        self.inner.handle(message, session)
    }

    fn connect(&self, server: Address, session: &ClientSession) -> Result<bool, ChatError> {
        self.logger.log(format!("Connecting to server {server}"));
        self.inner.connect(server, session)
    }

    fn send(&self, body: &str, session: &ClientSession) -> Result<bool, ChatError> {
        self.logger.log(format!("Sending message: {}", Message::text(session.address(), body)));
        self.inner.send(body, session)
    }

    fn send_colored(
        &self,
        body: &str,
        color: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        self.logger.log(format!(
            "Sending message: {}",
            Message::colored_text(session.address(), body, color)
        ));
        self.inner.send_colored(body, color, session)
    }

    fn authenticate(
        &self,
        username: &str,
        password: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        // Repeat requests are answered locally by the authenticating layer.
        if !self.inner.is_authenticated() {
            self.logger.log(format!(
                "Sending authentication request: {}",
                Message::authentication(session.address(), username, password)
            ));
        }
        self.inner.authenticate(username, password, session)
    }

    fn is_authenticated(&self) -> bool {
        self.inner.is_authenticated()
    }

    fn logger(&self) -> Option<&Logger> {
        Some(&self.logger)
    }

    fn colors_enabled(&self) -> bool {
        self.inner.colors_enabled()
    }
}
