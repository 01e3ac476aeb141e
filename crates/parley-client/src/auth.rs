//! Authenticating client layer.

use std::cell::Cell;

use parley_core::{Address, ChatError, Logger, Message};

use crate::{ClientLayer, ClientSession};

/// Submits credentials and remembers whether the server accepted them.
///
/// The client counts as authenticated once the server accepts the request.
/// Further calls to [`authenticate`](ClientLayer::authenticate) are answered
/// locally without touching the network.
pub struct AuthenticatingClient<L> {
    inner: L,
    authenticated: Cell<bool>,
}

impl<L: ClientLayer> AuthenticatingClient<L> {
    /// Wrap `inner`.
    pub const fn new(inner: L) -> Self {
        Self { inner, authenticated: Cell::new(false) }
    }
}

impl<L: ClientLayer> ClientLayer for AuthenticatingClient<L> {
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError> {
        match message {
            Message::Authentication { sender, .. } if session.server() == Some(sender) => {
                self.authenticated.set(true);
                Ok(true)
            },
            Message::Authentication { sender, .. } => {
                tracing::warn!(
                    sender,
                    server = ?session.server(),
                    "authentication from non-server"
                );
                Err(ChatError::UnexpectedMessage {
                    layer: "authenticating client",
                    kind: message.kind(),
                })
            },
            _ => self.inner.handle(message, session),
        }
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
        if self.authenticated.get() {
            tracing::debug!(address = session.address(), "already authenticated");
            return Ok(true);
        }

        let message =
            session.factory().authentication_message(session.address(), username, password)?;
        let accepted = session.dispatch(message)?;
        if accepted {
            self.authenticated.set(true);
        }
        Ok(accepted)
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated.get()
    }

    fn logger(&self) -> Option<&Logger> {
        self.inner.logger()
    }

    fn colors_enabled(&self) -> bool {
        self.inner.colors_enabled()
    }
}
