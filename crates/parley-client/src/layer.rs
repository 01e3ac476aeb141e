//! Client layer capability and the base client.

use parley_core::{Address, ChatError, Logger, Message};

use crate::ClientSession;

/// One layer of a client stack.
///
/// Inbound messages enter through [`handle`](Self::handle); outbound
/// operations enter through the remaining methods. Decorators forward what
/// they do not handle to the next inner layer.
pub trait ClientLayer {
    /// Handle an inbound message.
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError>;

    /// Announce the client to `server`.
    fn connect(&self, server: Address, session: &ClientSession) -> Result<bool, ChatError>;

    /// Send uncolored text to the recorded server.
    fn send(&self, body: &str, session: &ClientSession) -> Result<bool, ChatError>;

    /// Send colored text to the recorded server.
    fn send_colored(
        &self,
        body: &str,
        color: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError>;

    /// Submit credentials to the recorded server.
    fn authenticate(
        &self,
        username: &str,
        password: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError>;

    /// Whether the server has accepted this client's credentials.
    fn is_authenticated(&self) -> bool {
        false
    }

    /// Logger of the outermost logging layer at or below this one.
    fn logger(&self) -> Option<&Logger> {
        None
    }

    /// Whether a coloring layer sits at or below this one.
    fn colors_enabled(&self) -> bool {
        false
    }
}

impl<L: ClientLayer + ?Sized> ClientLayer for Box<L> {
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError> {
        (**self).handle(message, session)
    }

    fn connect(&self, server: Address, session: &ClientSession) -> Result<bool, ChatError> {
        (**self).connect(server, session)
    }

    fn send(&self, body: &str, session: &ClientSession) -> Result<bool, ChatError> {
        (**self).send(body, session)
    }

    fn send_colored(
        &self,
        body: &str,
        color: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        (**self).send_colored(body, color, session)
    }

    fn authenticate(
        &self,
        username: &str,
        password: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        (**self).authenticate(username, password, session)
    }

    fn is_authenticated(&self) -> bool {
        (**self).is_authenticated()
    }

    fn logger(&self) -> Option<&Logger> {
        (**self).logger()
    }

    fn colors_enabled(&self) -> bool {
        (**self).colors_enabled()
    }
}

/// Core client semantics: handshake and display.
///
/// Colored text is shown in color only when the stack contains a
/// [`ColoringClient`](crate::ColoringClient), which also unlocks colored
/// sends. Authentication needs [`ColoringClient`](crate::ColoringClient) and
/// [`AuthenticatingClient`](crate::AuthenticatingClient).
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseClient;

impl ClientLayer for BaseClient {
    fn handle(&self, message: Message, session: &ClientSession) -> Result<bool, ChatError> {
        match message {
            Message::Connection { sender } => {
                if !session.record_server(sender) {
                    tracing::debug!(
                        sender,
                        known = ?session.server(),
                        "ignoring handshake from second server"
                    );
                }
                Ok(true)
            },
            Message::Text { sender, body, color: Some(color) } if session.colors_enabled() => {
                session.view().print_colored_message(sender, &body, &color);
                Ok(true)
            },
            Message::Text { sender, body, .. } => {
                session.view().print_message(sender, &body);
                Ok(true)
            },
            Message::Authentication { .. } => {
                Err(ChatError::UnexpectedMessage { layer: "base client", kind: message.kind() })
            },
        }
    }

    fn connect(&self, server: Address, session: &ClientSession) -> Result<bool, ChatError> {
        let message = session.factory().connection_message(session.address())?;
        session.send_to(server, message)
    }

    fn send(&self, body: &str, session: &ClientSession) -> Result<bool, ChatError> {
        let message = session.factory().text_message(session.address(), body)?;
        session.dispatch(message)
    }

    fn send_colored(
        &self,
        body: &str,
        color: &str,
        session: &ClientSession,
    ) -> Result<bool, ChatError> {
        if !session.colors_enabled() {
            return Err(ChatError::Configuration { operation: "colored text" });
        }
        let message = session.factory().colored_text_message(session.address(), body, color)?;
        session.dispatch(message)
    }

    fn authenticate(&self, _: &str, _: &str, _: &ClientSession) -> Result<bool, ChatError> {
        Err(ChatError::Configuration { operation: "authentication" })
    }
}
