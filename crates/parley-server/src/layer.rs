//! Server layer capability and the base server.

use std::{cell::RefCell, collections::BTreeSet};

use parley_core::{Address, ChatError, Endpoint, Logger, Message};

use crate::action::{ServerAction, ServerOutcome, log};

/// One layer of a server stack.
///
/// Decorators hold the next inner layer and forward whatever they do not
/// handle themselves. The innermost layer is a [`BaseServer`].
pub trait ServerLayer {
    /// Process an inbound message.
    ///
    /// `endpoint` belongs to the owning [`Server`](crate::Server) and gives
    /// access to its address and outbound factory chain.
    fn process(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError>;

    /// Logger of the outermost logging layer at or below this one.
    fn logger(&self) -> Option<&Logger> {
        None
    }
}

impl<L: ServerLayer + ?Sized> ServerLayer for Box<L> {
    fn process(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        (**self).process(message, endpoint)
    }

    fn logger(&self) -> Option<&Logger> {
        (**self).logger()
    }
}

/// Core chat semantics: track members, answer handshakes, broadcast text.
///
/// The base server admits every connecting client. Authentication is the
/// concern of [`AuthenticatingServer`](crate::AuthenticatingServer), which
/// narrows broadcasts to the clients it has authenticated.
#[derive(Debug, Default)]
pub struct BaseServer {
    members: RefCell<BTreeSet<Address>>,
}

impl BaseServer {
    /// Create a server with no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Addresses of every connected client.
    pub fn members(&self) -> Vec<Address> {
        self.members.borrow().iter().copied().collect()
    }

    fn connect(&self, sender: Address, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        self.members.borrow_mut().insert(sender);

        let reply = endpoint.factory().connection_message(endpoint.address())?;
        Ok(ServerOutcome::accepted(vec![
            log(format!("New client: {sender}")),
            ServerAction::Send { to: sender, message: reply },
        ]))
    }

    fn broadcast(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        let sender = message.sender();
        let recipients = self.members();
        let message = endpoint.factory().relay(message)?;

        Ok(ServerOutcome::accepted(vec![
            log(format!("Broadcasting message from sender {sender}")),
            ServerAction::Broadcast { recipients, message },
        ]))
    }
}

impl ServerLayer for BaseServer {
    fn process(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        match message {
            Message::Connection { sender } => self.connect(sender, endpoint),
            Message::Text { .. } => self.broadcast(message, endpoint),
            Message::Authentication { .. } => {
                Err(ChatError::UnexpectedMessage { layer: "base server", kind: message.kind() })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use parley_core::{BaseMessageFactory, MessageKind, Router};

    use super::*;

    fn endpoint(router: &Rc<Router>, address: Address) -> Endpoint {
        let endpoint = Endpoint::new(router, Rc::new(BaseMessageFactory));
        endpoint.address_slot().bind(address);
        endpoint
    }

    #[test]
    fn connection_admits_and_replies() {
        let router = Router::new();
        let endpoint = endpoint(&router, 0);
        let server = BaseServer::new();

        let outcome = server.process(Message::connection(4), &endpoint).unwrap();

        assert!(outcome.accepted);
        assert_eq!(server.members(), vec![4]);
        assert_eq!(outcome.actions, vec![
            log("New client: 4"),
            ServerAction::Send { to: 4, message: Message::connection(0) },
        ]);
    }

    #[test]
    fn text_broadcasts_to_all_members_including_sender() {
        let router = Router::new();
        let endpoint = endpoint(&router, 0);
        let server = BaseServer::new();
        server.process(Message::connection(1), &endpoint).unwrap();
        server.process(Message::connection(2), &endpoint).unwrap();

        let outcome = server.process(Message::text(1, "hi"), &endpoint).unwrap();

        assert!(outcome.accepted);
        assert_eq!(outcome.actions, vec![
            log("Broadcasting message from sender 1"),
            ServerAction::Broadcast { recipients: vec![1, 2], message: Message::text(1, "hi") },
        ]);
    }

    #[test]
    fn colored_text_is_relayed_without_coloring_layer() {
        let router = Router::new();
        let endpoint = endpoint(&router, 0);
        let server = BaseServer::new();
        server.process(Message::connection(1), &endpoint).unwrap();

        let outcome = server.process(Message::colored_text(1, "hi", "red"), &endpoint).unwrap();

        assert!(outcome.accepted);
    }

    #[test]
    fn authentication_is_a_contract_violation() {
        let router = Router::new();
        let endpoint = endpoint(&router, 0);
        let result = BaseServer::new().process(Message::authentication(1, "u", "p"), &endpoint);

        assert!(matches!(
            result,
            Err(ChatError::UnexpectedMessage { kind: MessageKind::Authentication, .. })
        ));
    }
}
