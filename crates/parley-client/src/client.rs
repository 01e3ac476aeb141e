//! Client participant and session state.

use std::{cell::Cell, rc::Rc};

use parley_core::{
    Address, AddressSlot, ChatConfig, ChatError, Endpoint, Logger, Message, MessageFactory,
    Participant, Router, View, factory_for,
};

use crate::{ClientLayer, client_stack};

/// State shared by every layer of one client.
///
/// Layers stay stateless with respect to the network: the address, the
/// router handle, the display and the server handshake all live here.
pub struct ClientSession {
    endpoint: Endpoint,
    view: View,
    server: Cell<Option<Address>>,
    colors: bool,
}

impl ClientSession {
    fn new(endpoint: Endpoint, colors: bool) -> Self {
        Self { endpoint, view: View::new(), server: Cell::new(None), colors }
    }

    /// Own address.
    pub fn address(&self) -> Address {
        self.endpoint.address()
    }

    /// Outbound factory chain.
    pub fn factory(&self) -> &dyn MessageFactory {
        self.endpoint.factory()
    }

    /// Display collaborator.
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Server address learned from the handshake.
    pub fn server(&self) -> Option<Address> {
        self.server.get()
    }

    /// Whether colored text is displayed in color.
    pub const fn colors_enabled(&self) -> bool {
        self.colors
    }

    /// Record the server address. The first recorded address wins; returns
    /// `false` if a different server was already recorded.
    pub fn record_server(&self, server: Address) -> bool {
        match self.server.get() {
            None => {
                self.server.set(Some(server));
                true
            },
            Some(known) => known == server,
        }
    }

    /// Send a message to an explicit receiver.
    pub fn send_to(&self, receiver: Address, message: Message) -> Result<bool, ChatError> {
        self.endpoint.send(receiver, message)
    }

    /// Send a message to the recorded server.
    pub fn dispatch(&self, message: Message) -> Result<bool, ChatError> {
        let server = self.server().ok_or(ChatError::NotConnected)?;
        self.endpoint.send(server, message)
    }
}

/// A chat client registered on a [`Router`].
pub struct Client<L> {
    layer: L,
    session: ClientSession,
}

impl<L: ClientLayer + 'static> Client<L> {
    /// Create and register a client.
    pub fn new(router: &Rc<Router>, factory: Rc<dyn MessageFactory>, layer: L) -> Rc<Self> {
        let session = ClientSession::new(Endpoint::new(router, factory), layer.colors_enabled());
        let client = Rc::new(Self { layer, session });
        router.register(&client);
        client
    }
}

impl Client<Box<dyn ClientLayer>> {
    /// Create and register a client whose stacks follow `config`.
    pub fn from_config(router: &Rc<Router>, config: &ChatConfig) -> Rc<Self> {
        Self::new(router, factory_for(config), client_stack(config))
    }
}

impl<L: ClientLayer> Client<L> {
    /// Own address.
    pub fn address(&self) -> Address {
        self.session.address()
    }

    /// Outermost layer of the stack.
    pub const fn layer(&self) -> &L {
        &self.layer
    }

    /// Display collaborator.
    pub const fn view(&self) -> &View {
        self.session.view()
    }

    /// Logger of the logging layer, if the stack has one.
    pub fn logger(&self) -> Option<&Logger> {
        self.layer.logger()
    }

    /// Last logged line, or `""` without a logging layer.
    pub fn last_logged_message(&self) -> String {
        self.logger().map(Logger::last_logged_message).unwrap_or_default()
    }

    /// Server address learned from the handshake.
    pub fn server_address(&self) -> Option<Address> {
        self.session.server()
    }

    /// Whether an authenticating layer has been accepted by the server.
    pub fn is_authenticated(&self) -> bool {
        self.layer.is_authenticated()
    }

    /// Announce this client to `server`.
    pub fn connect(&self, server: Address) -> Result<bool, ChatError> {
        self.layer.connect(server, &self.session)
    }

    /// Send uncolored text to the server. Returns whether the server
    /// accepted it.
    pub fn send(&self, body: &str) -> Result<bool, ChatError> {
        self.layer.send(body, &self.session)
    }

    /// Send colored text. Fails with a configuration error unless both the
    /// client stack and its factory chain include coloring.
    pub fn send_colored(&self, body: &str, color: &str) -> Result<bool, ChatError> {
        self.layer.send_colored(body, color, &self.session)
    }

    /// Submit credentials. Fails with a configuration error unless the
    /// stack includes authentication.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<bool, ChatError> {
        self.layer.authenticate(username, password, &self.session)
    }
}

impl<L: ClientLayer> Participant for Client<L> {
    fn address_slot(&self) -> &AddressSlot {
        self.session.endpoint.address_slot()
    }

    fn handle_message(&self, message: Message) -> Result<bool, ChatError> {
        self.layer.handle(message, &self.session)
    }
}

#[cfg(test)]
mod tests {
    use parley_core::BaseMessageFactory;

    use super::*;

    fn session() -> (Rc<Router>, ClientSession) {
        let router = Router::new();
        let endpoint = Endpoint::new(&router, Rc::new(BaseMessageFactory));
        let session = ClientSession::new(endpoint, false);
        (router, session)
    }

    #[test]
    fn first_server_wins() {
        let (_router, session) = session();

        assert!(session.record_server(3));
        assert!(!session.record_server(7));
        assert!(session.record_server(3));
        assert_eq!(session.server(), Some(3));
    }

    #[test]
    fn dispatch_requires_handshake() {
        let (_router, session) = session();
        let result = session.dispatch(Message::text(0, "hi"));
        assert!(matches!(result, Err(ChatError::NotConnected)));
    }
}
