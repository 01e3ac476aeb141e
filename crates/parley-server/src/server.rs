//! Server participant.

use std::rc::Rc;

use parley_core::{
    Address, AddressSlot, ChatConfig, ChatError, Endpoint, Logger, Message, MessageFactory,
    Participant, Router, factory_for,
};

use crate::{
    CredentialStore, ServerLayer,
    executor::{BroadcastPolicy, execute_actions},
    server_stack,
};

/// A chat server registered on a [`Router`].
///
/// Owns the layer stack and the endpoint. Inbound messages pass through the
/// stack; the resulting actions are executed afterwards, so replies and
/// broadcasts re-enter the router only once every layer has finished.
pub struct Server<L> {
    layer: L,
    endpoint: Endpoint,
    policy: BroadcastPolicy,
}

impl<L: ServerLayer + 'static> Server<L> {
    /// Create and register a server.
    pub fn new(router: &Rc<Router>, factory: Rc<dyn MessageFactory>, layer: L) -> Rc<Self> {
        Self::with_policy(router, factory, layer, BroadcastPolicy::default())
    }

    /// Create and register a server with an explicit broadcast policy.
    pub fn with_policy(
        router: &Rc<Router>,
        factory: Rc<dyn MessageFactory>,
        layer: L,
        policy: BroadcastPolicy,
    ) -> Rc<Self> {
        let server = Rc::new(Self { layer, endpoint: Endpoint::new(router, factory), policy });
        router.register(&server);
        server
    }
}

impl Server<Box<dyn ServerLayer>> {
    /// Create and register a server whose stacks follow `config`.
    pub fn from_config(
        router: &Rc<Router>,
        config: &ChatConfig,
        credentials: CredentialStore,
    ) -> Rc<Self> {
        Self::new(router, factory_for(config), server_stack(config, credentials))
    }
}

impl<L: ServerLayer> Server<L> {
    /// Own address.
    pub fn address(&self) -> Address {
        self.endpoint.address()
    }

    /// Outermost layer of the stack.
    pub const fn layer(&self) -> &L {
        &self.layer
    }

    /// Logger of the logging layer, if the stack has one.
    pub fn logger(&self) -> Option<&Logger> {
        self.layer.logger()
    }

    /// Last logged line, or `""` without a logging layer.
    pub fn last_logged_message(&self) -> String {
        self.logger().map(Logger::last_logged_message).unwrap_or_default()
    }
}

impl<L: ServerLayer> Participant for Server<L> {
    fn address_slot(&self) -> &AddressSlot {
        self.endpoint.address_slot()
    }

    fn handle_message(&self, message: Message) -> Result<bool, ChatError> {
        let outcome = self.layer.process(message, &self.endpoint)?;
        execute_actions(&self.endpoint, outcome.actions, self.policy)?;
        Ok(outcome.accepted)
    }
}
