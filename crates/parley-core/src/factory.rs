//! Outbound message factory chain.
//!
//! Messages are constructed through a stack of factory layers before they
//! reach the router. Enabling layers (coloring, authentication) grant a
//! feature to the layers beneath them; transforming layers (encryption)
//! rewrite whatever the inner chain produced.
//!
//! ```text
//! EncryptingMessageFactory       encrypt(inner.build(msg, granted))
//!   AuthenticatingMessageFactory   inner.build(msg, granted | AUTHENTICATION)
//!     ColoringMessageFactory         inner.build(msg, granted | COLOR)
//!       BaseMessageFactory             msg if required ⊆ granted
//! ```
//!
//! Because grants flow inward and transforms apply on the way out, an
//! enabling layer placed outside the encrypting layer still produces
//! encrypted messages.

use std::rc::Rc;

use parley_proto::{Address, EncryptionMethod, Features, Message, MessageKind};

use crate::{ChatConfig, ChatError};

/// Constructs outbound messages.
pub trait MessageFactory {
    /// Build `message`, with `granted` holding the features enabled by outer
    /// layers.
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError>;

    /// Build a connection announcement.
    fn connection_message(&self, sender: Address) -> Result<Message, ChatError> {
        self.build(Message::connection(sender), Features::empty())
    }

    /// Build an uncolored text message.
    fn text_message(&self, sender: Address, body: &str) -> Result<Message, ChatError> {
        self.build(Message::text(sender, body), Features::empty())
    }

    /// Build a colored text message. Requires a coloring layer.
    fn colored_text_message(
        &self,
        sender: Address,
        body: &str,
        color: &str,
    ) -> Result<Message, ChatError> {
        self.build(Message::colored_text(sender, body, color), Features::empty())
    }

    /// Build a credential submission. Requires an authenticating layer.
    fn authentication_message(
        &self,
        sender: Address,
        username: &str,
        password: &str,
    ) -> Result<Message, ChatError> {
        self.build(Message::authentication(sender, username, password), Features::empty())
    }

    /// Re-build a message this participant did not originate, e.g. a server
    /// forwarding a broadcast. Transforms apply; feature gating does not.
    fn relay(&self, message: Message) -> Result<Message, ChatError> {
        self.build(message, Features::all())
    }
}

impl<F: MessageFactory + ?Sized> MessageFactory for Box<F> {
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError> {
        (**self).build(message, granted)
    }
}

impl<F: MessageFactory + ?Sized> MessageFactory for Rc<F> {
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError> {
        (**self).build(message, granted)
    }
}

/// Innermost factory. Refuses messages whose features were not granted.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseMessageFactory;

impl MessageFactory for BaseMessageFactory {
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError> {
        let required = message.required_features();
        if !granted.contains(required) {
            let operation = match message.kind() {
                MessageKind::Authentication => "authentication",
                MessageKind::Text => "colored text",
                MessageKind::Connection => "connection",
            };
            tracing::debug!(operation, ?required, ?granted, "refusing to build message");
            return Err(ChatError::Configuration { operation });
        }
        Ok(message)
    }
}

/// Encrypts every message the inner chain builds.
#[derive(Debug, Clone)]
pub struct EncryptingMessageFactory<F> {
    inner: F,
    method: EncryptionMethod,
}

impl<F: MessageFactory> EncryptingMessageFactory<F> {
    /// Wrap `inner`, encrypting its output with `method`.
    pub const fn new(inner: F, method: EncryptionMethod) -> Self {
        Self { inner, method }
    }
}

impl<F: MessageFactory> MessageFactory for EncryptingMessageFactory<F> {
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError> {
        let built = self.inner.build(message, granted | Features::ENCRYPTION)?;
        Ok(built.encrypt(self.method))
    }
}

/// Enables credential submission.
#[derive(Debug, Clone)]
pub struct AuthenticatingMessageFactory<F> {
    inner: F,
}

impl<F: MessageFactory> AuthenticatingMessageFactory<F> {
    /// Wrap `inner`, granting it [`Features::AUTHENTICATION`].
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: MessageFactory> MessageFactory for AuthenticatingMessageFactory<F> {
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError> {
        self.inner.build(message, granted | Features::AUTHENTICATION)
    }
}

/// Enables colored text.
#[derive(Debug, Clone)]
pub struct ColoringMessageFactory<F> {
    inner: F,
}

impl<F: MessageFactory> ColoringMessageFactory<F> {
    /// Wrap `inner`, granting it [`Features::COLOR`].
    pub const fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F: MessageFactory> MessageFactory for ColoringMessageFactory<F> {
    fn build(&self, message: Message, granted: Features) -> Result<Message, ChatError> {
        self.inner.build(message, granted | Features::COLOR)
    }
}

/// Assemble the factory chain for `config` in canonical order: encryption
/// outermost, then authentication, then coloring.
pub fn factory_for(config: &ChatConfig) -> Rc<dyn MessageFactory> {
    let mut factory: Box<dyn MessageFactory> = Box::new(BaseMessageFactory);

    if config.color {
        factory = Box::new(ColoringMessageFactory::new(factory));
    }
    if config.authentication {
        factory = Box::new(AuthenticatingMessageFactory::new(factory));
    }
    if let Some(method) = config.encryption {
        factory = Box::new(EncryptingMessageFactory::new(factory, method));
    }

    Rc::from(factory)
}
