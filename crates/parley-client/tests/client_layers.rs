//! Client stacks against a scripted server.

use std::{cell::RefCell, rc::Rc};

use parley_client::{BaseClient, Client, ClientLayer, ColoringClient, LoggingClient};
use parley_core::{
    Address, AddressSlot, BaseMessageFactory, ChatConfig, ChatError, EncryptionMethod, Endpoint,
    Message, Participant, Router, view,
};
use proptest::prelude::*;

/// Answers connections, accepts or rejects everything else, and records
/// what it received.
struct ScriptedServer {
    endpoint: Endpoint,
    accept: bool,
    received: RefCell<Vec<Message>>,
}

impl ScriptedServer {
    fn new(router: &Rc<Router>, accept: bool) -> Rc<Self> {
        let server = Rc::new(Self {
            endpoint: Endpoint::new(router, Rc::new(BaseMessageFactory)),
            accept,
            received: RefCell::new(Vec::new()),
        });
        router.register(&server);
        server
    }

    fn address(&self) -> Address {
        self.endpoint.address()
    }

    fn received(&self) -> Vec<Message> {
        self.received.borrow().clone()
    }
}

impl Participant for ScriptedServer {
    fn address_slot(&self) -> &AddressSlot {
        self.endpoint.address_slot()
    }

    fn handle_message(&self, message: Message) -> Result<bool, ChatError> {
        self.received.borrow_mut().push(message.clone());
        if let Message::Connection { sender } = message {
            self.endpoint.send(sender, Message::connection(self.address()))?;
            return Ok(true);
        }
        Ok(self.accept)
    }
}

fn config() -> ChatConfig {
    ChatConfig::default()
}

#[test]
fn handshake_records_server() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &config());

    assert_eq!(client.server_address(), None);
    assert!(client.connect(server.address()).unwrap());
    assert_eq!(client.server_address(), Some(server.address()));
    assert_eq!(server.received(), vec![Message::connection(client.address())]);
}

#[test]
fn first_server_handshake_wins() {
    let router = Router::new();
    let first = ScriptedServer::new(&router, true);
    let second = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &config());

    client.connect(first.address()).unwrap();
    client.connect(second.address()).unwrap();

    assert_eq!(client.server_address(), Some(first.address()));
    client.send("hi").unwrap();
    assert_eq!(first.received().last(), Some(&Message::text(client.address(), "hi")));
    assert_eq!(second.received().len(), 1);
}

#[test]
fn send_before_connect_fails() {
    let router = Router::new();
    let client = Client::from_config(&router, &config());
    assert!(matches!(client.send("hi"), Err(ChatError::NotConnected)));
}

#[test]
fn base_client_refuses_colored_and_authentication() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &config());
    client.connect(server.address()).unwrap();

    let colored = client.send_colored("hi", view::RED);
    let auth = client.authenticate("u", "p");

    assert!(matches!(colored, Err(ChatError::Configuration { operation: "colored text" })));
    assert!(matches!(auth, Err(ChatError::Configuration { operation: "authentication" })));
    assert_eq!(server.received().len(), 1);
}

#[test]
fn base_client_displays_plain_text() {
    let router = Router::new();
    let client = Client::from_config(&router, &config());

    router.send_message(client.address(), Message::text(9, "HelloWorld!")).unwrap();
    assert_eq!(client.view().last_displayed_message(), "[9] HelloWorld!");

    // Color is ignored without a coloring layer.
    router.send_message(client.address(), Message::colored_text(9, "again", view::RED)).unwrap();
    assert_eq!(client.view().last_displayed_message(), "[9] again");
}

#[test]
fn coloring_client_displays_colored_text() {
    let router = Router::new();
    let client = Client::from_config(&router, &ChatConfig { color: true, ..config() });

    router.send_message(client.address(), Message::colored_text(4, "hi", view::GREEN)).unwrap();

    assert_eq!(
        client.view().last_displayed_message(),
        format!("{}{}[4] hi{}", view::RESET, view::GREEN, view::RESET)
    );
}

#[test]
fn authentication_accepted_is_remembered() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &ChatConfig { authentication: true, ..config() });
    client.connect(server.address()).unwrap();

    assert!(client.authenticate("alice", "secret").unwrap());
    assert!(client.is_authenticated());

    assert!(client.authenticate("alice", "secret").unwrap());
    assert_eq!(server.received().len(), 2);
}

#[test]
fn authentication_rejected_stays_unauthenticated() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, false);
    let client = Client::from_config(&router, &ChatConfig { authentication: true, ..config() });
    client.connect(server.address()).unwrap();

    assert!(!client.authenticate("alice", "wrong").unwrap());
    assert!(!client.is_authenticated());
}

#[test]
fn authentication_from_server_confirms() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, false);
    let client = Client::from_config(&router, &ChatConfig { authentication: true, ..config() });
    client.connect(server.address()).unwrap();

    router
        .send_message(client.address(), Message::authentication(server.address(), "", ""))
        .unwrap();
    assert!(client.is_authenticated());
}

#[test]
fn authentication_from_stranger_is_rejected() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &ChatConfig { authentication: true, ..config() });
    client.connect(server.address()).unwrap();

    let result = router.send_message(client.address(), Message::authentication(77, "", ""));

    assert!(matches!(result, Err(ChatError::UnexpectedMessage { .. })));
    assert!(!client.is_authenticated());
}

#[test]
fn encrypting_client_decrypts_inbound() {
    let router = Router::new();
    let client = Client::from_config(&router, &ChatConfig {
        encryption: Some(EncryptionMethod::Rot13),
        ..config()
    });

    router.send_message(client.address(), Message::text(2, "UryybJbeyq!")).unwrap();
    assert_eq!(client.view().last_displayed_message(), "[2] HelloWorld!");
}

#[test]
fn encrypting_client_encrypts_outbound() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &ChatConfig {
        encryption: Some(EncryptionMethod::Reverse),
        ..config()
    });
    client.connect(server.address()).unwrap();

    client.send("abc").unwrap();
    assert_eq!(server.received().last(), Some(&Message::text(client.address(), "cba")));
}

#[test]
fn logging_client_records_traffic() {
    let router = Router::new();
    let server = ScriptedServer::new(&router, true);
    let client = Client::from_config(&router, &ChatConfig {
        logging: true,
        authentication: true,
        ..config()
    });
    let me = client.address();
    client.connect(server.address()).unwrap();

    let entries = client.logger().map(|l| l.entries()).unwrap_or_default();
    assert_eq!(entries[0], format!("Connecting to server {}", server.address()));
    let expected = format!("Received message from sender {}", server.address());
    assert_eq!(client.last_logged_message(), expected);

    client.send("hello").unwrap();
    assert_eq!(client.last_logged_message(), format!("Sending message: [{me}] hello"));

    client.authenticate("alice", "secret").unwrap();
    let line = client.last_logged_message();
    assert!(line.starts_with(&format!("Sending authentication request: [{me}] u=alice")));
    assert!(!line.contains("secret"));

    // A repeat request is answered locally and not logged again.
    let before = client.logger().map(|l| l.entries().len());
    client.authenticate("alice", "secret").unwrap();
    assert_eq!(client.logger().map(|l| l.entries().len()), before);
}

#[test]
fn coloring_wrapped_around_logging_still_logs_colored_arrivals() {
    let router = Router::new();
    let layer = ColoringClient::new(LoggingClient::new(BaseClient));
    let client = Client::new(&router, Rc::new(BaseMessageFactory), layer);
    assert!(client.layer().colors_enabled());

    router.send_message(client.address(), Message::colored_text(4, "hi", view::GREEN)).unwrap();

    assert_eq!(client.last_logged_message(), "Received message from sender 4");
    assert_eq!(
        client.view().last_displayed_message(),
        format!("{}{}[4] hi{}", view::RESET, view::GREEN, view::RESET)
    );
}

#[test]
fn client_without_logging_has_empty_log() {
    let router = Router::new();
    let client = Client::from_config(&router, &config());
    assert!(client.logger().is_none());
    assert_eq!(client.last_logged_message(), "");
}

#[test]
fn hand_built_stack_matches_base() {
    let router = Router::new();
    let client = Client::new(&router, Rc::new(BaseMessageFactory), BaseClient);
    assert!(!client.layer().is_authenticated());

    router.send_message(client.address(), Message::text(1, "x")).unwrap();
    assert_eq!(client.view().history(), vec!["[1] x".to_string()]);
}

proptest! {
    #[test]
    fn display_preserves_arrival_order(
        bodies in prop::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..16)
    ) {
        let router = Router::new();
        let client = Client::from_config(&router, &config());

        for body in &bodies {
            router.send_message(client.address(), Message::text(5, body.clone())).unwrap();
        }

        let expected: Vec<String> = bodies.iter().map(|b| format!("[5] {b}")).collect();
        prop_assert_eq!(client.view().history(), expected);
    }
}
