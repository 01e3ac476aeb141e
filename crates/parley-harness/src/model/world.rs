//! Model world: one server and its clients.
//!
//! The world is the oracle against which real participants are verified.
//! Addresses follow registration order on a fresh router: the server is
//! registered first and gets address 0, client `i` gets address `i + 1`.

use parley_core::{ChatConfig, view};

use super::{
    client::ModelClient,
    operation::{
        ClientId, Operation, OperationError, OperationResult, SmallMessage, account_is_valid,
        color,
    },
    server::ModelServer,
};

/// Server address in the model.
const SERVER: u64 = 0;

/// Reply sent when credentials do not match.
const AUTHENTICATION_FAILED: &str = "Authentication failed.";

/// Reply sent when an unauthenticated client tries to chat.
const AUTHENTICATION_REQUIRED: &str = "You must authenticate before sending messages.";

/// Observable state for oracle comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservableState {
    /// Per-client displayed lines.
    pub displays: Vec<Vec<String>>,
    /// Per-client authentication flag.
    pub authenticated: Vec<bool>,
    /// Server log; empty unless logging is enabled.
    pub server_log: Vec<String>,
}

/// Model world - the reference implementation.
#[derive(Debug, Clone)]
pub struct ModelWorld {
    config: ChatConfig,
    clients: Vec<ModelClient>,
    server: ModelServer,
}

impl ModelWorld {
    /// Create a world of `num_clients` clients using `config` everywhere.
    pub fn new(config: ChatConfig, num_clients: usize) -> Self {
        let clients = (0..num_clients)
            .map(|i| ModelClient::new(ClientId::try_from(i).unwrap_or(ClientId::MAX)))
            .collect();
        Self { config, clients, server: ModelServer::new() }
    }

    /// Router address of client `id`.
    pub fn address(id: ClientId) -> u64 {
        u64::from(id) + 1
    }

    /// Number of clients in the world.
    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    /// Get a client by ID.
    pub fn client(&self, id: ClientId) -> Option<&ModelClient> {
        self.clients.get(usize::from(id))
    }

    /// Get the server.
    pub fn server(&self) -> &ModelServer {
        &self.server
    }

    /// Apply an operation and return the result the real system should
    /// report.
    pub fn apply(&mut self, op: &Operation) -> OperationResult {
        let id = op.client_id();
        if usize::from(id) >= self.clients.len() {
            return OperationResult::Error(OperationError::InvalidClient);
        }

        match op {
            Operation::Connect { .. } => self.apply_connect(id),
            Operation::Authenticate { account, .. } => self.apply_authenticate(id, *account),
            Operation::Send { content, .. } => self.apply_send(id, content, None),
            Operation::SendColored { content, color: seed, .. } => {
                if !self.config.color {
                    return OperationResult::Error(OperationError::Configuration);
                }
                self.apply_send(id, content, Some(color(*seed)))
            },
        }
    }

    /// Extract observable state for comparison.
    pub fn observable_state(&self) -> ObservableState {
        ObservableState {
            displays: self.clients.iter().map(|c| c.display().to_vec()).collect(),
            authenticated: self.clients.iter().map(ModelClient::is_authenticated).collect(),
            server_log: if self.config.logging { self.server.log().to_vec() } else { Vec::new() },
        }
    }

    fn apply_connect(&mut self, id: ClientId) -> OperationResult {
        self.server.connect(id);
        self.server.record(format!("New client: {}", Self::address(id)));
        self.clients[usize::from(id)].connect();
        OperationResult::Accepted
    }

    fn apply_authenticate(&mut self, id: ClientId, account: u8) -> OperationResult {
        if !self.config.authentication {
            return OperationResult::Error(OperationError::Configuration);
        }

        let client = &mut self.clients[usize::from(id)];
        if client.is_authenticated() {
            return OperationResult::Accepted;
        }
        if !client.is_connected() {
            return OperationResult::Error(OperationError::NotConnected);
        }

        let address = Self::address(id);
        if account_is_valid(account) {
            client.authenticate();
            self.server.authenticate(id);
            self.server.record(format!("Successfully authenticated client: {address}"));
            OperationResult::Accepted
        } else {
            client.show(format!("[{SERVER}] {AUTHENTICATION_FAILED}"));
            self.server.record(format!("Failed to authenticate client: {address}"));
            OperationResult::Rejected
        }
    }

    fn apply_send(
        &mut self,
        id: ClientId,
        content: &SmallMessage,
        color: Option<&str>,
    ) -> OperationResult {
        if !self.clients[usize::from(id)].is_connected() {
            return OperationResult::Error(OperationError::NotConnected);
        }

        let address = Self::address(id);
        if self.config.authentication && !self.server.is_authenticated(id) {
            self.clients[usize::from(id)].show(format!("[{SERVER}] {AUTHENTICATION_REQUIRED}"));
            self.server.record(format!("Rejected message from unauthenticated client: {address}"));
            return OperationResult::Rejected;
        }

        self.server.record(format!("Broadcasting message from sender {address}"));

        let text = content.to_text();
        let line = match color {
            Some(color) if self.config.color => {
                format!("{}{color}[{address}] {text}{}", view::RESET, view::RESET)
            },
            _ => format!("[{address}] {text}"),
        };

        let recipients: Vec<_> = self
            .server
            .members()
            .filter(|&member| !self.config.authentication || self.server.is_authenticated(member))
            .collect();
        for member in recipients {
            self.clients[usize::from(member)].show(line.clone());
        }

        OperationResult::Accepted
    }
}

#[cfg(test)]
mod tests {
    use parley_core::EncryptionMethod;

    use super::*;

    fn hello() -> SmallMessage {
        SmallMessage { seed: 0, size_class: 1 }
    }

    #[test]
    fn send_before_connect_fails() {
        let mut world = ModelWorld::new(ChatConfig::default(), 2);
        let result = world.apply(&Operation::Send { client_id: 0, content: hello() });
        assert_eq!(result, OperationResult::Error(OperationError::NotConnected));
    }

    #[test]
    fn broadcast_reaches_every_member() {
        let mut world = ModelWorld::new(ChatConfig::default(), 3);
        world.apply(&Operation::Connect { client_id: 0 });
        world.apply(&Operation::Connect { client_id: 1 });

        let result = world.apply(&Operation::Send { client_id: 0, content: hello() });

        assert!(result.is_accepted());
        let state = world.observable_state();
        assert_eq!(state.displays[0], state.displays[1]);
        assert!(state.displays[2].is_empty());
    }

    #[test]
    fn unauthenticated_sender_is_answered() {
        let config = ChatConfig { authentication: true, logging: true, ..ChatConfig::default() };
        let mut world = ModelWorld::new(config, 1);
        world.apply(&Operation::Connect { client_id: 0 });

        let result = world.apply(&Operation::Send { client_id: 0, content: hello() });

        assert_eq!(result, OperationResult::Rejected);
        let state = world.observable_state();
        assert_eq!(state.displays[0], vec![format!("[0] {AUTHENTICATION_REQUIRED}")]);
        assert_eq!(state.server_log.last().map(String::as_str), Some(
            "Rejected message from unauthenticated client: 1"
        ));
    }

    #[test]
    fn colored_send_needs_color() {
        let mut world = ModelWorld::new(ChatConfig::default(), 1);
        let op = Operation::SendColored { client_id: 0, content: hello(), color: 0 };
        let result = world.apply(&op);
        assert_eq!(result, OperationResult::Error(OperationError::Configuration));
    }

    #[test]
    fn log_hidden_without_logging() {
        let mut world = ModelWorld::new(ChatConfig::all(EncryptionMethod::Rot13), 1);
        world.apply(&Operation::Connect { client_id: 0 });
        assert_eq!(world.observable_state().server_log, vec!["New client: 1".to_string()]);

        let mut world = ModelWorld::new(ChatConfig::default(), 1);
        world.apply(&Operation::Connect { client_id: 0 });
        assert!(world.observable_state().server_log.is_empty());
    }
}
