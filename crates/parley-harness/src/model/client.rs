//! Model client state.

use super::operation::ClientId;

/// Model client.
///
/// Tracks the handshake, the authentication flag and every displayed line.
#[derive(Debug, Clone)]
pub struct ModelClient {
    id: ClientId,
    connected: bool,
    authenticated: bool,
    display: Vec<String>,
}

impl ModelClient {
    /// Create a client that has not connected yet.
    pub fn new(id: ClientId) -> Self {
        Self { id, connected: false, authenticated: false, display: Vec::new() }
    }

    /// Client identifier.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Whether the handshake completed.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Whether the server accepted this client's credentials.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Displayed lines, oldest first.
    pub fn display(&self) -> &[String] {
        &self.display
    }

    pub(super) fn connect(&mut self) {
        self.connected = true;
    }

    pub(super) fn authenticate(&mut self) {
        self.authenticated = true;
    }

    pub(super) fn show(&mut self, line: String) {
        self.display.push(line);
    }
}
