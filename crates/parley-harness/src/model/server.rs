//! Model server state.

use std::collections::BTreeSet;

use super::operation::ClientId;

/// Model server.
///
/// Connected and authenticated clients as plain sets, plus the outcome log
/// a logging layer would record.
#[derive(Debug, Clone, Default)]
pub struct ModelServer {
    members: BTreeSet<ClientId>,
    authenticated: BTreeSet<ClientId>,
    log: Vec<String>,
}

impl ModelServer {
    /// Create a server with no members.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `client` has connected.
    pub fn is_member(&self, client: ClientId) -> bool {
        self.members.contains(&client)
    }

    /// Whether `client` has authenticated.
    pub fn is_authenticated(&self, client: ClientId) -> bool {
        self.authenticated.contains(&client)
    }

    /// Connected clients in ascending order.
    pub fn members(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.members.iter().copied()
    }

    /// Outcome log, oldest first.
    pub fn log(&self) -> &[String] {
        &self.log
    }

    pub(super) fn connect(&mut self, client: ClientId) {
        self.members.insert(client);
    }

    pub(super) fn authenticate(&mut self, client: ClientId) {
        self.authenticated.insert(client);
    }

    pub(super) fn record(&mut self, line: String) {
        self.log.push(line);
    }
}
