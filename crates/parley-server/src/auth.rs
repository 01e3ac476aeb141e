//! Authenticating server layer.
//!
//! ## State Machine
//!
//! ```text
//! Unknown ──Connection──▶ Pending ──Authentication(match)──▶ Authenticated
//!                            │
//!                            └──Authentication(mismatch)──▶ Pending (reply: failed)
//! ```
//!
//! This layer is the single owner of authentication state. The base server
//! beneath it only knows who is connected; this layer decides who may speak
//! and who may hear.

use std::{
    cell::RefCell,
    collections::{BTreeSet, HashMap},
    fmt,
};

use parley_core::{Address, ChatError, Endpoint, Logger, Message};

use crate::{
    ServerLayer,
    action::{ServerAction, ServerOutcome, log},
};

/// Reply sent when credentials do not match.
pub const AUTHENTICATION_FAILED: &str = "Authentication failed.";

/// Reply sent when an unauthenticated client tries to chat.
pub const AUTHENTICATION_REQUIRED: &str = "You must authenticate before sending messages.";

/// Username to password map, fixed for the lifetime of a server.
#[derive(Clone, Default)]
pub struct CredentialStore {
    users: HashMap<String, String>,
}

impl CredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an account. Later entries replace earlier ones with the same name.
    #[must_use]
    pub fn with_user(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.users.insert(username.into(), password.into());
        self
    }

    /// Whether `username` exists and its password is `password`.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users.get(username).is_some_and(|expected| expected == password)
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store has no accounts.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<U: Into<String>, P: Into<String>> FromIterator<(U, P)> for CredentialStore {
    fn from_iter<I: IntoIterator<Item = (U, P)>>(iter: I) -> Self {
        Self { users: iter.into_iter().map(|(u, p)| (u.into(), p.into())).collect() }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.users.keys().collect();
        names.sort();
        f.debug_struct("CredentialStore").field("users", &names).finish_non_exhaustive()
    }
}

/// Where an address stands with the authenticating layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    /// Connected, credentials not yet accepted.
    Pending,
    /// Credentials accepted.
    Authenticated,
}

/// Disjoint pending and authenticated address sets.
#[derive(Debug, Default)]
pub struct AuthenticationState {
    pending: BTreeSet<Address>,
    authenticated: BTreeSet<Address>,
}

impl AuthenticationState {
    /// Status of `address`, `None` if it was never seen.
    pub fn status(&self, address: Address) -> Option<AuthStatus> {
        if self.authenticated.contains(&address) {
            Some(AuthStatus::Authenticated)
        } else if self.pending.contains(&address) {
            Some(AuthStatus::Pending)
        } else {
            None
        }
    }

    /// Whether `address` has been authenticated.
    pub fn is_authenticated(&self, address: Address) -> bool {
        self.authenticated.contains(&address)
    }

    /// Record a connection. Already authenticated addresses keep their status.
    fn connect(&mut self, address: Address) {
        if !self.authenticated.contains(&address) {
            self.pending.insert(address);
        }
    }

    /// Move `address` to the authenticated set.
    fn authenticate(&mut self, address: Address) {
        self.pending.remove(&address);
        self.authenticated.insert(address);
    }
}

/// Requires clients to authenticate before they can chat or receive chat.
///
/// - `Connection`: the sender becomes pending; forwarded.
/// - `Authentication`: checked against the credential store; never forwarded.
/// - `Text` from a client that is not authenticated: answered with
///   [`AUTHENTICATION_REQUIRED`] and rejected.
/// - Everything else is forwarded, and broadcasts coming back from inner
///   layers are narrowed to authenticated clients.
pub struct AuthenticatingServer<L> {
    inner: L,
    credentials: CredentialStore,
    state: RefCell<AuthenticationState>,
}

impl<L: ServerLayer> AuthenticatingServer<L> {
    /// Wrap `inner`, checking credentials against `credentials`.
    pub fn new(inner: L, credentials: CredentialStore) -> Self {
        Self { inner, credentials, state: RefCell::new(AuthenticationState::default()) }
    }

    /// Authentication status of `address`.
    pub fn status(&self, address: Address) -> Option<AuthStatus> {
        self.state.borrow().status(address)
    }

    fn authenticate(
        &self,
        sender: Address,
        username: &str,
        password: &str,
        endpoint: &Endpoint,
    ) -> Result<ServerOutcome, ChatError> {
        if self.credentials.verify(username, password) {
            self.state.borrow_mut().authenticate(sender);
            return Ok(ServerOutcome::accepted(vec![log(format!(
                "Successfully authenticated client: {sender}"
            ))]));
        }

        tracing::debug!(sender, "credential mismatch");
        let reply = endpoint.factory().text_message(endpoint.address(), AUTHENTICATION_FAILED)?;
        Ok(ServerOutcome::rejected(vec![
            log(format!("Failed to authenticate client: {sender}")),
            ServerAction::Send { to: sender, message: reply },
        ]))
    }

    fn reject_unauthenticated(
        &self,
        sender: Address,
        endpoint: &Endpoint,
    ) -> Result<ServerOutcome, ChatError> {
        let reply = endpoint.factory().text_message(endpoint.address(), AUTHENTICATION_REQUIRED)?;
        Ok(ServerOutcome::rejected(vec![
            log(format!("Rejected message from unauthenticated client: {sender}")),
            ServerAction::Send { to: sender, message: reply },
        ]))
    }

    fn forward(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        let mut outcome = self.inner.process(message, endpoint)?;
        let state = self.state.borrow();
        outcome.retain_recipients(|address| state.is_authenticated(address));
        Ok(outcome)
    }
}

impl<L: ServerLayer> ServerLayer for AuthenticatingServer<L> {
    fn process(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        match message {
            Message::Connection { sender } => {
                self.state.borrow_mut().connect(sender);
                self.forward(message, endpoint)
            },
            Message::Authentication { sender, ref username, ref password } => {
                self.authenticate(sender, username, password, endpoint)
            },
            Message::Text { sender, .. } => {
                if self.state.borrow().is_authenticated(sender) {
                    self.forward(message, endpoint)
                } else {
                    self.reject_unauthenticated(sender, endpoint)
                }
            },
        }
    }

    fn logger(&self) -> Option<&Logger> {
        self.inner.logger()
    }
}
