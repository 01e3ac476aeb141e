//! Operations for model-based testing.
//!
//! Operations represent every action a client can take. They are generated
//! randomly and applied to both the model and the real participants.

use arbitrary::Arbitrary;
use parley_core::view;

/// Client identifier (0-indexed, not a router address).
pub type ClientId = u8;

/// Accounts known to the server, plus one wrong password.
///
/// [`Operation::Authenticate`] picks an entry by index modulo the length, so
/// roughly a third of attempts fail.
pub const ACCOUNTS: [(&str, &str); 3] =
    [("user1", "password"), ("user2", "securePassword"), ("user2", "wrong")];

/// Number of leading [`ACCOUNTS`] entries the server accepts.
pub const VALID_ACCOUNTS: usize = 2;

const COLORS: [&str; 5] = [view::BLACK, view::RED, view::GREEN, view::YELLOW, view::BLUE];

/// Operations that can be applied to the system.
#[derive(Debug, Clone, Arbitrary)]
pub enum Operation {
    /// Client announces itself to the server.
    Connect {
        /// Client performing the operation.
        client_id: ClientId,
    },

    /// Client submits credentials.
    Authenticate {
        /// Client performing the operation.
        client_id: ClientId,
        /// Index into [`ACCOUNTS`].
        account: u8,
    },

    /// Client sends uncolored text.
    Send {
        /// Client sending the message.
        client_id: ClientId,
        /// Message content.
        content: SmallMessage,
    },

    /// Client sends colored text.
    SendColored {
        /// Client sending the message.
        client_id: ClientId,
        /// Message content.
        content: SmallMessage,
        /// Color seed, mapped onto the view palette.
        color: u8,
    },
}

impl Operation {
    /// Client performing the operation.
    pub const fn client_id(&self) -> ClientId {
        match self {
            Self::Connect { client_id }
            | Self::Authenticate { client_id, .. }
            | Self::Send { client_id, .. }
            | Self::SendColored { client_id, .. } => *client_id,
        }
    }

    /// Same operation performed by `client_id`.
    #[must_use]
    pub fn with_client(self, client_id: ClientId) -> Self {
        match self {
            Self::Connect { .. } => Self::Connect { client_id },
            Self::Authenticate { account, .. } => Self::Authenticate { client_id, account },
            Self::Send { content, .. } => Self::Send { client_id, content },
            Self::SendColored { content, color, .. } => {
                Self::SendColored { client_id, content, color }
            },
        }
    }
}

/// Credentials selected by an `account` index.
pub fn account(index: u8) -> (&'static str, &'static str) {
    ACCOUNTS[usize::from(index) % ACCOUNTS.len()]
}

/// Whether the credentials selected by `index` are accepted.
pub fn account_is_valid(index: u8) -> bool {
    usize::from(index) % ACCOUNTS.len() < VALID_ACCOUNTS
}

/// ANSI color selected by a color seed.
pub fn color(seed: u8) -> &'static str {
    COLORS[usize::from(seed) % COLORS.len()]
}

/// Small message content for testing.
///
/// Compact representation that expands deterministically into text, so
/// failing cases stay short.
#[derive(Debug, Clone, Arbitrary)]
pub struct SmallMessage {
    /// Content seed.
    pub seed: u8,
    /// Length hint (0-3 maps to empty/short/medium/long).
    pub size_class: u8,
}

impl SmallMessage {
    /// Expand to message text.
    ///
    /// Mixes letters of both cases with digits and punctuation so every
    /// branch of both encryption methods is exercised.
    pub fn to_text(&self) -> String {
        const ALPHABET: &[u8] = b"abcXYZ019 !?mnoPQR";

        let len = match self.size_class % 4 {
            0 => 0,
            1 => 4,
            2 => 16,
            _ => 48,
        };

        (0..len)
            .map(|i| {
                let index = usize::from(self.seed.wrapping_add(i)) % ALPHABET.len();
                char::from(ALPHABET[index])
            })
            .collect()
    }
}

/// Result of applying an operation.
///
/// Used to compare model and real system behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    /// The server accepted the message.
    Accepted,

    /// The server rejected the message and answered in-band.
    Rejected,

    /// The operation failed before or during delivery.
    Error(OperationError),
}

/// Errors that can occur during operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    /// Client has not completed the server handshake.
    NotConnected,

    /// Client's stacks do not support the operation.
    Configuration,

    /// Invalid client ID.
    InvalidClient,

    /// Any other failure. The model never produces this.
    Fatal,
}

impl OperationResult {
    /// Check if the operation was accepted.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Check if the operation failed.
    pub fn is_err(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_message_lengths() {
        let lengths: Vec<_> = (0..4)
            .map(|size_class| SmallMessage { seed: 7, size_class }.to_text().len())
            .collect();
        assert_eq!(lengths, vec![0, 4, 16, 48]);
    }

    #[test]
    fn small_message_is_deterministic() {
        let msg = SmallMessage { seed: 200, size_class: 2 };
        assert_eq!(msg.to_text(), msg.to_text());
    }

    #[test]
    fn account_selection_wraps() {
        assert_eq!(account(0), ("user1", "password"));
        assert_eq!(account(4), ("user2", "securePassword"));
        assert!(account_is_valid(1));
        assert!(!account_is_valid(5));
    }

    #[test]
    fn with_client_keeps_payload() {
        let op = Operation::SendColored {
            client_id: 9,
            content: SmallMessage { seed: 1, size_class: 1 },
            color: 3,
        };
        let moved = op.with_client(2);
        assert_eq!(moved.client_id(), 2);
        assert!(matches!(moved, Operation::SendColored { color: 3, .. }));
    }
}
