//! Actions returned by server layers.
//!
//! Layers never touch the router themselves. They describe what should
//! happen and the [`Server`](crate::Server) executes it once the whole chain
//! has returned, which lets outer layers inspect and rewrite the work of
//! inner ones.

use parley_core::{Address, Message};

/// Work requested by a server layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerAction {
    /// Deliver a message to a single participant.
    Send {
        /// Receiver address.
        to: Address,
        /// Fully built message.
        message: Message,
    },

    /// Deliver the same message to several participants, in order.
    Broadcast {
        /// Receiver addresses.
        recipients: Vec<Address>,
        /// Fully built message.
        message: Message,
    },

    /// Record a protocol event.
    Log {
        /// Human readable event line.
        message: String,
    },
}

/// Result of passing a message through a server layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOutcome {
    /// Whether the message was accepted.
    pub accepted: bool,
    /// Actions to execute, in order.
    pub actions: Vec<ServerAction>,
}

impl ServerOutcome {
    /// Accepted outcome.
    pub const fn accepted(actions: Vec<ServerAction>) -> Self {
        Self { accepted: true, actions }
    }

    /// Rejected outcome. Rejections are still answered in-band through
    /// `actions`.
    pub const fn rejected(actions: Vec<ServerAction>) -> Self {
        Self { accepted: false, actions }
    }

    /// Event lines recorded by this outcome.
    pub fn log_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.actions.iter().filter_map(|action| match action {
            ServerAction::Log { message } => Some(message.as_str()),
            _ => None,
        })
    }

    /// Drop `address` from every broadcast unless `keep` approves it.
    pub fn retain_recipients(&mut self, mut keep: impl FnMut(Address) -> bool) {
        for action in &mut self.actions {
            if let ServerAction::Broadcast { recipients, .. } = action {
                recipients.retain(|&address| keep(address));
            }
        }
    }
}

/// Shorthand for a [`ServerAction::Log`].
pub fn log(message: impl Into<String>) -> ServerAction {
    ServerAction::Log { message: message.into() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_lines_skip_deliveries() {
        let outcome = ServerOutcome::accepted(vec![
            log("first"),
            ServerAction::Send { to: 1, message: Message::connection(0) },
            log("second"),
        ]);

        assert_eq!(outcome.log_lines().collect::<Vec<_>>(), vec!["first", "second"]);
    }

    #[test]
    fn retain_recipients_filters_broadcasts_only() {
        let mut outcome = ServerOutcome::accepted(vec![
            ServerAction::Send { to: 1, message: Message::connection(0) },
            ServerAction::Broadcast { recipients: vec![1, 2, 3], message: Message::text(1, "x") },
        ]);

        outcome.retain_recipients(|address| address != 2);

        assert_eq!(outcome.actions, vec![
            ServerAction::Send { to: 1, message: Message::connection(0) },
            ServerAction::Broadcast { recipients: vec![1, 3], message: Message::text(1, "x") },
        ]);
    }
}
