//! Action execution against the router.
//!
//! Defines how the server carries out the actions its layers produce and how
//! it reacts when a delivery inside a broadcast fails.

use parley_core::{ChatError, Endpoint};

use crate::action::ServerAction;

/// Policy for handling broadcast send failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadcastPolicy {
    /// Abort on the first failed delivery and surface the error to whoever
    /// triggered the broadcast.
    #[default]
    Abort,

    /// Log the failure and continue with the next recipient.
    /// Suitable for simulations that drop participants mid-session.
    BestEffort,
}

/// Execute `actions` in order.
///
/// Individual sends always propagate their errors. Broadcast deliveries
/// follow `policy`.
pub fn execute_actions(
    endpoint: &Endpoint,
    actions: Vec<ServerAction>,
    policy: BroadcastPolicy,
) -> Result<(), ChatError> {
    for action in actions {
        match action {
            ServerAction::Send { to, message } => {
                endpoint.send(to, message)?;
            },

            ServerAction::Broadcast { recipients, message } => {
                for to in recipients {
                    match endpoint.send(to, message.clone()) {
                        Ok(_) => {},
                        Err(e) if policy == BroadcastPolicy::BestEffort => {
                            tracing::warn!(to, "broadcast delivery failed: {}", e);
                        },
                        Err(e) => return Err(e),
                    }
                }
            },

            ServerAction::Log { message } => {
                tracing::info!(target: "parley::server", "{message}");
            },
        }
    }

    Ok(())
}
