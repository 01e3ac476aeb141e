//! Logging server layer.

use parley_core::{ChatError, Endpoint, Logger, Message};

use crate::{ServerLayer, action::ServerOutcome};

/// Records one event line per inbound message.
///
/// The recorded line is the outcome reported by the inner layers
/// (`New client: 3`, `Broadcasting message from sender 3`, ...), so a logging
/// layer placed outside an authenticating layer sees rejections too. The
/// arrival itself goes to `tracing` only.
pub struct LoggingServer<L> {
    inner: L,
    logger: Logger,
}

impl<L: ServerLayer> LoggingServer<L> {
    /// Wrap `inner` with a fresh logger.
    pub fn new(inner: L) -> Self {
        Self { inner, logger: Logger::new() }
    }

    /// Wrapped layer.
    pub const fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: ServerLayer> ServerLayer for LoggingServer<L> {
    fn process(&self, message: Message, endpoint: &Endpoint) -> Result<ServerOutcome, ChatError> {
        tracing::debug!("Received message from sender {}", message.sender());

        let outcome = self.inner.process(message, endpoint)?;
        for line in outcome.log_lines() {
            self.logger.log(line);
        }
        Ok(outcome)
    }

    fn logger(&self) -> Option<&Logger> {
        Some(&self.logger)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use parley_core::{BaseMessageFactory, Router};

    use super::*;
    use crate::{AuthenticatingServer, BaseServer, CredentialStore};

    #[test]
    fn records_outcome_line_per_message() {
        let router = Router::new();
        let endpoint = Endpoint::new(&router, Rc::new(BaseMessageFactory));
        endpoint.address_slot().bind(0);
        let server = LoggingServer::new(AuthenticatingServer::new(
            BaseServer::new(),
            CredentialStore::new(),
        ));

        server.process(Message::connection(4), &endpoint).unwrap();
        server.process(Message::text(4, "hi"), &endpoint).unwrap();

        assert_eq!(server.logger().map(Logger::entries), Some(vec![
            "New client: 4".to_string(),
            "Rejected message from unauthenticated client: 4".to_string(),
        ]));
    }
}
