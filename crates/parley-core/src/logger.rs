//! Append-only logger collaborator.

use std::cell::RefCell;

/// In-memory log of protocol events, mirrored to `tracing` at debug level.
#[derive(Debug, Default)]
pub struct Logger {
    entries: RefCell<Vec<String>>,
}

impl Logger {
    /// Create an empty logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn log(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(target: "parley::log", "{message}");
        self.entries.borrow_mut().push(message);
    }

    /// Most recent entry, or `""` if nothing was logged.
    pub fn last_logged_message(&self) -> String {
        self.entries.borrow().last().cloned().unwrap_or_default()
    }

    /// Every entry, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_logged_message_tracks_latest() {
        let logger = Logger::new();
        assert_eq!(logger.last_logged_message(), "");

        logger.log("first");
        logger.log(String::from("second"));

        assert_eq!(logger.last_logged_message(), "second");
        assert_eq!(logger.entries().len(), 2);
    }
}
