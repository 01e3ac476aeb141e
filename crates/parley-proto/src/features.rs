//! Optional protocol features.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Set of optional features a participant or factory chain supports.
    ///
    /// Factory layers grant features to the layers beneath them; the base
    /// factory refuses to construct a message whose
    /// [`required_features`](crate::Message::required_features) were not
    /// granted.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Features: u8 {
        /// Credential submission and server-side authentication checks.
        const AUTHENTICATION = 0b0001;
        /// Colored text messages.
        const COLOR = 0b0010;
        /// Payload obfuscation with an [`EncryptionMethod`](crate::EncryptionMethod).
        const ENCRYPTION = 0b0100;
        /// Recording of inbound and outbound traffic.
        const LOGGING = 0b1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grants_compose_by_union() {
        let granted = Features::empty() | Features::COLOR | Features::AUTHENTICATION;
        assert!(granted.contains(Features::COLOR));
        assert!(granted.contains(Features::AUTHENTICATION));
        assert!(!granted.contains(Features::ENCRYPTION));
    }

    #[test]
    fn empty_requirement_is_always_satisfied() {
        assert!(Features::empty().contains(Features::empty()));
        assert!(Features::all().contains(Features::COLOR | Features::LOGGING));
    }
}
