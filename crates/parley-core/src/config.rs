//! Runtime feature selection.

use parley_proto::{EncryptionMethod, Features};
use serde::{Deserialize, Serialize};

/// Which optional layers a participant's stacks contain.
///
/// The default configuration enables nothing: plain text over a bare
/// router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Require clients to authenticate before their messages are broadcast.
    pub authentication: bool,
    /// Allow colored text messages.
    pub color: bool,
    /// Obfuscate message payloads with this method.
    pub encryption: Option<EncryptionMethod>,
    /// Record traffic in a [`Logger`](crate::Logger).
    pub logging: bool,
}

impl ChatConfig {
    /// Every feature enabled, encrypting with `method`.
    pub const fn all(method: EncryptionMethod) -> Self {
        Self { authentication: true, color: true, encryption: Some(method), logging: true }
    }

    /// Feature set selected by this configuration.
    pub fn features(&self) -> Features {
        let mut features = Features::empty();
        features.set(Features::AUTHENTICATION, self.authentication);
        features.set(Features::COLOR, self.color);
        features.set(Features::ENCRYPTION, self.encryption.is_some());
        features.set(Features::LOGGING, self.logging);
        features
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_enables_nothing() {
        assert_eq!(ChatConfig::default().features(), Features::empty());
    }

    #[test]
    fn all_enables_everything() {
        assert_eq!(ChatConfig::all(EncryptionMethod::Reverse).features(), Features::all());
    }

    #[test]
    fn deserializes_partial_config() {
        let config: ChatConfig =
            serde_json::from_str(r#"{"authentication": true, "encryption": "rot13"}"#).unwrap();

        assert_eq!(config, ChatConfig {
            authentication: true,
            color: false,
            encryption: Some(EncryptionMethod::Rot13),
            logging: false,
        });
    }
}
