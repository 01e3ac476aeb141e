//! Message model.
//!
//! Every message names the participant that originated it. Only the text
//! payload fields (`username`, `password`, `body`) are subject to
//! encryption; addresses and colors travel in the clear.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{EncryptionMethod, Features, ProtoError};

/// Network address of a participant, assigned by the router at registration.
pub type Address = u64;

/// Message exchanged between participants.
///
/// # Security
///
/// - **Debug Redaction**: `Debug` and `Display` never print the password of
///   an [`Message::Authentication`] so request logs cannot leak credentials.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// Presence announcement. Clients send it to join a server and the server
    /// answers with its own address.
    Connection {
        /// Originating participant.
        sender: Address,
    },

    /// Credential submission.
    Authentication {
        /// Originating participant.
        sender: Address,
        /// Account name.
        username: String,
        /// Account password.
        password: String,
    },

    /// Chat content.
    Text {
        /// Originating participant.
        sender: Address,
        /// Message text.
        body: String,
        /// ANSI color sequence, only meaningful when coloring is active on
        /// both ends.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        color: Option<String>,
    },
}

/// Discriminant of a [`Message`], used in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    /// [`Message::Connection`]
    Connection,
    /// [`Message::Authentication`]
    Authentication,
    /// [`Message::Text`]
    Text,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connection => "connection",
            Self::Authentication => "authentication",
            Self::Text => "text",
        })
    }
}

impl Message {
    /// Build a connection announcement.
    pub const fn connection(sender: Address) -> Self {
        Self::Connection { sender }
    }

    /// Build an uncolored text message.
    pub fn text(sender: Address, body: impl Into<String>) -> Self {
        Self::Text { sender, body: body.into(), color: None }
    }

    /// Build a colored text message.
    pub fn colored_text(
        sender: Address,
        body: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        Self::Text { sender, body: body.into(), color: Some(color.into()) }
    }

    /// Build a credential submission.
    pub fn authentication(
        sender: Address,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::Authentication { sender, username: username.into(), password: password.into() }
    }

    /// Address of the originating participant.
    pub const fn sender(&self) -> Address {
        match self {
            Self::Connection { sender }
            | Self::Authentication { sender, .. }
            | Self::Text { sender, .. } => *sender,
        }
    }

    /// Variant of this message.
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::Connection { .. } => MessageKind::Connection,
            Self::Authentication { .. } => MessageKind::Authentication,
            Self::Text { .. } => MessageKind::Text,
        }
    }

    /// Features that must be active for this message to be constructed.
    pub const fn required_features(&self) -> Features {
        match self {
            Self::Connection { .. } | Self::Text { color: None, .. } => Features::empty(),
            Self::Text { color: Some(_), .. } => Features::COLOR,
            Self::Authentication { .. } => Features::AUTHENTICATION,
        }
    }

    /// Return a copy with every text field encrypted.
    pub fn encrypt(&self, method: EncryptionMethod) -> Self {
        self.map_text(|text| method.encrypt(text))
    }

    /// Return a copy with every text field decrypted.
    pub fn decrypt(&self, method: EncryptionMethod) -> Self {
        self.map_text(|text| method.decrypt(text))
    }

    fn map_text(&self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Self::Connection { sender } => Self::Connection { sender: *sender },
            Self::Authentication { sender, username, password } => Self::Authentication {
                sender: *sender,
                username: f(username),
                password: f(password),
            },
            Self::Text { sender, body, color } => {
                Self::Text { sender: *sender, body: f(body), color: color.clone() }
            },
        }
    }

    /// Serialize to CBOR.
    pub fn encode(&self) -> Result<Vec<u8>, ProtoError> {
        let mut buf = Vec::new();
        ciborium::ser::into_writer(self, &mut buf)
            .map_err(|e| ProtoError::Encode(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtoError> {
        ciborium::de::from_reader(bytes).map_err(|e| ProtoError::Decode(e.to_string()))
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection { sender } => {
                f.debug_struct("Connection").field("sender", sender).finish()
            },
            Self::Authentication { sender, username, password } => f
                .debug_struct("Authentication")
                .field("sender", sender)
                .field("username", username)
                .field("password", &format!("<redacted {} chars>", password.chars().count()))
                .finish(),
            Self::Text { sender, body, color } => f
                .debug_struct("Text")
                .field("sender", sender)
                .field("body", body)
                .field("color", color)
                .finish(),
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection { sender } => write!(f, "[{sender}] connect"),
            Self::Authentication { sender, username, .. } => {
                write!(f, "[{sender}] u={username} p=<redacted>")
            },
            Self::Text { sender, body, .. } => write!(f, "[{sender}] {body}"),
        }
    }
}
