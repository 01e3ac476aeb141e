//! Protocol error types.

use thiserror::Error;

/// Errors from encoding, decoding or parsing protocol values.
#[derive(Debug, Error)]
pub enum ProtoError {
    /// CBOR serialization failed.
    #[error("CBOR encode failed: {0}")]
    Encode(String),

    /// CBOR deserialization failed.
    #[error("CBOR decode failed: {0}")]
    Decode(String),

    /// Unrecognised encryption method name.
    #[error("unknown encryption method: {0:?} (expected rot13 or reverse)")]
    UnknownEncryptionMethod(String),
}
