//! Reversible text transforms.
//!
//! Neither method offers any confidentiality. They exist so that layering
//! bugs (decrypting twice, forgetting to encrypt a reply) show up as garbled
//! text in tests.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ProtoError;

/// Reversible transform applied to the text fields of a message.
///
/// Both variants are involutions: `encrypt(encrypt(s)) == s`, and `decrypt`
/// is the exact inverse of `encrypt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionMethod {
    /// Rotate ASCII letters by 13 places, preserving case. Every other
    /// character passes through unchanged.
    Rot13,
    /// Reverse the order of characters.
    Reverse,
}

impl EncryptionMethod {
    /// Transform plaintext into its obfuscated form.
    pub fn encrypt(self, text: &str) -> String {
        match self {
            Self::Rot13 => text.chars().map(rot13).collect(),
            Self::Reverse => text.chars().rev().collect(),
        }
    }

    /// Recover plaintext. Both methods are self-inverse.
    pub fn decrypt(self, text: &str) -> String {
        self.encrypt(text)
    }

    /// Lowercase name accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::Rot13 => "rot13",
            Self::Reverse => "reverse",
        }
    }
}

fn rot13(c: char) -> char {
    match c {
        'A'..='Z' => rotate(c, b'A'),
        'a'..='z' => rotate(c, b'a'),
        _ => c,
    }
}

fn rotate(c: char, base: u8) -> char {
    // Callers guarantee `c` is an ASCII letter at or above `base`.
    let offset = (c as u8 - base + 13) % 26;
    char::from(base + offset)
}

impl fmt::Display for EncryptionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncryptionMethod {
    type Err = ProtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rot13" => Ok(Self::Rot13),
            "reverse" => Ok(Self::Reverse),
            _ => Err(ProtoError::UnknownEncryptionMethod(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn rot13_rotates_letters_and_keeps_case() {
        assert_eq!(EncryptionMethod::Rot13.encrypt("HelloWorld!"), "UryybJbeyq!");
        assert_eq!(EncryptionMethod::Rot13.encrypt("abc XYZ"), "nop KLM");
    }

    #[test]
    fn rot13_leaves_non_letters_alone() {
        let text = "0123 !?_-é\u{1F980}";
        assert_eq!(EncryptionMethod::Rot13.encrypt(text), text);
    }

    #[test]
    fn reverse_reverses_characters_not_bytes() {
        assert_eq!(EncryptionMethod::Reverse.encrypt("HelloWorld!"), "!dlroWolleH");
        assert_eq!(EncryptionMethod::Reverse.encrypt("añb"), "bña");
    }

    #[test]
    fn parses_method_names() {
        assert_eq!("rot13".parse::<EncryptionMethod>().unwrap(), EncryptionMethod::Rot13);
        assert_eq!("REVERSE".parse::<EncryptionMethod>().unwrap(), EncryptionMethod::Reverse);
        assert!(matches!(
            "caesar".parse::<EncryptionMethod>(),
            Err(ProtoError::UnknownEncryptionMethod(name)) if name == "caesar"
        ));
    }

    fn method() -> impl Strategy<Value = EncryptionMethod> {
        prop_oneof![Just(EncryptionMethod::Rot13), Just(EncryptionMethod::Reverse)]
    }

    proptest! {
        #[test]
        fn prop_decrypt_inverts_encrypt(method in method(), text in ".*") {
            prop_assert_eq!(method.decrypt(&method.encrypt(&text)), text);
        }

        #[test]
        fn prop_encrypt_is_involution(method in method(), text in ".*") {
            prop_assert_eq!(method.encrypt(&method.encrypt(&text)), text);
        }
    }
}
