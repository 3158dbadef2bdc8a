//! Reversible short code codec.
//!
//! Maps numeric link identifiers to short, non-sequential codes and back with
//! Hashids (via [`harsh`]). With the same salt, alphabet and minimum length the
//! output is identical to other Hashids implementations.
//!
//! This is obfuscation, not security: anyone holding the salt can enumerate codes.

use std::collections::HashSet;

use harsh::{Harsh, HarshBuilder};

/// Default alphabet: ASCII letters and digits without look-alikes (`0 O o 1 l I`).
pub const DEFAULT_ALPHABET: &str = "abcdefghijkmnpqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Default minimum code length.
pub const DEFAULT_MIN_LENGTH: usize = 6;

const MIN_ALPHABET_LENGTH: usize = 16;

/// Characters that are safe verbatim in a URL path segment.
fn is_path_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '~')
}

/// Error returned when a code cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid short code")]
pub struct DecodeError;

impl From<harsh::Error> for DecodeError {
    fn from(_: harsh::Error) -> Self {
        DecodeError
    }
}

/// Error returned when the codec is constructed with unusable settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecConfigError {
    #[error("Alphabet must contain at least {MIN_ALPHABET_LENGTH} unique characters, got {0}")]
    AlphabetTooShort(usize),

    #[error("Alphabet may only contain URL-safe ASCII characters, got {0:?}")]
    UnsafeCharacter(char),

    #[error("Salt must not be empty")]
    EmptySalt,

    #[error("Invalid codec settings: {0}")]
    Build(String),
}

/// Salted, reversible integer ↔ string codec.
#[derive(Debug)]
pub struct ShortCodeCodec {
    harsh: Harsh,
    /// Length of the longest code any `u64` can produce.
    max_code_length: usize,
}

impl ShortCodeCodec {
    /// Creates a codec with the default alphabet.
    pub fn new(salt: &str, min_length: usize) -> Result<Self, CodecConfigError> {
        Self::with_alphabet(salt, min_length, DEFAULT_ALPHABET)
    }

    /// Creates a codec with a custom alphabet.
    ///
    /// Duplicate characters in `alphabet` are ignored.
    ///
    /// # Errors
    ///
    /// - [`CodecConfigError::EmptySalt`] if `salt` is empty
    /// - [`CodecConfigError::UnsafeCharacter`] if a character would need escaping in a path
    /// - [`CodecConfigError::AlphabetTooShort`] if fewer than 16 unique characters remain
    pub fn with_alphabet(
        salt: &str,
        min_length: usize,
        alphabet: &str,
    ) -> Result<Self, CodecConfigError> {
        if salt.is_empty() {
            return Err(CodecConfigError::EmptySalt);
        }

        if let Some(c) = alphabet.chars().find(|c| !is_path_safe(*c)) {
            return Err(CodecConfigError::UnsafeCharacter(c));
        }

        let mut seen = HashSet::new();
        let unique: String = alphabet.chars().filter(|c| seen.insert(*c)).collect();
        if unique.len() < MIN_ALPHABET_LENGTH {
            return Err(CodecConfigError::AlphabetTooShort(unique.len()));
        }

        let harsh = HarshBuilder::new()
            .salt(salt)
            .length(min_length)
            .alphabet(unique.as_str())
            .build()
            .map_err(|e| CodecConfigError::Build(e.to_string()))?;

        let max_code_length = harsh.encode(&[u64::MAX]).len().max(min_length);

        Ok(Self {
            harsh,
            max_code_length,
        })
    }

    /// Encodes an identifier into a short code.
    ///
    /// The result is at least `min_length` characters long.
    pub fn encode(&self, id: u64) -> String {
        self.harsh.encode(&[id])
    }

    /// Decodes a short code back into its identifier.
    ///
    /// Only canonical codes are accepted: the decoded value must encode back to
    /// exactly the same string. Malformed input, codes produced under a different
    /// salt, and codes holding more than one value are all rejected.
    pub fn decode(&self, code: &str) -> Result<u64, DecodeError> {
        if code.is_empty() || !code.is_ascii() || code.len() > self.max_code_length {
            return Err(DecodeError);
        }

        let id = match self.harsh.decode(code)?.as_slice() {
            [id] => *id,
            _ => return Err(DecodeError),
        };

        if self.encode(id) == code {
            Ok(id)
        } else {
            Err(DecodeError)
        }
    }
}
