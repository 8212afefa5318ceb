//! Short code and encoded storage key newtypes.

use base64::Engine as _;
use std::fmt;

/// A short identifier issued for a long URL.
///
/// Generated codes are not unique by construction; uniqueness is enforced by
/// the store on the code's [`EncodedKey`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    /// Wraps a raw string as a short code.
    ///
    /// No validation is performed: codes arriving from request paths are
    /// looked up as-is and simply fail to resolve if malformed.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derives the storage key for this code.
    pub fn encode(&self) -> EncodedKey {
        EncodedKey(base64::engine::general_purpose::STANDARD.encode(self.0.as_bytes()))
    }

    /// Builds the public short URL under `base_url`.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base64 form of a [`ShortCode`], used as the primary key in storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedKey(String);

impl EncodedKey {
    /// Wraps a key read back from storage.
    pub fn from_stored(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
