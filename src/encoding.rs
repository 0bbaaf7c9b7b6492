//! Base64 and UTF-8 conversions shared by the cipher and note layers.
//!
//! Encrypted fields cross the JSON API boundary as standard, padded base64.
//! UTF-8 *encoding* is `str::as_bytes`; only the decode direction can fail
//! and is wrapped here so failures map onto [`CryptoError`].

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::CryptoError;

/// Encode arbitrary bytes as standard base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode standard base64. Rejects malformed input.
pub fn from_base64(s: &str) -> Result<Vec<u8>, CryptoError> {
    Ok(STANDARD.decode(s)?)
}

/// Interpret bytes as UTF-8 text.
pub fn to_utf8(bytes: Vec<u8>) -> Result<String, CryptoError> {
    Ok(String::from_utf8(bytes)?)
}
