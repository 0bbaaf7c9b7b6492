//! Error type shared by the encryption and key-derivation layers.

use thiserror::Error;

/// Failures surfaced by the crypto, key, and encoding modules.
///
/// Decryption failures are deliberately opaque: `ring` reports every AEAD
/// problem (bad tag, garbled ciphertext, wrong key) as a single unspecified
/// error, and this type preserves that — callers learn that a payload was
/// rejected, not why.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// A key-derivation primitive rejected its parameters. Always a
    /// programming or configuration error, never expected at runtime.
    #[error("key derivation failed: {0}")]
    KeyDerivation(&'static str),

    /// AEAD open failed: truncated payload, tag mismatch, or wrong key.
    #[error("decryption failed: payload rejected")]
    Decryption,

    /// AEAD seal failed (plaintext too large for the primitive).
    #[error("encryption failed")]
    Encryption,

    /// A key was supplied with the wrong length (expected 32 bytes).
    #[error("invalid key length, expected a 32-byte key")]
    InvalidKeyLength,

    /// Malformed base64 input.
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Decrypted bytes were not valid UTF-8.
    #[error("decrypted data is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// The system CSPRNG failed to produce bytes.
    #[error("secure random generator failed")]
    Rand,
}
