//! Client-side core for an end-to-end encrypted note-taking app.
//!
//! Note content never leaves the device in plaintext: the [`crypto`] module
//! derives per-account key material (PBKDF2 + HKDF) and encrypts note and
//! book payloads with AES-256-GCM. The [`lexer`] module tokenizes full-text
//! search snippets so highlight markers are never treated as trusted markup.

pub mod crypto;
pub mod encoding;
pub mod error;
pub mod lexer;
pub mod note;

pub use error::CryptoError;
