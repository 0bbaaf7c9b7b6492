//! End-to-end encryption for note content.
//!
//! Notes and book labels are encrypted client-side before upload and
//! decrypted after fetch. The server never sees plaintext. The content key
//! (cipher key) is a random 256-bit secret generated once at registration;
//! see [`keys`] for how it is derived, wrapped, and recovered.
//!
//! Each payload is encrypted with AES-256-GCM using a unique nonce.
//! Format: [12-byte nonce][ciphertext+tag]

pub mod keys;

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};

use crate::encoding;
use crate::error::CryptoError;

pub const NONCE_LEN: usize = 12;
pub const KEY_LEN: usize = 32;
pub const TAG_LEN: usize = 16;

/// Generates a fresh random 256-bit cipher key from the system CSPRNG.
/// Called once per account, at registration.
pub fn generate_key() -> Result<[u8; KEY_LEN], CryptoError> {
    let rng = SystemRandom::new();
    let mut key = [0u8; KEY_LEN];
    rng.fill(&mut key).map_err(|_| CryptoError::Rand)?;
    Ok(key)
}

/// Encrypts plaintext with AES-256-GCM. Returns [nonce || ciphertext || tag].
///
/// The nonce is freshly random per call, so encrypting the same plaintext
/// twice under the same key yields different payloads.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let rng = SystemRandom::new();
    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| CryptoError::InvalidKeyLength)?;
    let sealing_key = LessSafeKey::new(unbound);

    let mut nonce_bytes = [0u8; NONCE_LEN];
    rng.fill(&mut nonce_bytes).map_err(|_| CryptoError::Rand)?;
    let nonce = Nonce::assume_unique_for_key(nonce_bytes);

    let mut in_out = plaintext.to_vec();
    sealing_key
        .seal_in_place_append_tag(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CryptoError::Encryption)?;

    // Prepend nonce
    let mut payload = Vec::with_capacity(NONCE_LEN + in_out.len());
    payload.extend_from_slice(&nonce_bytes);
    payload.extend_from_slice(&in_out);
    Ok(payload)
}

/// Decrypts [nonce || ciphertext || tag] with AES-256-GCM.
///
/// Fails closed: a truncated payload, a tampered byte anywhere, or the wrong
/// key all reject — unauthenticated plaintext is never returned.
pub fn decrypt(key: &[u8; KEY_LEN], payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    if payload.len() < NONCE_LEN + TAG_LEN {
        return Err(CryptoError::Decryption);
    }

    let (nonce_bytes, ciphertext) = payload.split_at(NONCE_LEN);
    let nonce = Nonce::try_assume_unique_for_key(nonce_bytes).map_err(|_| CryptoError::Decryption)?;

    let unbound = UnboundKey::new(&AES_256_GCM, key).map_err(|_| CryptoError::InvalidKeyLength)?;
    let opening_key = LessSafeKey::new(unbound);

    let mut in_out = ciphertext.to_vec();
    let plaintext = opening_key
        .open_in_place(nonce, Aad::empty(), &mut in_out)
        .map_err(|_| CryptoError::Decryption)?;

    Ok(plaintext.to_vec())
}

/// Encrypts a string, returns the base64-encoded payload.
pub fn encrypt_string(key: &[u8; KEY_LEN], plaintext: &str) -> Result<String, CryptoError> {
    let payload = encrypt(key, plaintext.as_bytes())?;
    Ok(encoding::to_base64(&payload))
}

/// Decrypts a base64-encoded payload, returns the plaintext string.
pub fn decrypt_string(key: &[u8; KEY_LEN], encoded: &str) -> Result<String, CryptoError> {
    let payload = encoding::from_base64(encoded)?;
    encoding::to_utf8(decrypt(key, &payload)?)
}

/// Decodes a base64 key and checks its length.
pub fn key_from_base64(encoded: &str) -> Result<[u8; KEY_LEN], CryptoError> {
    let bytes = encoding::from_base64(encoded)?;
    bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let key = generate_key().unwrap();
        for plaintext in ["hello world", "", "line one\nline two\n", "résumé — ノート 📝"] {
            let encrypted = encrypt_string(&key, plaintext).unwrap();
            let decrypted = decrypt_string(&key, &encrypted).unwrap();
            assert_eq!(decrypted, plaintext);
        }
    }

    #[test]
    fn test_encryption_is_probabilistic() {
        let key = generate_key().unwrap();
        let a = encrypt(&key, b"same plaintext").unwrap();
        let b = encrypt(&key, b"same plaintext").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_wrong_key_fails() {
        let key1 = generate_key().unwrap();
        let key2 = generate_key().unwrap();
        let encrypted = encrypt(&key1, b"secret").unwrap();
        assert!(decrypt(&key2, &encrypted).is_err());
    }

    #[test]
    fn test_truncated_payload_fails() {
        let key = generate_key().unwrap();
        let payload = encrypt(&key, b"secret").unwrap();
        assert!(matches!(
            decrypt(&key, &payload[..NONCE_LEN + TAG_LEN - 1]),
            Err(CryptoError::Decryption)
        ));
        assert!(matches!(decrypt(&key, &[]), Err(CryptoError::Decryption)));
    }

    #[test]
    fn test_any_bit_flip_rejected() {
        let key = generate_key().unwrap();
        let payload = encrypt(&key, b"tamper target").unwrap();
        for i in 0..payload.len() {
            for bit in 0..8 {
                let mut tampered = payload.clone();
                tampered[i] ^= 1 << bit;
                assert!(
                    decrypt(&key, &tampered).is_err(),
                    "flipping bit {bit} of byte {i} was not rejected"
                );
            }
        }
    }

    #[test]
    fn test_key_from_base64_length_check() {
        let short = encoding::to_base64(&[0u8; 16]);
        assert!(matches!(
            key_from_base64(&short),
            Err(CryptoError::InvalidKeyLength)
        ));
        let ok = encoding::to_base64(&[0u8; KEY_LEN]);
        assert_eq!(key_from_base64(&ok).unwrap(), [0u8; KEY_LEN]);
    }
}
