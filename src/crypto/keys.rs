//! Password-based key derivation and the account key flows.
//!
//! Three pieces of key material exist per account:
//!
//! 1. **Master key** — PBKDF2-HMAC-SHA256(password, salt = email, iterations).
//!    Derived fresh on every login/registration, held only in memory, never
//!    sent anywhere. Its sole job is wrapping/unwrapping the cipher key.
//! 2. **Auth key** — HKDF-SHA256(master key, salt = email, info = "auth").
//!    Sent to the server as proof of the password. The distinct info label
//!    makes it cryptographically independent of the cipher key path: knowing
//!    the auth key reveals nothing about the master or cipher keys.
//! 3. **Cipher key** — 256-bit random, generated once at registration. All
//!    note content is encrypted under it. The server only ever stores it
//!    wrapped under the master key (`cipher_key_enc`).
//!
//! The iteration count is an account-level parameter served by the backend,
//! so it can be raised over time without breaking existing accounts.

use std::num::NonZeroU32;

use ring::{hkdf, pbkdf2};

use crate::crypto::{self, KEY_LEN};
use crate::encoding;
use crate::error::CryptoError;

/// PBKDF2 work factor used when registering new accounts. Existing accounts
/// use whatever count the server reports for them.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// HKDF info label separating the auth key from the master key.
pub const AUTH_KEY_INFO: &[u8] = b"auth";

/// Hash underlying an HKDF derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    fn hkdf(self) -> hkdf::Algorithm {
        match self {
            HashAlgorithm::Sha256 => hkdf::HKDF_SHA256,
            HashAlgorithm::Sha384 => hkdf::HKDF_SHA384,
            HashAlgorithm::Sha512 => hkdf::HKDF_SHA512,
        }
    }
}

/// Output length for `Prk::expand`, which otherwise only knows the lengths
/// of ring's own key types.
struct OkmLength(usize);

impl hkdf::KeyType for OkmLength {
    fn len(&self) -> usize {
        self.0
    }
}

/// Derives `out_len` bytes of key material with PBKDF2-HMAC-SHA256.
///
/// Deterministic in all inputs. Rejects a zero iteration count.
pub fn pbkdf2_derive(
    secret: &[u8],
    salt: &[u8],
    iterations: u32,
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let iterations = NonZeroU32::new(iterations)
        .ok_or(CryptoError::KeyDerivation("iteration count must be at least 1"))?;

    let mut out = vec![0u8; out_len];
    pbkdf2::derive(pbkdf2::PBKDF2_HMAC_SHA256, iterations, salt, secret, &mut out);
    Ok(out)
}

/// Derives `out_len` bytes of output keying material with HKDF (RFC 5869).
///
/// Extract-then-expand; `info` scopes the output so different labels yield
/// statistically independent keys from the same secret.
pub fn hkdf_derive(
    secret: &[u8],
    salt: &[u8],
    info: &[u8],
    hash: HashAlgorithm,
    out_len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let alg = hash.hkdf();
    let prk = hkdf::Salt::new(alg, salt).extract(secret);
    let info = [info];
    let okm = prk
        .expand(&info, OkmLength(out_len))
        .map_err(|_| CryptoError::KeyDerivation("requested HKDF output is too long"))?;

    let mut out = vec![0u8; out_len];
    okm.fill(&mut out)
        .map_err(|_| CryptoError::KeyDerivation("HKDF expand failed"))?;
    Ok(out)
}

/// Key material produced at registration, base64-encoded for the signup
/// request. `cipher_key` stays on the device; the other two go to the server.
#[derive(Debug, Clone, serde::Serialize)]
pub struct RegisteredKeys {
    pub cipher_key: String,
    pub cipher_key_enc: String,
    pub auth_key: String,
}

/// Key material derived at login, base64-encoded. The auth key goes to the
/// server for verification; the master key unwraps the returned
/// `cipher_key_enc` and is then discarded.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginKeys {
    pub master_key: String,
    pub auth_key: String,
}

/// Derive the master and auth keys for an account.
fn derive_account_keys(
    email: &str,
    password: &str,
    iterations: u32,
) -> Result<([u8; KEY_LEN], Vec<u8>), CryptoError> {
    let master = pbkdf2_derive(password.as_bytes(), email.as_bytes(), iterations, KEY_LEN)?;
    let auth = hkdf_derive(
        &master,
        email.as_bytes(),
        AUTH_KEY_INFO,
        HashAlgorithm::Sha256,
        KEY_LEN,
    )?;
    let master: [u8; KEY_LEN] = master
        .try_into()
        .map_err(|_| CryptoError::KeyDerivation("master key has wrong length"))?;
    Ok((master, auth))
}

/// Registration key flow: derive master + auth keys, generate a fresh cipher
/// key, and wrap the cipher key under the master key.
///
/// PBKDF2 at real-world iteration counts takes tens of milliseconds, so the
/// whole flow runs on the blocking pool.
pub async fn register_keys(
    email: &str,
    password: &str,
    iterations: u32,
) -> Result<RegisteredKeys, CryptoError> {
    let email = email.to_owned();
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        let (master, auth) = derive_account_keys(&email, &password, iterations)?;
        let cipher = crypto::generate_key()?;
        let cipher_enc = crypto::encrypt(&master, &cipher)?;
        Ok(RegisteredKeys {
            cipher_key: encoding::to_base64(&cipher),
            cipher_key_enc: encoding::to_base64(&cipher_enc),
            auth_key: encoding::to_base64(&auth),
        })
    })
    .await
    .map_err(|_| CryptoError::KeyDerivation("key derivation task failed"))?
}

/// Login key flow: derive master + auth keys for an existing account.
pub async fn login_keys(
    email: &str,
    password: &str,
    iterations: u32,
) -> Result<LoginKeys, CryptoError> {
    let email = email.to_owned();
    let password = password.to_owned();
    tokio::task::spawn_blocking(move || {
        let (master, auth) = derive_account_keys(&email, &password, iterations)?;
        Ok(LoginKeys {
            master_key: encoding::to_base64(&master),
            auth_key: encoding::to_base64(&auth),
        })
    })
    .await
    .map_err(|_| CryptoError::KeyDerivation("key derivation task failed"))?
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "v2biqXbuXabsuZWXXyQ76f7SvhxJxzpp";
    const SALT: &str = "tkcZv7RDyebPnD9DLt63kAxtIvHxcTe6";

    #[test]
    fn pbkdf2_known_vector() {
        let out = pbkdf2_derive(SECRET.as_bytes(), SALT.as_bytes(), 1000, 32).unwrap();
        assert_eq!(
            encoding::to_base64(&out),
            "8mR5rKfEAg+9LuF9SttGGV5yiOHCiQT/PQ1HORdVXYU="
        );
    }

    #[test]
    fn pbkdf2_is_deterministic() {
        let a = pbkdf2_derive(SECRET.as_bytes(), SALT.as_bytes(), 1000, 32).unwrap();
        let b = pbkdf2_derive(SECRET.as_bytes(), SALT.as_bytes(), 1000, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn pbkdf2_rejects_zero_iterations() {
        assert!(matches!(
            pbkdf2_derive(b"secret", b"salt", 0, 32),
            Err(CryptoError::KeyDerivation(_))
        ));
    }

    #[test]
    fn hkdf_known_vector() {
        // RFC 5869 with SHA-256; independently computed.
        let out = hkdf_derive(
            SECRET.as_bytes(),
            SALT.as_bytes(),
            AUTH_KEY_INFO,
            HashAlgorithm::Sha256,
            32,
        )
        .unwrap();
        assert_eq!(
            encoding::to_base64(&out),
            "Thm7/ehPTPR+QCg/HucDTQAFshKhekHLLPnqF6RbcoI="
        );
    }

    #[test]
    fn hkdf_is_deterministic_across_representations() {
        let a = hkdf_derive(
            SECRET.as_bytes(),
            SALT.as_bytes(),
            AUTH_KEY_INFO,
            HashAlgorithm::Sha256,
            32,
        )
        .unwrap();
        // Same bytes arriving via an owned buffer rather than a &str view.
        let secret: Vec<u8> = SECRET.bytes().collect();
        let b = hkdf_derive(&secret, SALT.as_bytes(), b"auth", HashAlgorithm::Sha256, 32).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hkdf_info_labels_are_independent() {
        let auth = hkdf_derive(
            SECRET.as_bytes(),
            SALT.as_bytes(),
            b"auth",
            HashAlgorithm::Sha256,
            32,
        )
        .unwrap();
        let other = hkdf_derive(
            SECRET.as_bytes(),
            SALT.as_bytes(),
            b"cipher",
            HashAlgorithm::Sha256,
            32,
        )
        .unwrap();
        assert_ne!(auth, other);
    }

    #[test]
    fn hkdf_rejects_oversized_output() {
        // SHA-256 caps HKDF output at 255 * 32 bytes.
        assert!(matches!(
            hkdf_derive(b"s", b"t", b"i", HashAlgorithm::Sha256, 255 * 32 + 1),
            Err(CryptoError::KeyDerivation(_))
        ));
    }
}
