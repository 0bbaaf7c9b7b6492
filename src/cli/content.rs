use std::io::Read;

use anyhow::{Context, Result};

use dnote_core::crypto;

/// Encrypt text under a base64 cipher key, print the base64 payload.
pub fn encrypt(key_b64: &str, text: Option<&str>) -> Result<()> {
    let key = crypto::key_from_base64(key_b64).context("invalid cipher key")?;
    let text = match text {
        Some(t) => t.to_string(),
        None => read_stdin()?,
    };
    println!("{}", crypto::encrypt_string(&key, &text)?);
    Ok(())
}

/// Decrypt a base64 payload under a base64 cipher key, print the plaintext.
pub fn decrypt(key_b64: &str, payload: Option<&str>) -> Result<()> {
    let key = crypto::key_from_base64(key_b64).context("invalid cipher key")?;
    let payload = match payload {
        Some(p) => p.to_string(),
        None => read_stdin()?,
    };
    let plaintext = crypto::decrypt_string(&key, payload.trim())
        .context("payload rejected — wrong key or corrupted data?")?;
    println!("{plaintext}");
    Ok(())
}

fn read_stdin() -> Result<String> {
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf.trim_end_matches('\n').to_string())
}
