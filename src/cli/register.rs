use anyhow::Result;
use console::style;
use dialoguer::{Input, Password};

use dnote_core::crypto::keys;

/// Run the registration key flow: derive and print the key material a signup
/// request needs. The password never leaves this process.
pub async fn run(email: Option<&str>, iterations: u32, json: bool) -> Result<()> {
    let email = match email {
        Some(e) => e.to_string(),
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password: String = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords don't match.")
        .interact()?;

    let derived = keys::register_keys(&email, &password, iterations).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&derived)?);
        return Ok(());
    }

    println!("\n{}", style("Registration key material").bold());
    println!("  auth_key:       {}", derived.auth_key);
    println!("  cipher_key_enc: {}", derived.cipher_key_enc);
    println!("  cipher_key:     {}", derived.cipher_key);
    println!(
        "\n{} send auth_key and cipher_key_enc to the server; cipher_key stays on this device.",
        style("note:").yellow()
    );
    Ok(())
}
