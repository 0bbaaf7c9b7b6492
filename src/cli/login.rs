use anyhow::Result;
use console::style;
use dialoguer::{Input, Password};

use dnote_core::crypto::keys;

/// Run the login key flow: derive the auth key (to send to the server) and
/// the master key (to unwrap the returned cipher_key_enc locally).
pub async fn run(email: Option<&str>, iterations: u32, json: bool) -> Result<()> {
    let email = match email {
        Some(e) => e.to_string(),
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password: String = Password::new().with_prompt("Password").interact()?;

    let derived = keys::login_keys(&email, &password, iterations).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&derived)?);
        return Ok(());
    }

    println!("\n{}", style("Login key material").bold());
    println!("  auth_key:   {}", derived.auth_key);
    println!("  master_key: {}", derived.master_key);
    println!(
        "\n{} the master key only unwraps cipher_key_enc; never send it anywhere.",
        style("note:").yellow()
    );
    Ok(())
}
