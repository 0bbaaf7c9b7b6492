pub mod content;
pub mod highlight;
pub mod login;
pub mod register;

use clap::{Parser, Subcommand};

use dnote_core::crypto::keys::DEFAULT_KDF_ITERATIONS;

#[derive(Parser)]
#[command(name = "dnote-core", about = "End-to-end encryption core for the Dnote client.")]
#[command(version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Derive registration key material for a new account
    Register {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// PBKDF2 iteration count
        #[arg(long, default_value_t = DEFAULT_KDF_ITERATIONS)]
        iterations: u32,

        /// Print the key material as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive login key material for an existing account
    Login {
        /// Account email (prompted if omitted)
        #[arg(long)]
        email: Option<String>,

        /// PBKDF2 iteration count (as reported by the server for the account)
        #[arg(long, default_value_t = DEFAULT_KDF_ITERATIONS)]
        iterations: u32,

        /// Print the key material as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encrypt text under a base64 cipher key
    Encrypt {
        /// Cipher key, base64 (32 bytes decoded)
        #[arg(short, long)]
        key: String,

        /// Text to encrypt (reads stdin if omitted)
        text: Option<String>,
    },

    /// Decrypt a base64 payload under a base64 cipher key
    Decrypt {
        /// Cipher key, base64 (32 bytes decoded)
        #[arg(short, long)]
        key: String,

        /// base64 payload to decrypt (reads stdin if omitted)
        payload: Option<String>,
    },

    /// Render a search snippet, styling its highlight markers
    Highlight {
        /// Snippet text containing <dnotehl> / </dnotehl> markers
        snippet: String,
    },
}
