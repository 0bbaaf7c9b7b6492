mod cli;

use clap::Parser;
use cli::{Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dnote_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Register { email, iterations, json } => {
            cli::register::run(email.as_deref(), iterations, json).await
        }
        Command::Login { email, iterations, json } => {
            cli::login::run(email.as_deref(), iterations, json).await
        }
        Command::Encrypt { key, text } => cli::content::encrypt(&key, text.as_deref()),
        Command::Decrypt { key, payload } => cli::content::decrypt(&key, payload.as_deref()),
        Command::Highlight { snippet } => cli::highlight::run(&snippet),
    }
}
