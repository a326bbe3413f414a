//! Neural Link operator CLI
//!
//! # Usage
//!
//! ```bash
//! # Fetch a token from a running token server
//! neurallink token --server http://localhost:3000 --room lobby --username alice
//!
//! # Same, and decode the token with the project secret
//! neurallink token --verify-secret $LIVEKIT_API_SECRET
//!
//! # Also check which API key issued it
//! neurallink token --verify-key $LIVEKIT_API_KEY --verify-secret $LIVEKIT_API_SECRET
//!
//! # List Tavus personas (needs TAVUS_API_KEY)
//! neurallink personas
//! ```

mod tavus;
mod token_client;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use neurallink_token_server::token::TokenVerifier;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "neurallink")]
#[command(author, version)]
#[command(about = "Operator tools for the Neural Link room client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Request an access token from a running token server
    Token {
        /// Base URL of the token server
        #[arg(short, long, default_value = "http://localhost:3000")]
        server: String,

        /// Room to join (server picks one when omitted)
        #[arg(long)]
        room: Option<String>,

        /// Participant identity (server picks one when omitted)
        #[arg(long)]
        username: Option<String>,

        /// API key the token should be issued by (issuer is not checked when omitted)
        #[arg(long, requires = "verify_secret")]
        verify_key: Option<String>,

        /// API secret to check the signature and print the claims
        #[arg(long)]
        verify_secret: Option<String>,
    },

    /// List the personas on the Tavus account
    Personas {
        /// Tavus API base URL
        #[arg(long, default_value = tavus::DEFAULT_API_URL)]
        api_url: String,
    },
}

fn verifier(api_key: Option<String>, api_secret: String) -> TokenVerifier {
    match api_key {
        Some(key) => TokenVerifier::new(key, api_secret),
        None => TokenVerifier::any_issuer(api_secret),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match args.command {
        Command::Token {
            server,
            room,
            username,
            verify_key,
            verify_secret,
        } => {
            let response = token_client::fetch_token(&server, room.as_deref(), username.as_deref())
                .await
                .with_context(|| format!("Failed to fetch token from {}", server))?;

            println!("Room: {}", response.room_name);
            println!("Token: {}", response.token);

            if let Some(secret) = verify_secret {
                let claims = verifier(verify_key, secret)
                    .verify(&response.token)
                    .context("Token failed verification")?;
                println!("{}", serde_json::to_string_pretty(&claims)?);
            }
        }

        Command::Personas { api_url } => {
            let api_key = std::env::var(tavus::ENV_API_KEY)
                .ok()
                .filter(|k| !k.is_empty())
                .with_context(|| format!("{} not found in environment", tavus::ENV_API_KEY))?;

            let personas = tavus::TavusClient::new(api_url, api_key)
                .list_personas()
                .await?;
            print!("{}", tavus::format_personas(&personas));
        }
    }

    Ok(())
}
