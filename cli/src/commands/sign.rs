//! SIGN command - Sign a challenge message.

use agent_registry_core::crypto::KeyPair;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{HumanReadable, output, truncate};

/// Arguments for the sign command.
#[derive(Args)]
pub struct SignArgs {
    /// Message to sign (signed as its exact UTF-8 bytes)
    pub message: String,

    /// Secret key as 64 hex characters
    #[arg(long, env = "AGENT_REGISTRY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,
}

/// Signature over a message.
#[derive(Debug, Serialize)]
pub struct SignOutput {
    pub public_key: String,
    pub message: String,
    pub signature: String,
}

impl HumanReadable for SignOutput {
    fn print_human(&self) {
        println!("{}", "Message signed".green().bold());
        println!();
        println!("  {} {}", "Public key:".cyan(), truncate(&self.public_key, 16));
        println!("  {} {}", "Message:".cyan(), self.message);
        println!("  {} {}", "Signature:".cyan(), self.signature);
    }
}

/// Execute the sign command.
pub fn execute(human: bool, args: SignArgs) -> Result<()> {
    let keypair = KeyPair::from_hex(&args.secret_key)?;
    let signed = SignOutput {
        public_key: keypair.public_key_hex(),
        signature: keypair.sign_hex(&args.message),
        message: args.message,
    };

    output(&signed, human)
}
