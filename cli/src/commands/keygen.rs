//! KEYGEN command - Generate an Ed25519 key pair.

use agent_registry_core::crypto::KeyPair;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use super::{HumanReadable, output};

/// Arguments for the keygen command.
#[derive(Args)]
pub struct KeygenArgs {
    // No additional arguments needed
}

/// Generated key material.
#[derive(Debug, Serialize)]
pub struct KeygenOutput {
    pub public_key: String,
    pub secret_key: String,
}

impl HumanReadable for KeygenOutput {
    fn print_human(&self) {
        println!("{}", "Key pair generated".green().bold());
        println!();
        println!("  {} {}", "Public key:".cyan(), self.public_key);
        println!("  {} {}", "Secret key:".cyan(), self.secret_key);
        println!();
        println!(
            "  {}",
            "Store the secret key securely; it proves your agent's identity.".yellow()
        );
    }
}

/// Execute the keygen command.
pub fn execute(human: bool, _args: KeygenArgs) -> Result<()> {
    let keypair = KeyPair::generate();
    let generated = KeygenOutput {
        public_key: keypair.public_key_hex(),
        secret_key: keypair.secret_key_hex(),
    };

    output(&generated, human)
}
