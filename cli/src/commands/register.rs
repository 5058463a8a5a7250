//! REGISTER command - Register an agent with the registry server.

use agent_registry_core::crypto::KeyPair;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{HumanReadable, make_request, output};

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    /// Agent name (ASCII letters and digits only)
    #[arg(short, long)]
    pub name: String,

    /// Hardware fingerprint to attach to the registration
    #[arg(short, long)]
    pub fingerprint: String,

    /// Secret key as 64 hex characters
    #[arg(long, env = "AGENT_REGISTRY_SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Challenge message to sign (default: "rustchain-register:<name>")
    #[arg(short, long)]
    pub message: Option<String>,
}

/// Request body for registering an agent.
#[derive(Debug, Serialize)]
struct RegisterRequest {
    agent_name: String,
    hfp: String,
    public_key: String,
    signature: String,
    message: String,
}

/// Response from a successful registration.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterResponse {
    pub status: String,
    pub message: String,
    pub rtc_address: String,
    pub details: RegistrationDetails,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RegistrationDetails {
    pub agent: String,
    pub hfp: String,
    pub status: String,
}

impl HumanReadable for RegisterResponse {
    fn print_human(&self) {
        println!("{}", self.message.green().bold());
        println!();
        println!("  {} {}", "Address:".cyan(), self.rtc_address.bold());
        println!("  {} {}", "Agent:".cyan(), self.details.agent);
        println!("  {} {}", "Fingerprint:".cyan(), self.details.hfp);
        println!("  {} {}", "Status:".cyan(), self.details.status);
    }
}

/// Build the signed request body.
fn build_request(keypair: &KeyPair, args: RegisterArgs) -> RegisterRequest {
    let message = args
        .message
        .unwrap_or_else(|| format!("rustchain-register:{}", args.name));

    RegisterRequest {
        public_key: keypair.public_key_hex(),
        signature: keypair.sign_hex(&message),
        agent_name: args.name,
        hfp: args.fingerprint,
        message,
    }
}

/// Execute the register command.
pub async fn execute(base_url: &str, human: bool, args: RegisterArgs) -> Result<()> {
    let keypair = KeyPair::from_hex(&args.secret_key)?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/register", base_url.trim_end_matches('/'));

    let request_body = build_request(&keypair, args);

    let response: RegisterResponse = make_request(client.post(&url).json(&request_body)).await?;

    output(&response, human)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_registry_core::ProofVerifier;

    fn args(message: Option<&str>) -> RegisterArgs {
        RegisterArgs {
            name: "Node7".to_string(),
            fingerprint: "hfp-1".to_string(),
            secret_key: "07".repeat(32),
            message: message.map(String::from),
        }
    }

    #[test]
    fn test_default_message_is_signed() {
        let keypair = KeyPair::from_bytes(&[7u8; 32]);
        let request = build_request(&keypair, args(None));

        assert_eq!(request.message, "rustchain-register:Node7");
        assert!(
            ProofVerifier::from_build()
                .verify(&request.public_key, &request.message, &request.signature)
                .is_verified()
        );
    }

    #[test]
    fn test_explicit_message_is_used() {
        let keypair = KeyPair::from_bytes(&[7u8; 32]);
        let request = build_request(&keypair, args(Some("challenge-99")));

        assert_eq!(request.message, "challenge-99");
        assert_eq!(request.hfp, "hfp-1");
        assert_eq!(request.agent_name, "Node7");
    }
}
