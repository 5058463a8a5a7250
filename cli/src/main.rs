//! Command-line client for the RustChain agent registry.
//!
//! This CLI tool provides commands for agent registration:
//! - keygen: Generate an Ed25519 key pair
//! - sign: Sign a challenge message
//! - register: Prove key possession to a registry server and obtain an address
//!
//! Configuration via environment:
//! - AGENT_REGISTRY_URL: Base URL of the registry server (default: http://localhost:5001)
//! - AGENT_REGISTRY_SECRET_KEY: Secret key hex used by `sign` and `register`

mod commands;

use clap::{Parser, Subcommand};

use commands::{keygen::KeygenArgs, register::RegisterArgs, sign::SignArgs};

/// RustChain agent registry CLI
///
/// Generate keys, sign challenges and register agents. Prints JSON by
/// default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "agent-registry")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Registry server URL
    #[arg(
        long,
        env = "AGENT_REGISTRY_URL",
        default_value = "http://localhost:5001",
        global = true
    )]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new Ed25519 key pair
    Keygen(KeygenArgs),

    /// Sign a message with a secret key
    Sign(SignArgs),

    /// Register an agent with the registry server
    Register(RegisterArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keygen(args) => commands::keygen::execute(cli.human, args),
        Commands::Sign(args) => commands::sign::execute(cli.human, args),
        Commands::Register(args) => {
            commands::register::execute(&cli.url, cli.human, args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
