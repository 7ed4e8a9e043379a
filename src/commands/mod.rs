//! CLI command definitions and dispatch.

pub mod keygen;
pub mod serve;
pub mod token;

use clap::{Parser, Subcommand};

/// bankauth: access-token renewal and bearer authorization service
#[derive(Debug, Parser)]
#[command(name = "bankauth-server", version, about, long_about = None)]
pub struct Cli {
    /// Environment overlay loaded from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the gRPC server, HTTP gateway and task processor
    Serve,
    /// Issue or inspect tokens with the configured key
    Token(token::TokenArgs),
    /// Generate a random symmetric token key
    Keygen,
}

impl Cli {
    /// Execute the selected command
    pub async fn execute(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Commands::Serve) {
            Commands::Serve => serve::execute(&self.env).await,
            Commands::Token(args) => token::execute(&args, &self.env),
            Commands::Keygen => {
                println!("{}", keygen::generate_key());
                Ok(())
            }
        }
    }
}
