//! bankauth server: token renewal and bearer authorization over gRPC and
//! HTTP.
//!
//! Main entry point that parses the command line and dispatches to the
//! server or the operator token tooling.

use clap::Parser;

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli.execute().await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
