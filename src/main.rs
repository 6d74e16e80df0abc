//! End-to-end UI regression suite for the webcast management portal
//!
//! The binary runs the scripted user journey against the portal under
//! test, driving one headless Chromium session over the Chrome DevTools
//! Protocol and reporting a per-step verdict.

use clap::Parser;
use portal_e2e::{cli, commands::Commands, common::logging};

#[derive(Parser)]
#[command(name = "portal-e2e", about = "UI regression suite for the webcast management portal")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Credentials and target parameters may live in a local .env file
    dotenvy::dotenv().ok();

    logging::init_cli();

    let cli = Cli::parse();

    if let Err(e) = cli::dispatch(cli.command).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
