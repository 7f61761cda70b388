use clap::Parser;
use std::process;

use tally_cli::logging::init_tracing;
use tally_cli::setup::run_google_setup;

#[derive(Parser)]
#[command(name = "tally-google-setup")]
#[command(about = "Set up the Google Sheets integration for Tally")]
#[command(version)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    // Load .env file
    dotenvy::dotenv().ok();
    init_tracing();

    // Failures are already reported to the operator
    if run_google_setup().await.is_err() {
        process::exit(1);
    }
}
