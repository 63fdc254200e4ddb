//! A tool that ranks GitHub repositories by activity and health.

use clap::Parser;
use repo_rank::commands::{Args, run};

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    // Captured once so every aggregate and score in this run shares one clock.
    let as_of = chrono::Utc::now();

    if let Err(e) = run(args, as_of).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
