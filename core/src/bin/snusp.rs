//! SNUSP command line interpreter
//!
//! Loads a program grid from a file and runs it against stdin/stdout.

use snusp_core::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run_cli().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
