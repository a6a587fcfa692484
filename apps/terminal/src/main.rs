//! # Anvil POS Terminal
//!
//! Binary entry point. Sets up tracing, loads the gateway configuration,
//! builds the shared HTTP client and hands control to the command loop.
//!
//! ## Startup Flow
//! ```text
//! main()
//!   │
//!   ├── init_tracing()          RUST_LOG override, logs on stderr
//!   ├── parse args              --config / --session / --help
//!   ├── GatewayConfig::load_or_default()
//!   ├── GatewayClient::new()
//!   └── Terminal::run()         interactive loop until quit
//! ```

mod app;
mod error;

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use anvil_gateway::{GatewayClient, GatewayConfig};

use crate::app::Terminal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<PathBuf> = None;
    let mut session_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--session" | "-s" => {
                if i + 1 < args.len() {
                    session_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {other}");
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = GatewayConfig::load_or_default(config_path);
    info!(base_url = %config.base_url, "Gateway configured");
    let gateway = Arc::new(GatewayClient::new(&config)?);

    let mut terminal = Terminal::new(gateway, session_path);
    terminal.run().await?;
    Ok(())
}

/// Logs go to stderr so they never interleave with the prompt.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,anvil=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    println!("Anvil POS terminal");
    println!();
    println!("Usage: anvil-terminal [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>    Gateway config file (TOML)");
    println!("  -s, --session <PATH>   Session file (TOML)");
    println!("  -h, --help             Show this help");
}
