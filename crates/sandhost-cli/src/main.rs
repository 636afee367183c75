//! # sandhost-cli
//!
//! Inspect and build the binary messages that cross the sandbox boundary.
//!
//! ## Usage
//!
//! ```bash
//! # Decode
//! sandhost decode-call 0x00...
//! sandhost decode-result 0x03000000010203... --gas 21000
//! sandhost decode-log 0x0000000000000000
//! sandhost decode-program 0x03...
//!
//! # Encode
//! sandhost encode-call --kind create2 --gas 50000 --input 0x6000 --salt 0x...
//! sandhost encode-log --data 0x68656c6c6f --topic 0x...
//!
//! # Configuration
//! sandhost --config host.toml config --show
//! ```

use clap::{Parser, Subcommand};
use sandhost_evm::HostConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod error;
mod output;

pub use error::CliError;
pub use output::Output;

/// Sandhost boundary message tool
#[derive(Parser, Debug)]
#[command(name = "sandhost")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Host config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Decode a call message
    DecodeCall {
        /// Encoded message as hex
        hex: String,
    },
    /// Decode a call result
    DecodeResult {
        /// Encoded result as hex
        hex: String,
        /// Gas limit of the request, reported as gas left
        #[arg(long, default_value_t = 0)]
        gas: u64,
        /// Read gas left from a trailer after the created address
        #[arg(long)]
        gas_trailer: bool,
    },
    /// Decode a log record
    DecodeLog {
        /// Encoded record as hex
        hex: String,
    },
    /// Decode a program record
    DecodeProgram {
        /// Encoded program as hex
        hex: String,
    },
    /// Encode a call message
    EncodeCall(commands::encode::EncodeCallArgs),
    /// Encode a log record
    EncodeLog {
        /// Log data as hex
        #[arg(long, default_value = "")]
        data: String,
        /// Topic as 32-byte hex; repeat for more topics
        #[arg(long = "topic")]
        topics: Vec<String>,
    },
    /// Show or check configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<HostConfig, CliError> {
    match path {
        Some(path) => Ok(HostConfig::load(path)?),
        None => Ok(HostConfig::default()),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_ref())?;
    let json = cli.json;

    match cli.command {
        Commands::DecodeCall { hex } => commands::decode::call(&hex, json),
        Commands::DecodeResult {
            hex,
            gas,
            gas_trailer,
        } => commands::decode::result(&hex, gas, gas_trailer, &config, json),
        Commands::DecodeLog { hex } => commands::decode::log(&hex, json),
        Commands::DecodeProgram { hex } => commands::decode::program(&hex, json),
        Commands::EncodeCall(args) => commands::encode::call(&args, &config, json),
        Commands::EncodeLog { data, topics } => commands::encode::log(&data, &topics, &config, json),
        Commands::Config { show } => handle_config(&config, show, json),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.json;

    if let Err(e) = run(cli) {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(config: &HostConfig, show: bool, json: bool) -> Result<(), CliError> {
    if !show {
        Output::new(json)
            .field("status", "valid")
            .message("Use --show to display the configuration")
            .print();
        return Ok(());
    }

    if json {
        Output::new(true)
            .field_value("config", serde_json::to_value(config)?)
            .print();
    } else {
        Output::new(false).message(config.to_toml_string()?.trim_end()).print();
    }
    Ok(())
}
