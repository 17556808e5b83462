//! Conversation Clustering CLI
//!
//! Thin caller around `convo-cluster-core`: reads request documents, runs the
//! `cluster` operation and writes response documents.
//!
//! # Commands
//!
//! - `cluster <INPUT>...`: cluster one or more request files (`-` = stdin)
//! - `features <INPUT>`: show the attribute columns derived for a request
//! - `config`: print the effective configuration as TOML
//!
//! # Exit Codes
//! - 0: Success
//! - 1: Request rejected by input validation
//! - 2: Any other failure (I/O, malformed JSON, invalid config)

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod error;

pub use error::{exit_code_for_error, CliExitCode};

/// Conversation clustering into a two-level taxonomy
#[derive(Parser)]
#[command(name = "convo-cluster")]
#[command(version)]
#[command(about = "Cluster conversations into high-level clusters and subclusters")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cluster request documents
    Cluster(commands::cluster::ClusterArgs),
    /// Show the attribute feature columns derived for a request
    Features(commands::features::FeaturesArgs),
    /// Print the effective configuration
    Config(commands::config::ConfigArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Cluster(args) => commands::cluster::cluster_command(args).await,
        Commands::Features(args) => commands::features::features_command(args).await,
        Commands::Config(args) => commands::config::config_command(args),
    };

    let exit_code = match result {
        Ok(()) => CliExitCode::Success,
        Err(err) => {
            eprintln!("Error: {err:#}");
            exit_code_for_error(&err)
        }
    };

    std::process::exit(exit_code.into());
}
