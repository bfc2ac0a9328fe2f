//! # pak3r Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the entry point of the pak3r CLI. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handler
//!
//! ## Examples
//!
//! ```bash
//! # Pack the project in the current directory into dist/A4T1-<name>.pk3
//! pak3r pack
//!
//! # Same, with debug logging on stderr
//! pak3r -vv pack
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (or `RUST_LOG`)
//! 3. Route to the command handler
//! 4. Print any error and exit with status 1
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command logic (pack)
mod common; // Shared utilities (archive, fs)
mod core; // Core infrastructure (config, errors)

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "pak3r",
    about = "Packs a project's src/ folder and package.json into a .pk3 archive",
    long_about = "Turns the current package into a pk3 and puts it in the dist folder.\n\
                  The archive holds package.json as manifest.json plus every file under src/.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available commands.
#[derive(Parser, Debug)]
enum Commands {
    /// Turns the current package into a pk3 and puts it in the dist folder
    Pack(commands::pack::PackArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Pack(args) => commands::pack::handle_pack(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_pack_with_verbosity() {
        let cli = Cli::try_parse_from(["pak3r", "-vv", "pack"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Pack(_)));
    }

    #[test]
    fn test_pack_rejects_arguments() {
        assert!(Cli::try_parse_from(["pak3r", "pack", "extra"]).is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["pak3r"]).is_err());
    }
}
