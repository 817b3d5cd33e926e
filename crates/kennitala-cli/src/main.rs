//! # kt CLI entry point
//!
//! Parses command-line arguments, installs the tracing subscriber, and
//! dispatches to subcommand handlers. Handlers write to stdout; logs go to
//! stderr.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kennitala_cli::generate::{run_generate, run_random, GenerateArgs, RandomArgs};
use kennitala_cli::validate::{run_inspect, run_validate, InspectArgs, ValidateArgs};
use kennitala_cli::EXIT_FAILURE;
use kennitala_core::CenturyPolicy;

/// Validate, inspect, and generate Icelandic kennitala identifiers.
#[derive(Parser, Debug)]
#[command(name = "kt", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    /// Without it, `RUST_LOG` is honoured and the default level is `warn`.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// How the trailing century marker is read and written
    /// (`reference` or `registry`).
    #[arg(
        long,
        global = true,
        env = "KT_CENTURY_POLICY",
        default_value_t = CenturyPolicy::Reference
    )]
    century_policy: CenturyPolicy,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check one or more identifiers. Exits 1 if any is invalid.
    Validate(ValidateArgs),

    /// Print everything decodable from one identifier.
    Inspect(InspectArgs),

    /// Build the identifier for a given date.
    Generate(GenerateArgs),

    /// Build identifiers for random dates in a range.
    Random(RandomArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(policy = %cli.century_policy, "kt starting");

    let policy = cli.century_policy;
    let mut stdout = std::io::stdout().lock();
    let result = match &cli.command {
        Commands::Validate(args) => run_validate(args, policy, &mut stdout),
        Commands::Inspect(args) => run_inspect(args, policy, &mut stdout),
        Commands::Generate(args) => run_generate(args, policy, &mut stdout),
        Commands::Random(args) => run_random(args, policy, &mut stdout),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
