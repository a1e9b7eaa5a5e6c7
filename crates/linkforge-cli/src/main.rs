//! # linkforge CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules. Exit status
//! is non-zero whenever any validation error was collected.

use std::process::ExitCode;

use clap::Parser;

/// linkforge — compile YAML link sources into one validated JSON artifact.
///
/// Validates every record (schema, enumerations, URL-template syntax,
/// global id uniqueness) and emits deterministic JSON for clean diffs.
#[derive(Parser, Debug)]
#[command(name = "linkforge", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Validate all sources and write the JSON artifact.
    Build(linkforge_cli::build::BuildArgs),
    /// Validate all sources; write nothing.
    Check(linkforge_cli::check::CheckArgs),
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Build(args) => linkforge_cli::build::run(&args),
        Commands::Check(args) => linkforge_cli::check::run(&args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            linkforge_cli::report(&err);
            ExitCode::FAILURE
        }
    }
}
