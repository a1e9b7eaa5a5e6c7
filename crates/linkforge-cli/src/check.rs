//! # Check Subcommand
//!
//! Validate-only mode for CI: performs every check the build performs,
//! reports success or the collected errors, and writes nothing.

use std::path::PathBuf;

use clap::Args;

use linkforge_build::{compile_dir, CategoryRegistry};
use linkforge_core::BuildError;

/// Arguments for the check subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Directory containing the YAML link sources.
    #[arg(long, default_value = "links")]
    pub links_dir: PathBuf,
}

/// Validate all sources without writing any output.
pub fn run(args: &CheckArgs) -> Result<(), BuildError> {
    let registry = CategoryRegistry::builtin();
    let corpus = compile_dir(&registry, &args.links_dir)?;
    println!(
        "validation passed: {} links across {} categories, no errors",
        corpus.record_count(),
        corpus.category_count()
    );
    Ok(())
}
