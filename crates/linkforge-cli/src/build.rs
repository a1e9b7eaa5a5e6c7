//! # Build Subcommand
//!
//! Runs the full pipeline and writes the JSON artifact. Nothing is
//! written unless every source validated cleanly.

use std::path::PathBuf;

use clap::Args;

use linkforge_build::{compile_dir, write_artifact, CategoryRegistry};
use linkforge_core::BuildError;

/// Arguments for the build subcommand.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory containing the YAML link sources.
    #[arg(long, default_value = "links")]
    pub links_dir: PathBuf,

    /// Path of the JSON artifact to write.
    #[arg(long, default_value = "links.json")]
    pub out: PathBuf,
}

/// Validate all sources and write the artifact on success.
pub fn run(args: &BuildArgs) -> Result<(), BuildError> {
    let registry = CategoryRegistry::builtin();
    let corpus = compile_dir(&registry, &args.links_dir)?;
    write_artifact(&corpus, &args.out)?;
    println!(
        "wrote {} ({} links across {} categories)",
        args.out.display(),
        corpus.record_count(),
        corpus.category_count()
    );
    Ok(())
}
