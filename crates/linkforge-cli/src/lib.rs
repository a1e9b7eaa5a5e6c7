//! # linkforge-cli — Command Handlers
//!
//! The whole CLI surface is two subcommands: `build` (validate and write
//! the artifact) and `check` (validate only, write nothing). Both exit
//! non-zero whenever any validation error was collected.

use linkforge_core::BuildError;

pub mod build;
pub mod check;

/// Print a build failure to stderr with enough context to locate and
/// fix every collected issue.
pub fn report(err: &BuildError) {
    match err {
        BuildError::Validation(issues) => {
            eprintln!("validation failed with {} error(s):", issues.len());
            for issue in issues {
                eprintln!("  error: {issue}");
            }
        }
        other => eprintln!("error: {other}"),
    }
}
