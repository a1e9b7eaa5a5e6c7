//! # linkforge-build — The Link Corpus Build Pipeline
//!
//! Compiles a directory of YAML-declared link records into one validated
//! JSON artifact. The pipeline is a single-pass, synchronous batch
//! transformation:
//!
//! 1. [`source::load_sources`] discovers and parses `links/*.yaml`;
//! 2. [`registry::CategoryRegistry`] maps each file to its category —
//!    an unmapped file aborts the run;
//! 3. [`validate::validate_record`] checks every record, collecting all
//!    violations rather than stopping at the first;
//! 4. [`corpus::aggregate`] adds the cross-source global id-uniqueness
//!    check and orders categories by registry declaration;
//! 5. [`emit::to_json_string`] renders byte-stable JSON.
//!
//! The run either fully succeeds and the artifact is written, or fails
//! with the complete issue list and writes nothing. Sources carry no
//! data dependencies on each other during per-record validation, but the
//! pipeline stays single-threaded: corpora are a few hundred records and
//! determinism of ordering and of the error list is the priority.

use std::path::Path;

pub mod corpus;
pub mod emit;
pub mod registry;
pub mod source;
pub mod validate;

pub use corpus::{aggregate, CategoryGroup, Corpus};
pub use emit::{to_json_string, write_artifact};
pub use registry::CategoryRegistry;
pub use source::{load_sources, LoadedSources, SourceFile};

use linkforge_core::BuildError;

/// Run the whole pipeline over a links directory: load, resolve,
/// validate, aggregate.
///
/// # Errors
///
/// Any [`BuildError`]: fatal configuration problems, IO failures, or the
/// complete collected validation issue list.
pub fn compile_dir(registry: &CategoryRegistry, links_dir: &Path) -> Result<Corpus, BuildError> {
    let loaded = source::load_sources(links_dir)?;
    corpus::aggregate(registry, loaded.sources, loaded.issues)
}
