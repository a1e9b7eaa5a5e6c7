//! # Artifact Emission — Deterministic JSON
//!
//! Serializes a validated [`Corpus`] into the output artifact. The text
//! must be byte-identical across runs and hosts so regenerated output
//! diffs cleanly in version control:
//!
//! - top-level keys are category names in registry declaration order
//!   (the corpus already carries that order; serialization streams it);
//! - per-record keys follow the fixed schema order, which is the field
//!   declaration order of `LinkRecord`;
//! - 2-space indentation, `\n` line endings, one trailing newline;
//! - nothing locale- or environment-dependent is consulted.

use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use linkforge_core::BuildError;

use crate::corpus::Corpus;

impl Serialize for Corpus {
    /// Top-level shape: a map from category name to its record array.
    /// Entries stream in corpus order, so the artifact inherits the
    /// registry's category ordering.
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups().len()))?;
        for group in self.groups() {
            map.serialize_entry(&group.name, &group.records)?;
        }
        map.end()
    }
}

/// Render the corpus as canonical artifact text.
pub fn to_json_string(corpus: &Corpus) -> Result<String, BuildError> {
    let mut text = serde_json::to_string_pretty(corpus)?;
    text.push('\n');
    Ok(text)
}

/// Write the artifact to `path`. Called only after validation fully
/// succeeded; a failed run never reaches this point.
pub fn write_artifact(corpus: &Corpus, path: &Path) -> Result<(), BuildError> {
    let text = to_json_string(corpus)?;
    std::fs::write(path, text)?;
    Ok(())
}
