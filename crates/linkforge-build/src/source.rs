//! # Source Loading
//!
//! Thin I/O wrapper: discovers `*.yaml` files in the links directory,
//! parses each into a JSON value tree, and hands the rest of the
//! pipeline a filesystem-order-independent list of sources.
//!
//! A file that fails to parse is a collected issue, not a fatal error —
//! the remaining sources still get validated so one run reports
//! everything.

use std::path::Path;

use linkforge_core::{yaml_to_json, BuildError, ConfigError, ValidationIssue};

/// One discovered source file, parsed but not yet validated.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Filename with extension, e.g. `maps.yaml`. Used in error messages.
    pub name: String,
    /// Filename stem, e.g. `maps`. Used for registry lookup.
    pub stem: String,
    /// The parsed document as a JSON value tree.
    pub value: serde_json::Value,
}

/// Sources that parsed plus issues for those that did not.
#[derive(Debug, Default)]
pub struct LoadedSources {
    pub sources: Vec<SourceFile>,
    pub issues: Vec<ValidationIssue>,
}

/// Load every `*.yaml`/`*.yml` file in `dir`, sorted by filename so the
/// load order never depends on filesystem iteration.
///
/// # Errors
///
/// `BuildError::Io` if the directory cannot be read, and
/// `BuildError::Config(ConfigError::NoSources)` if it holds no YAML
/// files at all.
pub fn load_sources(dir: &Path) -> Result<LoadedSources, BuildError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yaml" || e == "yml");
        if path.is_file() && is_yaml {
            paths.push(path);
        }
    }
    paths.sort();

    if paths.is_empty() {
        return Err(ConfigError::NoSources {
            dir: dir.display().to_string(),
        }
        .into());
    }

    let mut loaded = LoadedSources::default();
    for path in paths {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let content = std::fs::read_to_string(&path)?;
        let yaml: serde_yaml::Value = match serde_yaml::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                loaded.issues.push(ValidationIssue::Source {
                    source: name,
                    reason: format!("YAML parse error: {e}"),
                });
                continue;
            }
        };
        match yaml_to_json(&yaml) {
            Ok(value) => {
                tracing::debug!(source = %name, "loaded source");
                loaded.sources.push(SourceFile { name, stem, value });
            }
            Err(reason) => loaded.issues.push(ValidationIssue::Source {
                source: name,
                reason,
            }),
        }
    }
    Ok(loaded)
}
