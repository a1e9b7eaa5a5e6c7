//! # Category Registry — File Stem to Category Mapping
//!
//! Every source file owns exactly one category, declared here. The table
//! is build configuration, not user data: adding a category means adding
//! both the YAML file and a registry entry, and a mismatch between the
//! two fails the whole build rather than silently skipping the file.
//!
//! Declaration order matters: the output artifact lists categories in
//! registry order, not alphabetical order and not filesystem iteration
//! order.

use linkforge_core::ConfigError;

/// The built-in file-stem → category table, in artifact order.
const BUILTIN: &[(&str, &str)] = &[
    ("archives-press", "Archives & Press"),
    ("environment-science", "Environment & Science"),
    ("government-legal", "Government & Legal"),
    ("hash-cracking", "Hash Cracking"),
    ("historical", "Historical"),
    ("maps", "Maps"),
    ("network-scanning", "Network Scanning"),
    ("people-search", "People Search"),
    ("search-files", "Search & Files"),
    ("social-video", "Social & Video"),
    ("social-profiles", "Social Profiles"),
    ("threat-intelligence", "Threat Intelligence"),
    ("username-search", "Username Search"),
    ("validation-tools", "Validation & Tools"),
    ("vehicle-lookup", "Vehicle Lookup"),
    ("whois-dns", "WHOIS & DNS"),
];

/// An explicit, immutable mapping from source file stems to category
/// labels. Loaded once per run and passed by reference into the
/// aggregator; never global mutable state.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    entries: Vec<(String, String)>,
}

impl CategoryRegistry {
    /// The registry shipped with the build.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN
                .iter()
                .map(|(stem, label)| (stem.to_string(), label.to_string())),
        )
    }

    /// Build a registry from explicit entries, preserving declaration
    /// order. Mostly useful for tests and embedding.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Resolve a source file stem to its category label.
    ///
    /// # Errors
    ///
    /// `ConfigError::UnregisteredSource` when the stem has no entry;
    /// the caller must abort the whole run.
    pub fn resolve(&self, stem: &str) -> Result<&str, ConfigError> {
        self.entries
            .iter()
            .find(|(s, _)| s == stem)
            .map(|(_, label)| label.as_str())
            .ok_or_else(|| ConfigError::UnregisteredSource {
                source: stem.to_string(),
            })
    }

    /// Position of a stem in declaration order, for deterministic
    /// category ordering independent of filesystem iteration.
    pub fn position(&self, stem: &str) -> Option<usize> {
        self.entries.iter().position(|(s, _)| s == stem)
    }

    /// All registered stems in declaration order.
    pub fn stems(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(s, _)| s.as_str())
    }

    /// Number of registered categories.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
