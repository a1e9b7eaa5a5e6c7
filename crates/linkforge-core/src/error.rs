//! # Error Types — Build Pipeline Taxonomy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - `ConfigError` invalidates the premise that sources map to
//!   categories, so it aborts the run immediately.
//! - Per-record problems (`SchemaError`, including template syntax) and
//!   cross-record problems (`DuplicateIdError`) are collected, never
//!   fail-fast: one run surfaces every problem in the corpus.
//! - Every collected error carries enough context to locate and fix it:
//!   source file, record identifier (or positional index), field, and
//!   reason.

use thiserror::Error;

use crate::template::TemplateError;

/// Build configuration problem. Fatal: no record validation can proceed.
// `Display`/`Error` are written by hand: thiserror treats any field named
// `source` as the error source and requires it to implement `Error`,
// which `String` does not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A source file has no entry in the file→category registry.
    /// Adding a category requires updating both the data source and the
    /// registry; a mismatch fails the whole build rather than silently
    /// skipping the file.
    UnregisteredSource {
        /// Filename of the unmapped source.
        source: String,
    },

    /// The links directory contains no source files at all.
    NoSources {
        /// Directory that was scanned.
        dir: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnregisteredSource { source } => {
                write!(f, "source '{source}' has no category mapping in the registry")
            }
            Self::NoSources { dir } => write!(f, "no link sources found in {dir}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Identifies a record within its source: by id when the source declared
/// one, otherwise by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordRef {
    /// The record's declared id.
    Id(String),
    /// Zero-based index within the source file.
    Index(usize),
}

impl std::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id={id}"),
            Self::Index(i) => write!(f, "entry #{i}"),
        }
    }
}

/// Where a record lives: source file plus record reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// Source filename.
    pub source: String,
    /// Record within that source.
    pub record: RecordRef,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.source, self.record)
    }
}

/// One field of one record violates the schema. Collected, not fatal.
// `Display`/`Error` are written by hand; see `ConfigError` for why the
// `source` field rules out the thiserror derive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// Source filename.
    pub source: String,
    /// Record within that source.
    pub record: RecordRef,
    /// Name of the violating field.
    pub field: &'static str,
    /// What went wrong.
    pub kind: SchemaErrorKind,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}: field '{}': {}",
            self.source, self.record, self.field, self.kind
        )
    }
}

impl std::error::Error for SchemaError {}

/// The specific schema violation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaErrorKind {
    #[error("missing required field")]
    Missing,

    #[error("must not be empty")]
    Empty,

    #[error("expected {expected}")]
    WrongType {
        /// Human-readable expected type, e.g. "a string".
        expected: &'static str,
    },

    /// A `types` element outside the closed enumeration.
    #[error("unknown type '{0}'")]
    UnknownType(String),

    #[error("payWall must be one of Free, Freemium, Paid; got '{0}'")]
    UnknownPayWall(String),

    /// Ids are opaque numeric tokens: digits only, kept as strings.
    #[error("id must be a string of digits; got '{0}'")]
    MalformedId(String),

    #[error("provider must not contain whitespace; got '{0}'")]
    ProviderWhitespace(String),

    /// URL placeholder syntax error, specialized per template grammar.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Two records anywhere in the corpus share an id. Collected after all
/// per-record checks so both locations can be reported.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("duplicate id '{id}': first declared in {first}, again in {second}")]
pub struct DuplicateIdError {
    /// The colliding id.
    pub id: String,
    /// Location of the first declaration.
    pub first: Location,
    /// Location of the colliding declaration.
    pub second: Location,
}

/// One collected validation problem.
// `Display`/`Error`/`From` are written by hand; see `ConfigError` for
// why the `source` field rules out the thiserror derive. The `Schema`
// and `Duplicate` variants keep transparent semantics: their `Display`
// and `Error::source` delegate to the wrapped error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    Schema(SchemaError),

    Duplicate(DuplicateIdError),

    /// A source-level shape problem: unparseable YAML, a top level that
    /// is not a list, or an entry that is not a mapping.
    Source {
        /// Source filename.
        source: String,
        /// Human-readable description of the shape problem.
        reason: String,
    },
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Schema(e) => std::fmt::Display::fmt(e, f),
            Self::Duplicate(e) => std::fmt::Display::fmt(e, f),
            Self::Source { source, reason } => write!(f, "{source}: {reason}"),
        }
    }
}

impl std::error::Error for ValidationIssue {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Schema(e) => e.source(),
            Self::Duplicate(e) => e.source(),
            Self::Source { .. } => None,
        }
    }
}

impl From<SchemaError> for ValidationIssue {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

impl From<DuplicateIdError> for ValidationIssue {
    fn from(e: DuplicateIdError) -> Self {
        Self::Duplicate(e)
    }
}

/// Top-level error type for a build run.
#[derive(Error, Debug)]
pub enum BuildError {
    /// Fatal configuration problem; aborts before validation.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The corpus failed validation; carries every collected issue.
    #[error("validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationIssue>),

    /// Serializing the validated corpus failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// IO error reading sources or writing the artifact.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BuildError {
    /// The collected issues, when this is a validation failure.
    pub fn issues(&self) -> &[ValidationIssue] {
        match self {
            Self::Validation(issues) => issues,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_names_source_record_field() {
        let err = SchemaError {
            source: "people-search.yaml".to_string(),
            record: RecordRef::Id("100".to_string()),
            field: "display",
            kind: SchemaErrorKind::Missing,
        };
        let msg = err.to_string();
        assert!(msg.contains("people-search.yaml"));
        assert!(msg.contains("id=100"));
        assert!(msg.contains("'display'"));
        assert!(msg.contains("missing required field"));
    }

    #[test]
    fn test_record_ref_falls_back_to_index() {
        let err = SchemaError {
            source: "maps.yaml".to_string(),
            record: RecordRef::Index(3),
            field: "id",
            kind: SchemaErrorKind::Missing,
        };
        assert!(err.to_string().contains("entry #3"));
    }

    #[test]
    fn test_duplicate_id_error_names_both_locations() {
        let err = DuplicateIdError {
            id: "100".to_string(),
            first: Location {
                source: "maps.yaml".to_string(),
                record: RecordRef::Id("100".to_string()),
            },
            second: Location {
                source: "historical.yaml".to_string(),
                record: RecordRef::Id("100".to_string()),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("maps.yaml"));
        assert!(msg.contains("historical.yaml"));
    }

    #[test]
    fn test_template_error_surfaces_through_schema_error() {
        let err = SchemaError {
            source: "maps.yaml".to_string(),
            record: RecordRef::Id("7".to_string()),
            field: "url",
            kind: SchemaErrorKind::Template(TemplateError::UnknownModifier {
                name: "bogus".to_string(),
            }),
        };
        assert!(err.to_string().contains("unknown modifier 'bogus'"));
    }
}
