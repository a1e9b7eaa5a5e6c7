//! # linkforge-core — Foundational Types for the Link Compiler
//!
//! This crate is the leaf of the linkforge workspace. It defines the
//! validated data model and the grammars that the build pipeline enforces.
//! Every other crate in the workspace depends on `linkforge-core`; it
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enumerations, exhaustive matches.** [`InputType`],
//!    [`PayWall`], and [`Modifier`] are single-source-of-truth enums.
//!    Adding a value forces every consumer to handle it at compile time,
//!    and string matching against them is exact and case-sensitive.
//!
//! 2. **Ids stay strings.** A [`LinkRecord`] id is an opaque numeric
//!    token, never parsed into an integer. Leading zeros and values past
//!    `u64::MAX` must round-trip byte-for-byte into the output artifact.
//!
//! 3. **Templates are parsed, never executed.** [`Template::parse`] is a
//!    small hand-rolled lexer that accepts a superset of what the runtime
//!    expander accepts, so no valid template is ever rejected at build
//!    time and no build-accepted template fails at runtime.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `linkforge-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod record;
pub mod template;
pub mod value;

// Re-export primary types for ergonomic imports.
pub use error::{
    BuildError, ConfigError, DuplicateIdError, Location, RecordRef, SchemaError, SchemaErrorKind,
    ValidationIssue,
};
pub use record::{InputType, LinkRecord, PayWall};
pub use template::{Modifier, Segment, Template, TemplateError};
pub use value::yaml_to_json;
