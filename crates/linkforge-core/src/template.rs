//! # URL Template Grammar
//!
//! Parses the `{value}` / `{value:modifier}` placeholder syntax used in
//! link URLs. The build pipeline validates syntax only; the consumer that
//! performs the actual substitution at runtime shares this grammar, so the
//! parser here accepts a strict superset of what the runtime accepts:
//!
//! - `{value}` — substitute the user input with no transformation.
//! - `{value:urlEncode}` — substitute after applying a registered
//!   modifier. `|` is accepted as an alternative separator because the
//!   runtime scanner recognizes both.
//! - Literal text outside braces passes through untouched, including a
//!   bare `}` that never opened a placeholder.
//!
//! The lexer is a three-state machine (literal, placeholder key,
//! placeholder modifier) rather than a regular expression, which keeps
//! the unterminated-brace and nested-brace error cases unambiguous and
//! makes modifier validation an explicit registry lookup.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error raised while parsing a URL template.
///
/// Byte positions refer to the offending `{` or the placeholder body so
/// the error message can point at the exact spot in the source URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A `{` was never closed before the end of the URL.
    #[error("unterminated '{{' at byte {pos}")]
    Unterminated {
        /// Byte offset of the opening brace.
        pos: usize,
    },

    /// A `{` appeared inside an open placeholder.
    #[error("nested '{{' inside placeholder at byte {pos}")]
    NestedBrace {
        /// Byte offset of the inner brace.
        pos: usize,
    },

    /// `{}` — a placeholder with no body.
    #[error("empty placeholder at byte {pos}")]
    EmptyPlaceholder {
        /// Byte offset of the opening brace.
        pos: usize,
    },

    /// The token before the separator was not `value`.
    #[error("placeholder key must be 'value', got '{key}'")]
    UnknownKey {
        /// The rejected key token.
        key: String,
    },

    /// `{value:}` — a separator with nothing after it.
    #[error("empty modifier at byte {pos}")]
    EmptyModifier {
        /// Byte offset of the opening brace.
        pos: usize,
    },

    /// The modifier token is not in the registry.
    #[error("unknown modifier '{name}'")]
    UnknownModifier {
        /// The rejected modifier token.
        name: String,
    },
}

/// All registered placeholder modifiers.
///
/// A placeholder without an explicit modifier is equivalent to
/// [`Modifier::NoEncoding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    UrlEncode,
    Lower,
    Upper,
    Base64,
    StripPunct,
    SpaceToNothing,
    SpaceToDash,
    SpaceToDot,
    FirstName,
    LastName,
    UserFromEmail,
    DomainFromEmail,
    NoEncoding,
    FirstIp,
}

impl Modifier {
    /// Returns every registered modifier in declaration order.
    pub fn all() -> &'static [Modifier] {
        &[
            Self::UrlEncode,
            Self::Lower,
            Self::Upper,
            Self::Base64,
            Self::StripPunct,
            Self::SpaceToNothing,
            Self::SpaceToDash,
            Self::SpaceToDot,
            Self::FirstName,
            Self::LastName,
            Self::UserFromEmail,
            Self::DomainFromEmail,
            Self::NoEncoding,
            Self::FirstIp,
        ]
    }

    /// The exact token form used inside placeholders.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UrlEncode => "urlEncode",
            Self::Lower => "lower",
            Self::Upper => "upper",
            Self::Base64 => "base64",
            Self::StripPunct => "stripPunct",
            Self::SpaceToNothing => "spaceToNothing",
            Self::SpaceToDash => "spaceToDash",
            Self::SpaceToDot => "spaceToDot",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::UserFromEmail => "userFromEmail",
            Self::DomainFromEmail => "domainFromEmail",
            Self::NoEncoding => "noEncoding",
            Self::FirstIp => "firstIP",
        }
    }
}

impl FromStr for Modifier {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Modifier::all()
            .iter()
            .find(|m| m.as_str() == s)
            .copied()
            .ok_or(())
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexed span of a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied through unchanged at expansion time.
    Literal(String),
    /// A `{value...}` span with its (possibly implicit) modifier.
    Placeholder(Modifier),
}

/// A parsed URL template: the ordered segments of a link URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

/// Lexer states. The machine enters `Key` on `{`, moves to `Modifier` on
/// the first separator, and returns to `Literal` on `}`.
enum State {
    Literal,
    Key,
    Modifier,
}

impl Template {
    /// Parse a raw URL string into segments, validating every placeholder.
    ///
    /// A URL with zero placeholders is valid: it lexes to a single
    /// literal segment (or none, for the empty string — emptiness is a
    /// schema concern, not a template concern).
    ///
    /// # Errors
    ///
    /// Returns one [`TemplateError`] per bad placeholder, in source
    /// order, each naming the offending token or byte position. After a
    /// bad placeholder body the lexer resumes at its closing `}`, so
    /// sibling placeholders are still inspected; only a nested `{` or an
    /// unterminated one ends the scan, since nothing after them lexes
    /// unambiguously.
    pub fn parse(input: &str) -> Result<Self, Vec<TemplateError>> {
        let mut segments = Vec::new();
        let mut errors = Vec::new();
        let mut state = State::Literal;
        let mut literal = String::new();
        let mut token = String::new();
        // Byte offset of the `{` that opened the current placeholder.
        let mut open_pos = 0;
        // Set when the key was already rejected: the modifier half is
        // skipped rather than reported as a second error.
        let mut key_failed = false;

        for (pos, ch) in input.char_indices() {
            match state {
                State::Literal => {
                    if ch == '{' {
                        if !literal.is_empty() {
                            segments.push(Segment::Literal(std::mem::take(&mut literal)));
                        }
                        open_pos = pos;
                        token.clear();
                        state = State::Key;
                    } else {
                        literal.push(ch);
                    }
                }
                State::Key => match ch {
                    '{' => {
                        errors.push(TemplateError::NestedBrace { pos });
                        return Err(errors);
                    }
                    '}' => {
                        if token.is_empty() {
                            errors.push(TemplateError::EmptyPlaceholder { pos: open_pos });
                        } else if let Err(e) = check_key(&token) {
                            errors.push(e);
                        } else {
                            segments.push(Segment::Placeholder(Modifier::NoEncoding));
                        }
                        token.clear();
                        state = State::Literal;
                    }
                    ':' | '|' => {
                        if let Err(e) = check_key(&token) {
                            errors.push(e);
                            key_failed = true;
                        }
                        token.clear();
                        state = State::Modifier;
                    }
                    _ => token.push(ch),
                },
                State::Modifier => match ch {
                    '{' => {
                        errors.push(TemplateError::NestedBrace { pos });
                        return Err(errors);
                    }
                    '}' => {
                        if key_failed {
                            key_failed = false;
                        } else if token.is_empty() {
                            errors.push(TemplateError::EmptyModifier { pos: open_pos });
                        } else {
                            match token.parse::<Modifier>() {
                                Ok(modifier) => segments.push(Segment::Placeholder(modifier)),
                                Err(()) => errors.push(TemplateError::UnknownModifier {
                                    name: std::mem::take(&mut token),
                                }),
                            }
                        }
                        token.clear();
                        state = State::Literal;
                    }
                    _ => token.push(ch),
                },
            }
        }

        match state {
            State::Literal => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(literal));
                }
            }
            State::Key | State::Modifier => {
                errors.push(TemplateError::Unterminated { pos: open_pos });
            }
        }

        if errors.is_empty() {
            Ok(Self { segments })
        } else {
            Err(errors)
        }
    }

    /// The ordered segments of this template.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Number of placeholders in this template.
    pub fn placeholder_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, Segment::Placeholder(_)))
            .count()
    }
}

fn check_key(key: &str) -> Result<(), TemplateError> {
    if key == "value" {
        Ok(())
    } else {
        Err(TemplateError::UnknownKey {
            key: key.to_string(),
        })
    }
}

impl fmt::Display for Template {
    /// Reassemble the canonical text form: implicit-modifier placeholders
    /// print as `{value}`, explicit ones with the `:` separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => f.write_str(text)?,
                Segment::Placeholder(Modifier::NoEncoding) => f.write_str("{value}")?,
                Segment::Placeholder(modifier) => write!(f, "{{value:{modifier}}}")?,
            }
        }
        Ok(())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The lexer never panics, whatever bytes arrive.
        #[test]
        fn parse_never_panics(input in ".*") {
            let _ = Template::parse(&input);
        }

        /// Brace-free input is always a single literal (or empty).
        #[test]
        fn brace_free_input_is_literal(input in "[^{}]*") {
            let t = Template::parse(&input).unwrap();
            if input.is_empty() {
                prop_assert!(t.segments().is_empty());
            } else {
                prop_assert_eq!(t.segments(), &[Segment::Literal(input)]);
            }
        }

        /// Valid templates reassemble to their input text.
        #[test]
        fn canonical_templates_round_trip(
            parts in prop::collection::vec("[a-z./:?=&-]{0,12}", 1..5),
            modifiers in prop::collection::vec(
                prop::sample::select(Modifier::all().to_vec()), 0..4,
            ),
        ) {
            let mut url = String::new();
            for (i, part) in parts.iter().enumerate() {
                url.push_str(part);
                if let Some(m) = modifiers.get(i) {
                    if *m == Modifier::NoEncoding {
                        url.push_str("{value}");
                    } else {
                        url.push_str(&format!("{{value:{}}}", m.as_str()));
                    }
                }
            }
            let t = Template::parse(&url).unwrap();
            prop_assert_eq!(t.to_string(), url);
        }

        /// Parsing is deterministic.
        #[test]
        fn parse_is_deterministic(input in ".*") {
            prop_assert_eq!(Template::parse(&input), Template::parse(&input));
        }
    }
}
