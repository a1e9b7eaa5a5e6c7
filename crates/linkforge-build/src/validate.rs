//! # Record Validator
//!
//! Checks one raw record against the field schema and, on success,
//! materializes a complete [`LinkRecord`] with defaults applied.
//!
//! Validation is collect-all within a record: every check runs and every
//! violation is reported, so one build surfaces every problem instead of
//! the first. Defaulting is a pure function from raw parsed fields to a
//! complete record; no partially-built record is ever mutated into shape.

use serde_json::{Map, Value};

use linkforge_core::record::DEFAULT_REGION;
use linkforge_core::{
    InputType, LinkRecord, PayWall, RecordRef, SchemaError, SchemaErrorKind, Template,
};

/// Accumulates violations for one record while the field checks run.
struct Checker<'a> {
    source: &'a str,
    record: RecordRef,
    errors: Vec<SchemaError>,
}

impl<'a> Checker<'a> {
    fn push(&mut self, field: &'static str, kind: SchemaErrorKind) {
        self.errors.push(SchemaError {
            source: self.source.to_string(),
            record: self.record.clone(),
            field,
            kind,
        });
    }
}

/// Validate one raw record (a YAML mapping converted to a JSON object)
/// against the schema.
///
/// `index` is the record's position within its source, used to identify
/// the record in errors when it declares no usable id.
///
/// # Errors
///
/// A non-empty list of [`SchemaError`]s covering every violated check.
pub fn validate_record(
    entry: &Map<String, Value>,
    source: &str,
    index: usize,
) -> Result<LinkRecord, Vec<SchemaError>> {
    let mut checker = Checker {
        source,
        record: record_ref(entry, index),
        errors: Vec::new(),
    };

    let id = check_id(&mut checker, entry.get("id"));
    let provider = check_provider(&mut checker, entry.get("provider"));
    let display = check_display(&mut checker, entry.get("display"));
    let url = check_url(&mut checker, entry.get("url"));
    let types = check_types(&mut checker, entry.get("types"));
    let pay_wall = check_pay_wall(&mut checker, entry.get("payWall"));

    // Optional fields: wrong types are errors, absence takes the default.
    let region = check_optional_string(&mut checker, "region", entry.get("region"))
        .unwrap_or_else(|| DEFAULT_REGION.to_string());
    let description = check_optional_string(&mut checker, "description", entry.get("description"))
        .unwrap_or_default();
    let priority = check_priority(&mut checker, entry.get("priority"));
    let autorun = check_autorun(&mut checker, entry.get("autorun"));

    if !checker.errors.is_empty() {
        return Err(checker.errors);
    }

    Ok(LinkRecord {
        id: id.unwrap_or_default(),
        provider: provider.unwrap_or_default(),
        display: display.unwrap_or_default(),
        url: url.unwrap_or_default(),
        types: types.unwrap_or_default(),
        pay_wall: pay_wall.unwrap_or(PayWall::Free),
        region,
        priority,
        description,
        autorun,
    })
}

/// The string form of a raw id, when the entry has one that can be
/// rendered. Numbers are rendered as written by serde_yaml; strings pass
/// through verbatim.
pub fn raw_id(entry: &Map<String, Value>) -> Option<String> {
    match entry.get("id") {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

fn record_ref(entry: &Map<String, Value>, index: usize) -> RecordRef {
    match raw_id(entry) {
        Some(id) => RecordRef::Id(id),
        None => RecordRef::Index(index),
    }
}

fn check_id(checker: &mut Checker<'_>, value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            checker.push("id", SchemaErrorKind::Missing);
            None
        }
        Some(Value::String(s)) => {
            if s.is_empty() {
                checker.push("id", SchemaErrorKind::Empty);
                None
            } else if !s.bytes().all(|b| b.is_ascii_digit()) {
                checker.push("id", SchemaErrorKind::MalformedId(s.clone()));
                None
            } else {
                Some(s.clone())
            }
        }
        // An unquoted YAML integer is tolerated; its rendered form is the
        // id. Anything signed or fractional is malformed.
        Some(Value::Number(n)) if n.is_u64() => Some(n.to_string()),
        Some(Value::Number(n)) => {
            checker.push("id", SchemaErrorKind::MalformedId(n.to_string()));
            None
        }
        Some(_) => {
            checker.push(
                "id",
                SchemaErrorKind::WrongType {
                    expected: "a string of digits",
                },
            );
            None
        }
    }
}

fn check_provider(checker: &mut Checker<'_>, value: Option<&Value>) -> Option<String> {
    let s = check_required_string(checker, "provider", value)?;
    if s.chars().any(char::is_whitespace) {
        checker.push("provider", SchemaErrorKind::ProviderWhitespace(s));
        return None;
    }
    Some(s)
}

fn check_display(checker: &mut Checker<'_>, value: Option<&Value>) -> Option<String> {
    check_required_string(checker, "display", value)
}

fn check_url(checker: &mut Checker<'_>, value: Option<&Value>) -> Option<String> {
    // Stray whitespace and tabs around URLs show up in hand-edited YAML;
    // trim before any syntax checking.
    let url = check_required_string(checker, "url", value)?;
    let url = url.trim().to_string();
    if url.is_empty() {
        checker.push("url", SchemaErrorKind::Empty);
        return None;
    }
    match Template::parse(&url) {
        Ok(_) => Some(url),
        // One SchemaError per bad placeholder, not just the first.
        Err(errors) => {
            for e in errors {
                checker.push("url", SchemaErrorKind::Template(e));
            }
            None
        }
    }
}

fn check_types(checker: &mut Checker<'_>, value: Option<&Value>) -> Option<Vec<InputType>> {
    let items = match value {
        None | Some(Value::Null) => {
            checker.push("types", SchemaErrorKind::Missing);
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            checker.push(
                "types",
                SchemaErrorKind::WrongType {
                    expected: "a non-empty list",
                },
            );
            return None;
        }
    };

    if items.is_empty() {
        checker.push("types", SchemaErrorKind::Empty);
        return None;
    }

    let mut types: Vec<InputType> = Vec::with_capacity(items.len());
    let mut ok = true;
    for item in items {
        let Some(s) = item.as_str() else {
            checker.push(
                "types",
                SchemaErrorKind::WrongType {
                    expected: "a list of strings",
                },
            );
            ok = false;
            continue;
        };
        match s.parse::<InputType>() {
            // Duplicates within one record are tolerated, deduplicated
            // here so the artifact carries each type once.
            Ok(t) => {
                if !types.contains(&t) {
                    types.push(t);
                }
            }
            Err(()) => {
                checker.push("types", SchemaErrorKind::UnknownType(s.to_string()));
                ok = false;
            }
        }
    }
    ok.then_some(types)
}

fn check_pay_wall(checker: &mut Checker<'_>, value: Option<&Value>) -> Option<PayWall> {
    let s = check_required_string(checker, "payWall", value)?;
    match s.parse::<PayWall>() {
        Ok(p) => Some(p),
        Err(()) => {
            checker.push("payWall", SchemaErrorKind::UnknownPayWall(s));
            None
        }
    }
}

fn check_priority(checker: &mut Checker<'_>, value: Option<&Value>) -> i64 {
    match value {
        None | Some(Value::Null) => 0,
        Some(Value::Number(n)) if n.is_i64() => n.as_i64().unwrap_or(0),
        Some(_) => {
            checker.push(
                "priority",
                SchemaErrorKind::WrongType {
                    expected: "an integer",
                },
            );
            0
        }
    }
}

fn check_autorun(checker: &mut Checker<'_>, value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(_) => {
            checker.push(
                "autorun",
                SchemaErrorKind::WrongType {
                    expected: "a boolean",
                },
            );
            false
        }
    }
}

fn check_required_string(
    checker: &mut Checker<'_>,
    field: &'static str,
    value: Option<&Value>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => {
            checker.push(field, SchemaErrorKind::Missing);
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            checker.push(field, SchemaErrorKind::Empty);
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            checker.push(field, SchemaErrorKind::WrongType { expected: "a string" });
            None
        }
    }
}

fn check_optional_string(
    checker: &mut Checker<'_>,
    field: &'static str,
    value: Option<&Value>,
) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(_) => {
            checker.push(field, SchemaErrorKind::WrongType { expected: "a string" });
            None
        }
    }
}
