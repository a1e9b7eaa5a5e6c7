//! # Corpus Aggregator
//!
//! Drives the full validation pass: resolves every source to its
//! category, validates every record, then runs the cross-cutting global
//! id-uniqueness check. Either every check passes and a [`Corpus`] comes
//! out, or the complete list of collected issues does — there is no
//! partial output.

use std::collections::HashMap;

use serde_json::Value;

use linkforge_core::{
    BuildError, DuplicateIdError, LinkRecord, Location, RecordRef, ValidationIssue,
};

use crate::registry::CategoryRegistry;
use crate::source::SourceFile;
use crate::validate::{raw_id, validate_record};

/// One category and its validated records, in source order.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    /// Display label from the registry.
    pub name: String,
    /// Records exactly as ordered in the source file.
    pub records: Vec<LinkRecord>,
}

/// The fully validated corpus: categories in registry declaration order.
///
/// Only [`aggregate`] constructs one, and only from sources that passed
/// every schema and uniqueness check.
#[derive(Debug, Clone)]
pub struct Corpus {
    groups: Vec<CategoryGroup>,
}

impl Corpus {
    /// Category groups in registry order.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Total record count across all categories.
    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }

    /// Number of categories with at least one record.
    pub fn category_count(&self) -> usize {
        self.groups.len()
    }
}

/// Aggregate loaded sources into a validated corpus.
///
/// `carried_issues` holds source-level problems the loader already found
/// (YAML parse failures); they are reported alongside anything collected
/// here.
///
/// # Errors
///
/// `BuildError::Config` as soon as any source has no registry entry —
/// nothing else is checked, since the premise that sources map to
/// categories no longer holds. Otherwise `BuildError::Validation` with
/// every schema, shape, and duplicate-id issue found across all sources.
pub fn aggregate(
    registry: &CategoryRegistry,
    sources: Vec<SourceFile>,
    carried_issues: Vec<ValidationIssue>,
) -> Result<Corpus, BuildError> {
    // Category resolution first: an unregistered file is fatal even when
    // every record everywhere else is valid.
    let mut ordered: Vec<(usize, &str, &SourceFile)> = Vec::with_capacity(sources.len());
    for source in &sources {
        let label = registry.resolve(&source.stem)?;
        // resolve() succeeding implies a position exists.
        let position = registry.position(&source.stem).unwrap_or(usize::MAX);
        ordered.push((position, label, source));
    }
    // Registry declaration order, independent of filesystem iteration.
    ordered.sort_by_key(|(position, _, _)| *position);

    let mut issues = carried_issues;
    let mut groups: Vec<CategoryGroup> = Vec::new();
    // id → first declaration site, for cross-category collision reports.
    let mut seen_ids: HashMap<String, Location> = HashMap::new();
    let mut duplicates: Vec<DuplicateIdError> = Vec::new();

    for (_, label, source) in ordered {
        let Value::Array(entries) = &source.value else {
            issues.push(ValidationIssue::Source {
                source: source.name.clone(),
                reason: "expected a YAML list at the top level".to_string(),
            });
            continue;
        };

        let mut records = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Value::Object(entry) = entry else {
                issues.push(ValidationIssue::Source {
                    source: source.name.clone(),
                    reason: format!("entry #{index} must be a mapping"),
                });
                continue;
            };

            // Track ids even for records that fail other field checks,
            // so one run reports both the field errors and the collision.
            if let Some(id) = raw_id(entry) {
                let location = Location {
                    source: source.name.clone(),
                    record: RecordRef::Id(id.clone()),
                };
                if let Some(first) = seen_ids.get(&id) {
                    duplicates.push(DuplicateIdError {
                        id,
                        first: first.clone(),
                        second: location,
                    });
                } else {
                    seen_ids.insert(id, location);
                }
            }

            match validate_record(entry, &source.name, index) {
                Ok(record) => records.push(record),
                Err(errors) => issues.extend(errors.into_iter().map(ValidationIssue::from)),
            }
        }

        tracing::debug!(
            source = %source.name,
            category = %label,
            records = records.len(),
            "validated source"
        );
        groups.push(CategoryGroup {
            name: label.to_string(),
            records,
        });
    }

    // Duplicates are reported after all per-record issues.
    issues.extend(duplicates.into_iter().map(ValidationIssue::from));

    if !issues.is_empty() {
        return Err(BuildError::Validation(issues));
    }
    Ok(Corpus { groups })
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkforge_core::ConfigError;
    use serde_json::json;

    fn record(id: &str) -> Value {
        json!({
            "id": id,
            "provider": "example",
            "display": "Example",
            "url": "https://example.com/{value}",
            "types": ["name"],
            "payWall": "Free",
        })
    }

    fn source(stem: &str, value: Value) -> SourceFile {
        SourceFile {
            name: format!("{stem}.yaml"),
            stem: stem.to_string(),
            value,
        }
    }

    fn registry() -> CategoryRegistry {
        CategoryRegistry::builtin()
    }

    #[test]
    fn test_valid_sources_aggregate() {
        let corpus = aggregate(
            &registry(),
            vec![
                source("maps", json!([record("1"), record("2")])),
                source("historical", json!([record("3")])),
            ],
            Vec::new(),
        )
        .unwrap();
        assert_eq!(corpus.record_count(), 3);
        assert_eq!(corpus.category_count(), 2);
    }

    #[test]
    fn test_categories_follow_registry_order() {
        // maps is declared before people-search; feed them reversed.
        let corpus = aggregate(
            &registry(),
            vec![
                source("people-search", json!([record("1")])),
                source("maps", json!([record("2")])),
            ],
            Vec::new(),
        )
        .unwrap();
        let names: Vec<&str> = corpus.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Maps", "People Search"]);
    }

    #[test]
    fn test_unregistered_source_aborts_immediately() {
        let err = aggregate(
            &registry(),
            vec![
                source("maps", json!([record("1")])),
                source("new-stuff", json!([record("2")])),
            ],
            Vec::new(),
        )
        .unwrap_err();
        match err {
            BuildError::Config(ConfigError::UnregisteredSource { source }) => {
                assert_eq!(source, "new-stuff");
            }
            other => panic!("expected ConfigError, got: {other}"),
        }
    }

    #[test]
    fn test_duplicate_ids_across_sources_name_both_locations() {
        let err = aggregate(
            &registry(),
            vec![
                source("maps", json!([record("100")])),
                source("historical", json!([record("100")])),
            ],
            Vec::new(),
        )
        .unwrap_err();
        let issues = err.issues();
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            ValidationIssue::Duplicate(d) => {
                assert_eq!(d.id, "100");
                assert_eq!(d.first.source, "maps.yaml");
                assert_eq!(d.second.source, "historical.yaml");
            }
            other => panic!("expected DuplicateIdError, got: {other}"),
        }
    }

    #[test]
    fn test_errors_collected_across_all_sources() {
        let mut bad = record("5");
        bad.as_object_mut().unwrap().remove("display");
        let mut worse = record("6");
        worse
            .as_object_mut()
            .unwrap()
            .insert("payWall".into(), json!("Cheap"));

        let err = aggregate(
            &registry(),
            vec![
                source("maps", json!([bad])),
                source("historical", json!([worse])),
            ],
            Vec::new(),
        )
        .unwrap_err();
        // Validation did not stop at the first failing source.
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_non_list_source_is_collected_issue() {
        let err = aggregate(
            &registry(),
            vec![
                source("maps", json!({"not": "a list"})),
                source("historical", json!([record("1")])),
            ],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err.issues()[0],
            ValidationIssue::Source { .. }
        ));
    }

    #[test]
    fn test_non_mapping_entry_is_collected_issue() {
        let err = aggregate(
            &registry(),
            vec![source("maps", json!([record("1"), "just a string"]))],
            Vec::new(),
        )
        .unwrap_err();
        match &err.issues()[0] {
            ValidationIssue::Source { reason, .. } => {
                assert!(reason.contains("entry #1"));
            }
            other => panic!("expected Source issue, got: {other}"),
        }
    }

    #[test]
    fn test_duplicate_within_one_source_reported() {
        let err = aggregate(
            &registry(),
            vec![source("maps", json!([record("9"), record("9")]))],
            Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err.issues()[0],
            ValidationIssue::Duplicate(_)
        ));
    }

    #[test]
    fn test_within_category_order_preserved() {
        let corpus = aggregate(
            &registry(),
            vec![source(
                "maps",
                json!([record("3"), record("1"), record("2")]),
            )],
            Vec::new(),
        )
        .unwrap();
        let ids: Vec<&str> = corpus.groups()[0]
            .records
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_carried_issues_fail_the_build() {
        let err = aggregate(
            &registry(),
            vec![source("maps", json!([record("1")]))],
            vec![ValidationIssue::Source {
                source: "historical.yaml".to_string(),
                reason: "YAML parse error".to_string(),
            }],
        )
        .unwrap_err();
        assert_eq!(err.issues().len(), 1);
    }
}
