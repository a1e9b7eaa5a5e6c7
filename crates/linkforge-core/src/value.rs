//! # YAML → JSON Value Conversion
//!
//! Source files are YAML; the validator and the serializer work on
//! `serde_json::Value` trees. YAML has a richer type system than JSON
//! (tags, anchors, non-string keys), but link sources use only the
//! JSON-compatible subset, so the conversion is total for well-formed
//! sources and reports anything outside that subset.

use serde_json::Value;

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Non-string map keys are coerced to strings via their display form;
/// YAML tags are ignored and the inner value converted. Floats that JSON
/// cannot represent (NaN, infinities) are reported rather than silently
/// dropped.
pub fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversion() {
        let yaml_str = r#"
id: "0100"
provider: example
priority: 5
autorun: true
types:
  - name
  - alias
"#;
        let yaml: serde_yaml::Value = serde_yaml::from_str(yaml_str).unwrap();
        let json = yaml_to_json(&yaml).unwrap();

        assert_eq!(json["id"], "0100");
        assert_eq!(json["provider"], "example");
        assert_eq!(json["priority"], 5);
        assert_eq!(json["autorun"], true);
        assert_eq!(json["types"][1], "alias");
    }

    #[test]
    fn test_unquoted_numeric_id_stays_a_number() {
        // The record validator decides whether to accept this; the
        // conversion must not silently stringify.
        let yaml: serde_yaml::Value = serde_yaml::from_str("id: 100").unwrap();
        let json = yaml_to_json(&yaml).unwrap();
        assert_eq!(json["id"], 100);
    }

    #[test]
    fn test_top_level_sequence() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("- a\n- b\n").unwrap();
        let json = yaml_to_json(&yaml).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0], "a");
    }

    #[test]
    fn test_non_string_keys_coerced() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        let json = yaml_to_json(&yaml).unwrap();
        assert_eq!(json["1"], "one");
        assert!(json.get("true").is_some());
    }

    #[test]
    fn test_nan_reported() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("x: .nan").unwrap();
        assert!(yaml_to_json(&yaml).is_err());
    }
}
