//! Conversion between YAML values and JSON values.
//!
//! Frontmatter and navigation are stored as YAML but cross the tool boundary
//! as JSON. Mapping order survives in both directions (`serde_json` is built
//! with `preserve_order`).

use serde_yaml::Value;

use crate::{MetaError, Metadata};

/// Convert a YAML value into JSON.
///
/// Tags are dropped, non-string keys are rendered as YAML scalars, and
/// non-finite floats become `null`.
#[must_use]
pub fn yaml_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.into()
            } else if let Some(u) = n.as_u64() {
                u.into()
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
        }
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Sequence(items) => serde_json::Value::Array(items.iter().map(yaml_to_json).collect()),
        Value::Mapping(mapping) => serde_json::Value::Object(metadata_to_json(mapping)),
        Value::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

/// Convert a frontmatter mapping into a JSON object.
#[must_use]
pub fn metadata_to_json(metadata: &Metadata) -> serde_json::Map<String, serde_json::Value> {
    metadata
        .iter()
        .map(|(key, value)| (key_to_string(key), yaml_to_json(value)))
        .collect()
}

/// Convert a JSON value into YAML.
pub fn json_to_yaml(value: &serde_json::Value) -> Result<Value, MetaError> {
    Ok(serde_yaml::to_value(value)?)
}

/// Convert a JSON object into a frontmatter mapping.
pub fn metadata_from_json(
    object: &serde_json::Map<String, serde_json::Value>,
) -> Result<Metadata, MetaError> {
    match serde_yaml::to_value(object)? {
        Value::Mapping(mapping) => Ok(mapping),
        _ => Err(MetaError::NotAMapping),
    }
}

fn key_to_string(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_owned(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_owned())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_yaml_to_json_nested() {
        let yaml: Value =
            serde_yaml::from_str("title: Guide\ntags: [a, b]\nextra:\n  weight: 1.5\n  draft: true")
                .unwrap();
        assert_eq!(
            yaml_to_json(&yaml),
            json!({
                "title": "Guide",
                "tags": ["a", "b"],
                "extra": {"weight": 1.5, "draft": true}
            })
        );
    }

    #[test]
    fn test_metadata_to_json_keeps_order() {
        let metadata: Metadata = serde_yaml::from_str("zeta: 1\nalpha: 2").unwrap();
        let object = metadata_to_json(&metadata);
        let keys: Vec<_> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let metadata: Metadata = serde_yaml::from_str("1: one\ntrue: yes").unwrap();
        let object = metadata_to_json(&metadata);
        assert_eq!(object.get("1"), Some(&json!("one")));
        assert_eq!(object.get("true"), Some(&json!("yes")));
    }

    #[test]
    fn test_tagged_value_drops_tag() {
        let yaml: Value = serde_yaml::from_str("key: !custom value").unwrap();
        assert_eq!(yaml_to_json(&yaml), json!({"key": "value"}));
    }

    #[test]
    fn test_metadata_from_json_keeps_order() {
        let object = json!({"zeta": 1, "alpha": {"nested": [1, 2]}});
        let metadata = metadata_from_json(object.as_object().unwrap()).unwrap();
        let keys: Vec<_> = metadata.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha"]);
        assert_eq!(yaml_to_json(&Value::Mapping(metadata)), object);
    }

    #[test]
    fn test_json_to_yaml_sequence() {
        let yaml = json_to_yaml(&json!([{"Home": "index.md"}])).unwrap();
        assert!(yaml.is_sequence());
    }
}
