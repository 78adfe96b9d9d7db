//! Manifest retrieval and decoding.
//!
//! Decoding is permissive: only the first JSON value in the body is read,
//! and missing or mistyped dependency sets become empty sets.

pub mod fetcher;

pub use fetcher::ManifestFetcher;

use crate::types::{FetchError, Manifest};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Default, Deserialize)]
struct RawManifest {
    #[serde(default)]
    dependencies: Value,
    #[serde(default, rename = "devDependencies")]
    dev_dependencies: Value,
}

/// Decode a manifest document.
///
/// Fails only when the body holds no well-formed JSON value, or when the
/// value is neither an object nor `null`.
pub fn decode(body: &[u8]) -> Result<Manifest, FetchError> {
    let first = serde_json::Deserializer::from_slice(body)
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| FetchError::Decode("empty body".to_string()))?
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    let raw = match first {
        Value::Null => RawManifest::default(),
        Value::Object(map) => serde_json::from_value(Value::Object(map))
            .map_err(|e| FetchError::Decode(e.to_string()))?,
        other => {
            return Err(FetchError::Decode(format!(
                "expected an object, found {}",
                json_type(&other)
            )))
        }
    };

    Ok(Manifest {
        dependencies: name_map("dependencies", raw.dependencies),
        dev_dependencies: name_map("devDependencies", raw.dev_dependencies),
    })
}

/// Collect a dependency set. A set that is not an object of string
/// versions is treated as empty as a whole.
fn name_map(field: &str, value: Value) -> BTreeMap<String, String> {
    let entries = match value {
        Value::Object(entries) => entries,
        Value::Null => return BTreeMap::new(),
        other => {
            debug!("Ignoring {}: expected an object, found {}", field, json_type(&other));
            return BTreeMap::new();
        }
    };

    let mut names = BTreeMap::new();
    for (name, version) in entries {
        let Value::String(version) = version else {
            debug!(
                "Ignoring {}: version of '{}' is {}, not a string",
                field,
                name,
                json_type(&version)
            );
            return BTreeMap::new();
        };
        if name.is_empty() {
            debug!("Skipping {} entry with an empty name", field);
            continue;
        }
        names.insert(name, version);
    }
    names
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_both_sets() {
        let body = br#"{
            "name": "internal-app",
            "dependencies": {"left-pad": "1.0.0", "@acme/ui": "^2.1.0"},
            "devDependencies": {"jest": "29"}
        }"#;
        let manifest = decode(body).unwrap();

        assert_eq!(manifest.dependencies.len(), 2);
        assert_eq!(manifest.dependencies["@acme/ui"], "^2.1.0");
        assert_eq!(manifest.dev_dependencies.len(), 1);
    }

    #[test]
    fn test_decode_missing_fields_is_empty() {
        assert!(decode(br#"{"name": "x"}"#).unwrap().is_empty());
        assert!(decode(b"null").unwrap().is_empty());
    }

    #[test]
    fn test_decode_mistyped_fields_is_lenient() {
        let body = br#"{"dependencies": ["a", "b"], "devDependencies": {"eslint": {"version": "8"}}}"#;
        let manifest = decode(body).unwrap();

        assert!(manifest.dependencies.is_empty());
        assert!(manifest.dev_dependencies.is_empty());
    }

    #[test]
    fn test_decode_non_string_version_empties_only_that_set() {
        let body = br#"{"dependencies": {"a": 1, "b": "2"}, "devDependencies": {"c": "3"}}"#;
        let manifest = decode(body).unwrap();

        assert!(manifest.dependencies.is_empty());
        assert_eq!(manifest.dev_dependencies.len(), 1);
        assert!(manifest.checks("u").iter().all(|c| c.name != "a"));
    }

    #[test]
    fn test_decode_skips_empty_names() {
        let manifest = decode(br#"{"dependencies": {"": "1.0.0", "left-pad": "1.0.0"}}"#).unwrap();

        assert_eq!(manifest.dependencies.len(), 1);
        assert!(manifest.dependencies.contains_key("left-pad"));
    }

    #[test]
    fn test_decode_ignores_trailing_data() {
        let manifest = decode(b"{\"dependencies\": {\"a\": \"1\"}}\n<!-- cached -->").unwrap();
        assert_eq!(manifest.len(), 1);
    }

    #[test]
    fn test_decode_errors() {
        assert!(matches!(decode(b""), Err(FetchError::Decode(_))));
        assert!(matches!(decode(b"   "), Err(FetchError::Decode(_))));
        assert!(matches!(decode(b"<html>Not Found</html>"), Err(FetchError::Decode(_))));
        assert!(matches!(decode(b"{\"dependencies\": "), Err(FetchError::Decode(_))));
        assert!(matches!(decode(b"[1, 2]"), Err(FetchError::Decode(_))));
    }
}
