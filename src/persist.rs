//! Edits to configuration documents that preserve comments and layout.
//!
//! Uses `toml_edit` so hand-written comments in `config/*.toml` survive
//! `config set` and `config unset`. Loading never goes through here.

use std::path::Path;

use crate::error::LegendError;
use crate::ops::ConfigResult;
use crate::overrides::split_key;
use crate::resolve;

/// Pure function: set `key` to `raw_value` in a TOML document string.
///
/// `content` of `None` starts from an empty document. Intermediate tables are
/// created as needed; descending through an existing non-table value is an
/// error.
pub fn set_in_document(
    content: Option<&str>,
    key: &str,
    raw_value: &str,
) -> Result<String, LegendError> {
    let mut doc = parse_document(content.unwrap_or_default(), key)?;
    let segments = split_key(key)?;
    let (leaf, parents) = segments
        .split_last()
        .ok_or_else(|| LegendError::KeyNotFound(key.to_string()))?;

    let mut current: &mut toml_edit::Item = doc.as_item_mut();
    for segment in parents {
        if current.get(segment).is_none() {
            current[segment] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        current = &mut current[segment];
        if !current.is_table_like() {
            return Err(LegendError::InvalidValue {
                key: key.into(),
                reason: format!("'{segment}' is not a table"),
            });
        }
    }

    current[leaf] = toml_edit::value(parse_toml_edit_value(raw_value));
    Ok(doc.to_string())
}

/// Pure function: remove `key` from a TOML document string.
pub fn unset_in_document(content: &str, key: &str) -> Result<String, LegendError> {
    let mut doc = parse_document(content, key)?;
    let segments = split_key(key)?;
    let (leaf, parents) = segments
        .split_last()
        .ok_or_else(|| LegendError::KeyNotFound(key.to_string()))?;

    remove_nested(doc.as_table_mut(), parents, leaf)
        .ok_or_else(|| LegendError::KeyNotFound(key.to_string()))?;
    Ok(doc.to_string())
}

fn remove_nested(
    table: &mut dyn toml_edit::TableLike,
    parents: &[&str],
    leaf: &str,
) -> Option<toml_edit::Item> {
    match parents.split_first() {
        None => table.remove(leaf),
        Some((head, rest)) => {
            let nested = table.get_mut(head)?.as_table_like_mut()?;
            remove_nested(nested, rest, leaf)
        }
    }
}

fn parse_document(content: &str, key: &str) -> Result<toml_edit::DocumentMut, LegendError> {
    content
        .parse()
        .map_err(|e: toml_edit::TomlError| LegendError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        })
}

/// I/O wrapper: read the document (if it exists), set the key, write back.
pub fn persist_value(path: &Path, key: &str, value: &str) -> Result<ConfigResult, LegendError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => Some(c),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            return Err(LegendError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    if let Some(existing) = &content {
        resolve::parse_document(path, existing)?;
    }
    let new_content = set_in_document(content.as_deref(), key, value)?;
    write(path, &new_content)?;

    Ok(ConfigResult::ValueSet {
        path: path.to_path_buf(),
        key: key.into(),
        value: value.into(),
    })
}

/// I/O wrapper: remove a key from an existing document.
pub fn unset_value(path: &Path, key: &str) -> Result<ConfigResult, LegendError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(LegendError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(LegendError::Io {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    resolve::parse_document(path, &content)?;
    let new_content = unset_in_document(&content, key)?;
    write(path, &new_content)?;

    Ok(ConfigResult::ValueUnset {
        path: path.to_path_buf(),
        key: key.into(),
    })
}

fn write(path: &Path, content: &str) -> Result<(), LegendError> {
    std::fs::write(path, content).map_err(|e| LegendError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse a raw string value into a `toml_edit::Value` with type heuristics.
fn parse_toml_edit_value(s: &str) -> toml_edit::Value {
    match crate::overrides::parse_value(s) {
        toml::Value::Boolean(b) => b.into(),
        toml::Value::Integer(i) => i.into(),
        toml::Value::Float(f) => f.into(),
        _ => s.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn set_existing_key() {
        let content = "[azure]\nlocation = \"eastus\"\nresource_group = \"rg\"\n";
        let result = set_in_document(Some(content), "azure.location", "westus").unwrap();
        assert!(result.contains("location = \"westus\""));
        assert!(result.contains("resource_group = \"rg\""));
    }

    #[test]
    fn set_creates_sections() {
        let result = set_in_document(None, "azure.function_app", "demo-sit").unwrap();
        let table: toml::Table = result.parse().unwrap();
        assert_eq!(table["azure"]["function_app"].as_str(), Some("demo-sit"));
    }

    #[test]
    fn set_preserves_comments() {
        let content = "# Shared defaults\n[azure]\n# region\nlocation = \"eastus\"\n";
        let result = set_in_document(Some(content), "azure.location", "westus").unwrap();
        assert!(result.contains("# Shared defaults"));
        assert!(result.contains("# region"));
    }

    #[test]
    fn set_through_scalar_is_rejected() {
        let result = set_in_document(Some("azure = \"off\"\n"), "azure.location", "x");
        assert!(matches!(result, Err(LegendError::InvalidValue { .. })));
    }

    #[test]
    fn set_types_values() {
        let result = set_in_document(None, "settings.workers", "4").unwrap();
        assert!(result.contains("workers = 4"));
        let result = set_in_document(None, "settings.debug", "false").unwrap();
        assert!(result.contains("debug = false"));
    }

    #[test]
    fn unset_removes_key_and_keeps_rest() {
        let content = "[azure]\nlocation = \"eastus\"\nresource_group = \"rg\"\n";
        let result = unset_in_document(content, "azure.resource_group").unwrap();
        assert!(!result.contains("resource_group"));
        assert!(result.contains("location = \"eastus\""));
    }

    #[test]
    fn unset_missing_key_is_not_found() {
        let result = unset_in_document("[azure]\n", "azure.location");
        assert!(matches!(result, Err(LegendError::KeyNotFound(_))));
        let result = unset_in_document("", "nope.location");
        assert!(matches!(result, Err(LegendError::KeyNotFound(_))));
    }

    #[test]
    fn persist_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sit.toml");
        let result = persist_value(&path, "azure.location", "eastus").unwrap();
        assert!(matches!(result, ConfigResult::ValueSet { .. }));
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("location = \"eastus\""));
    }

    #[test]
    fn broken_document_names_the_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sit.toml");
        fs::write(&path, "[azure\n").unwrap();

        for result in [
            persist_value(&path, "azure.location", "eastus"),
            unset_value(&path, "azure.location"),
        ] {
            match result {
                Err(LegendError::ConfigParseError { path: p, .. }) => assert_eq!(p, path),
                other => panic!("Expected ConfigParseError, got {other:?}"),
            }
        }
        assert_eq!(fs::read_to_string(&path).unwrap(), "[azure\n");
    }

    #[test]
    fn unset_on_missing_file_is_config_not_found() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("uat.toml");
        assert!(matches!(
            unset_value(&path, "azure.location"),
            Err(LegendError::ConfigNotFound { .. })
        ));
    }
}
