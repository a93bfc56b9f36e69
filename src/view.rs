//! Read-only, dot-path addressable view over a merged configuration.
//!
//! Values are `toml::Value`: scalars (string, integer, float, bool, datetime),
//! arrays, or nested tables. Lookups return `Option`, so "absent" is never
//! confused with a falsy value such as `false`, `0` or `""`.
//!
//! Two access styles resolve through the same path fold:
//!
//! ```ignore
//! view.get("azure.resource_group");
//! view.at("azure").at("resource_group").as_str();
//! ```

use std::path::PathBuf;

use confique::Config;
use serde::Deserialize;
use toml::{Table, Value};

use crate::environment::Environment;
use crate::error::LegendError;
use crate::overrides;

/// Immutable projection of a merged configuration for one environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigView {
    environment: Environment,
    table: Table,
    sources: Vec<PathBuf>,
}

impl ConfigView {
    pub fn new(environment: Environment, table: Table, sources: Vec<PathBuf>) -> Self {
        Self {
            environment,
            table,
            sources,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The merged mapping.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Files that contributed to this view, base first.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Look up a dotted key. `None` means some segment is absent.
    pub fn get(&self, dotted_key: &str) -> Option<&Value> {
        resolve_path(&self.table, dotted_key)
    }

    /// Look up a dotted key, falling back to `default` when absent.
    pub fn get_or(&self, dotted_key: &str, default: impl Into<Value>) -> Value {
        self.get(dotted_key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Look up a dotted key that must hold a string.
    pub fn get_str(&self, dotted_key: &str) -> Option<&str> {
        self.get(dotted_key).and_then(Value::as_str)
    }

    /// Like [`get`](Self::get) but absent keys are [`LegendError::KeyNotFound`].
    pub fn require(&self, dotted_key: &str) -> Result<&Value, LegendError> {
        self.get(dotted_key)
            .ok_or_else(|| LegendError::KeyNotFound(dotted_key.to_string()))
    }

    /// Like [`get_str`](Self::get_str) but absent or non-string values are errors.
    pub fn require_str(&self, dotted_key: &str) -> Result<&str, LegendError> {
        self.require(dotted_key)?
            .as_str()
            .ok_or_else(|| LegendError::InvalidValue {
                key: dotted_key.to_string(),
                reason: "expected a string".into(),
            })
    }

    pub fn contains(&self, dotted_key: &str) -> bool {
        self.get(dotted_key).is_some()
    }

    /// Start attribute-style traversal at a top-level key.
    pub fn at(&self, key: &str) -> Node<'_> {
        Node(self.table.get(key))
    }

    /// All leaf values as sorted `(dotted_key, value)` pairs.
    ///
    /// Arrays count as leaves. Empty tables produce no entries.
    pub fn flatten(&self) -> Vec<(String, &Value)> {
        let mut out = Vec::new();
        flatten_into(&self.table, "", &mut out);
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Deserialize the whole view into a typed schema.
    ///
    /// confique fills `#[config(default)]` values and fails with
    /// [`LegendError::Schema`] when a required field is missing.
    pub fn extract<C: Config>(&self) -> Result<C, LegendError>
    where
        C::Layer: for<'de> Deserialize<'de>,
    {
        load_typed(Value::Table(self.table.clone()), "<merged>")
    }

    /// Deserialize one top-level section into a typed schema. An absent
    /// section behaves like an empty one.
    pub fn extract_section<C: Config>(&self, section: &str) -> Result<C, LegendError>
    where
        C::Layer: for<'de> Deserialize<'de>,
    {
        let value = match self.get(section) {
            Some(Value::Table(t)) => Value::Table(t.clone()),
            Some(_) => {
                return Err(LegendError::InvalidValue {
                    key: section.to_string(),
                    reason: "expected a table".into(),
                });
            }
            None => Value::Table(Table::new()),
        };
        load_typed(value, section)
    }

    /// Display name of the contributing files, for messages.
    pub fn source_names(&self) -> Vec<String> {
        self.sources
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect()
    }
}

fn load_typed<C: Config>(value: Value, key: &str) -> Result<C, LegendError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let layer: C::Layer = value
        .try_into()
        .map_err(|e: toml::de::Error| LegendError::InvalidValue {
            key: key.into(),
            reason: e.to_string(),
        })?;
    C::builder()
        .preloaded(layer)
        .load()
        .map_err(LegendError::from)
}

/// Resolve a dotted path by folding over its segments.
///
/// Any absent segment, any attempt to descend into a non-table, and any empty
/// segment yield `None`. Quoted segments may contain dots.
pub fn resolve_path<'a>(table: &'a Table, dotted_key: &str) -> Option<&'a Value> {
    let segments = overrides::key_segments(dotted_key)?;
    let (first, rest) = segments.split_first()?;
    rest.iter().try_fold(table.get(*first)?, |current, segment| {
        current.as_table()?.get(*segment)
    })
}

fn flatten_into<'a>(table: &'a Table, prefix: &str, out: &mut Vec<(String, &'a Value)>) {
    for (key, value) in table {
        let segment = overrides::quote_segment(key);
        let dotted = if prefix.is_empty() {
            segment
        } else {
            format!("{prefix}.{segment}")
        };
        match value {
            Value::Table(nested) => flatten_into(nested, &dotted, out),
            leaf => out.push((dotted, leaf)),
        }
    }
}

/// A position reached by attribute-style traversal; may be absent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<'a>(Option<&'a Value>);

impl<'a> Node<'a> {
    /// Descend into `key`. Absent nodes and scalars stay absent.
    pub fn at(self, key: &str) -> Node<'a> {
        Node(self.0.and_then(Value::as_table).and_then(|t| t.get(key)))
    }

    pub fn value(self) -> Option<&'a Value> {
        self.0
    }

    pub fn as_str(self) -> Option<&'a str> {
        self.0.and_then(Value::as_str)
    }

    pub fn as_integer(self) -> Option<i64> {
        self.0.and_then(Value::as_integer)
    }

    pub fn as_bool(self) -> Option<bool> {
        self.0.and_then(Value::as_bool)
    }

    pub fn is_present(self) -> bool {
        self.0.is_some()
    }
}
