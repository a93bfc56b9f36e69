//! Config operations and their displayable results.
//!
//! Provides the logic behind `config list` and `config get`, and the
//! `ConfigResult` enum that callers print.

use std::fmt;
use std::path::PathBuf;

use crate::error::LegendError;
use crate::view::ConfigView;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A generated TOML template string.
    Template(String),
    /// A key's merged value.
    KeyValue { key: String, value: String },
    /// Confirmation that a value was written to a document.
    ValueSet {
        path: PathBuf,
        key: String,
        value: String,
    },
    /// Confirmation that a value was removed from a document.
    ValueUnset { path: PathBuf, key: String },
    /// All merged key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// Environment names found under `config/`.
    Environments(Vec<String>),
    /// Outcome of `config check`.
    Checked {
        environment: String,
        warnings: Vec<String>,
    },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::Template(t) => write!(f, "{t}"),
            ConfigResult::KeyValue { key, value } => write!(f, "{key} = {value}"),
            ConfigResult::ValueSet { path, key, value } => {
                write!(f, "Set {key} = {value} in {}", path.display())
            }
            ConfigResult::ValueUnset { path, key } => {
                write!(f, "Unset {key} in {}", path.display())
            }
            ConfigResult::Listing { entries } => {
                let lines: Vec<String> = entries.iter().map(|(k, v)| format!("{k} = {v}")).collect();
                write!(f, "{}", lines.join("\n"))
            }
            ConfigResult::Environments(names) => write!(f, "{}", names.join("\n")),
            ConfigResult::Checked {
                environment,
                warnings,
            } => {
                for warning in warnings {
                    writeln!(f, "warning: {warning}")?;
                }
                write!(f, "Configuration for '{environment}' is valid")
            }
        }
    }
}

/// Get one merged value by dotted key.
pub fn get_value(view: &ConfigView, key: &str) -> Result<ConfigResult, LegendError> {
    let value = view.require(key)?;
    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: format_value(value),
    })
}

/// List all merged values as flattened dotted key-value pairs.
pub fn list_values(view: &ConfigView) -> ConfigResult {
    let entries = view
        .flatten()
        .into_iter()
        .map(|(key, value)| (key, format_value(value)))
        .collect();
    ConfigResult::Listing { entries }
}

/// Format a TOML value for display. Strings print bare.
pub fn format_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        other => other.to_string(),
    }
}
