//! Post-merge validation.
//!
//! [`validate_required`] checks that the keys a command depends on are
//! present before the command builds any external command line.
//! [`unknown_keys`] reports keys a typed schema does not consume, using
//! `serde_ignored` against the schema's all-optional `C::Layer`.

use confique::Config;
use serde::Deserialize;
use toml::{Table, Value};

use crate::error::LegendError;
use crate::view::ConfigView;

/// Fail with [`LegendError::MissingConfigKeys`] listing every absent key.
///
/// A key is missing when any segment of its dotted path is absent. Present
/// values never count as missing, whatever they hold (`false`, `0`, `""`,
/// an empty table).
pub fn validate_required<S: AsRef<str>>(view: &ConfigView, keys: &[S]) -> Result<(), LegendError> {
    let missing: Vec<String> = keys
        .iter()
        .map(AsRef::as_ref)
        .filter(|key| !view.contains(key))
        .map(str::to_string)
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(LegendError::MissingConfigKeys {
        keys: missing,
        sources: view.sources().to_vec(),
    })
}

/// Keys in `table` that the schema `C` does not know, as dotted paths.
///
/// Deserializes into `C::Layer` (where every field is optional) and records
/// whatever the layer ignores. Type mismatches surface as
/// [`LegendError::InvalidValue`] under `key`.
pub fn unknown_keys<C: Config>(table: &Table, key: &str) -> Result<Vec<String>, LegendError>
where
    C::Layer: for<'de> Deserialize<'de>,
{
    let mut unknown = Vec::new();
    let _layer: C::Layer =
        serde_ignored::deserialize(Value::Table(table.clone()), |path| {
            let path = path.to_string();
            unknown.push(if key.is_empty() {
                path
            } else {
                format!("{key}.{path}")
            });
        })
        .map_err(|e: toml::de::Error| LegendError::InvalidValue {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
    unknown.sort();
    Ok(unknown)
}
