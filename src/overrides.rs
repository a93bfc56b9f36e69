//! Programmatic overrides: `key=value` assignments layered over a merged view.
//!
//! Each `("azure.location", Value)` pair expands into the nested table needed
//! for a deep merge on top of the loaded documents.

use toml::{Table, Value};

use crate::error::LegendError;

/// Convert dotted-key overrides into a nested `toml::Table`.
///
/// `("azure.location", "westus")` becomes `{azure = {location = "westus"}}`.
/// If multiple entries target the same key, the last one wins. An entry that
/// needs to descend through a scalar set by an earlier entry is rejected.
pub fn overrides_to_table(entries: &[(String, Value)]) -> Result<Table, LegendError> {
    let mut table = Table::new();
    for (dotted_key, value) in entries {
        set_nested(&mut table, dotted_key, value.clone())?;
    }
    Ok(table)
}

fn set_nested(table: &mut Table, dotted_key: &str, value: Value) -> Result<(), LegendError> {
    let segments = split_key(dotted_key)?;
    let (leaf, parents) = segments
        .split_last()
        .ok_or_else(|| LegendError::KeyNotFound(dotted_key.to_string()))?;

    let mut current = table;
    for segment in parents {
        current = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Table(Table::new()))
            .as_table_mut()
            .ok_or_else(|| LegendError::InvalidValue {
                key: dotted_key.to_string(),
                reason: format!("'{segment}' is already set to a non-table value"),
            })?;
    }

    current.insert(leaf.to_string(), value);
    Ok(())
}

/// Split a dotted key, rejecting empty segments.
pub(crate) fn split_key(dotted_key: &str) -> Result<Vec<&str>, LegendError> {
    key_segments(dotted_key).ok_or_else(|| LegendError::InvalidValue {
        key: dotted_key.to_string(),
        reason: "dotted keys must not contain empty or unterminated segments".into(),
    })
}

/// Split a dotted key into its segments.
///
/// A segment wrapped in double quotes may itself contain dots, so
/// `settings."orders.api"` names the key `orders.api` inside `settings`.
/// Empty segments and unterminated quotes yield `None`.
pub(crate) fn key_segments(dotted_key: &str) -> Option<Vec<&str>> {
    let mut segments = Vec::new();
    let mut rest = dotted_key;
    loop {
        let (segment, tail) = match rest.strip_prefix('"') {
            Some(quoted) => {
                let end = quoted.find('"')?;
                (&quoted[..end], &quoted[end + 1..])
            }
            None => rest.split_at(rest.find('.').unwrap_or(rest.len())),
        };
        if segment.is_empty() {
            return None;
        }
        segments.push(segment);
        if tail.is_empty() {
            return Some(segments);
        }
        rest = tail.strip_prefix('.')?;
    }
}

/// Render one segment so [`key_segments`] reads it back unchanged.
pub(crate) fn quote_segment(segment: &str) -> String {
    if segment.contains('.') {
        format!("\"{segment}\"")
    } else {
        segment.to_string()
    }
}

/// Parse a `key=value` assignment as given on the command line.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), LegendError> {
    let (key, value) = raw.split_once('=').ok_or_else(|| LegendError::InvalidValue {
        key: raw.to_string(),
        reason: "expected KEY=VALUE".into(),
    })?;
    let key = key.trim();
    split_key(key)?;
    Ok((key.to_string(), parse_value(value)))
}

/// Parse a raw string into a typed TOML value.
/// Tries: bool → integer → float → string.
pub fn parse_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Boolean(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Boolean(false);
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Integer(i);
    }
    // Require a dot so "inf" / "NaN" stay strings.
    if s.contains('.')
        && let Ok(f) = s.parse::<f64>()
    {
        return Value::Float(f);
    }
    Value::String(s.to_string())
}
