//! Deep merge of configuration documents.
//!
//! Both inputs are borrowed and left untouched; the merged document is a
//! fresh table. Where both sides hold a table at the same path the tables are
//! merged key by key. Anything else at a shared path is replaced wholesale by
//! the overlay, including table/scalar mismatches in either direction.

use toml::{Table, Value};

/// Merge `overlay` on top of `base`, returning a new table.
pub fn deep_merge(base: &Table, overlay: &Table) -> Table {
    let mut merged = base.clone();
    for (key, overlay_val) in overlay {
        let combined = match (merged.get(key), overlay_val) {
            (Some(Value::Table(base_tbl)), Value::Table(overlay_tbl)) => {
                Value::Table(deep_merge(base_tbl, overlay_tbl))
            }
            _ => overlay_val.clone(),
        };
        merged.insert(key.clone(), combined);
    }
    merged
}
