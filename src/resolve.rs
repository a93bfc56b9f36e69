//! Resolution pipeline: parse and merge pre-loaded documents.
//!
//! Operates on [`ResolveInput`] with no I/O, so the full pipeline is testable
//! with synthetic inputs. Steps:
//!
//! 1. Parse the base document (absent base = empty table)
//! 2. Parse the environment document
//! 3. Deep-merge environment on top of base
//! 4. Deep-merge programmatic overrides on top (only when any were given)

use std::path::{Path, PathBuf};

use toml::{Table, Value};

use crate::error::LegendError;
use crate::file::LoadedFile;
use crate::merge::deep_merge;
use crate::overrides;

/// All pre-loaded data needed to resolve a merged document.
pub struct ResolveInput {
    /// Base document, `None` when `config/application.toml` does not exist.
    pub base: Option<LoadedFile>,
    /// Environment document.
    pub environment: LoadedFile,
    /// Dotted-key overrides applied after the merge, last wins.
    pub overrides: Vec<(String, Value)>,
}

/// The merged document and the files that contributed to it, base first.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    pub table: Table,
    pub sources: Vec<PathBuf>,
}

/// Parse one document, attaching the file path to any syntax error.
pub fn parse_document(path: &Path, content: &str) -> Result<Table, LegendError> {
    toml::from_str(content).map_err(|e| LegendError::ConfigParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the merged document from pre-loaded inputs.
pub fn resolve(input: ResolveInput) -> Result<Resolved, LegendError> {
    let mut sources = Vec::with_capacity(2);

    let base = match &input.base {
        Some((path, content)) => {
            let table = parse_document(path, content)?;
            sources.push(path.clone());
            table
        }
        None => Table::new(),
    };

    let (env_path, env_content) = &input.environment;
    let overlay = parse_document(env_path, env_content)?;
    sources.push(env_path.clone());

    let mut table = deep_merge(&base, &overlay);

    if !input.overrides.is_empty() {
        let override_table = overrides::overrides_to_table(&input.overrides)?;
        table = deep_merge(&table, &override_table);
    }

    Ok(Resolved { table, sources })
}
