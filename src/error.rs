use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors raised by the configuration core.
///
/// Every variant is fatal to the command that triggered it. Nothing in the
/// core retries or logs; callers convert these into a message and an exit
/// code at the command boundary.
#[derive(Debug, Error)]
pub enum LegendError {
    #[error("Not in a Legend application directory ({dir} not found)")]
    NotAProjectDirectory { dir: PathBuf },

    #[error(
        "Environment config not found: {path}\nCreate {} in the config directory",
        file_name(.path)
    )]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid TOML syntax in {path}:\n{source}")]
    ConfigParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(
        "'{0}' is not a valid environment name - it is reserved for the base config file"
    )]
    ReservedEnvironmentName(String),

    #[error("Invalid environment name '{name}': {reason}")]
    InvalidEnvironmentName { name: String, reason: String },

    #[error(
        "Missing required configuration values{}:\n{}",
        sources_suffix(.sources),
        bullet_list(.keys)
    )]
    MissingConfigKeys {
        keys: Vec<String>,
        sources: Vec<PathBuf>,
    },

    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration error: {0}")]
    Schema(#[from] confique::Error),
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn sources_suffix(sources: &[PathBuf]) -> String {
    if sources.is_empty() {
        return String::new();
    }
    let names: Vec<String> = sources.iter().map(|p| file_name(p)).collect();
    format!(" in {}", names.join(" or "))
}

fn bullet_list(keys: &[String]) -> String {
    keys.iter()
        .map(|k| format!("  - {k}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Errors raised while running an external-collaborator command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Config(#[from] LegendError),

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error(
        "Command failed: {command} (exit code {}){}",
        code_label(.code),
        stderr_suffix(.stderr)
    )]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("Unexpected output from '{command}': {reason}")]
    UnexpectedOutput { command: String, reason: String },

    #[error("'{0}' is not installed")]
    MissingTool(String),

    #[error("{kind} '{name}' not found")]
    ResourceNotFound { kind: &'static str, name: String },

    #[error("Template '{0}' not found")]
    Template(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("{0}")]
    Aborted(String),

    #[error("{0}")]
    Unsupported(String),
}

fn code_label(code: &Option<i32>) -> String {
    code.map(|c| c.to_string())
        .unwrap_or_else(|| "none".to_string())
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_names_exact_path() {
        let err = LegendError::ConfigNotFound {
            path: PathBuf::from("config/sit.toml"),
        };
        let msg = err.to_string();
        assert!(msg.contains("config/sit.toml"));
        assert!(msg.contains("Create sit.toml"));
    }

    #[test]
    fn parse_error_includes_file_and_diagnostic() {
        let source = toml::from_str::<toml::Table>("key = ").unwrap_err();
        let diagnostic = source.to_string();
        let err = LegendError::ConfigParseError {
            path: PathBuf::from("config/application.toml"),
            source,
        };
        let msg = err.to_string();
        assert!(msg.contains("config/application.toml"));
        assert!(msg.contains(diagnostic.lines().next().unwrap()));
    }

    #[test]
    fn missing_keys_lists_every_key_and_sources() {
        let err = LegendError::MissingConfigKeys {
            keys: vec!["azure.resource_group".into(), "azure.location".into()],
            sources: vec![
                PathBuf::from("config/application.toml"),
                PathBuf::from("config/sit.toml"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("in application.toml or sit.toml"));
        assert!(msg.contains("  - azure.resource_group"));
        assert!(msg.contains("  - azure.location"));
    }

    #[test]
    fn reserved_name_explains_why() {
        let err = LegendError::ReservedEnvironmentName("application".into());
        assert!(err.to_string().contains("reserved for the base config file"));
    }

    #[test]
    fn failed_command_shows_stderr_when_present() {
        let err = CommandError::Failed {
            command: "az group create".into(),
            code: Some(2),
            stderr: "ERROR: not logged in\n".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exit code 2"));
        assert!(msg.ends_with("ERROR: not logged in"));
    }
}
