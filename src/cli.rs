//! Clap adapter for the `config` subcommand group.
//!
//! Compiled only with the `clap` Cargo feature (on by default). The bridge to
//! the core is [`ConfigArgs::into_action()`], which turns parsed arguments
//! into a [`ConfigAction`](crate::ConfigAction) handled by
//! [`ConfigStore::handle()`](crate::ConfigStore::handle).

use clap::{Args, Subcommand};

use crate::environment;
use crate::types::{ConfigAction, DocumentTarget};

/// Clap-derived args for `legend config`.
///
/// ```ignore
/// #[derive(Subcommand)]
/// enum Commands {
///     Config(ConfigArgs),
/// }
/// ```
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigSubcommand,
}

/// Available config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Show every merged key-value pair for an environment.
    List {
        #[arg(value_parser = parse_environment)]
        environment: String,
    },
    /// Show one merged value.
    Get {
        #[arg(value_parser = parse_environment)]
        environment: String,
        /// Dotted key path (e.g. "azure.resource_group").
        key: String,
    },
    /// Write a value into one configuration document.
    Set {
        /// `application` for the base document, or an environment name.
        target: String,
        /// Dotted key path (e.g. "azure.location").
        key: String,
        value: String,
    },
    /// Remove a value from one configuration document.
    Unset {
        /// `application` for the base document, or an environment name.
        target: String,
        /// Dotted key path (e.g. "azure.location").
        key: String,
    },
    /// Print a commented template of the keys legend reads.
    Template,
    /// List the environments defined under config/.
    Envs,
    /// Check that an environment defines the required keys.
    Check {
        #[arg(value_parser = parse_environment)]
        environment: String,
        /// Keys to require (defaults to the keys provisioning needs).
        keys: Vec<String>,
    },
}

impl ConfigArgs {
    /// Convert clap-parsed args into a framework-agnostic `ConfigAction`.
    pub fn into_action(self) -> ConfigAction {
        match self.action {
            ConfigSubcommand::List { environment } => ConfigAction::List { environment },
            ConfigSubcommand::Get { environment, key } => ConfigAction::Get { environment, key },
            ConfigSubcommand::Set { target, key, value } => ConfigAction::Set {
                target: DocumentTarget::from_name(&target),
                key,
                value,
            },
            ConfigSubcommand::Unset { target, key } => ConfigAction::Unset {
                target: DocumentTarget::from_name(&target),
                key,
            },
            ConfigSubcommand::Template => ConfigAction::Template,
            ConfigSubcommand::Envs => ConfigAction::Environments,
            ConfigSubcommand::Check { environment, keys } => ConfigAction::Check {
                environment,
                required: keys,
            },
        }
    }
}

/// Clap value parser for environment arguments.
pub fn parse_environment(raw: &str) -> Result<String, String> {
    environment::validate(raw)
        .map(|()| raw.to_string())
        .map_err(|e| e.to_string())
}
