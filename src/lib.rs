//! Scaffold, configure and deploy Azure Function App projects.
//!
//! At the heart of legend is a small hierarchical configuration store. A
//! project keeps its settings under `config/`:
//!
//! ```text
//! config/application.toml   optional base, shared by every environment
//! config/<env>.toml         required, one per environment
//! ```
//!
//! Loading an environment deep-merges the environment document over the base
//! and hands back a read-only [`ConfigView`]:
//!
//! ```ignore
//! let view = ConfigStore::current_dir()?.load("sit")?;
//! validate_required(&view, &["azure.resource_group", "azure.location"])?;
//! let group = view.get_str("azure.resource_group");
//! let same = view.at("azure").at("resource_group").as_str();
//! ```
//!
//! # Merge rules
//!
//! Where both documents hold a table at the same path the tables merge key
//! by key. Anything else is replaced wholesale by the environment document,
//! including arrays and table/scalar mismatches. Keys present only in the
//! base survive.
//!
//! # Presence, not truthiness
//!
//! Lookups return `Option`. A key holding `false`, `0`, `""` or an empty
//! table is present; only a key that no document defines is missing.
//! [`validate_required`] reports every missing key at once, together with
//! the files that were consulted.
//!
//! # The reserved name
//!
//! `application` names the base document and can never be an environment.
//! [`ConfigStore::load`] rejects it before touching the filesystem, so the
//! error is the same whether or not `config/` exists.
//!
//! # Writing configuration
//!
//! Loading never writes. `legend config set|unset` edit a single document
//! through [`ConfigStore::handle`] with `toml_edit`, keeping comments and
//! formatting intact.
//!
//! # Commands
//!
//! The [`commands`] module drives the external tools a project depends on
//! (Azure CLI, Functions Core Tools, git, Python). Each command receives a
//! [`commands::Context`] whose process runner, prompt and template renderer
//! are traits, so every command is testable without spawning anything.
//!
//! # Clap adapter
//!
//! The `cli` module (behind the `clap` feature, on by default) provides
//! [`ConfigArgs`], the `config` subcommand group, and is what the `legend`
//! binary is built on. Without the feature the library has no CLI
//! framework dependency.

pub mod commands;
pub mod environment;
pub mod error;
pub mod file;
pub mod names;
pub mod overrides;
pub mod process;
pub mod schema;
pub mod template;
pub mod types;
pub mod validate;
pub mod view;

#[cfg(feature = "clap")]
pub mod cli;
pub(crate) mod merge;
mod ops;
mod persist;
mod resolve;
mod store;

#[cfg(feature = "clap")]
pub use cli::{ConfigArgs, ConfigSubcommand};
pub use environment::Environment;
pub use error::{CommandError, LegendError};
pub use ops::ConfigResult;
pub use store::{ConfigStore, DEFAULT_REQUIRED_KEYS, load_config};
pub use types::{ConfigAction, DocumentTarget};
pub use validate::validate_required;
pub use view::ConfigView;
