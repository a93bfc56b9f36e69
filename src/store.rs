use std::path::PathBuf;

use toml::Value;

use crate::environment::Environment;
use crate::error::LegendError;
use crate::file::ConfigLayout;
use crate::ops::{self, ConfigResult};
use crate::persist;
use crate::resolve::{self, ResolveInput};
use crate::schema::{self, AzureSettings};
use crate::types::{ConfigAction, DocumentTarget};
use crate::validate;
use crate::view::ConfigView;

/// Keys `config check` requires when none are given.
pub const DEFAULT_REQUIRED_KEYS: [&str; 3] =
    ["settings.app_name", "azure.resource_group", "azure.location"];

/// Loads merged configuration views for a project rooted at a directory.
///
/// The store holds no cached state: every [`load`](Self::load) reads the
/// documents again. Overrides added with [`with_overrides`](Self::with_overrides)
/// are merged on top of every view it produces.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    layout: ConfigLayout,
    overrides: Vec<(String, Value)>,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: ConfigLayout::new(root),
            overrides: Vec::new(),
        }
    }

    /// A store rooted at the process working directory.
    pub fn current_dir() -> Result<Self, LegendError> {
        let cwd = std::env::current_dir().map_err(|e| LegendError::Io {
            path: PathBuf::from("."),
            source: e,
        })?;
        Ok(Self::new(cwd))
    }

    /// Add several overrides at once, in order.
    pub fn with_overrides(mut self, entries: impl IntoIterator<Item = (String, Value)>) -> Self {
        self.overrides.extend(entries);
        self
    }

    pub fn layout(&self) -> &ConfigLayout {
        &self.layout
    }

    /// Load the merged view for `environment`.
    ///
    /// The name is checked before the filesystem is touched, so a reserved
    /// name fails with [`LegendError::ReservedEnvironmentName`] even outside a
    /// project.
    pub fn load(&self, environment: &str) -> Result<ConfigView, LegendError> {
        let environment = Environment::parse(environment)?;
        self.layout.ensure_project()?;

        let input = ResolveInput {
            base: self.layout.read_base()?,
            environment: self.layout.read_environment(&environment)?,
            overrides: self.overrides.clone(),
        };
        let resolved = resolve::resolve(input)?;
        Ok(ConfigView::new(environment, resolved.table, resolved.sources))
    }

    /// Names of the environments this project defines.
    pub fn environments(&self) -> Result<Vec<String>, LegendError> {
        self.layout.list_environments()
    }

    /// Path of the document a write goes to.
    fn target_path(&self, target: &DocumentTarget) -> Result<PathBuf, LegendError> {
        match target {
            DocumentTarget::Base => Ok(self.layout.base_path()),
            DocumentTarget::Environment(name) => {
                let environment = Environment::parse(name)?;
                Ok(self.layout.environment_path(&environment))
            }
        }
    }

    /// Handle a `ConfigAction` and print the result to stdout.
    pub fn handle_and_print(&self, action: &ConfigAction) -> Result<(), LegendError> {
        let result = self.handle(action)?;
        println!("{result}");
        Ok(())
    }

    /// Handle a `ConfigAction` (list / get / set / unset / template / envs / check).
    pub fn handle(&self, action: &ConfigAction) -> Result<ConfigResult, LegendError> {
        match action {
            ConfigAction::List { environment } => {
                let view = self.load(environment)?;
                Ok(ops::list_values(&view))
            }
            ConfigAction::Get { environment, key } => {
                let view = self.load(environment)?;
                ops::get_value(&view, key)
            }
            ConfigAction::Set { target, key, value } => {
                self.layout.ensure_project()?;
                let path = self.target_path(target)?;
                persist::persist_value(&path, key, value)
            }
            ConfigAction::Unset { target, key } => {
                self.layout.ensure_project()?;
                let path = self.target_path(target)?;
                persist::unset_value(&path, key)
            }
            ConfigAction::Template => Ok(ConfigResult::Template(schema::template())),
            ConfigAction::Environments => Ok(ConfigResult::Environments(self.environments()?)),
            ConfigAction::Check {
                environment,
                required,
            } => {
                let view = self.load(environment)?;
                if required.is_empty() {
                    validate::validate_required(&view, &DEFAULT_REQUIRED_KEYS)?;
                } else {
                    validate::validate_required(&view, required.as_slice())?;
                }
                let warnings = match view.get("azure").and_then(Value::as_table) {
                    Some(azure) => validate::unknown_keys::<AzureSettings>(azure, "azure")?
                        .into_iter()
                        .map(|key| format!("unknown key '{key}'"))
                        .collect(),
                    None => Vec::new(),
                };
                Ok(ConfigResult::Checked {
                    environment: view.environment().to_string(),
                    warnings,
                })
            }
        }
    }
}

/// Load the merged view for `environment` from the working directory.
pub fn load_config(environment: &str) -> Result<ConfigView, LegendError> {
    ConfigStore::current_dir()?.load(environment)
}
