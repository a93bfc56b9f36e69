//! Commands that drive the tools a Function App project depends on.
//!
//! Each command receives a [`Context`] holding the configuration store and
//! the capabilities it may use: a process [`Runner`], a [`Prompt`], template
//! rendering and an [`Output`] for progress messages. Commands that read
//! configuration validate the keys they need before building any external
//! command line.

pub mod azure;
pub mod bootstrap;
pub mod deploy;
pub mod destroy;
pub mod env;
pub mod generate;
pub mod info;
pub mod new;
pub mod output;
pub mod prompt;
pub mod provision;
pub mod run;
pub mod test;

use std::path::Path;

use crate::error::CommandError;
use crate::process::Runner;
use crate::store::ConfigStore;
use crate::template::Render;
use crate::validate::validate_required;
use crate::view::ConfigView;

pub use output::{Output, Status};
pub use prompt::{Prompt, TerminalPrompt};

/// Everything a command may touch.
pub struct Context<'a> {
    pub store: ConfigStore,
    pub runner: &'a mut dyn Runner,
    pub prompt: &'a mut dyn Prompt,
    pub templates: &'a dyn Render,
    pub out: Output<'a>,
}

impl Context<'_> {
    /// Directory commands run in.
    pub fn root(&self) -> &Path {
        self.store.layout().root()
    }

    /// Load `environment` and require `keys` to be present.
    pub fn load(&self, environment: &str, keys: &[&str]) -> Result<ConfigView, CommandError> {
        let view = self.store.load(environment)?;
        validate_required(&view, keys)?;
        Ok(view)
    }
}

/// Write `content` to `path`, creating parent directories.
pub(crate) fn write_file(path: &Path, content: &str) -> Result<(), CommandError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    std::fs::write(path, content).map_err(|e| CommandError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

pub(crate) fn create_dir(path: &Path) -> Result<(), CommandError> {
    std::fs::create_dir_all(path).map_err(|e| CommandError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::fs;

    use tempfile::TempDir;

    use super::prompt::fake::ScriptedPrompt;
    use super::*;
    use crate::process::fake::ScriptedRunner;
    use crate::template::BuiltinTemplates;

    /// A temporary project plus scripted collaborators.
    pub struct Harness {
        pub dir: TempDir,
        pub runner: ScriptedRunner,
        pub prompt: ScriptedPrompt,
        pub output: Vec<u8>,
    }

    impl Harness {
        /// An empty directory without `config/`.
        pub fn empty() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
                runner: ScriptedRunner::new(),
                prompt: ScriptedPrompt::new(),
                output: Vec::new(),
            }
        }

        /// A project with a `sit` environment that defines every Azure key.
        pub fn project() -> Self {
            let harness = Self::empty();
            let config = harness.dir.path().join("config");
            fs::create_dir(&config).unwrap();
            fs::write(
                config.join("application.toml"),
                "[settings]\napp_name = \"demo\"\n[azure]\nlocation = \"eastus\"\n",
            )
            .unwrap();
            fs::write(
                config.join("sit.toml"),
                "[settings]\nenvironment = \"sit\"\n\n[azure]\n\
                 resource_group = \"demo-group-sit\"\nfunction_app = \"demo-sit\"\n",
            )
            .unwrap();
            harness
        }

        pub fn with_runner(mut self, runner: ScriptedRunner) -> Self {
            self.runner = runner;
            self
        }

        pub fn with_prompt(mut self, prompt: ScriptedPrompt) -> Self {
            self.prompt = prompt;
            self
        }

        pub fn ctx(&mut self) -> Context<'_> {
            Context {
                store: ConfigStore::new(self.dir.path()),
                runner: &mut self.runner,
                prompt: &mut self.prompt,
                templates: &BuiltinTemplates,
                out: Output::new(&mut self.output),
            }
        }

        pub fn printed(&self) -> String {
            String::from_utf8_lossy(&self.output).into_owned()
        }
    }
}
