/// Which document a write targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    /// `config/application.toml`.
    Base,
    /// `config/<environment>.toml`.
    Environment(String),
}

impl DocumentTarget {
    /// `application` names the base document; anything else an environment.
    pub fn from_name(name: &str) -> Self {
        if name == crate::environment::BASE_DOCUMENT {
            DocumentTarget::Base
        } else {
            DocumentTarget::Environment(name.to_string())
        }
    }
}

/// A config operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    List { environment: String },
    Get { environment: String, key: String },
    Set {
        target: DocumentTarget,
        key: String,
        value: String,
    },
    Unset { target: DocumentTarget, key: String },
    Template,
    Environments,
    Check {
        environment: String,
        required: Vec<String>,
    },
}
