//! Typed schema for the keys legend itself reads.
//!
//! Projects are free to carry any other sections (application settings for
//! the function code); only `[settings]` and `[azure]` are described here.
//! The schema drives `config template` and the unknown-key check on
//! `[azure]`.

use confique::Config;
use serde::{Deserialize, Serialize};

/// Region used when a project does not choose one.
pub const DEFAULT_LOCATION: &str = "australiasoutheast";

/// Keys read by the provisioning, deployment and introspection commands.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Project-wide settings.
    #[config(nested)]
    pub settings: Settings,

    /// Azure resources for this environment.
    #[config(nested)]
    pub azure: AzureSettings,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// Normalized application name (lowercase, hyphens).
    pub app_name: String,

    /// Name of the environment this document describes.
    pub environment: Option<String>,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AzureSettings {
    /// Azure region for all resources.
    #[config(default = "australiasoutheast")]
    pub location: String,

    /// Resource group holding every resource of the environment.
    pub resource_group: Option<String>,

    /// Function App name.
    pub function_app: Option<String>,

    /// Storage account name (3-24 lowercase letters and digits).
    pub storage_account: Option<String>,

    /// App Service plan name.
    pub app_service_plan: Option<String>,

    /// Key Vault name (3-24 lowercase letters, digits and hyphens).
    pub key_vault_name: Option<String>,
}

/// Commented TOML template generated from the schema's doc comments.
pub fn template() -> String {
    confique::toml::template::<ProjectConfig>(confique::toml::FormatOptions::default())
}
