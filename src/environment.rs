//! Environment names and the reserved base-document name.
//!
//! An environment name maps to `config/<name>.toml`. The base document is
//! `config/application.toml`, so `application` can never name an environment.
//! These checks run before the store touches the filesystem.

use std::fmt;

use crate::error::LegendError;

/// Name of the base document, reserved as an environment name.
pub const BASE_DOCUMENT: &str = "application";

/// Variable naming the active environment inside a generated project.
pub const ENVIRONMENT_VAR: &str = "LEGEND_ENVIRONMENT";

/// A validated environment name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Environment(String);

impl Environment {
    /// Validate `name` and wrap it.
    pub fn parse(name: &str) -> Result<Self, LegendError> {
        validate(name)?;
        Ok(Self(name.to_string()))
    }

    /// Read the environment from `LEGEND_ENVIRONMENT` in the given variables.
    ///
    /// Takes an iterator so tests can pass synthetic data instead of
    /// `std::env::vars()`. Returns `Ok(None)` when the variable is unset.
    pub fn from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Option<Self>, LegendError> {
        vars.into_iter()
            .find(|(k, _)| k == ENVIRONMENT_VAR)
            .map(|(_, v)| Self::parse(&v))
            .transpose()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Environment {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Reject names that cannot denote an environment document.
///
/// `application` is reserved for the base document. Empty names and names
/// that would escape the `config/` directory are rejected as well.
pub fn validate(name: &str) -> Result<(), LegendError> {
    if name == BASE_DOCUMENT {
        return Err(LegendError::ReservedEnvironmentName(name.to_string()));
    }
    let invalid = |reason: &str| LegendError::InvalidEnvironmentName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.trim().is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(invalid("name must not contain path components"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn ordinary_names_are_accepted() {
        for name in ["development", "test", "sit", "uat", "production", "eu-west.2"] {
            assert_eq!(Environment::parse(name).unwrap().as_str(), name);
        }
    }

    #[test]
    fn application_is_reserved() {
        let err = Environment::parse("application").unwrap_err();
        assert!(matches!(err, LegendError::ReservedEnvironmentName(n) if n == "application"));
    }

    #[test]
    fn reserved_check_is_case_sensitive() {
        assert!(Environment::parse("Application").is_ok());
    }

    #[test]
    fn empty_name_is_invalid() {
        assert!(matches!(
            validate("  "),
            Err(LegendError::InvalidEnvironmentName { .. })
        ));
    }

    #[test]
    fn path_components_are_invalid() {
        for name in ["../secrets", "a/b", "a\\b", ".."] {
            assert!(
                matches!(validate(name), Err(LegendError::InvalidEnvironmentName { .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn from_vars_reads_legend_environment() {
        let env = Environment::from_vars(vars(&[("LEGEND_ENVIRONMENT", "sit")])).unwrap();
        assert_eq!(env, Some(Environment::parse("sit").unwrap()));
    }

    #[test]
    fn from_vars_unset_is_none() {
        let env = Environment::from_vars(vars(&[("OTHER", "x")])).unwrap();
        assert_eq!(env, None);
    }

    #[test]
    fn from_vars_rejects_reserved_value() {
        let result = Environment::from_vars(vars(&[("LEGEND_ENVIRONMENT", "application")]));
        assert!(matches!(
            result,
            Err(LegendError::ReservedEnvironmentName(_))
        ));
    }
}
