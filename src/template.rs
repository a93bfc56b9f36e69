//! Project file templates.
//!
//! Templates are compiled into the binary and addressed by the path they are
//! written to inside a new project. Rendering substitutes `{{ key }}`
//! placeholders; placeholders without a matching key are kept as they are,
//! which leaves GitHub Actions expressions (`${{ ... }}`) intact.

use crate::error::CommandError;

/// Built-in templates: `(id, contents)`.
const TEMPLATES: &[(&str, &str)] = &[
    ("README.md", include_str!("../templates/README.md")),
    ("setup.py", include_str!("../templates/setup.py")),
    ("bin/legend", include_str!("../templates/bin/legend")),
    (
        ".github/workflows/deploy.yml",
        include_str!("../templates/workflows/deploy.yml"),
    ),
    ("test/function.py", include_str!("../templates/test/function.py")),
    (
        "lib/config/__init__.py",
        include_str!("../templates/lib/config/__init__.py"),
    ),
    (
        "lib/config/config.py",
        include_str!("../templates/lib/config/config.py"),
    ),
];

/// Ids of the runtime configuration helpers copied into `lib/config`.
pub const LIB_TEMPLATES: [&str; 2] = ["lib/config/__init__.py", "lib/config/config.py"];

/// Produces file contents from a template id and a key-value context.
pub trait Render {
    fn render(&self, id: &str, context: &[(&str, &str)]) -> Result<String, CommandError>;
}

/// Renders the templates embedded in the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinTemplates;

impl Render for BuiltinTemplates {
    fn render(&self, id: &str, context: &[(&str, &str)]) -> Result<String, CommandError> {
        let (_, source) = TEMPLATES
            .iter()
            .find(|(name, _)| *name == id)
            .ok_or_else(|| CommandError::Template(id.to_string()))?;
        Ok(substitute(source, context))
    }
}

/// Replace `{{ key }}` placeholders found in `context`.
pub fn substitute(source: &str, context: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(len) = after_open.find("}}") else {
            break;
        };
        let key = after_open[..len].trim();
        out.push_str(&rest[..start]);
        match context.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[start..start + 2 + len + 2]),
        }
        rest = &after_open[len + 2..];
    }

    out.push_str(rest);
    out
}
