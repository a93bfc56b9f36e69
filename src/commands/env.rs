//! `legend env`: print an environment's configuration as shell exports.

use toml::{Table, Value};

use super::Context;
use crate::error::CommandError;
use crate::ops::format_value;

/// Prefix of every exported variable.
pub const PREFIX: &str = "LEGEND";

/// Variable name segment for a key: uppercased, `-` and `.` become `_`.
pub fn variable_segment(key: &str) -> String {
    key.to_uppercase().replace(['-', '.'], "_")
}

/// `NAME="value"` pairs for every leaf of `table`, in document order.
pub fn to_env_vars(prefix: &str, table: &Table) -> Vec<(String, String)> {
    let mut vars = Vec::new();
    collect(prefix, table, &mut vars);
    vars
}

fn collect(prefix: &str, table: &Table, vars: &mut Vec<(String, String)>) {
    for (key, value) in table {
        let name = format!("{prefix}_{}", variable_segment(key));
        match value {
            Value::Table(nested) => collect(&name, nested, vars),
            leaf => vars.push((name, format_value(leaf))),
        }
    }
}

pub fn run(ctx: &mut Context<'_>, environment: &str) -> Result<(), CommandError> {
    let view = ctx.load(environment, &[])?;
    for (name, value) in to_env_vars(PREFIX, view.table()) {
        ctx.out.info(format!("export {name}=\"{value}\";"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::error::LegendError;

    #[test]
    fn segments_are_shell_safe() {
        assert_eq!(variable_segment("function-app.name"), "FUNCTION_APP_NAME");
        assert_eq!(variable_segment("app_name"), "APP_NAME");
    }

    #[test]
    fn nested_tables_extend_the_name() {
        let table: Table = toml::from_str(
            "debug = true\n[azure]\nlocation = \"eastus\"\n[azure.key-vault]\nttl = 30\n",
        )
        .unwrap();
        let vars = to_env_vars("LEGEND", &table);
        assert!(vars.contains(&("LEGEND_DEBUG".into(), "true".into())));
        assert!(vars.contains(&("LEGEND_AZURE_LOCATION".into(), "eastus".into())));
        assert!(vars.contains(&("LEGEND_AZURE_KEY_VAULT_TTL".into(), "30".into())));
    }

    #[test]
    fn prints_exports_for_merged_view() {
        let mut h = Harness::project();
        run(&mut h.ctx(), "sit").unwrap();
        let printed = h.printed();
        assert!(printed.contains("export LEGEND_SETTINGS_APP_NAME=\"demo\";"));
        assert!(printed.contains("export LEGEND_AZURE_LOCATION=\"eastus\";"));
        assert!(printed.contains("export LEGEND_AZURE_FUNCTION_APP=\"demo-sit\";"));
    }

    #[test]
    fn reserved_name_is_rejected() {
        let mut h = Harness::project();
        assert!(matches!(
            run(&mut h.ctx(), "application"),
            Err(CommandError::Config(LegendError::ReservedEnvironmentName(_)))
        ));
    }
}
