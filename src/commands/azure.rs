//! Azure CLI helpers.

use serde_json::Value;

use super::Context;
use crate::error::CommandError;
use crate::process::{Invocation, Runner};

/// Build an `az` invocation.
pub fn az<I, S>(args: I) -> Invocation
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Invocation::new("az").args(args)
}

/// Run `az … -o json` and parse its output. Empty output is `null`.
pub fn az_json(runner: &mut dyn Runner, args: &[&str]) -> Result<Value, CommandError> {
    let invocation = az(args.iter().copied()).args(["-o", "json"]);
    let completed = runner.run_checked(&invocation)?;
    parse_json(&invocation, &completed.stdout)
}

/// Run `az … -o tsv` and return trimmed output.
pub fn az_tsv(runner: &mut dyn Runner, args: &[&str]) -> Result<String, CommandError> {
    let invocation = az(args.iter().copied()).args(["-o", "tsv"]);
    let completed = runner.run_checked(&invocation)?;
    Ok(completed.stdout.trim().to_string())
}

pub(crate) fn parse_json(invocation: &Invocation, stdout: &str) -> Result<Value, CommandError> {
    if stdout.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(stdout).map_err(|e| CommandError::UnexpectedOutput {
        command: invocation.to_string(),
        reason: e.to_string(),
    })
}

/// Whether `az <resource_type> show` finds the resource.
pub fn resource_exists(
    runner: &mut dyn Runner,
    resource_type: &str,
    name: &str,
    resource_group: &str,
) -> Result<bool, CommandError> {
    let invocation = az([resource_type, "show", "--name", name])
        .args(["--resource-group", resource_group, "-o", "json"]);
    let completed = runner.run(&invocation)?;
    tracing::debug!(resource_type, name, exists = completed.success(), "resource lookup");
    Ok(completed.success())
}

/// Fail with deployment hints unless the function app exists.
pub(crate) fn ensure_function_app(
    ctx: &mut Context<'_>,
    function_app: &str,
    resource_group: &str,
) -> Result<(), CommandError> {
    if resource_exists(ctx.runner, "functionapp", function_app, resource_group)? {
        return Ok(());
    }
    ctx.out.error(format!("Function app '{function_app}' not found"));
    ctx.out.blank();
    ctx.out.info("To deploy your app:");
    ctx.out.info("1. Run 'legend provision' to create Azure resources");
    ctx.out.info("2. Run 'legend deploy' to deploy your code");
    Err(CommandError::ResourceNotFound {
        kind: "Function app",
        name: function_app.to_string(),
    })
}
