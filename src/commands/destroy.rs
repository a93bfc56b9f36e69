//! `legend destroy`: delete an environment's resource group.

use super::Context;
use super::azure::{az, ensure_function_app};
use crate::error::CommandError;

const REQUIRED: [&str; 2] = ["azure.resource_group", "azure.function_app"];

pub fn run(ctx: &mut Context<'_>, environment: &str) -> Result<(), CommandError> {
    let view = ctx.load(environment, &REQUIRED)?;
    let resource_group = view.require_str("azure.resource_group")?;
    let function_app = view.require_str("azure.function_app")?;

    ensure_function_app(ctx, function_app, resource_group)?;

    ctx.out
        .warning(format!("This will delete ALL resources in environment: {environment}"));
    ctx.out.info(format!("Resource Group: {resource_group}"));
    ctx.out.info(format!("Function App: {function_app}"));
    ctx.out.blank();
    ctx.out.info("This action cannot be undone!");

    if !ctx.prompt.confirm("Are you sure you want to proceed?")? {
        ctx.out.info("Aborted.");
        return Err(CommandError::Aborted("Destroy cancelled".into()));
    }

    let typed = ctx.prompt.input(&format!(
        "To confirm, please type the function app name ({function_app})"
    ))?;
    if typed.trim() != function_app {
        ctx.out.error("App name does not match. Aborted.");
        return Err(CommandError::Aborted(
            "Function app name did not match".into(),
        ));
    }

    ctx.out
        .info(format!("Deleting resource group {resource_group}..."));
    let delete = az(["group", "delete", "--name", resource_group, "--yes", "--no-wait"]);
    ctx.runner.run_checked(&delete)?;
    tracing::debug!(resource_group, "resource group deletion requested");

    ctx.out.success("Resource group deletion started");
    ctx.out.blank();
    ctx.out.info("Note: Deletion may take several minutes to complete");
    ctx.out.info("Check the Azure portal for status");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prompt::fake::ScriptedPrompt;
    use crate::commands::testing::Harness;
    use crate::process::fake::ScriptedRunner;

    #[test]
    fn double_confirmation_deletes_group() {
        let prompt = ScriptedPrompt::new().confirm_with(true).input_with("demo-sit");
        let mut h = Harness::project().with_prompt(prompt);
        run(&mut h.ctx(), "sit").unwrap();

        let commands = h.runner.commands();
        assert_eq!(commands.len(), 2);
        assert!(commands[0].starts_with("az functionapp show --name demo-sit"));
        assert_eq!(
            commands[1],
            "az group delete --name demo-group-sit --yes --no-wait"
        );
        assert_eq!(h.prompt.asked.len(), 2);
        assert!(h.prompt.asked[1].contains("(demo-sit)"));
        assert!(h.printed().contains("✅ Resource group deletion started"));
    }

    #[test]
    fn declining_first_question_deletes_nothing() {
        let prompt = ScriptedPrompt::new().confirm_with(false);
        let mut h = Harness::project().with_prompt(prompt);
        assert!(matches!(
            run(&mut h.ctx(), "sit"),
            Err(CommandError::Aborted(_))
        ));
        assert_eq!(h.runner.calls.len(), 1);
        assert_eq!(h.prompt.asked.len(), 1);
    }

    #[test]
    fn wrong_app_name_deletes_nothing() {
        let prompt = ScriptedPrompt::new().confirm_with(true).input_with("demo-uat");
        let mut h = Harness::project().with_prompt(prompt);
        assert!(matches!(
            run(&mut h.ctx(), "sit"),
            Err(CommandError::Aborted(_))
        ));
        assert_eq!(h.runner.calls.len(), 1);
        assert!(h.printed().contains("App name does not match"));
    }

    #[test]
    fn missing_app_never_prompts() {
        let runner = ScriptedRunner::new().fail(3, "ResourceNotFound");
        let mut h = Harness::project().with_runner(runner);
        let err = run(&mut h.ctx(), "sit").unwrap_err();
        assert!(matches!(err, CommandError::ResourceNotFound { .. }));
        assert!(h.prompt.asked.is_empty());
        assert!(h.printed().contains("Run 'legend provision'"));
    }
}
