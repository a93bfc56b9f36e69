use super::Context;
use super::azure::az;
use crate::error::CommandError;

const REQUIRED: [&str; 3] = ["settings.app_name", "azure.resource_group", "azure.location"];

/// ARM template and parameters file for an environment.
pub fn deployment_files(environment: &str) -> (String, String) {
    (
        format!("deployment/azuredeploy-{environment}.json"),
        format!("deployment/azuredeploy-{environment}.parameters.json"),
    )
}

/// Create the resource group and deploy the environment's ARM template.
pub fn run(ctx: &mut Context<'_>, environment: &str) -> Result<(), CommandError> {
    let view = ctx.load(environment, &REQUIRED)?;
    let app_name = view.require_str("settings.app_name")?;
    let resource_group = view.require_str("azure.resource_group")?;
    let location = view.require_str("azure.location")?;
    let (template, parameters) = deployment_files(environment);

    ctx.out
        .info(format!("Provisioning {environment} in resource group {resource_group}"));

    let group = az(["group", "create", "--name", resource_group, "--location", location]);
    ctx.runner.run_checked(&group)?;
    ctx.out.success(format!("Resource group {resource_group} is ready"));

    let deployment_name = format!("{app_name}-{environment}");
    let parameters = format!("@{parameters}");
    let deployment = az(["deployment", "group", "create"])
        .args(["--name", deployment_name.as_str()])
        .args(["--resource-group", resource_group])
        .args(["--template-file", template.as_str()])
        .args(["--parameters", parameters.as_str()])
        .current_dir(ctx.root())
        .interactive();
    ctx.runner.run_checked(&deployment)?;

    ctx.out.completed(format!("Provisioned {environment}"));
    Ok(())
}
