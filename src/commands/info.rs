//! `legend info`: hostname, keys and invoke URLs of a deployed app.

use serde_json::Value;

use super::Context;
use super::azure::{az_json, az_tsv, ensure_function_app};
use crate::error::CommandError;

const REQUIRED: [&str; 2] = ["azure.resource_group", "azure.function_app"];

/// A deployed function and its invoke URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub invoke_url: String,
}

/// Parse `az functionapp function list`. Names come back as `app/function`.
pub fn parse_functions(list: &Value) -> Vec<FunctionInfo> {
    let Some(items) = list.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let full_name = item["name"].as_str()?;
            let name = full_name.rsplit('/').next().unwrap_or(full_name);
            if name.is_empty() {
                return None;
            }
            Some(FunctionInfo {
                name: name.to_string(),
                invoke_url: item["invokeUrlTemplate"]
                    .as_str()
                    .unwrap_or("unknown")
                    .to_string(),
            })
        })
        .collect()
}

/// String-valued entries of a JSON object, skipping nulls.
pub fn string_entries(object: &Value) -> Vec<(String, String)> {
    object
        .as_object()
        .map(|map| {
            map.iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect()
        })
        .unwrap_or_default()
}

pub fn run(ctx: &mut Context<'_>, environment: &str) -> Result<(), CommandError> {
    let view = ctx.load(environment, &REQUIRED)?;
    let resource_group = view.require_str("azure.resource_group")?;
    let function_app = view.require_str("azure.function_app")?;
    let scope = ["--resource-group", resource_group, "--name", function_app];

    ensure_function_app(ctx, function_app, resource_group)?;

    let show: Vec<&str> = ["functionapp", "show"]
        .into_iter()
        .chain(scope)
        .chain(["--query", "defaultHostName"])
        .collect();
    let hostname = az_tsv(ctx.runner, &show)?;
    if hostname.is_empty() {
        return Err(CommandError::UnexpectedOutput {
            command: "az functionapp show".into(),
            reason: "no default hostname".into(),
        });
    }

    ctx.out.blank();
    ctx.out.info(format!("Function App: {function_app}"));
    ctx.out.info(format!("Resource Group: {resource_group}"));
    ctx.out.info(format!("Hostname: https://{hostname}"));

    let keys_list: Vec<&str> = ["functionapp", "keys", "list"]
        .into_iter()
        .chain(scope)
        .collect();
    let host_keys = az_json(ctx.runner, &keys_list)?;
    let master_key = host_keys["masterKey"].as_str().map(str::to_string);
    let default_key = host_keys["functionKeys"]["default"]
        .as_str()
        .map(str::to_string);

    if !host_keys.is_null() {
        ctx.out.blank();
        ctx.out.info("Host Keys:");
        if let Some(master) = &master_key {
            ctx.out.info(format!("  🔑 Master Key: {master}"));
        }
        for (name, value) in string_entries(&host_keys["functionKeys"]) {
            ctx.out.info(format!("  🔑 {name}: {value}"));
        }
    }

    ctx.out.blank();
    ctx.out.info("Functions:");
    let function_list: Vec<&str> = ["functionapp", "function", "list"]
        .into_iter()
        .chain(scope)
        .collect();
    let functions = parse_functions(&az_json(ctx.runner, &function_list)?);
    if functions.is_empty() {
        ctx.out
            .info("No functions found. Deploy your code first using 'legend deploy'");
        return Ok(());
    }

    for function in &functions {
        let keys_args: Vec<&str> = ["functionapp", "function", "keys", "list"]
            .into_iter()
            .chain(scope)
            .chain(["--function-name", function.name.as_str()])
            .collect();
        let function_keys = string_entries(&az_json(ctx.runner, &keys_args)?);

        ctx.out.blank();
        ctx.out.info(format!("{}:", function.name));
        ctx.out.info(format!("  Invoke URL: {}", function.invoke_url));
        ctx.out.info("  URLs with keys:");
        if let Some(master) = &master_key {
            ctx.out.info("  🔑 App Master Key:");
            ctx.out.info(format!("    {}?code={master}", function.invoke_url));
        }
        if let Some(default) = &default_key {
            ctx.out.info("  🔑 App Default Key:");
            ctx.out.info(format!("    {}?code={default}", function.invoke_url));
        }
        for (name, value) in function_keys {
            ctx.out.info(format!("  🔑 Function {name}:"));
            ctx.out.info(format!("    {}?code={value}", function.invoke_url));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::testing::Harness;
    use crate::process::fake::ScriptedRunner;

    #[test]
    fn function_names_drop_app_prefix() {
        let list = json!([
            {"name": "demo-sit/orders", "invokeUrlTemplate": "https://h/api/orders"},
            {"name": "health"},
            {"name": ""},
            {"invokeUrlTemplate": "https://h/api/x"}
        ]);
        assert_eq!(
            parse_functions(&list),
            vec![
                FunctionInfo {
                    name: "orders".into(),
                    invoke_url: "https://h/api/orders".into()
                },
                FunctionInfo {
                    name: "health".into(),
                    invoke_url: "unknown".into()
                },
            ]
        );
        assert!(parse_functions(&Value::Null).is_empty());
    }

    #[test]
    fn null_keys_are_skipped() {
        let keys = json!({"default": "abc", "other": null});
        assert_eq!(string_entries(&keys), vec![("default".into(), "abc".into())]);
    }

    #[test]
    fn prints_urls_with_every_key() {
        let runner = ScriptedRunner::new()
            .ok("{}") // functionapp show
            .ok("demo-sit.azurewebsites.net\n")
            .ok(r#"{"masterKey": "M", "functionKeys": {"default": "D"}}"#)
            .ok(r#"[{"name": "demo-sit/orders", "invokeUrlTemplate": "https://demo-sit.azurewebsites.net/api/orders"}]"#)
            .ok(r#"{"own": "F"}"#);
        let mut h = Harness::project().with_runner(runner);
        run(&mut h.ctx(), "sit").unwrap();

        let printed = h.printed();
        assert!(printed.contains("Hostname: https://demo-sit.azurewebsites.net"));
        assert!(printed.contains("🔑 Master Key: M"));
        assert!(printed.contains("https://demo-sit.azurewebsites.net/api/orders?code=M"));
        assert!(printed.contains("https://demo-sit.azurewebsites.net/api/orders?code=D"));
        assert!(printed.contains("🔑 Function own:"));
        assert!(printed.contains("https://demo-sit.azurewebsites.net/api/orders?code=F"));

        let commands = h.runner.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[4],
            "az functionapp function keys list --resource-group demo-group-sit \
             --name demo-sit --function-name orders -o json"
        );
    }

    #[test]
    fn empty_function_list_points_to_deploy() {
        let runner = ScriptedRunner::new()
            .ok("{}")
            .ok("demo-sit.azurewebsites.net")
            .ok("{}")
            .ok("[]");
        let mut h = Harness::project().with_runner(runner);
        run(&mut h.ctx(), "sit").unwrap();
        assert!(h.printed().contains("Deploy your code first"));
    }

    #[test]
    fn missing_app_is_reported() {
        let runner = ScriptedRunner::new().fail(3, "ResourceNotFound");
        let mut h = Harness::project().with_runner(runner);
        assert!(matches!(
            run(&mut h.ctx(), "sit"),
            Err(CommandError::ResourceNotFound { .. })
        ));
        assert_eq!(h.runner.calls.len(), 1);
    }
}
