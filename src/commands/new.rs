//! `legend new`: scaffold a Python Function App project.
//!
//! The Functions Core Tools create the bare project; legend then adds its
//! directory layout, dependency files, rendered templates, one config
//! document per environment, a virtualenv and a git repository.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use toml_edit::{DocumentMut, table, value};

use super::{Context, create_dir, write_file};
use crate::environment::BASE_DOCUMENT;
use crate::error::CommandError;
use crate::file::{CONFIG_DIR, EXTENSION};
use crate::names::{key_vault_name, normalize_name, storage_account_name};
use crate::process::Invocation;
use crate::template::LIB_TEMPLATES;

/// Environments every new project starts with.
pub const ENVIRONMENTS: [&str; 5] = ["development", "test", "sit", "uat", "production"];

/// Environments that only run on a developer machine and own no Azure resources.
const LOCAL_ENVIRONMENTS: [&str; 2] = ["development", "test"];

const DIRECTORIES: [&str; 5] = [".github/workflows", "test", "lib", "config", "bin"];

/// Rendered from templates with the app name as context.
const PROJECT_TEMPLATES: [&str; 4] = [
    "setup.py",
    "README.md",
    "bin/legend",
    ".github/workflows/deploy.yml",
];

/// Appended to the `requirements.txt` written by `func init`.
const RUNTIME_DEPENDENCIES: [&str; 1] = ["tomli>=2.0.1"];

const DEV_DEPENDENCIES: [&str; 1] = ["pytest>=7.4.0"];

/// Azure resource names for one cloud environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNames {
    pub resource_group: String,
    pub function_app: String,
    pub app_service_plan: String,
    pub storage_account: String,
    pub key_vault_name: String,
}

impl ResourceNames {
    pub fn for_environment(app_name: &str, environment: &str) -> Self {
        Self {
            resource_group: format!("{app_name}-group-{environment}"),
            function_app: format!("{app_name}-{environment}"),
            app_service_plan: format!("{app_name}-plan-{environment}"),
            storage_account: storage_account_name(app_name, environment),
            key_vault_name: key_vault_name(app_name, environment),
        }
    }
}

/// `config/application.toml` for a new project.
pub fn base_document(app_name: &str, location: &str) -> String {
    let mut doc = DocumentMut::new();
    doc["settings"] = table();
    doc["settings"]["app_name"] = value(app_name);
    doc["azure"] = table();
    doc["azure"]["location"] = value(location);
    format!("# Shared by every environment; environment files override it.\n{doc}")
}

/// `config/<environment>.toml`. Cloud environments also name their resources.
pub fn environment_document(environment: &str, resources: Option<&ResourceNames>) -> String {
    let mut doc = DocumentMut::new();
    doc["settings"] = table();
    doc["settings"]["environment"] = value(environment);
    if let Some(names) = resources {
        doc["azure"] = table();
        doc["azure"]["resource_group"] = value(names.resource_group.as_str());
        doc["azure"]["function_app"] = value(names.function_app.as_str());
        doc["azure"]["app_service_plan"] = value(names.app_service_plan.as_str());
        doc["azure"]["storage_account"] = value(names.storage_account.as_str());
        doc["azure"]["key_vault_name"] = value(names.key_vault_name.as_str());
    }
    doc.to_string()
}

pub fn run(ctx: &mut Context<'_>, name: &str, location: &str) -> Result<(), CommandError> {
    if !ctx.runner.available("func") {
        ctx.out
            .error("Azure Functions Core Tools (func CLI) is not installed.");
        ctx.out.blank();
        ctx.out.info("To install:");
        ctx.out.info("  legend bootstrap");
        ctx.out.info("OR:");
        ctx.out.info("  brew install azure-functions-core-tools@4");
        ctx.out.info(
            "Or visit: https://learn.microsoft.com/en-us/azure/azure-functions/functions-run-local",
        );
        return Err(CommandError::MissingTool("func".into()));
    }

    ctx.out.info(format!("Creating new Azure Function App: {name}"));
    let init = Invocation::new("func")
        .args(["init", name, "--worker-runtime", "python"])
        .current_dir(ctx.root())
        .interactive();
    ctx.runner.run_checked(&init)?;

    let project = ctx.root().join(name);
    for dir in DIRECTORIES {
        create_dir(&project.join(dir))?;
    }

    write_dependency_files(&project)?;

    let app_name = normalize_name(name);
    let context = [("app_name", app_name.as_str())];
    for id in PROJECT_TEMPLATES {
        let content = ctx.templates.render(id, &context)?;
        write_file(&project.join(id), &content)?;
    }
    make_executable(&project.join("bin/legend"))?;

    write_config_documents(&project, &app_name, location)?;

    for id in LIB_TEMPLATES {
        let content = ctx.templates.render(id, &context)?;
        write_file(&project.join(id), &content)?;
    }

    ctx.out.info("Creating virtual environment...");
    let venv = Invocation::new("python")
        .args(["-m", "venv", ".venv"])
        .current_dir(&project)
        .interactive();
    ctx.runner.run_checked(&venv)?;
    let install = Invocation::new(venv_python())
        .args(["-m", "pip", "install", "-r", "requirements-dev.txt"])
        .current_dir(&project)
        .interactive();
    ctx.runner.run_checked(&install)?;

    let git_init = Invocation::new("git").arg("init").current_dir(&project);
    ctx.runner.run_checked(&git_init)?;

    ctx.out.completed("Created new Legend app!");
    ctx.out.blank();
    ctx.out.info("Next steps:");
    ctx.out.info(format!("  cd {name}"));
    ctx.out
        .info("  legend generate function <name>      # Generate a new function");
    ctx.out.info("  legend test                          # Run tests");
    ctx.out
        .info("  legend run                           # Run function app locally");
    ctx.out
        .info("  legend provision <env>               # Provision Azure resources");
    ctx.out.info("  legend deploy <env>                  # Deploy to Azure");
    Ok(())
}

fn write_dependency_files(project: &Path) -> Result<(), CommandError> {
    let requirements = project.join("requirements.txt");
    let io_error = |source| CommandError::Io {
        path: requirements.clone(),
        source,
    };
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&requirements)
        .map_err(io_error)?;
    let mut appended = String::from("\n\n# Additional dependencies added by legend\n");
    for dep in RUNTIME_DEPENDENCIES {
        appended.push_str(dep);
        appended.push('\n');
    }
    file.write_all(appended.as_bytes()).map_err(io_error)?;

    let mut dev = String::from("-r requirements.txt\n\n# Development dependencies\n");
    for dep in DEV_DEPENDENCIES {
        dev.push_str(dep);
        dev.push('\n');
    }
    write_file(&project.join("requirements-dev.txt"), &dev)
}

fn write_config_documents(
    project: &Path,
    app_name: &str,
    location: &str,
) -> Result<(), CommandError> {
    let config = project.join(CONFIG_DIR);
    write_file(
        &config.join(format!("{BASE_DOCUMENT}.{EXTENSION}")),
        &base_document(app_name, location),
    )?;
    for environment in ENVIRONMENTS {
        let resources = (!LOCAL_ENVIRONMENTS.contains(&environment))
            .then(|| ResourceNames::for_environment(app_name, environment));
        write_file(
            &config.join(format!("{environment}.{EXTENSION}")),
            &environment_document(environment, resources.as_ref()),
        )?;
    }
    Ok(())
}

fn venv_python() -> &'static str {
    if cfg!(windows) {
        ".venv\\Scripts\\python.exe"
    } else {
        ".venv/bin/python"
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), CommandError> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).map_err(|source| {
        CommandError::Io {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<(), CommandError> {
    Ok(())
}
