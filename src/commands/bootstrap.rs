//! `legend bootstrap`: check for and install the tools legend drives.

use super::Context;
use crate::error::CommandError;
use crate::process::Invocation;

/// A tool legend or a generated project needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub name: &'static str,
    /// Program probed with `--version`.
    pub program: &'static str,
    pub install: Option<&'static [&'static str]>,
    pub homepage: &'static str,
}

impl Dependency {
    pub fn install_command(&self) -> Option<String> {
        self.install.map(|argv| argv.join(" "))
    }
}

pub const DEPENDENCIES: [Dependency; 5] = [
    Dependency {
        name: "Homebrew",
        program: "brew",
        install: None,
        homepage: "https://brew.sh",
    },
    Dependency {
        name: "Git",
        program: "git",
        install: None,
        homepage: "https://git-scm.com",
    },
    Dependency {
        name: "pip",
        program: "pip3",
        install: Some(&["python3", "-m", "ensurepip", "--upgrade"]),
        homepage: "https://pip.pypa.io",
    },
    Dependency {
        name: "Azure Functions Core Tools",
        program: "func",
        install: Some(&["brew", "install", "azure-functions-core-tools@4"]),
        homepage: "https://learn.microsoft.com/en-us/azure/azure-functions/functions-run-local",
    },
    Dependency {
        name: "Azure CLI",
        program: "az",
        install: Some(&["brew", "install", "azure-cli"]),
        homepage: "https://learn.microsoft.com/en-us/cli/azure/install-azure-cli",
    },
];

/// Whether bootstrap knows how to install tools on this platform.
pub fn supported_platform() -> bool {
    cfg!(target_os = "macos")
}

pub fn run(ctx: &mut Context<'_>) -> Result<(), CommandError> {
    run_on(ctx, supported_platform())
}

/// [`run`] with the platform check supplied by the caller.
pub fn run_on(ctx: &mut Context<'_>, supported: bool) -> Result<(), CommandError> {
    if !supported {
        ctx.out.error("This command currently only supports macOS");
        return Err(CommandError::Unsupported(
            "bootstrap only supports macOS".into(),
        ));
    }

    ctx.out.info("Checking dependencies...");
    let mut missing = Vec::new();
    for dep in DEPENDENCIES {
        if ctx.runner.available(dep.program) {
            ctx.out.success(format!("{} is installed", dep.name));
        } else {
            ctx.out.error(format!("{} is not installed", dep.name));
            missing.push(dep);
        }
    }

    if missing.is_empty() {
        ctx.out.completed("All dependencies are installed!");
        return Ok(());
    }

    ctx.out.blank();
    ctx.out.info("Missing dependencies:");
    for dep in missing {
        ctx.out.blank();
        ctx.out.info(format!("{}:", dep.name));
        let (Some((program, args)), Some(command)) = (
            dep.install.and_then(<[&str]>::split_first),
            dep.install_command(),
        ) else {
            ctx.out.info("  Please install manually:");
            ctx.out.info(format!("  {}", dep.homepage));
            continue;
        };
        ctx.out.info(format!("  To install: {command}"));
        if !ctx
            .prompt
            .confirm(&format!("Would you like to install {} now?", dep.name))?
        {
            continue;
        }

        ctx.out.info(format!("Installing {}...", dep.name));
        let install = Invocation::new(*program)
            .args(args.iter().copied())
            .interactive();
        let completed = ctx.runner.run(&install)?;
        if completed.success() {
            ctx.out.success(format!("{} installed successfully", dep.name));
        } else {
            tracing::warn!(command = %install, code = ?completed.code, "install failed");
            ctx.out.error(format!("Failed to install {}", dep.name));
            ctx.out
                .info(format!("Please install manually: {}", dep.homepage));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::prompt::fake::ScriptedPrompt;
    use crate::commands::testing::Harness;
    use crate::process::fake::ScriptedRunner;

    #[test]
    fn unsupported_platform_checks_nothing() {
        let mut h = Harness::empty();
        assert!(matches!(
            run_on(&mut h.ctx(), false),
            Err(CommandError::Unsupported(_))
        ));
        assert!(h.runner.calls.is_empty());
    }

    #[test]
    fn everything_installed() {
        let mut h = Harness::empty();
        run_on(&mut h.ctx(), true).unwrap();
        assert_eq!(
            h.runner.commands(),
            vec![
                "brew --version",
                "git --version",
                "pip3 --version",
                "func --version",
                "az --version",
            ]
        );
        assert!(h.printed().contains("✨ All dependencies are installed!"));
        assert!(h.prompt.asked.is_empty());
    }

    #[test]
    fn offers_install_for_missing_tools() {
        let runner = ScriptedRunner::new()
            .ok("") // brew
            .fail(127, "") // git
            .ok("") // pip3
            .fail(127, "") // func
            .fail(127, ""); // az
        let prompt = ScriptedPrompt::new().confirm_with(true).confirm_with(false);
        let mut h = Harness::empty().with_runner(runner).with_prompt(prompt);
        run_on(&mut h.ctx(), true).unwrap();

        let commands = h.runner.commands();
        assert_eq!(commands.len(), 6);
        assert_eq!(commands[5], "brew install azure-functions-core-tools@4");
        assert_eq!(h.prompt.asked.len(), 2);

        let printed = h.printed();
        assert!(printed.contains("https://git-scm.com"));
        assert!(printed.contains("✅ Azure Functions Core Tools installed successfully"));
        assert!(printed.contains("To install: brew install azure-cli"));
    }
}
