//! `legend`: scaffold, configure and deploy Azure Function App projects.

use std::io;
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use legend::cli::{ConfigArgs, parse_environment};
use legend::commands::generate::DEFAULT_FUNCTION_TEMPLATE;
use legend::commands::{self, Context, Output, TerminalPrompt};
use legend::overrides::parse_assignment;
use legend::process::SystemRunner;
use legend::schema::DEFAULT_LOCATION;
use legend::template::BuiltinTemplates;
use legend::{ConfigStore, LegendError};

/// Changes into this directory before running any command.
const CWD_VAR: &str = "LEGEND_CWD";

/// Scaffold, configure and deploy Azure Function App projects
#[derive(Parser)]
#[command(name = "legend", version, about, long_about = None)]
#[command(propagate_version = true, infer_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (also passed to `func start` by `run`)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override a configuration value, e.g. --set azure.location=westeurope
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_override)]
    overrides: Vec<(String, toml::Value)>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Azure Function App project
    #[command(visible_alias = "n")]
    New {
        /// Name of the function app
        name: String,
        /// Azure location to create resources in
        #[arg(default_value = DEFAULT_LOCATION)]
        location: String,
    },

    /// Generate a new component
    #[command(visible_alias = "g", subcommand)]
    Generate(Generate),

    /// Create the Azure resources for an environment
    #[command(visible_alias = "p")]
    Provision {
        #[arg(value_parser = parse_environment)]
        environment: String,
    },

    /// Deploy the project to an environment over git
    Deploy {
        #[arg(value_parser = parse_environment)]
        environment: String,
    },

    /// Show information about the deployed function app
    #[command(visible_alias = "i")]
    Info {
        #[arg(value_parser = parse_environment)]
        environment: String,
    },

    /// Delete all Azure resources for an environment
    Destroy {
        #[arg(value_parser = parse_environment)]
        environment: String,
    },

    /// Print an environment's configuration as shell exports
    #[command(visible_alias = "e")]
    Env {
        #[arg(value_parser = parse_environment)]
        environment: String,
    },

    /// Run the function app locally
    Run,

    /// Run tests with pytest
    #[command(visible_alias = "t")]
    Test {
        /// Arguments passed to pytest
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Check for and install required tools (macOS)
    Bootstrap,

    /// Inspect and edit configuration
    Config(ConfigArgs),
}

#[derive(Subcommand)]
enum Generate {
    /// Generate a new function and its test
    #[command(visible_alias = "f")]
    Function {
        /// Name of the function
        name: String,
        /// Function template to use
        #[arg(short, long, default_value = DEFAULT_FUNCTION_TEMPLATE)]
        template: String,
    },
}

fn parse_override(raw: &str) -> Result<(String, toml::Value), String> {
    parse_assignment(raw).map_err(|e: LegendError| e.to_string())
}

/// WARN by default, DEBUG with `--verbose`. `RUST_LOG`, when set, replaces
/// the default entirely.
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(rust_log.map(str::trim).unwrap_or_default())
}

fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(log_filter(verbose, rust_log.as_deref()))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(err) => {
            eprintln!("⛔️ {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if let Some(dir) = std::env::var_os(CWD_VAR) {
        std::env::set_current_dir(&dir)
            .with_context(|| format!("{CWD_VAR} points to an unusable directory: {dir:?}"))?;
    }

    let store = ConfigStore::current_dir()?.with_overrides(cli.overrides);
    let mut runner = SystemRunner;
    let mut prompt = TerminalPrompt;
    let mut stdout = io::stdout().lock();
    let mut ctx = Context {
        store,
        runner: &mut runner,
        prompt: &mut prompt,
        templates: &BuiltinTemplates,
        out: Output::new(&mut stdout),
    };

    match cli.command {
        Commands::New { name, location } => commands::new::run(&mut ctx, &name, &location)?,
        Commands::Generate(Generate::Function { name, template }) => {
            commands::generate::function(&mut ctx, &name, &template)?
        }
        Commands::Provision { environment } => commands::provision::run(&mut ctx, &environment)?,
        Commands::Deploy { environment } => commands::deploy::run(&mut ctx, &environment)?,
        Commands::Info { environment } => commands::info::run(&mut ctx, &environment)?,
        Commands::Destroy { environment } => commands::destroy::run(&mut ctx, &environment)?,
        Commands::Env { environment } => commands::env::run(&mut ctx, &environment)?,
        Commands::Run => return Ok(commands::run::run(&mut ctx, cli.verbose)?),
        Commands::Test { args } => return Ok(commands::test::run(&mut ctx, &args)?),
        Commands::Bootstrap => commands::bootstrap::run(&mut ctx)?,
        Commands::Config(args) => ctx.store.handle_and_print(&args.into_action())?,
    }
    Ok(0)
}
