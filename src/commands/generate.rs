//! `legend generate function`: scaffold a function and its test.

use std::path::PathBuf;

use super::{Context, write_file};
use crate::error::CommandError;
use crate::process::Invocation;

/// Template passed to `func new` when none is given.
pub const DEFAULT_FUNCTION_TEMPLATE: &str = "HTTP trigger";

/// Where the generated test for `name` lives, relative to the project root.
pub fn test_path(name: &str) -> PathBuf {
    PathBuf::from("test/functions").join(format!("{name}_test.py"))
}

pub fn function(ctx: &mut Context<'_>, name: &str, template: &str) -> Result<(), CommandError> {
    ctx.out
        .info(format!("Generating function: {name} (template: {template})"));

    let func_new = Invocation::new("func")
        .args(["new", "--name", name, "--template", template])
        .current_dir(ctx.root())
        .interactive();
    ctx.runner.run_checked(&func_new)?;

    let relative = test_path(name);
    ctx.out
        .info(format!("Generating test file: {}", relative.display()));
    let content = ctx
        .templates
        .render("test/function.py", &[("function_name", name)])?;
    write_file(&ctx.root().join(&relative), &content)?;

    ctx.out
        .completed(format!("Function '{name}' generated successfully!"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::process::fake::ScriptedRunner;

    #[test]
    fn runs_func_new_and_writes_test() {
        let mut h = Harness::project();
        function(&mut h.ctx(), "orders", DEFAULT_FUNCTION_TEMPLATE).unwrap();

        assert_eq!(
            h.runner.commands(),
            vec!["func new --name orders --template \"HTTP trigger\""]
        );
        let test = std::fs::read_to_string(h.dir.path().join("test/functions/orders_test.py"))
            .unwrap();
        assert!(test.contains("from function_app import orders"));
        assert!(h.printed().contains("✨ Function 'orders' generated successfully!"));
    }

    #[test]
    fn failed_func_new_writes_nothing() {
        let mut h = Harness::project().with_runner(ScriptedRunner::new().fail(1, "no project"));
        assert!(function(&mut h.ctx(), "orders", "Timer trigger").is_err());
        assert!(!h.dir.path().join("test/functions").exists());
    }
}
