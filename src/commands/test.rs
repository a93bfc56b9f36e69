//! `legend test`: run the project's pytest suite.

use super::Context;
use crate::environment::ENVIRONMENT_VAR;
use crate::error::CommandError;
use crate::process::Invocation;

/// Environment the test suite runs under.
pub const TEST_ENVIRONMENT: &str = "test";

/// Run `python -m pytest <args>` and return its exit code.
pub fn run(ctx: &mut Context<'_>, pytest_args: &[String]) -> Result<i32, CommandError> {
    let pytest = Invocation::new("python")
        .args(["-m", "pytest"])
        .args(pytest_args.iter().cloned())
        .env(ENVIRONMENT_VAR, TEST_ENVIRONMENT)
        .current_dir(ctx.root())
        .interactive();
    let completed = ctx.runner.run(&pytest)?;
    Ok(completed.code.unwrap_or(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::Harness;
    use crate::process::fake::ScriptedRunner;

    #[test]
    fn passes_args_and_test_environment() {
        let mut h = Harness::empty();
        let args = vec!["-k".to_string(), "orders".to_string()];
        assert_eq!(run(&mut h.ctx(), &args).unwrap(), 0);

        let call = &h.runner.calls[0];
        assert_eq!(call.to_string(), "python -m pytest -k orders");
        assert_eq!(
            call.env,
            vec![("LEGEND_ENVIRONMENT".to_string(), "test".to_string())]
        );
    }

    #[test]
    fn failing_suite_returns_its_code() {
        let mut h = Harness::empty().with_runner(ScriptedRunner::new().fail(1, ""));
        assert_eq!(run(&mut h.ctx(), &[]).unwrap(), 1);
    }
}
