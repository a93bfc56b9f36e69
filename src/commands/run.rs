//! `legend run`: start the Functions host locally.

use super::Context;
use crate::error::CommandError;
use crate::process::Invocation;

/// Run `func start` in the foreground and return its exit code.
pub fn run(ctx: &mut Context<'_>, verbose: bool) -> Result<i32, CommandError> {
    let mut start = Invocation::new("func")
        .arg("start")
        .current_dir(ctx.root())
        .interactive();
    if verbose {
        start = start.arg("--verbose");
    }
    let completed = ctx.runner.run(&start)?;
    // Interrupted by a signal (Ctrl-C) counts as a clean stop.
    Ok(completed.code.unwrap_or(0))
}
