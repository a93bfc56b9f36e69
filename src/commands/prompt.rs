use dialoguer::{Confirm, Input};

use crate::error::CommandError;

/// Interactive questions asked of the user.
pub trait Prompt {
    /// Yes/no question defaulting to no.
    fn confirm(&mut self, question: &str) -> Result<bool, CommandError>;

    /// Free-text answer.
    fn input(&mut self, question: &str) -> Result<String, CommandError>;
}

/// Asks on the terminal with dialoguer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool, CommandError> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()?)
    }

    fn input(&mut self, question: &str) -> Result<String, CommandError> {
        Ok(Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()?)
    }
}
