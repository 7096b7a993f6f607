//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `scripted` - Prompter that replays canned answers, for tests
//! - This module - The [Prompter] seam and its terminal implementation

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::error::{BumpError, Result};

pub mod formatter;
pub mod scripted;

// Re-export formatter functions for convenience
pub use formatter::{display_bumped, display_error, display_tags};
pub use scripted::ScriptedPrompter;

/// Validator for free-text answers; `Err` carries the message shown to the user
pub type Validator<'v> = &'v dyn Fn(&str) -> std::result::Result<(), String>;

/// Narrow interface over interactive prompting.
///
/// Implementations block until the user has answered.
pub trait Prompter {
    /// Ask for free text, re-asking until `validate` accepts the answer
    fn input(&self, prompt: &str, default: &str, validate: Validator<'_>) -> Result<String>;

    /// Ask the user to pick one of `items`; returns the chosen index
    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize>;
}

/// Terminal prompts backed by `dialoguer`.
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl DialoguerPrompter {
    pub fn new() -> Self {
        DialoguerPrompter {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(&self, prompt: &str, default: &str, validate: Validator<'_>) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .validate_with(|input: &String| validate(input.as_str()))
            .interact_text()?;

        Ok(answer.trim().to_string())
    }

    fn select(&self, prompt: &str, items: &[String], default: usize) -> Result<usize> {
        if items.is_empty() {
            return Err(BumpError::selection("nothing to select from"));
        }

        let index = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(items)
            .default(default)
            .interact()?;

        Ok(index)
    }
}
