use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::{BumpError, Result};
use crate::ui::{Prompter, Validator};

/// Prompter that answers from queues instead of the terminal.
///
/// An empty string answer to `input` means "accept the default", like
/// pressing Enter. Rejected answers are counted and the next queued answer is
/// tried, mirroring the re-prompt loop of the terminal implementation.
#[derive(Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    selections: RefCell<VecDeque<usize>>,
    rejected: Cell<usize>,
    shown: RefCell<Vec<Vec<String>>>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_inputs<I, S>(self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inputs
            .borrow_mut()
            .extend(answers.into_iter().map(Into::into));
        self
    }

    pub fn with_selections<I: IntoIterator<Item = usize>>(self, choices: I) -> Self {
        self.selections.borrow_mut().extend(choices);
        self
    }

    /// Number of input answers the validator turned down
    pub fn rejected(&self) -> usize {
        self.rejected.get()
    }

    /// Item lists passed to `select`, in call order
    pub fn shown(&self) -> Vec<Vec<String>> {
        self.shown.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str, default: &str, validate: Validator<'_>) -> Result<String> {
        loop {
            let answer = self.inputs.borrow_mut().pop_front().ok_or_else(|| {
                BumpError::Prompt(format!("no scripted answer left for '{}'", prompt))
            })?;
            let answer = if answer.trim().is_empty() {
                default.to_string()
            } else {
                answer.trim().to_string()
            };

            match validate(answer.as_str()) {
                Ok(()) => return Ok(answer),
                Err(_) => self.rejected.set(self.rejected.get() + 1),
            }
        }
    }

    fn select(&self, prompt: &str, items: &[String], _default: usize) -> Result<usize> {
        self.shown.borrow_mut().push(items.to_vec());
        self.selections.borrow_mut().pop_front().ok_or_else(|| {
            BumpError::Prompt(format!("no scripted selection left for '{}'", prompt))
        })
    }
}
