//! Interactive selection and user input handling.
//!
//! This module provides the terminal prompts kubermon uses: a full-screen
//! single-choice list picker and a yes/no question.
//!
//! # User Interface
//!
//! The picker supports:
//! - Arrow keys or vim-style (j/k) navigation, wrapping at both ends
//! - Enter or a left click to choose
//! - `/` to filter entries (fuzzy search)
//! - 'q', Escape or Ctrl-C to cancel

pub mod input;
pub mod types;
pub mod ui;

pub use types::Choice;

use kubermon_core::error::Result;

/// Source of the user's answers.
///
/// Handlers and the menu only talk to this trait, so they can be driven by
/// a script in tests.
pub trait Prompter {
    /// Presents `choices` and returns the chosen entry, or `None` if the
    /// user cancelled.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<Option<String>>;

    /// Asks a yes/no question.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Prompts on the controlling terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, message: &str, choices: &[String]) -> Result<Option<String>> {
        match ui::prompt_for_choice(message, choices)? {
            Choice::Selected(index) => Ok(choices.get(index).cloned()),
            Choice::Cancelled => Ok(None),
        }
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        input::confirm(message)
    }
}
