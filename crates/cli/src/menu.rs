//! The top-level menu loop.
//!
//! Awaiting a menu selection, running the chosen action and asking whether to
//! continue repeat until the user declines or cancels the menu.

use std::io::stdout;

use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use log::debug;

use crate::handlers::Session;
use kubermon_core::actions::Action;
use kubermon_core::error::{Error, Result};

const BANNER: &str = r" _  ___   _ ____  _____ ____  __  __  ___  _   _
| |/ / | | | __ )| ____|  _ \|  \/  |/ _ \| \ | |
| ' /| | | |  _ \|  _| | |_) | |\/| | | | |  \| |
| . \| |_| | |_) | |___|  _ <| |  | | |_| | |\  |
|_|\_\\___/|____/|_____|_| \_\_|  |_|\___/|_| \_|
";

pub const MENU_PROMPT: &str = "Please select a command:";
pub const CONTINUE_PROMPT: &str = "\nDo you want to run another command? (y/n): ";

/// Header line of the action picker, carrying the version.
#[must_use]
pub fn menu_prompt() -> String {
    format!("Kubermon v{} | {MENU_PROMPT}", env!("CARGO_PKG_VERSION"))
}

fn clear_screen() -> Result<()> {
    execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0)).map_err(Error::Stdio)
}

/// Runs the menu until the user stops.
///
/// # Errors
///
/// A failing `kubectl` invocation ends the loop and is returned, as is a
/// cancellation in a handler that exits rather than returning to the menu.
pub fn run_menu(session: &mut Session<'_>, clear_before_render: bool) -> Result<()> {
    let labels: Vec<String> = Action::ALL.iter().map(ToString::to_string).collect();
    let prompt = menu_prompt();

    loop {
        if clear_before_render {
            clear_screen()?;
        }

        session.say(BANNER)?;
        session.say(format!("Welcome to Kubermon! (v{})", env!("CARGO_PKG_VERSION")))?;

        let Some(selected) = session.prompter().select(&prompt, &labels)? else {
            session.say("No selection made. Exiting.")?;
            break;
        };

        let action = Action::ALL
            .into_iter()
            .find(|action| action.to_string() == selected)
            .ok_or_else(|| Error::UnknownAction(selected.clone()))?;

        let outcome = session.dispatch(action)?;
        debug!("Action `{}` finished: {outcome:?}", action.id());

        if !session.prompter().confirm(CONTINUE_PROMPT)? {
            session.say("Exiting Kubermon.")?;
            break;
        }
    }

    Ok(())
}
