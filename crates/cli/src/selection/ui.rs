use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{self, MoveTo};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyModifiers,
    MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    self, disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;

use super::types::CycleDirection::{Down, Up};
use super::types::{Choice, CycleDirection, KeyOutcome, UiState, ViewportState};
use kubermon_core::error::Result;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

fn redraw_ui(
    message: &str,
    ui_state: &UiState,
    indexes_to_display: &[usize],
    choices: &[String],
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;

    print_header(message, ui_state, indexes_to_display.len())?;

    if indexes_to_display.is_empty() {
        queue!(
            stdout,
            MoveTo(0, 1),
            SetForegroundColor(Color::Red),
            Print("No matching entries!".to_string()),
            SetAttribute(Attribute::Reset),
            cursor::MoveToNextLine(1)
        )?;
    } else {
        print_choices_with_selection(ui_state, choices, indexes_to_display)?;
    }

    if ui_state.is_filtering {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

/// Prompts the user to choose one entry from `choices`.
///
/// Runs a full-screen picker in the alternate screen. Arrow keys (or `j`/`k`)
/// move the highlight and wrap around at both ends, `/` starts fuzzy
/// filtering, Enter or a left click chooses, and `q`, Esc or Ctrl-C cancel.
pub fn prompt_for_choice(message: &str, choices: &[String]) -> Result<Choice> {
    let mut stdout = stdout();

    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;

    // Raw mode, mouse capture and the alternate screen are restored when this drops
    let _raw_mode_guard = RawModeGuard;
    stdout.execute(EnableMouseCapture)?;

    let (width, height) = terminal::size()?;
    let mut ui_state = UiState::new(width, height);
    let mut indexes_to_display = filter_displayed_indexes(choices, &ui_state.filter_text);

    redraw_ui(message, &ui_state, &indexes_to_display, choices)?;

    let mut down_row: Option<u16> = None;

    loop {
        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        let new_ui_state = match event::read()? {
            Event::Key(key_event) => {
                match handle_key_event(key_event, &ui_state, &indexes_to_display) {
                    KeyOutcome::Finish(Choice::Selected(position)) => {
                        return Ok(Choice::Selected(indexes_to_display[position]));
                    }
                    KeyOutcome::Finish(Choice::Cancelled) => {
                        debug!("Selection cancelled: {message}");
                        return Ok(Choice::Cancelled);
                    }
                    KeyOutcome::Update(state) => Some(state),
                    KeyOutcome::Bell => {
                        execute!(stdout, Print("\x07"))?;
                        None
                    }
                    KeyOutcome::Ignore => None,
                }
            }
            Event::Mouse(MouseEvent {
                kind,
                row,
                modifiers,
                ..
            }) if modifiers == KeyModifiers::NONE => match kind {
                MouseEventKind::Down(MouseButton::Left) => {
                    down_row = Some(row);
                    None
                }
                MouseEventKind::Up(MouseButton::Left) => {
                    let clicked = down_row
                        .take()
                        .and_then(|row| clicked_position(row, &ui_state, indexes_to_display.len()));

                    if let Some(position) = clicked {
                        return Ok(Choice::Selected(indexes_to_display[position]));
                    }
                    None
                }
                MouseEventKind::ScrollDown => Some(move_selected_index(
                    &ui_state,
                    indexes_to_display.len(),
                    Down,
                )),
                MouseEventKind::ScrollUp => Some(move_selected_index(
                    &ui_state,
                    indexes_to_display.len(),
                    Up,
                )),
                _ => None,
            },
            Event::Resize(width, height) => Some(handle_resize(
                width,
                height,
                &ui_state,
                indexes_to_display.len(),
            )),
            _ => None,
        };

        let Some(new_ui_state) = new_ui_state else {
            continue;
        };

        if new_ui_state == ui_state {
            continue;
        }

        if new_ui_state.filter_text != ui_state.filter_text {
            indexes_to_display = filter_displayed_indexes(choices, &new_ui_state.filter_text);
        }

        ui_state = new_ui_state;
        redraw_ui(message, &ui_state, &indexes_to_display, choices)?;
    }
}

/// Handle keyboard events in the picker
pub fn handle_key_event(
    key_event: KeyEvent,
    ui_state: &UiState,
    indexes_to_display: &[usize],
) -> KeyOutcome {
    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Finish(Choice::Cancelled)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = restart_selection(ui_state);
            updated_state.filter_text.push(c);
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Backspace if ui_state.is_filtering => {
            if ui_state.filter_text.is_empty() {
                return KeyOutcome::Ignore;
            }

            let mut updated_state = restart_selection(ui_state);
            updated_state.filter_text.pop();
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = restart_selection(ui_state);
            updated_state.is_filtering = false;
            updated_state.filter_text = String::new();
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Up | KeyCode::Char('k') => {
            KeyOutcome::Update(move_selected_index(ui_state, indexes_to_display.len(), Up))
        }
        KeyCode::Down | KeyCode::Char('j') => {
            KeyOutcome::Update(move_selected_index(ui_state, indexes_to_display.len(), Down))
        }
        KeyCode::Enter => {
            if ui_state.selected_index < indexes_to_display.len() {
                KeyOutcome::Finish(Choice::Selected(ui_state.selected_index))
            } else {
                KeyOutcome::Bell
            }
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Finish(Choice::Cancelled),
        _ => KeyOutcome::Ignore,
    }
}

fn restart_selection(ui_state: &UiState) -> UiState {
    let mut updated_state = ui_state.clone();
    updated_state.selected_index = 0;
    updated_state.viewport.offset = 0;
    updated_state
}

/// Maps a clicked terminal row to a position in the filtered list.
fn clicked_position(row: u16, ui_state: &UiState, displayed_count: usize) -> Option<usize> {
    if row == 0 {
        // Click on header
        return None;
    }

    let visible_row = (row - 1) as usize;
    if visible_row >= ui_state.viewport.height as usize {
        return None;
    }

    let position = visible_row + ui_state.viewport.offset;
    (position < displayed_count).then_some(position)
}

/// Handle window resize events
fn handle_resize(width: u16, height: u16, ui_state: &UiState, displayed_count: usize) -> UiState {
    let new_height = height.saturating_sub(2);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    // If growing taller, try to show more items above current selection
    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state
                .selected_index
                .saturating_sub((new_height as usize).saturating_sub(1));

            if new_viewport.offset + new_height as usize > displayed_count {
                new_viewport.offset = displayed_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Print the header for the picker
fn print_header(message: &str, ui_state: &UiState, displayed_count: usize) -> Result<()> {
    let mut stdout = stdout();

    let left_padding = "  ";

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        format!(
            "/: Filter   |   {}/{}   |   q: Cancel",
            pad_to_width_of(ui_state.selected_index + 1, displayed_count),
            displayed_count
        )
    };

    let header = format!("{left_padding}{message}   {instructions}");
    let right_padding = " ".repeat(
        (ui_state.viewport.width as usize).saturating_sub(header.chars().count()),
    );

    queue!(
        stdout,
        MoveTo(0, 0),
        SetBackgroundColor(DarkGreen),
        Print(header),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Pad a value to match the width of the largest value
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = format!("{max_number}").len();
    format!("{:>width$}", value.to_string())
}

/// Clear and write a single row of the picker
fn clear_and_write_row(
    row: u16,
    choices: &[String],
    choice_index: usize,
    is_selected: bool,
    terminal_width: u16,
) -> Result<()> {
    let mut stdout = stdout();

    queue!(stdout, MoveTo(0, row), Clear(ClearType::CurrentLine))?;

    let index_as_string = pad_to_width_of(choice_index + 1, choices.len());
    let content = format!("[{index_as_string}] {}", choices[choice_index]);

    let padding = " ".repeat((terminal_width as usize).saturating_sub(content.chars().count()));

    if is_selected {
        queue!(
            stdout,
            SetAttribute(Attribute::Bold),
            SetBackgroundColor(DarkBlue),
            SetForegroundColor(Yellow),
        )?;
    }

    queue!(
        stdout,
        Print(content),
        Print(padding),
        SetAttribute(Attribute::Reset),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Print all visible entries with the selected one highlighted
fn print_choices_with_selection(
    ui_state: &UiState,
    choices: &[String],
    indexes_to_display: &[usize],
) -> Result<()> {
    let mut stdout = stdout();

    let viewport = &ui_state.viewport;

    let visible_entries = indexes_to_display
        .iter()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (i, choice_index) in visible_entries.enumerate() {
        let is_selected = i + viewport.offset == ui_state.selected_index;

        clear_and_write_row(i as u16 + 1, choices, *choice_index, is_selected, viewport.width)?;
        queue!(stdout, cursor::MoveToNextLine(1))?;
    }

    Ok(())
}

/// Move the selected index in the given direction, wrapping at both ends
fn move_selected_index(
    ui_state: &UiState,
    displayed_count: usize,
    direction: CycleDirection,
) -> UiState {
    if displayed_count == 0 {
        return ui_state.clone();
    }

    let mut new_index = ui_state.selected_index;
    let mut ui_state = ui_state.clone();
    let visible_rows = (ui_state.viewport.height as usize).max(1);

    match direction {
        Up => {
            if new_index == 0 {
                new_index = displayed_count - 1;
                ui_state.viewport.offset = new_index.saturating_sub(visible_rows - 1);
            } else {
                new_index -= 1;
                if new_index < ui_state.viewport.offset {
                    ui_state.viewport.offset = new_index;
                }
            }
        }
        Down => {
            new_index = (new_index + 1) % displayed_count;
            if new_index < ui_state.selected_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + visible_rows {
                ui_state.viewport.offset = new_index + 1 - visible_rows;
            }
        }
    }

    ui_state.selected_index = new_index;
    ui_state
}

/// Indexes into `choices` that match the fuzzy `predicate`, in list order
fn filter_displayed_indexes(choices: &[String], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..choices.len()).collect();
    }

    let matcher = SkimMatcherV2::default();

    choices
        .iter()
        .enumerate()
        .filter_map(|(i, choice)| matcher.fuzzy_match(choice, predicate).map(|_| i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(selected_index: usize, offset: usize, height: u16) -> UiState {
        UiState {
            selected_index,
            viewport: ViewportState {
                offset,
                height,
                width: 80,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_move_down_wraps_to_top() {
        let moved = move_selected_index(&state(2, 0, 10), 3, Down);
        assert_eq!(moved.selected_index, 0);
        assert_eq!(moved.viewport.offset, 0);
    }

    #[test]
    fn test_move_up_wraps_to_bottom() {
        let moved = move_selected_index(&state(0, 0, 3), 10, Up);
        assert_eq!(moved.selected_index, 9);
        assert_eq!(moved.viewport.offset, 7);
    }

    #[test]
    fn test_move_down_scrolls_viewport() {
        let moved = move_selected_index(&state(2, 0, 3), 10, Down);
        assert_eq!(moved.selected_index, 3);
        assert_eq!(moved.viewport.offset, 1);
    }

    #[test]
    fn test_move_up_scrolls_viewport() {
        let moved = move_selected_index(&state(4, 4, 3), 10, Up);
        assert_eq!(moved.selected_index, 3);
        assert_eq!(moved.viewport.offset, 3);
    }

    #[test]
    fn test_move_with_nothing_displayed() {
        let original = state(0, 0, 3);
        assert_eq!(move_selected_index(&original, 0, Down), original);
    }

    #[test]
    fn test_filter_empty_predicate_keeps_all() {
        let choices = names(&["default", "kube-system", "prod"]);
        assert_eq!(filter_displayed_indexes(&choices, ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_filter_fuzzy() {
        let choices = names(&["default", "kube-system", "kube-public", "prod"]);
        assert_eq!(filter_displayed_indexes(&choices, "kube"), vec![1, 2]);
        assert_eq!(filter_displayed_indexes(&choices, "ksys"), vec![1]);
        assert!(filter_displayed_indexes(&choices, "zzz").is_empty());
    }

    #[test]
    fn test_enter_selects_position() {
        let outcome = handle_key_event(key(KeyCode::Enter), &state(1, 0, 10), &[4, 7]);
        assert_eq!(outcome, KeyOutcome::Finish(Choice::Selected(1)));
    }

    #[test]
    fn test_enter_with_nothing_displayed_rings_bell() {
        let outcome = handle_key_event(key(KeyCode::Enter), &state(0, 0, 10), &[]);
        assert_eq!(outcome, KeyOutcome::Bell);
    }

    #[test]
    fn test_cancel_keys() {
        let ui_state = state(0, 0, 10);
        for code in [KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(
                handle_key_event(key(code), &ui_state, &[0]),
                KeyOutcome::Finish(Choice::Cancelled)
            );
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key_event(ctrl_c, &ui_state, &[0]),
            KeyOutcome::Finish(Choice::Cancelled)
        );
    }

    #[test]
    fn test_vim_keys_move() {
        let ui_state = state(0, 0, 10);
        match handle_key_event(key(KeyCode::Char('j')), &ui_state, &[0, 1]) {
            KeyOutcome::Update(updated) => assert_eq!(updated.selected_index, 1),
            other => panic!("Expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_filtering_captures_characters() {
        let mut ui_state = state(3, 2, 10);
        ui_state.is_filtering = true;

        match handle_key_event(key(KeyCode::Char('q')), &ui_state, &[0, 1, 2, 3]) {
            KeyOutcome::Update(updated) => {
                assert_eq!(updated.filter_text, "q");
                assert_eq!(updated.selected_index, 0);
                assert_eq!(updated.viewport.offset, 0);
            }
            other => panic!("Expected Update, got {other:?}"),
        }
    }

    #[test]
    fn test_slash_starts_filtering_and_esc_stops() {
        let ui_state = state(0, 0, 10);
        let KeyOutcome::Update(filtering) =
            handle_key_event(key(KeyCode::Char('/')), &ui_state, &[0])
        else {
            panic!("Expected Update");
        };
        assert!(filtering.is_filtering);

        let mut with_text = filtering.clone();
        with_text.filter_text = "pro".to_string();
        let KeyOutcome::Update(stopped) = handle_key_event(key(KeyCode::Esc), &with_text, &[0])
        else {
            panic!("Expected Update");
        };
        assert!(!stopped.is_filtering);
        assert!(stopped.filter_text.is_empty());
    }

    #[test]
    fn test_backspace_edits_filter() {
        let mut ui_state = state(0, 0, 10);
        ui_state.is_filtering = true;
        ui_state.filter_text = "pr".to_string();

        let KeyOutcome::Update(updated) = handle_key_event(key(KeyCode::Backspace), &ui_state, &[0])
        else {
            panic!("Expected Update");
        };
        assert_eq!(updated.filter_text, "p");

        ui_state.filter_text.clear();
        assert_eq!(
            handle_key_event(key(KeyCode::Backspace), &ui_state, &[0]),
            KeyOutcome::Ignore
        );
    }

    #[test]
    fn test_clicked_position() {
        let ui_state = state(0, 2, 5);
        assert_eq!(clicked_position(0, &ui_state, 10), None);
        assert_eq!(clicked_position(1, &ui_state, 10), Some(2));
        assert_eq!(clicked_position(5, &ui_state, 10), Some(6));
        assert_eq!(clicked_position(6, &ui_state, 10), None);
        assert_eq!(clicked_position(3, &ui_state, 3), None);
    }

    #[test]
    fn test_resize_smaller_keeps_selection_visible() {
        let resized = handle_resize(80, 6, &state(8, 0, 10), 20);
        assert_eq!(resized.viewport.height, 4);
        assert_eq!(resized.viewport.offset, 5);
    }

    #[test]
    fn test_resize_taller_reveals_rows_above() {
        let resized = handle_resize(80, 12, &state(8, 6, 4), 20);
        assert_eq!(resized.viewport.height, 10);
        assert_eq!(resized.viewport.offset, 0);
    }

    #[test]
    fn test_pad_to_width_of() {
        assert_eq!(pad_to_width_of(3, 21), " 3");
        assert_eq!(pad_to_width_of(12, 21), "12");
        assert_eq!(pad_to_width_of(1, 5), "1");
    }
}
