//! Type definitions for the list picker and its UI state.

/// Outcome of a single-choice prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Index into the candidate list that was presented.
    Selected(usize),
    Cancelled,
}

/// Direction to cycle through entries in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// State for the UI viewport.
///
/// Tracks the visible portion of the list when there are more entries
/// than can fit on screen.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Complete UI state for the picker.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UiState {
    /// Position of the highlighted row within the filtered list
    pub selected_index: usize,
    /// Viewport state for scrolling
    pub viewport: ViewportState,
    /// Whether the user is currently filtering
    pub is_filtering: bool,
    /// Current filter text
    pub filter_text: String,
}

impl UiState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                height: height.saturating_sub(2), // header and filter line
                width,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}

/// What a key press asks the picker to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Finish(Choice),
    Update(UiState),
    Bell,
    Ignore,
}
