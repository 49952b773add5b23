//! Selector state algebra: pure types, zero effects.
//!
//! A [`Selector`] owns one screen's worth of options plus the cursor,
//! title and step interval used while it is on screen. The loop in
//! `run` mutates only the highlighted index, the cursor step and one
//! option's `selected` flag; options are never removed or reordered.

use std::time::Duration;

use crate::error::{Result, SelectionError};
use crate::types::{Choice, Cursor, Title, Value};

/// Default animation and polling period.
pub const DEFAULT_STEP: Duration = Duration::from_millis(100);

// ============================================================================
// SELECTOR
// ============================================================================

/// The state machine behind one on-screen list of choices.
#[derive(Debug, Clone)]
pub struct Selector {
    pub(crate) options: Vec<Choice>,
    /// Replaced by [`Cursor::spinner`] at render time when absent.
    pub(crate) cursor: Option<Cursor>,
    pub(crate) title: Option<Title>,
    /// Highlighted row, always a valid index once options exist.
    pub(crate) index: usize,
    pub(crate) step: Duration,
    /// Widest label in display cells, computed once per render.
    pub(crate) longest_label: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Selector::new()
    }
}

impl Selector {
    pub fn new() -> Self {
        Selector {
            options: Vec::new(),
            cursor: None,
            title: None,
            index: 0,
            step: DEFAULT_STEP,
            longest_label: 0,
        }
    }

    pub fn add_option(&mut self, option: Choice) {
        self.options.push(option);
    }

    /// Build a [`Choice`] with default colors and append it.
    pub fn add_choice(&mut self, label: impl Into<String>, value: impl Into<Value>) {
        self.add_option(Choice::new(label, value));
    }

    pub fn set_title(&mut self, title: Title) {
        self.title = Some(title);
    }

    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = Some(cursor);
    }

    /// Period of both the animation and the key poll.
    pub fn set_step_interval(&mut self, step: Duration) {
        self.step = step;
    }

    pub fn options(&self) -> &[Choice] {
        &self.options
    }

    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn step_interval(&self) -> Duration {
        self.step
    }

    /// Index of the highlighted row.
    pub fn highlighted(&self) -> usize {
        self.index
    }

    /// Width of the widest label as of the last render.
    pub fn longest_label(&self) -> usize {
        self.longest_label
    }

    /// Reset every `selected` flag. Required before rendering a selector
    /// a second time.
    pub fn clear_selection(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }

    /// Index of the single selected option.
    pub fn selected_index(&self) -> Result<usize> {
        let mut found = None;
        let mut count = 0;
        for (i, option) in self.options.iter().enumerate() {
            if option.selected {
                count += 1;
                if found.is_none() {
                    found = Some(i);
                }
            }
        }
        match (found, count) {
            (Some(i), 1) => Ok(i),
            (None, _) => Err(SelectionError::None.into()),
            (Some(_), n) => Err(SelectionError::Ambiguous(n).into()),
        }
    }

    /// The option the user committed to.
    pub fn selected_option(&self) -> Result<&Choice> {
        let i = self.selected_index()?;
        Ok(&self.options[i])
    }
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic key action, decoupled from raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveUp,
    MoveDown,
    Commit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of applying one [`Action`] to the highlighted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Keep looping with this row highlighted.
    Highlight(usize),
    /// Mark this row selected and leave the loop.
    Commit(usize),
}

/// How a render pass ended. The terminal is restored in both cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Committed,
    Interrupted,
}

impl Outcome {
    /// Process exit status conventionally paired with this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Committed => 0,
            Outcome::Interrupted => 1,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
