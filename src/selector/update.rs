//! Pure state transitions: (index, Action) → Transition, plus the
//! capacity checks run before the loop starts.
//!
//! Fully testable without a terminal.

use crate::error::{GrillError, Result};
use crate::types::Choice;

use super::state::{Action, Transition};
use super::surface::Size;
use super::view::label_width;

/// Pure transition function for the highlighted row.
///
/// Movement clamps at both ends; there is no wraparound.
pub fn update(index: usize, len: usize, action: Action) -> Transition {
    match action {
        Action::MoveUp => Transition::Highlight(index.saturating_sub(1)),
        Action::MoveDown => {
            let last = len.saturating_sub(1);
            Transition::Highlight((index + 1).min(last))
        }
        Action::Commit => Transition::Commit(index),
    }
}

// ============================================================================
// VALIDATION
// ============================================================================

/// Widest label in display cells. An empty option list is a caller error.
pub fn longest_label(options: &[Choice]) -> Result<usize> {
    options
        .iter()
        .map(|o| label_width(&o.label))
        .max()
        .ok_or(GrillError::NoOptions)
}

/// Reject terminals that cannot show every option on its own row.
pub fn check_capacity(longest: usize, options: usize, size: Size) -> Result<()> {
    if longest as i64 - 2 >= i64::from(size.columns) {
        return Err(GrillError::TooNarrow {
            label_width: longest,
            columns: size.columns,
        });
    }
    if options > usize::from(size.rows) {
        return Err(GrillError::TooShort {
            options,
            rows: size.rows,
        });
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
