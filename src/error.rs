//! Error types for grill.
//!
//! Every failure is returned to the caller as a [`GrillError`]. The one
//! exception is [`crate::selector::Selector::run`], which exits the process
//! on interrupt once the terminal has been restored.

use thiserror::Error;

use crate::types::ValueKind;

/// Why the query for the chosen option failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no option is selected")]
    None,

    #[error("{0} options are selected, expected exactly one")]
    Ambiguous(usize),
}

#[derive(Debug, Error)]
pub enum GrillError {
    /// The terminal cannot fit the options. Raised before the loop starts,
    /// with the terminal already restored.
    #[error("terminal not wide enough: longest label is {label_width} cells, terminal has {columns} columns")]
    TooNarrow { label_width: usize, columns: u16 },

    #[error("terminal not high enough: {options} options, terminal has {rows} rows")]
    TooShort { options: usize, rows: u16 },

    #[error("selector has no options")]
    NoOptions,

    #[error("cursor has no steps")]
    EmptyCursor,

    #[error("selection: {0}")]
    Selection(#[from] SelectionError),

    #[error("option {label:?}: cannot read {actual} value as {requested}")]
    ValueConversion {
        label: String,
        requested: ValueKind,
        actual: ValueKind,
    },

    #[error("menu configuration: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GrillError {
    /// True for the two terminal-capacity failures.
    pub fn is_capacity(&self) -> bool {
        matches!(self, GrillError::TooNarrow { .. } | GrillError::TooShort { .. })
    }
}

pub type Result<T> = std::result::Result<T, GrillError>;
