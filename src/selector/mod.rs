//! The selector state machine.
//!
//! Organized along the same boundaries as a TEA-style TUI:
//! - `state`: pure data types (Selector, Action, Transition, Outcome)
//! - `update`: pure transitions and capacity checks
//! - `view`: pure frame composition
//! - `surface`: the terminal contract and its crossterm implementation
//! - `run`: effects (the render/poll loop)

pub mod run;
pub mod state;
pub mod surface;
pub mod theme;
pub mod update;
pub mod view;

pub use state::{Action, Outcome, Selector, Transition, DEFAULT_STEP};
pub use surface::{CrosstermSurface, Interrupt, Size, Surface};
pub use view::Segment;
