//! grill: animated single-choice selector menus for the terminal.

pub mod config;
pub mod error;
pub mod logging;
pub mod menu;
pub mod report;
pub mod selector;
pub mod types;

pub use error::{GrillError, Result};
pub use menu::{Menu, Navigation, ScreenId};
pub use selector::{CrosstermSurface, Outcome, Selector, Surface};
pub use types::{Choice, Color, ColorPair, Cursor, CursorStep, Title, Value, ValueKind};
