//! Default color pairs and the default spinner glyphs.
//!
//! Pure data, consumed by the constructors in [`crate::types`]. Every
//! default is drawn on a black background so rows read as one block.
//!
//! Color semantics:
//! - Green: option labels and titles
//! - Blue: custom cursors
//! - White: the built-in spinner and line breaks

use crate::types::{Color, ColorPair};

// ============================================================================
// COLOR PAIRS
// ============================================================================

/// Uncolored text (line breaks, padding outside any segment).
pub const PLAIN: ColorPair = ColorPair::new(Color::White, Color::Black);

/// Option labels, active and inactive alike.
pub const OPTION: ColorPair = ColorPair::new(Color::Green, Color::Black);

/// Title block.
pub const TITLE: ColorPair = ColorPair::new(Color::Green, Color::Black);

/// Cursors built with [`crate::types::Cursor::new`].
pub const CURSOR: ColorPair = ColorPair::new(Color::Blue, Color::Black);

/// The built-in spinner.
pub const SPINNER: ColorPair = ColorPair::new(Color::White, Color::Black);

// ============================================================================
// GLYPHS
// ============================================================================

/// Frames of the built-in spinner cursor.
pub const SPINNER_GLYPHS: [&str; 4] = ["<--[|]", "<--[/]", "<--[-]", "<--[\\]"];

// ============================================================================
// TESTS
// ============================================================================
