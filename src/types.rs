//! Domain types for grill: colors, option payloads, cursors, titles.
//!
//! Plain data with small accessors. Nothing here touches the terminal.

use std::fmt;

use serde::Deserialize;

use crate::error::{GrillError, Result};
use crate::menu::ScreenId;
use crate::selector::theme;

// ============================================================================
// COLORS
// ============================================================================

/// The eight basic terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl From<Color> for ratatui::style::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => ratatui::style::Color::Black,
            Color::Red => ratatui::style::Color::Red,
            Color::Green => ratatui::style::Color::Green,
            Color::Yellow => ratatui::style::Color::Yellow,
            Color::Blue => ratatui::style::Color::Blue,
            Color::Magenta => ratatui::style::Color::Magenta,
            Color::Cyan => ratatui::style::Color::Cyan,
            Color::White => ratatui::style::Color::White,
        }
    }
}

/// Foreground/background pair applied to one styled write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorPair {
    pub fg: Color,
    pub bg: Color,
}

impl ColorPair {
    pub const fn new(fg: Color, bg: Color) -> Self {
        ColorPair { fg, bg }
    }
}

impl Default for ColorPair {
    fn default() -> Self {
        theme::PLAIN
    }
}

impl From<ColorPair> for ratatui::style::Style {
    fn from(pair: ColorPair) -> Self {
        ratatui::style::Style::new().fg(pair.fg.into()).bg(pair.bg.into())
    }
}

// ============================================================================
// PAYLOADS
// ============================================================================

/// The caller value carried by a [`Choice`].
///
/// A closed set of variants instead of an untyped box: leaves carry plain
/// data, while `Screen` and `Back` drive multi-screen navigation in
/// [`crate::menu::Menu`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Arbitrary structured data (arrays, objects, null).
    Data(serde_json::Value),
    /// Descend into another screen of the same menu.
    Screen(ScreenId),
    /// Return to the previously visited screen.
    Back,
}

/// Discriminant of a [`Value`], used in conversion errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
    Text,
    Data,
    Screen,
    Back,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
            ValueKind::Text => "string",
            ValueKind::Data => "data",
            ValueKind::Screen => "screen",
            ValueKind::Back => "back",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Data(_) => ValueKind::Data,
            Value::Screen(_) => ValueKind::Screen,
            Value::Back => ValueKind::Back,
        }
    }

    /// JSON rendition used for machine-readable output.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Value::from(*f),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::Data(data) => data.clone(),
            Value::Screen(id) => serde_json::json!({ "screen": id.index() }),
            Value::Back => serde_json::Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Number(n) => match (n.as_i64(), n.as_f64()) {
                (Some(i), _) => Value::Int(i),
                (None, Some(f)) => Value::Float(f),
                (None, None) => Value::Data(serde_json::Value::Number(n)),
            },
            other => Value::Data(other),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => f.write_str(s),
            Value::Data(data) => write!(f, "{}", data),
            Value::Screen(id) => write!(f, "<screen {}>", id.index()),
            Value::Back => f.write_str("<back>"),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<ScreenId> for Value {
    fn from(id: ScreenId) -> Self {
        Value::Screen(id)
    }
}

// ============================================================================
// CHOICE
// ============================================================================

/// One selectable row: a label plus the value handed back when it is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub label: String,
    pub value: Value,
    /// Set by the selector on commit. Callers reset it via
    /// [`crate::selector::Selector::clear_selection`] before re-rendering.
    pub selected: bool,
    pub colors: ColorPair,
}

impl Choice {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Choice {
            label: label.into(),
            value: value.into(),
            selected: false,
            colors: theme::OPTION,
        }
    }

    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = colors;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The payload exactly as stored.
    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn as_int(&self) -> Result<i64> {
        match &self.value {
            Value::Int(i) => Ok(*i),
            other => Err(self.mismatch(ValueKind::Int, other)),
        }
    }

    pub fn as_float(&self) -> Result<f64> {
        match &self.value {
            Value::Float(x) => Ok(*x),
            other => Err(self.mismatch(ValueKind::Float, other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match &self.value {
            Value::Bool(b) => Ok(*b),
            other => Err(self.mismatch(ValueKind::Bool, other)),
        }
    }

    pub fn as_str(&self) -> Result<&str> {
        match &self.value {
            Value::Text(s) => Ok(s),
            other => Err(self.mismatch(ValueKind::Text, other)),
        }
    }

    pub fn as_data(&self) -> Result<&serde_json::Value> {
        match &self.value {
            Value::Data(data) => Ok(data),
            other => Err(self.mismatch(ValueKind::Data, other)),
        }
    }

    fn mismatch(&self, requested: ValueKind, actual: &Value) -> GrillError {
        GrillError::ValueConversion {
            label: self.label.clone(),
            requested,
            actual: actual.kind(),
        }
    }
}

// ============================================================================
// CURSOR
// ============================================================================

/// A single frame of the cursor animation, usually a few characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorStep {
    pub glyph: String,
}

impl CursorStep {
    pub fn new(glyph: impl Into<String>) -> Self {
        CursorStep { glyph: glyph.into() }
    }
}

/// Cyclic glyph sequence drawn beside the active row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    steps: Vec<CursorStep>,
    step: usize,
    pub colors: ColorPair,
}

impl Cursor {
    /// An empty cursor in the custom-cursor colors. Add steps before rendering.
    pub fn new() -> Self {
        Cursor {
            steps: Vec::new(),
            step: 0,
            colors: theme::CURSOR,
        }
    }

    /// The four-step spinner installed when a selector has no cursor.
    pub fn spinner() -> Self {
        let mut cursor = Cursor::from_glyphs(theme::SPINNER_GLYPHS);
        cursor.colors = theme::SPINNER;
        cursor
    }

    pub fn from_glyphs<I, S>(glyphs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cursor = Cursor::new();
        for glyph in glyphs {
            cursor.push_step(glyph);
        }
        cursor
    }

    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = colors;
        self
    }

    pub fn add_step(&mut self, step: CursorStep) {
        self.steps.push(step);
    }

    pub fn push_step(&mut self, glyph: impl Into<String>) {
        self.add_step(CursorStep::new(glyph));
    }

    pub fn steps(&self) -> &[CursorStep] {
        &self.steps
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    /// Glyph for the current step. None only for a cursor with no steps.
    pub fn glyph(&self) -> Option<&str> {
        self.steps.get(self.step).map(|s| s.glyph.as_str())
    }

    /// Move to the next step, wrapping to the first after the last.
    pub fn advance(&mut self) {
        if self.steps.is_empty() {
            return;
        }
        self.step = (self.step + 1) % self.steps.len();
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Cursor::spinner()
    }
}

// ============================================================================
// TITLE
// ============================================================================

/// Header text drawn above the options on every frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    text: String,
    pub colors: ColorPair,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Title {
            text: normalize_title(text.into()),
            colors: theme::TITLE,
        }
    }

    pub fn with_colors(mut self, colors: ColorPair) -> Self {
        self.colors = colors;
        self
    }

    /// Title text, always ending in exactly one line break.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn normalize_title(text: String) -> String {
    let mut text = text.trim_end_matches(['\n', '\r']).to_string();
    text.push('\n');
    text
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_gains_a_single_trailing_newline() {
        assert_eq!(Title::new("Pick one").text(), "Pick one\n");
        assert_eq!(Title::new("Pick one\n").text(), "Pick one\n");
        assert_eq!(Title::new("Pick one\n\n\n").text(), "Pick one\n");
    }

    #[test]
    fn multi_line_title_keeps_inner_breaks() {
        let title = Title::new("\n---\nOS Selector\n---\n");
        assert_eq!(title.text(), "\n---\nOS Selector\n---\n");
    }

    #[test]
    fn spinner_has_four_steps_and_wraps() {
        let mut cursor = Cursor::spinner();
        assert_eq!(cursor.steps().len(), 4);
        let seen: Vec<usize> = (0..9)
            .map(|_| {
                cursor.advance();
                cursor.step_index()
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn empty_cursor_has_no_glyph_and_does_not_advance() {
        let mut cursor = Cursor::new();
        cursor.advance();
        assert_eq!(cursor.step_index(), 0);
        assert_eq!(cursor.glyph(), None);
    }

    #[test]
    fn typed_accessors_return_matching_payloads() {
        assert_eq!(Choice::new("a", 3).as_int().unwrap(), 3);
        assert_eq!(Choice::new("b", "tux").as_str().unwrap(), "tux");
        assert!(Choice::new("c", true).as_bool().unwrap());
        assert_eq!(Choice::new("d", 0.5).as_float().unwrap(), 0.5);
    }

    #[test]
    fn as_int_on_string_payload_names_both_kinds() {
        let choice = Choice::new("Mascot", "Beastie");
        let err = choice.as_int().unwrap_err();
        match &err {
            GrillError::ValueConversion { requested, actual, .. } => {
                assert_eq!(*requested, ValueKind::Int);
                assert_eq!(*actual, ValueKind::Text);
            }
            other => panic!("Expected ValueConversion, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("int"));
        assert!(msg.contains("string"));
    }

    #[test]
    fn untyped_accessor_returns_payload_unchanged() {
        let data = serde_json::json!({ "os": ["linux", "bsd"] });
        let choice = Choice::new("data", Value::Data(data.clone()));
        assert_eq!(choice.value(), &Value::Data(data));
    }

    #[test]
    fn json_numbers_become_int_or_float() {
        assert_eq!(Value::from(serde_json::json!(7)), Value::Int(7));
        assert_eq!(Value::from(serde_json::json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(serde_json::json!(null)), Value::Data(serde_json::Value::Null));
    }

    #[test]
    fn color_pair_maps_to_ratatui_style() {
        let style: ratatui::style::Style = ColorPair::new(Color::Magenta, Color::Black).into();
        assert_eq!(style.fg, Some(ratatui::style::Color::Magenta));
        assert_eq!(style.bg, Some(ratatui::style::Color::Black));
    }
}
