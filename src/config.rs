//! Menu definition files.
//!
//! A menu file is JSON: a set of named screens plus the name of the
//! screen to start on. Options link screens by name.
//!
//! ```json
//! {
//!   "root": "main",
//!   "step_ms": 200,
//!   "screens": {
//!     "main": {
//!       "title": { "text": "OS Selector", "fg": "white" },
//!       "options": [
//!         { "label": "Linux", "screen": "linux" },
//!         { "label": "Window$", "value": "Blue Screen of Death!", "fg": "red" }
//!       ]
//!     },
//!     "linux": {
//!       "cursor": { "steps": ["<[|]", "<[/]", "<[-]", "<[\\]"], "fg": "magenta" },
//!       "options": [
//!         { "label": "Back", "back": true },
//!         { "label": "Mascot", "value": "Tux" }
//!       ]
//!     }
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{GrillError, Result};
use crate::menu::{Menu, ScreenId};
use crate::selector::{theme, Selector};
use crate::types::{Choice, Color, ColorPair, Cursor, Title, Value};

// ============================================================================
// FILE FORMAT
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuFile {
    /// Name of the first screen shown.
    pub root: String,
    /// Step interval applied to screens that do not set their own.
    #[serde(default)]
    pub step_ms: Option<u64>,
    pub screens: BTreeMap<String, ScreenSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScreenSpec {
    #[serde(default)]
    pub title: Option<TitleSpec>,
    #[serde(default)]
    pub cursor: Option<CursorSpec>,
    #[serde(default)]
    pub step_ms: Option<u64>,
    pub options: Vec<OptionSpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TitleSpec {
    pub text: String,
    #[serde(default)]
    pub fg: Option<Color>,
    #[serde(default)]
    pub bg: Option<Color>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CursorSpec {
    pub steps: Vec<String>,
    #[serde(default)]
    pub fg: Option<Color>,
    #[serde(default)]
    pub bg: Option<Color>,
}

/// One option. At most one of `value`, `screen` and `back` may be set;
/// with none, the value is the label itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptionSpec {
    pub label: String,
    /// `Some(Null)` for an explicit `"value": null`, `None` when absent.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<serde_json::Value>,
    #[serde(default)]
    pub screen: Option<String>,
    #[serde(default)]
    pub back: bool,
    #[serde(default)]
    pub fg: Option<Color>,
    #[serde(default)]
    pub bg: Option<Color>,
}

/// Any value that appears in the file, `null` included, counts as set.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde_json::Value::deserialize(deserializer).map(Some)
}

fn colors(fg: Option<Color>, bg: Option<Color>, default: ColorPair) -> ColorPair {
    ColorPair::new(fg.unwrap_or(default.fg), bg.unwrap_or(default.bg))
}

// ============================================================================
// LOADING
// ============================================================================

impl MenuFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let file = Self::parse(&text)?;
        debug!(path = %path.display(), screens = file.screens.len(), "menu file loaded");
        Ok(file)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Build the menu. `step_override` wins over every step in the file.
    pub fn build(&self, step_override: Option<Duration>) -> Result<(Menu, ScreenId)> {
        let mut menu = Menu::new();
        let ids: BTreeMap<&str, ScreenId> = self
            .screens
            .keys()
            .map(|name| (name.as_str(), menu.reserve_screen()))
            .collect();

        let root = *ids
            .get(self.root.as_str())
            .ok_or_else(|| GrillError::Config(format!("root screen {:?} is not defined", self.root)))?;

        for (name, spec) in &self.screens {
            let step = step_override
                .or_else(|| spec.step_ms.or(self.step_ms).map(Duration::from_millis));
            let selector = build_screen(name, spec, step, &ids)?;
            if let Some(slot) = menu.screen_mut(ids[name.as_str()]) {
                *slot = selector;
            }
        }

        Ok((menu, root))
    }
}

fn build_screen(
    name: &str,
    spec: &ScreenSpec,
    step: Option<Duration>,
    ids: &BTreeMap<&str, ScreenId>,
) -> Result<Selector> {
    if spec.options.is_empty() {
        return Err(GrillError::Config(format!("screen {:?} has no options", name)));
    }

    let mut selector = Selector::new();
    if let Some(step) = step {
        selector.set_step_interval(step);
    }
    if let Some(title) = &spec.title {
        selector.set_title(Title::new(title.text.as_str()).with_colors(colors(title.fg, title.bg, theme::TITLE)));
    }
    if let Some(cursor) = &spec.cursor {
        if cursor.steps.is_empty() {
            return Err(GrillError::Config(format!("screen {:?} cursor has no steps", name)));
        }
        let built = Cursor::from_glyphs(cursor.steps.iter().cloned())
            .with_colors(colors(cursor.fg, cursor.bg, theme::CURSOR));
        selector.set_cursor(built);
    }

    for option in &spec.options {
        let value = option_value(name, option, ids)?;
        let pair = colors(option.fg, option.bg, theme::OPTION);
        selector.add_option(Choice::new(option.label.as_str(), value).with_colors(pair));
    }
    Ok(selector)
}

fn option_value(screen: &str, option: &OptionSpec, ids: &BTreeMap<&str, ScreenId>) -> Result<Value> {
    match (&option.value, &option.screen, option.back) {
        (None, None, false) => Ok(Value::Text(option.label.clone())),
        (Some(value), None, false) => Ok(Value::from(value.clone())),
        (None, Some(target), false) => ids.get(target.as_str()).map(|id| Value::Screen(*id)).ok_or_else(|| {
            GrillError::Config(format!(
                "screen {:?} option {:?} links to undefined screen {:?}",
                screen, option.label, target
            ))
        }),
        (None, None, true) => Ok(Value::Back),
        _ => Err(GrillError::Config(format!(
            "screen {:?} option {:?} sets more than one of value, screen, back",
            screen, option.label
        ))),
    }
}

/// One-screen menu from bare labels. Each option's value is its index.
pub fn pick_menu(labels: &[String], title: Option<&str>) -> Result<Selector> {
    if labels.is_empty() {
        return Err(GrillError::NoOptions);
    }
    let mut selector = Selector::new();
    if let Some(title) = title {
        selector.set_title(Title::new(title));
    }
    for (i, label) in labels.iter().enumerate() {
        selector.add_choice(label.as_str(), i as i64);
    }
    Ok(selector)
}

// ============================================================================
// TESTS
// ============================================================================
