//! Multi-screen menus: a set of selectors linked by their option values.
//!
//! Screens live in an arena and refer to each other by [`ScreenId`], so
//! cycles (a child offering its parent) need no shared ownership. An
//! option whose value is [`Value::Screen`] descends into that screen;
//! [`Value::Back`] returns to the screen visited before the current one.
//! Any other value ends navigation.

use tracing::{debug, info};

use crate::error::{GrillError, Result};
use crate::selector::{Outcome, Selector, Surface};
use crate::types::{Choice, Value};

/// Handle to a screen inside one [`Menu`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenId(usize);

impl ScreenId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// How a menu run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// A leaf option was committed. Carries the screen it was picked on.
    Chosen { screen: ScreenId, choice: Choice },
    Interrupted,
}

#[derive(Debug, Default)]
pub struct Menu {
    screens: Vec<Selector>,
}

impl Menu {
    pub fn new() -> Self {
        Menu::default()
    }

    /// Add a screen. Options may reference it by the returned id.
    pub fn add_screen(&mut self, selector: Selector) -> ScreenId {
        self.screens.push(selector);
        ScreenId(self.screens.len() - 1)
    }

    /// Reserve an id for a screen filled in later, for forward references.
    pub fn reserve_screen(&mut self) -> ScreenId {
        self.add_screen(Selector::new())
    }

    pub fn screen(&self, id: ScreenId) -> Option<&Selector> {
        self.screens.get(id.0)
    }

    pub fn screen_mut(&mut self, id: ScreenId) -> Option<&mut Selector> {
        self.screens.get_mut(id.0)
    }

    pub fn screens(&self) -> impl Iterator<Item = &Selector> {
        self.screens.iter()
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    /// Check every screen link points inside this menu.
    pub fn validate(&self) -> Result<()> {
        for (i, screen) in self.screens.iter().enumerate() {
            for option in screen.options() {
                if let Value::Screen(target) = option.value() {
                    if target.0 >= self.screens.len() {
                        return Err(GrillError::Config(format!(
                            "screen {} option {:?} links to unknown screen {}",
                            i, option.label, target.0
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Render screens starting at `root` until a leaf is chosen.
    ///
    /// Each screen's selection is cleared before it is shown, so screens
    /// can be revisited any number of times.
    pub fn run<S: Surface>(&mut self, root: ScreenId, surface: &mut S) -> Result<Navigation> {
        self.validate()?;
        let mut trail: Vec<ScreenId> = Vec::new();
        let mut current = root;

        loop {
            let screen = self
                .screens
                .get_mut(current.0)
                .ok_or_else(|| GrillError::Config(format!("unknown root screen {}", current.0)))?;
            screen.clear_selection();

            debug!(screen = current.0, depth = trail.len(), "rendering screen");
            if screen.render(surface)? == Outcome::Interrupted {
                return Ok(Navigation::Interrupted);
            }

            let choice = screen.selected_option()?;
            match choice.value() {
                Value::Screen(next) => {
                    debug!(from = current.0, to = next.0, "descending");
                    trail.push(current);
                    current = *next;
                }
                Value::Back => {
                    // Back on the first screen shows it again.
                    if let Some(previous) = trail.pop() {
                        debug!(from = current.0, to = previous.0, "returning");
                        current = previous;
                    }
                }
                _ => {
                    info!(screen = current.0, label = %choice.label, "menu leaf chosen");
                    return Ok(Navigation::Chosen {
                        screen: current,
                        choice: choice.clone(),
                    });
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
