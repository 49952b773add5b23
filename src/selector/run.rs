//! Selector effects boundary: validation, the render/poll loop, exit.
//!
//! This is the only selector module that talks to a [`Surface`]. The
//! surface is initialized once per render and shut down on every path
//! out of it: capacity failure, commit, interrupt, and I/O errors.
//!
//! The bounded key read is the loop's only wait. Its timeout is the step
//! interval, so it paces the cursor animation as well as input.

use tracing::{debug, info, warn};

use crate::error::{GrillError, Result};
use crate::types::Cursor;

use super::state::{Action, Outcome, Selector, Transition};
use super::surface::{Surface, KEY_DOWN, KEY_ENTER, KEY_UP};
use super::update::{check_capacity, longest_label, update};
use super::view::compose;

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a raw key code to a semantic Action.
///
/// Returns None for timeouts and every other code.
pub fn map_key(code: i32) -> Option<Action> {
    match code {
        KEY_ENTER => Some(Action::Commit),
        KEY_UP => Some(Action::MoveUp),
        KEY_DOWN => Some(Action::MoveDown),
        _ => None,
    }
}

// ============================================================================
// RENDER
// ============================================================================

impl Selector {
    /// Take over the terminal until the user commits or interrupts.
    ///
    /// Installs the default spinner if no cursor was set. On
    /// [`Outcome::Committed`] exactly one option is marked selected; read
    /// it back with [`Selector::selected_option`].
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> Result<Outcome> {
        let cursor = self.cursor.get_or_insert_with(Cursor::spinner);
        if cursor.steps().is_empty() {
            return Err(GrillError::EmptyCursor);
        }
        self.longest_label = longest_label(&self.options)?;

        let size = surface.init(self.step)?;
        debug!(
            columns = size.columns,
            rows = size.rows,
            options = self.options.len(),
            longest = self.longest_label,
            "surface initialized"
        );

        let result = check_capacity(self.longest_label, self.options.len(), size)
            .and_then(|()| self.drive(surface));
        let restored = surface.shutdown();

        match &result {
            Ok(outcome) => debug!(?outcome, index = self.index, "render finished"),
            Err(e) => warn!(error = %e, "render failed"),
        }
        let outcome = result?;
        restored?;
        Ok(outcome)
    }

    /// Like [`Selector::render`], but an interrupt ends the process with
    /// status 1 once the terminal has been restored.
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> Result<()> {
        match self.render(surface)? {
            Outcome::Committed => Ok(()),
            Outcome::Interrupted => std::process::exit(Outcome::Interrupted.exit_code()),
        }
    }

    /// The loop proper. Runs between `init` and `shutdown`.
    fn drive<S: Surface>(&mut self, surface: &mut S) -> Result<Outcome> {
        loop {
            if surface.interrupted() {
                info!("selector interrupted");
                return Ok(Outcome::Interrupted);
            }

            let cursor = self.cursor.get_or_insert_with(Cursor::spinner);
            cursor.advance();

            surface.clear()?;
            let segments = compose(
                self.title.as_ref(),
                &self.options,
                self.index,
                cursor,
                self.longest_label,
            );
            for segment in &segments {
                surface.write_styled(&segment.text, segment.colors)?;
            }
            surface.present()?;

            let code = surface.read_key()?;
            let Some(action) = map_key(code) else {
                continue;
            };

            match update(self.index, self.options.len(), action) {
                Transition::Highlight(index) => self.index = index,
                Transition::Commit(index) => {
                    self.options[index].selected = true;
                    info!(index, label = %self.options[index].label, "option committed");
                    return Ok(Outcome::Committed);
                }
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
