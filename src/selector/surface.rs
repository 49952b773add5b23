//! Terminal surface: the primitives the selector loop draws and reads with.
//!
//! [`Surface`] is the seam between the pure layers and the terminal.
//! [`CrosstermSurface`] is the real implementation: crossterm for raw
//! mode and key polling, ratatui for drawing. It draws on stderr so stdout
//! stays free for whatever the caller prints once the user has chosen.
//! Tests drive the loop with a scripted surface instead.

use std::io::{self, Stderr};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Once};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;
use signal_hook::consts::{SIGINT, SIGTERM};
use signal_hook::SigId;

use crate::types::ColorPair;

// ============================================================================
// KEY CODES
// ============================================================================

/// Line feed, delivered for the Enter key.
pub const KEY_ENTER: i32 = 10;
/// Final byte of the `ESC [ A` up-arrow sequence.
pub const KEY_UP: i32 = 65;
/// Final byte of the `ESC [ B` down-arrow sequence.
pub const KEY_DOWN: i32 = 66;
/// Returned by [`Surface::read_key`] when the step interval elapses.
pub const KEY_TIMEOUT: i32 = -1;

// ============================================================================
// CONTRACT
// ============================================================================

/// Terminal dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub columns: u16,
    pub rows: u16,
}

/// Raw terminal I/O used by one selector render.
///
/// A render calls `init` once, then `shutdown` exactly once on every exit
/// path. Everything in between happens in raw mode.
pub trait Surface {
    /// Enter raw, no-echo mode with `step` as the key read timeout.
    ///
    /// On error the terminal is already back in its original mode.
    fn init(&mut self, step: Duration) -> io::Result<Size>;

    /// Start a new frame.
    fn clear(&mut self) -> io::Result<()>;

    /// Queue `text` in the given colors. Line breaks start a new row.
    fn write_styled(&mut self, text: &str, colors: ColorPair) -> io::Result<()>;

    /// Flush queued writes to the screen.
    fn present(&mut self) -> io::Result<()>;

    /// Block up to the step interval for one key. [`KEY_TIMEOUT`] on timeout.
    fn read_key(&mut self) -> io::Result<i32>;

    /// Non-blocking check of the interrupt indicator.
    fn interrupted(&self) -> bool;

    /// Restore the terminal to its original mode.
    fn shutdown(&mut self) -> io::Result<()>;
}

/// Shared interrupt indicator.
///
/// Raised by the surface on Ctrl+C, and on SIGINT or SIGTERM once
/// [`Interrupt::register_signals`] has run. Clone it to raise it from
/// another thread.
#[derive(Debug, Clone, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn raise(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }

    /// Raise this flag on SIGINT and SIGTERM instead of terminating.
    ///
    /// Pass the returned ids to [`signal_hook::low_level::unregister`] to
    /// stop listening.
    pub fn register_signals(&self) -> io::Result<Vec<SigId>> {
        [SIGINT, SIGTERM]
            .into_iter()
            .map(|signal| signal_hook::flag::register(signal, Arc::clone(&self.0)))
            .collect()
    }
}

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Ctrl+C arrives as a key event in raw mode.
pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Translate a crossterm key event to the raw code the loop consumes.
///
/// Printable characters map to their code point; anything without a code
/// maps to [`KEY_TIMEOUT`] and is ignored by the loop.
pub fn key_code(key: &KeyEvent) -> i32 {
    match key.code {
        KeyCode::Enter => KEY_ENTER,
        KeyCode::Up => KEY_UP,
        KeyCode::Down => KEY_DOWN,
        KeyCode::Esc => 27,
        KeyCode::Tab => 9,
        KeyCode::Backspace => 127,
        KeyCode::Char(c) => c as i32,
        _ => KEY_TIMEOUT,
    }
}

// ============================================================================
// CROSSTERM SURFACE
// ============================================================================

/// Queue `text` onto `lines`, starting a new line at every `\n`.
pub fn push_styled(lines: &mut Vec<Line<'static>>, text: &str, style: Style) {
    if lines.is_empty() {
        lines.push(Line::default());
    }
    for (i, part) in text.split('\n').enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        if !part.is_empty() {
            if let Some(line) = lines.last_mut() {
                line.push_span(Span::styled(part.to_string(), style));
            }
        }
    }
}

/// The real terminal, owned by one render at a time.
pub struct CrosstermSurface {
    terminal: Option<Terminal<CrosstermBackend<Stderr>>>,
    /// Set from a successful `enable_raw_mode` until the terminal is restored.
    raw: bool,
    lines: Vec<Line<'static>>,
    timeout: Duration,
    interrupt: Interrupt,
    signals: Vec<SigId>,
}

impl CrosstermSurface {
    /// The surface listens for SIGINT and SIGTERM for as long as it lives.
    pub fn new() -> Self {
        install_panic_hook();
        let interrupt = Interrupt::default();
        let signals = interrupt.register_signals().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "signal handlers not installed; only Ctrl+C interrupts");
            Vec::new()
        });
        CrosstermSurface {
            terminal: None,
            raw: false,
            lines: Vec::new(),
            timeout: super::state::DEFAULT_STEP,
            interrupt,
            signals,
        }
    }

    /// Everything `init` does once raw mode is on.
    fn enter(&mut self) -> io::Result<Size> {
        io::stderr().execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stderr());
        self.terminal = Some(Terminal::new(backend)?);

        let (columns, rows) = crossterm::terminal::size()?;
        Ok(Size { columns, rows })
    }

    /// Handle to the interrupt flag this surface reports.
    pub fn interrupt(&self) -> Interrupt {
        self.interrupt.clone()
    }
}

impl Default for CrosstermSurface {
    fn default() -> Self {
        CrosstermSurface::new()
    }
}

impl Surface for CrosstermSurface {
    fn init(&mut self, step: Duration) -> io::Result<Size> {
        self.timeout = step;
        self.interrupt.reset();
        self.lines.clear();

        enable_raw_mode()?;
        self.raw = true;
        let size = self.enter();
        if size.is_err() {
            let _ = self.shutdown();
        }
        size
    }

    fn clear(&mut self) -> io::Result<()> {
        self.lines.clear();
        Ok(())
    }

    fn write_styled(&mut self, text: &str, colors: ColorPair) -> io::Result<()> {
        push_styled(&mut self.lines, text, colors.into());
        Ok(())
    }

    fn present(&mut self) -> io::Result<()> {
        let lines = &self.lines;
        if let Some(terminal) = self.terminal.as_mut() {
            terminal.draw(|frame| frame.render_widget(Paragraph::new(lines.clone()), frame.area()))?;
        }
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<i32> {
        if !event::poll(self.timeout)? {
            return Ok(KEY_TIMEOUT);
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if is_interrupt(&key) {
                    self.interrupt.raise();
                    return Ok(KEY_TIMEOUT);
                }
                Ok(key_code(&key))
            }
            _ => Ok(KEY_TIMEOUT), // resize, mouse, key release
        }
    }

    fn interrupted(&self) -> bool {
        self.interrupt.is_raised()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        let cursor = match self.terminal.take() {
            Some(mut terminal) => terminal.show_cursor(),
            None => Ok(()),
        };
        if !self.raw {
            return cursor;
        }
        self.raw = false;
        restore_terminal().and(cursor)
    }
}

impl Drop for CrosstermSurface {
    fn drop(&mut self) {
        // Best-effort: a surface dropped mid-render must not leave raw mode on.
        let _ = self.shutdown();
        for id in self.signals.drain(..) {
            signal_hook::low_level::unregister(id);
        }
    }
}

/// Leave raw mode and the alternate screen. Both are attempted even when
/// the first fails.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = io::stderr().execute(LeaveAlternateScreen).map(|_| ());
    raw.and(screen)
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));
    });
}

// ============================================================================
// SCRIPTED SURFACE (tests)
// ============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;

    use super::*;
    use crate::selector::view::Segment;

    /// Replays a fixed key script and records everything drawn.
    ///
    /// When the script runs out the interrupt flag is raised, so a loop
    /// that never commits still terminates.
    pub struct ScriptedSurface {
        pub size: Size,
        keys: VecDeque<i32>,
        pending: Vec<Segment>,
        pub frames: Vec<Vec<Segment>>,
        pub steps: Vec<Duration>,
        pub reads: usize,
        pub inits: usize,
        pub shutdowns: usize,
        pub interrupt: Interrupt,
        /// Raise the interrupt once this many keys have been read.
        pub interrupt_after: Option<usize>,
        live: bool,
    }

    impl ScriptedSurface {
        pub fn new(keys: &[i32]) -> Self {
            ScriptedSurface {
                size: Size { columns: 80, rows: 24 },
                keys: keys.iter().copied().collect(),
                pending: Vec::new(),
                frames: Vec::new(),
                steps: Vec::new(),
                reads: 0,
                inits: 0,
                shutdowns: 0,
                interrupt: Interrupt::default(),
                interrupt_after: None,
                live: false,
            }
        }

        pub fn with_size(mut self, columns: u16, rows: u16) -> Self {
            self.size = Size { columns, rows };
            self
        }

        /// Append keys for a later render pass.
        pub fn push_keys(&mut self, keys: &[i32]) {
            self.keys.extend(keys.iter().copied());
        }

        /// True while between `init` and `shutdown`.
        pub fn is_live(&self) -> bool {
            self.live
        }

        /// Concatenated text of the last presented frame.
        pub fn last_frame_text(&self) -> String {
            self.frames
                .last()
                .map(|f| f.iter().map(|s| s.text.as_str()).collect())
                .unwrap_or_default()
        }
    }

    impl Surface for ScriptedSurface {
        fn init(&mut self, step: Duration) -> io::Result<Size> {
            assert!(!self.live, "init called twice without shutdown");
            self.live = true;
            self.inits += 1;
            self.steps.push(step);
            Ok(self.size)
        }

        fn clear(&mut self) -> io::Result<()> {
            assert!(self.live);
            self.pending.clear();
            Ok(())
        }

        fn write_styled(&mut self, text: &str, colors: ColorPair) -> io::Result<()> {
            assert!(self.live);
            self.pending.push(Segment::new(text, colors));
            Ok(())
        }

        fn present(&mut self) -> io::Result<()> {
            assert!(self.live);
            self.frames.push(std::mem::take(&mut self.pending));
            Ok(())
        }

        fn read_key(&mut self) -> io::Result<i32> {
            assert!(self.live);
            self.reads += 1;
            if self.interrupt_after.is_some_and(|n| self.reads > n) {
                self.interrupt.raise();
                return Ok(KEY_TIMEOUT);
            }
            match self.keys.pop_front() {
                Some(code) => Ok(code),
                None => {
                    self.interrupt.raise();
                    Ok(KEY_TIMEOUT)
                }
            }
        }

        fn interrupted(&self) -> bool {
            self.interrupt.is_raised()
        }

        fn shutdown(&mut self) -> io::Result<()> {
            assert!(self.live, "shutdown without init");
            self.live = false;
            self.shutdowns += 1;
            self.interrupt.reset();
            Ok(())
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use ratatui::backend::TestBackend;

    #[test]
    fn arrow_and_enter_keys_map_to_raw_codes() {
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        let up = KeyEvent::new(KeyCode::Up, KeyModifiers::NONE);
        let down = KeyEvent::new(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(key_code(&enter), KEY_ENTER);
        assert_eq!(key_code(&up), KEY_UP);
        assert_eq!(key_code(&down), KEY_DOWN);
    }

    #[test]
    fn characters_map_to_code_points() {
        let a = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(key_code(&a), KEY_UP);
        let z = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::NONE);
        assert_eq!(key_code(&z), 'z' as i32);
    }

    #[test]
    fn keys_without_code_map_to_timeout() {
        let f1 = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(key_code(&f1), KEY_TIMEOUT);
    }

    #[test]
    fn ctrl_c_is_interrupt() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        let c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE);
        assert!(is_interrupt(&ctrl_c));
        assert!(!is_interrupt(&c));
    }

    #[test]
    fn interrupt_flag_is_shared_between_clones() {
        let flag = Interrupt::default();
        let handle = flag.clone();
        handle.raise();
        assert!(flag.is_raised());
        flag.reset();
        assert!(!handle.is_raised());
    }

    #[cfg(unix)]
    #[test]
    fn sigint_raises_registered_interrupt() {
        let flag = Interrupt::default();
        let ids = flag.register_signals().unwrap();
        assert_eq!(ids.len(), 2);
        assert!(!flag.is_raised());

        signal_hook::low_level::raise(SIGINT).unwrap();
        assert!(flag.is_raised());

        flag.reset();
        signal_hook::low_level::raise(SIGTERM).unwrap();
        assert!(flag.is_raised());

        for id in ids {
            signal_hook::low_level::unregister(id);
        }
    }

    #[test]
    fn shutdown_without_init_is_a_no_op() {
        let mut surface = CrosstermSurface::new();
        assert!(surface.shutdown().is_ok());
        assert!(surface.shutdown().is_ok());
        assert!(!surface.raw);
    }

    #[test]
    fn shutdown_restores_raw_mode_when_setup_stopped_halfway() {
        // Raw mode on, alternate screen or terminal never came up.
        let mut surface = CrosstermSurface::new();
        surface.raw = true;
        assert!(surface.terminal.is_none());

        assert!(surface.shutdown().is_ok());
        assert!(!surface.raw);
        assert!(surface.shutdown().is_ok());
    }

    #[test]
    fn surface_draws_on_stderr() {
        fn stderr_terminal(_: &Option<Terminal<CrosstermBackend<io::Stderr>>>) {}
        let surface = CrosstermSurface::new();
        stderr_terminal(&surface.terminal);
    }

    #[test]
    fn push_styled_splits_rows_at_line_breaks() {
        let mut lines = Vec::new();
        push_styled(&mut lines, "Title\n", Style::new());
        push_styled(&mut lines, "one", Style::new());
        push_styled(&mut lines, "\n", Style::new());
        push_styled(&mut lines, "two", Style::new());
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].to_string(), "Title");
        assert_eq!(lines[1].to_string(), "one");
        assert_eq!(lines[2].to_string(), "two");
    }

    #[test]
    fn queued_segments_draw_at_expected_cells() {
        let mut lines = Vec::new();
        let green = ColorPair::new(Color::Green, Color::Black);
        let blue = ColorPair::new(Color::Blue, Color::Black);
        push_styled(&mut lines, "Linux  ", green.into());
        push_styled(&mut lines, "<|", blue.into());
        push_styled(&mut lines, "\n", Style::new());
        push_styled(&mut lines, "BSD", green.into());

        let mut terminal = Terminal::new(TestBackend::new(20, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(Paragraph::new(lines.clone()), frame.area()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        assert_eq!(buffer[(7, 0)].symbol(), "<");
        assert_eq!(buffer[(7, 0)].fg, ratatui::style::Color::Blue);
        assert_eq!(buffer[(0, 1)].symbol(), "B");
        assert_eq!(buffer[(0, 1)].fg, ratatui::style::Color::Green);
    }
}
