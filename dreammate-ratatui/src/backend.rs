//! Ratatui backend implementation for the JournalBackend trait.
//!
//! Owns the terminal, runs the event loop and hands key presses to the
//! journey state. Drawing lives in `view`, key handling in `state`.

use std::fmt;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use dreammate::{CaptureOptions, Exporter, Journal, JournalBackend, RasterCapture};
use dreammate_html_card::HtmlOptions;
use log::{debug, info};
use ratatui::{Terminal, prelude::CrosstermBackend, style::Color};
use thiserror::Error;

use crate::state::{ExportSettings, Flow, UiState};
use crate::view;

/// Longest wait for input when no deadline is pending.
const TICK: Duration = Duration::from_millis(250);

/// Error type for the Ratatui backend.
#[derive(Debug, Error)]
pub enum RatatuiError {
    /// User left the journey before the summary (Esc or Ctrl+C).
    #[error("Journey cancelled by user")]
    Cancelled,

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color theme for the TUI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub background: Color,
    pub text: Color,
    pub muted: Color,
    pub highlight: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb(190, 150, 255),
            secondary: Color::Rgb(255, 170, 210),
            background: Color::Reset,
            text: Color::White,
            muted: Color::DarkGray,
            highlight: Color::Rgb(255, 220, 140),
            error: Color::Red,
            success: Color::Green,
            border: Color::Gray,
        }
    }
}

impl Theme {
    /// Dark ink on a light page, used when the card is rasterized.
    pub fn paper() -> Self {
        Self {
            primary: Color::Rgb(124, 77, 200),
            secondary: Color::Rgb(190, 90, 150),
            background: Color::Reset,
            text: Color::Rgb(59, 42, 74),
            muted: Color::Rgb(122, 106, 138),
            highlight: Color::Rgb(170, 120, 20),
            error: Color::Rgb(180, 40, 40),
            success: Color::Rgb(40, 130, 70),
            border: Color::Rgb(200, 180, 220),
        }
    }
}

/// Ratatui-based TUI backend.
///
/// Shows the intro, one prompt at a time with a typing indicator, and the
/// summary card with export actions.
#[derive(Clone)]
pub struct RatatuiBackend {
    /// Title shown at the top of every screen.
    title: String,
    /// Color theme for the UI.
    theme: Theme,
    /// Theme of the rasterized card.
    card_theme: Theme,
    /// Width in cells of the rasterized card.
    card_width: u16,
    exporter: Exporter,
    capture: Option<Arc<dyn RasterCapture + Send + Sync>>,
    capture_options: CaptureOptions,
    html_options: HtmlOptions,
    /// How long export notices stay on screen.
    notice_ttl: Duration,
}

impl fmt::Debug for RatatuiBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatatuiBackend")
            .field("title", &self.title)
            .field("exporter", &self.exporter)
            .field("capture", &self.capture.is_some())
            .field("capture_options", &self.capture_options)
            .finish_non_exhaustive()
    }
}

impl Default for RatatuiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RatatuiBackend {
    /// Create a new Ratatui backend with default settings.
    ///
    /// Without a capture capability, image export reports a missing target.
    pub fn new() -> Self {
        Self {
            title: dreammate::wording::APP_NAME.to_string(),
            theme: Theme::default(),
            card_theme: Theme::paper(),
            card_width: 60,
            exporter: Exporter::default(),
            capture: None,
            capture_options: CaptureOptions::default(),
            html_options: HtmlOptions::new(),
            notice_ttl: Duration::from_secs(4),
        }
    }

    /// Set the title shown at the top of every screen.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set a custom color theme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the theme used when the card is rasterized.
    pub fn with_card_theme(mut self, theme: Theme) -> Self {
        self.card_theme = theme;
        self
    }

    pub fn with_card_width(mut self, width: u16) -> Self {
        self.card_width = width;
        self
    }

    /// Directory the artifacts are written to.
    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = exporter;
        self
    }

    /// Capability used for image export.
    pub fn with_capture(mut self, capture: Arc<dyn RasterCapture + Send + Sync>) -> Self {
        self.capture = Some(capture);
        self
    }

    pub fn with_capture_options(mut self, options: CaptureOptions) -> Self {
        self.capture_options = options;
        self
    }

    pub fn with_html_options(mut self, options: HtmlOptions) -> Self {
        self.html_options = options;
        self
    }

    pub fn with_notice_ttl(mut self, ttl: Duration) -> Self {
        self.notice_ttl = ttl;
        self
    }

    pub(crate) fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            exporter: self.exporter.clone(),
            capture: self.capture.clone(),
            capture_options: self.capture_options.clone(),
            card_theme: self.card_theme.clone(),
            card_width: self.card_width,
            html_options: self.html_options.clone(),
            notice_ttl: self.notice_ttl,
        }
    }

    fn setup_terminal(&self) -> Result<Terminal<CrosstermBackend<Stdout>>, RatatuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    fn restore_terminal(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> Result<(), RatatuiError> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        journal: &mut Journal,
        state: &mut UiState,
    ) -> Result<Flow, RatatuiError> {
        loop {
            let now = Instant::now();
            if journal.poll_typing(now) {
                state.sync_cursor(journal);
            }
            state.poll_exports();
            state.expire_notice(now);

            terminal.draw(|frame| view::draw(frame, journal, state, &self.theme, &self.title))?;

            let timeout = journal
                .typing_remaining(Instant::now())
                .map_or(TICK, |remaining| remaining.min(TICK));
            if !event::poll(timeout)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match state.handle_key(journal, key) {
                    Flow::Continue => {}
                    flow => return Ok(flow),
                }
            }
        }
    }
}

impl JournalBackend for RatatuiBackend {
    type Error = RatatuiError;

    fn run(&self, journal: &mut Journal) -> Result<(), Self::Error> {
        let mut terminal = self.setup_terminal()?;
        let mut state = UiState::new(self.export_settings());
        debug!("tui started at {:?}", journal.cursor());

        let flow = self.event_loop(&mut terminal, journal, &mut state);
        self.restore_terminal(&mut terminal)?;

        match flow? {
            Flow::Cancel => Err(RatatuiError::Cancelled),
            Flow::Quit | Flow::Continue => {
                info!("tui closed");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_creation() {
        let _backend = RatatuiBackend::new();
        let _with_title = RatatuiBackend::new().with_title("Test");
        let _with_theme = RatatuiBackend::new().with_theme(Theme::default());
    }

    #[test]
    fn error_types() {
        let err = RatatuiError::Cancelled;
        assert_eq!(err.to_string(), "Journey cancelled by user");

        let err = RatatuiError::from(std::io::Error::other("tty gone"));
        assert_eq!(err.to_string(), "I/O error: tty gone");
    }

    #[test]
    fn paper_theme_uses_true_colors() {
        let theme = Theme::paper();
        assert!(matches!(theme.text, Color::Rgb(..)));
        assert!(matches!(theme.primary, Color::Rgb(..)));
        assert_ne!(theme, Theme::default());
    }

    #[test]
    fn settings_follow_builder() {
        let settings = RatatuiBackend::new()
            .with_exporter(Exporter::new("/tmp/journal"))
            .with_card_width(48)
            .export_settings();
        assert_eq!(settings.exporter.dir(), std::path::Path::new("/tmp/journal"));
        assert_eq!(settings.card_width, 48);
        assert!(settings.capture.is_none());
    }
}
