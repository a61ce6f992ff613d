//! Dialoguer backend implementation for the JournalBackend trait.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use chrono::NaiveDate;
use dialoguer::{
    Confirm, Editor, FuzzySelect, Input,
    theme::{ColorfulTheme, SimpleTheme, Theme},
};
use dreammate::{
    ArtifactKind, CaptureOptions, CaptureRegion, CommitError, ExportError, Exporter, Journal,
    JournalBackend, Notice, NoticeLevel, Progress, ProgressDot, PromptWalker, RasterCapture, Rgb,
    Screen, Section, SummaryCard, WalkError, export, wording,
};
use dreammate_html_card::HtmlOptions;
use log::{debug, info};
use thiserror::Error;

const BACK_COMMAND: &str = ":back";
const EDIT_COMMAND: &str = ":edit";

/// Ink color of the rasterized card.
const CARD_INK: Rgb = Rgb(59, 42, 74);

/// Error type for the Dialoguer backend.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the journey (e.g., pressed Ctrl+C or Escape).
    #[error("Journey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// What the user typed at a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Reply {
    Back,
    Edit,
    Answer(String),
}

impl Reply {
    fn parse(input: String) -> Self {
        match input.trim() {
            BACK_COMMAND => Reply::Back,
            EDIT_COMMAND => Reply::Edit,
            _ => Reply::Answer(input),
        }
    }
}

/// Entries of the summary menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SummaryAction {
    SaveText,
    SaveImage,
    SaveHtml,
    StartAgain,
    Quit,
}

impl SummaryAction {
    const ALL: [SummaryAction; 5] = [
        SummaryAction::SaveText,
        SummaryAction::SaveImage,
        SummaryAction::SaveHtml,
        SummaryAction::StartAgain,
        SummaryAction::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            SummaryAction::SaveText => "Save journal as text",
            SummaryAction::SaveImage => "Save card as image",
            SummaryAction::SaveHtml => "Save card as HTML",
            SummaryAction::StartAgain => wording::RESTART,
            SummaryAction::Quit => "Quit",
        }
    }
}

/// Dialoguer backend for line-by-line journaling.
#[derive(Clone)]
pub struct DialoguerBackend {
    /// Use colorful theme for prompts.
    colorful: bool,
    exporter: Exporter,
    capture: Option<Arc<dyn RasterCapture + Send + Sync>>,
    capture_options: CaptureOptions,
    html_options: HtmlOptions,
    /// Width of the printed and rasterized card.
    card_width: usize,
}

impl fmt::Debug for DialoguerBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialoguerBackend")
            .field("colorful", &self.colorful)
            .field("exporter", &self.exporter)
            .field("capture", &self.capture.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for DialoguerBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DialoguerBackend {
    /// Create a new Dialoguer backend with default (colorful) theme.
    pub fn new() -> Self {
        Self {
            colorful: true,
            exporter: Exporter::default(),
            capture: None,
            capture_options: CaptureOptions::default(),
            html_options: HtmlOptions::new(),
            card_width: 60,
        }
    }

    /// Create a backend with plain (no color) theme.
    pub fn plain() -> Self {
        Self {
            colorful: false,
            ..Self::new()
        }
    }

    pub fn with_exporter(mut self, exporter: Exporter) -> Self {
        self.exporter = exporter;
        self
    }

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

    pub fn with_card_width(mut self, width: usize) -> Self {
        self.card_width = width;
        self
    }

    fn theme(&self) -> Box<dyn Theme> {
        if self.colorful {
            Box::new(ColorfulTheme::default())
        } else {
            Box::new(SimpleTheme)
        }
    }

    /// Returns false when the user declines to begin.
    fn intro(&self, journal: &mut Journal) -> Result<bool, DialoguerError> {
        println!("{}", wording::INTRO_TITLE);
        println!("{}", wording::INTRO_TAGLINE);
        println!();
        println!("{}", wording::INTRO_BLURB);
        println!("{}", wording::INTRO_FOOTNOTE);
        println!();

        let theme = self.theme();
        let begin = Confirm::with_theme(&*theme)
            .with_prompt(wording::INTRO_ACTION)
            .default(true)
            .interact()
            .map_err(prompt_error)?;
        if begin {
            journal.begin();
        }
        Ok(begin)
    }

    /// Present the current prompt and take one reply.
    fn prompt(&self, journal: &mut Journal) -> Result<(), DialoguerError> {
        let Some(walker) = journal.walker() else {
            return Ok(());
        };
        let section = walker.section();
        if walker.index() == 0 && walker.answer().is_empty() {
            println!();
            println!("{}", section_header(section));
        }

        wait_for_prompt(journal);
        let Some(walker) = journal.walker() else {
            return Ok(());
        };

        println!();
        println!("{}  {}", dots(&walker.progress()), walker.prompt());
        let hint = prompt_hint(walker);
        let current = walker.answer().to_string();

        let theme = self.theme();
        let input: String = Input::with_theme(&*theme)
            .with_prompt(hint)
            .with_initial_text(current.clone())
            .validate_with(|text: &String| -> Result<(), &'static str> {
                if text.trim().is_empty() {
                    Err("Write a few words first")
                } else {
                    Ok(())
                }
            })
            .interact_text()
            .map_err(prompt_error)?;

        let answer = match Reply::parse(input) {
            Reply::Back => {
                if !journal.back() {
                    println!("This is the first prompt of the section.");
                }
                return Ok(());
            }
            Reply::Edit => match Editor::new()
                .edit(&current)
                .map_err(|err| prompt_error(err.into()))?
            {
                Some(text) if !text.trim().is_empty() => text.trim_end().to_string(),
                _ => {
                    println!("Nothing written; the prompt is asked again.");
                    return Ok(());
                }
            },
            Reply::Answer(text) => text,
        };

        journal.set_answer(answer)?;
        match journal.advance()? {
            Progress::NextSection(next) => debug!("moving on to {next}"),
            Progress::Finished => info!("journal finished in plain mode"),
            Progress::NextPrompt | Progress::Blocked => {}
        }
        Ok(())
    }

    /// Returns false when the user quits.
    fn summary(&self, journal: &mut Journal) -> Result<bool, DialoguerError> {
        let date = export::today();
        let card = SummaryCard::new(journal.session(), date);

        println!();
        println!("{}", card.heading);
        println!("{}", card.tagline);
        println!();
        for line in card.lines(self.card_width) {
            println!("  {line}");
        }
        println!();
        println!("{}", card.closing);

        let labels: Vec<&str> = SummaryAction::ALL.iter().map(|a| a.label()).collect();
        loop {
            let theme = self.theme();
            let choice = FuzzySelect::with_theme(&*theme)
                .with_prompt("What would you like to do?")
                .items(&labels)
                .default(0)
                .interact_opt()
                .map_err(prompt_error)?;

            let action = choice
                .and_then(|i| SummaryAction::ALL.get(i).copied())
                .unwrap_or(SummaryAction::Quit);
            match action {
                SummaryAction::Quit => return Ok(false),
                SummaryAction::StartAgain => {
                    journal.restart();
                    return Ok(true);
                }
                export_action => {
                    let notice = self.export(journal, export_action, date);
                    print_notice(&notice);
                }
            }
        }
    }

    fn export(&self, journal: &Journal, action: SummaryAction, date: NaiveDate) -> Notice {
        let session = journal.session();
        let (kind, result) = match action {
            SummaryAction::SaveText => (
                ArtifactKind::Text,
                self.exporter.export_text(session, date),
            ),
            SummaryAction::SaveHtml => (
                ArtifactKind::Html,
                dreammate_html_card::export_html(&self.exporter, session, &self.html_options, date),
            ),
            SummaryAction::SaveImage => {
                let kind = ArtifactKind::Image(self.capture_options.format);
                let result = match &self.capture {
                    Some(capture) => {
                        let card = SummaryCard::new(session, date);
                        let region = CaptureRegion::from_lines(&card.lines(self.card_width), CARD_INK);
                        self.exporter.export_image(
                            session,
                            &**capture,
                            Some(&region),
                            &self.capture_options,
                            date,
                        )
                    }
                    None => Err(ExportError::MissingTarget),
                };
                (kind, result)
            }
            SummaryAction::StartAgain | SummaryAction::Quit => {
                return Notice::info("Nothing to save");
            }
        };
        Notice::from_export(kind, &result)
    }
}

/// Sleep out the typing pause, then make sure the prompt is visible.
fn wait_for_prompt(journal: &mut Journal) {
    if let Some(remaining) = journal.typing_remaining(Instant::now()) {
        println!("{} ...", wording::TYPING);
        thread::sleep(remaining);
        journal.poll_typing(Instant::now());
    }
    journal.reveal_now();
}

fn section_header(section: &Section) -> String {
    format!(
        "Step {} · {} · {}",
        section.step(),
        section.title,
        section.subtitle
    )
}

fn dots(progress: &[ProgressDot]) -> String {
    progress
        .iter()
        .map(|dot| match dot {
            ProgressDot::Done | ProgressDot::Current => "●",
            ProgressDot::Upcoming => "○",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn prompt_hint(walker: &PromptWalker) -> String {
    let mut commands = vec![EDIT_COMMAND];
    if walker.shows_back() && walker.can_go_back() {
        commands.push(BACK_COMMAND);
    }
    format!("{} ({})", walker.continue_label(), commands.join(", "))
}

fn print_notice(notice: &Notice) {
    let marker = match notice.level {
        NoticeLevel::Info => "·",
        NoticeLevel::Success => "✔",
        NoticeLevel::Error => "✘",
    };
    println!("{marker} {}", notice.message);
}

impl JournalBackend for DialoguerBackend {
    type Error = DialoguerError;

    fn run(&self, journal: &mut Journal) -> Result<(), Self::Error> {
        loop {
            let keep_going = match journal.screen() {
                Screen::Intro => self.intro(journal)?,
                Screen::Prompt(_) => {
                    self.prompt(journal)?;
                    true
                }
                Screen::Summary => self.summary(journal)?,
            };
            if !keep_going {
                return Ok(());
            }
        }
    }
}
