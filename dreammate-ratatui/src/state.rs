//! Per-run UI state and key handling.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dreammate::{
    ArtifactKind, CaptureError, CaptureOptions, ExportError, ExportGate, Exporter, Journal, Notice, Progress,
    RasterCapture, Screen, SummaryCard, export,
};
use dreammate_html_card::HtmlOptions;
use log::{debug, error, warn};

use crate::backend::Theme;
use crate::capture::card_region;

/// What the event loop does after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    /// Leave normally from the summary.
    Quit,
    /// Abandon the journey.
    Cancel,
}

/// Everything an export needs besides the session.
#[derive(Clone)]
pub(crate) struct ExportSettings {
    pub exporter: Exporter,
    pub capture: Option<Arc<dyn RasterCapture + Send + Sync>>,
    pub capture_options: CaptureOptions,
    pub card_theme: Theme,
    pub card_width: u16,
    pub html_options: HtmlOptions,
    pub notice_ttl: Duration,
}

struct PendingExport {
    kind: ArtifactKind,
    rx: Receiver<Result<PathBuf, ExportError>>,
}

pub(crate) struct UiState {
    settings: ExportSettings,
    /// Cursor in the current answer, in characters.
    pub cursor: usize,
    /// First visible row of the summary card.
    pub scroll: u16,
    notice: Option<(Notice, Instant)>,
    gate: ExportGate,
    pending: Option<PendingExport>,
    pub date: NaiveDate,
}

impl UiState {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            cursor: 0,
            scroll: 0,
            notice: None,
            gate: ExportGate::new(),
            pending: None,
            date: export::today(),
        }
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref().map(|(notice, _)| notice)
    }

    pub fn is_exporting(&self) -> bool {
        self.gate.is_busy()
    }

    fn set_notice(&mut self, notice: Notice) {
        self.notice = Some((notice, Instant::now() + self.settings.notice_ttl));
    }

    pub fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|(_, until)| now >= *until) {
            self.notice = None;
        }
    }

    /// Put the cursor at the end of the current answer.
    pub fn sync_cursor(&mut self, journal: &Journal) {
        self.cursor = journal.answer().chars().count();
    }

    pub fn handle_key(&mut self, journal: &mut Journal, key: KeyEvent) -> Flow {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Flow::Cancel;
        }

        match journal.screen() {
            Screen::Intro => match key.code {
                KeyCode::Enter => {
                    journal.begin();
                    self.sync_cursor(journal);
                    Flow::Continue
                }
                KeyCode::Esc => Flow::Cancel,
                _ => Flow::Continue,
            },
            Screen::Prompt(_) => self.handle_prompt_key(journal, key),
            Screen::Summary => self.handle_summary_key(journal, key),
        }
    }

    fn handle_prompt_key(&mut self, journal: &mut Journal, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Esc {
            return Flow::Cancel;
        }

        let ready = journal.walker().is_some_and(|w| w.is_ready());
        if !ready {
            if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                journal.reveal_now();
                self.sync_cursor(journal);
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Tab => {
                match journal.advance() {
                    Ok(Progress::Blocked) => {
                        debug!("continue blocked on a blank answer");
                    }
                    Ok(Progress::Finished) => {
                        self.scroll = 0;
                    }
                    Ok(Progress::NextPrompt | Progress::NextSection(_)) => {}
                    Err(err) => {
                        warn!("could not commit section: {err}");
                        self.set_notice(Notice::error(err.to_string()));
                    }
                }
                self.sync_cursor(journal);
            }
            KeyCode::BackTab => {
                if journal.back() {
                    self.sync_cursor(journal);
                }
            }
            KeyCode::Enter => self.insert(journal, '\n'),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.insert(journal, c)
            }
            code => self.edit(journal, code),
        }
        Flow::Continue
    }

    fn insert(&mut self, journal: &mut Journal, c: char) {
        let cursor = self.cursor;
        if let Ok(answer) = journal.edit_answer() {
            let at = byte_offset(answer, cursor);
            answer.insert(at, c);
            self.cursor += 1;
        }
    }

    fn edit(&mut self, journal: &mut Journal, code: KeyCode) {
        let Ok(answer) = journal.edit_answer() else {
            return;
        };
        let len = answer.chars().count();
        self.cursor = self.cursor.min(len);

        match code {
            KeyCode::Backspace if self.cursor > 0 => {
                self.cursor -= 1;
                let at = byte_offset(answer, self.cursor);
                answer.remove(at);
            }
            KeyCode::Delete if self.cursor < len => {
                let at = byte_offset(answer, self.cursor);
                answer.remove(at);
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            _ => {}
        }
    }

    fn handle_summary_key(&mut self, journal: &mut Journal, key: KeyEvent) -> Flow {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('r') => {
                journal.restart();
                self.scroll = 0;
                self.cursor = 0;
            }
            KeyCode::Char('t') => self.export_text(journal),
            KeyCode::Char('h') => self.export_html(journal),
            KeyCode::Char('i') => self.export_image(journal),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            _ => {}
        }
        Flow::Continue
    }

    fn export_text(&mut self, journal: &Journal) {
        let result = self.gated(|settings, date| {
            settings.exporter.export_text(journal.session(), date)
        });
        self.set_notice(Notice::from_export(ArtifactKind::Text, &result));
    }

    fn export_html(&mut self, journal: &Journal) {
        let result = self.gated(|settings, date| {
            dreammate_html_card::export_html(
                &settings.exporter,
                journal.session(),
                &settings.html_options,
                date,
            )
        });
        self.set_notice(Notice::from_export(ArtifactKind::Html, &result));
    }

    fn gated(
        &mut self,
        export: impl FnOnce(&ExportSettings, NaiveDate) -> Result<PathBuf, ExportError>,
    ) -> Result<PathBuf, ExportError> {
        self.gate.try_begin()?;
        let result = export(&self.settings, self.date);
        self.gate.finish();
        result
    }

    /// Rasterize the card on a worker thread; `poll_exports` collects the result.
    fn export_image(&mut self, journal: &Journal) {
        let kind = ArtifactKind::Image(self.settings.capture_options.format);
        if let Err(err) = self.gate.try_begin() {
            self.set_notice(Notice::from_export(kind, &Err(err)));
            return;
        }

        let Some(capture) = self.settings.capture.clone() else {
            self.gate.finish();
            warn!("image export requested without a capture capability");
            self.set_notice(Notice::from_export(kind, &Err(ExportError::MissingTarget)));
            return;
        };

        let card = SummaryCard::new(journal.session(), self.date);
        let region = card_region(&card, &self.settings.card_theme, self.settings.card_width);
        let session = journal.session().clone();
        let exporter = self.settings.exporter.clone();
        let options = self.settings.capture_options.clone();
        let date = self.date;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let result =
                exporter.export_image(&session, &*capture, Some(&region), &options, date);
            let _ = tx.send(result);
        });

        self.pending = Some(PendingExport { kind, rx });
        self.set_notice(Notice::info("Saving image..."));
    }

    /// Collect a finished image export, if any.
    pub fn poll_exports(&mut self) {
        let Some(pending) = &self.pending else {
            return;
        };
        let kind = pending.kind;
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => {
                error!("image export worker stopped without a result");
                Err(ExportError::Capture(CaptureError::backend(anyhow!(
                    "image export worker stopped"
                ))))
            }
        };
        self.pending = None;
        self.gate.finish();
        self.set_notice(Notice::from_export(kind, &result));
    }
}

fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map_or(text.len(), |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreammate::{
        CaptureRegion, Cursor, JournalOptions, NoticeLevel, ScriptedBackend,
        SectionKey, TOTAL_PROMPTS,
    };

    fn settings(exporter: Exporter) -> ExportSettings {
        ExportSettings {
            exporter,
            capture: None,
            capture_options: CaptureOptions::default(),
            card_theme: Theme::paper(),
            card_width: 40,
            html_options: HtmlOptions::new(),
            notice_ttl: Duration::from_secs(4),
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut UiState, journal: &mut Journal, text: &str) {
        for c in text.chars() {
            state.handle_key(journal, press(KeyCode::Char(c)));
        }
    }

    fn finished_journal() -> Journal {
        let mut journal = Journal::new(JournalOptions::default());
        journal
            .run(ScriptedBackend::new().with_answers((0..TOTAL_PROMPTS).map(|i| format!("answer {i}"))))
            .unwrap();
        journal
    }

    fn wait_for_export(state: &mut UiState) {
        for _ in 0..500 {
            state.poll_exports();
            if !state.is_exporting() {
                return;
            }
            thread::sleep(Duration::from_millis(10));
        }
        panic!("export did not finish");
    }

    struct EchoCapture;

    impl RasterCapture for EchoCapture {
        fn capture(
            &self,
            region: &CaptureRegion,
            _options: &CaptureOptions,
        ) -> Result<Vec<u8>, CaptureError> {
            Ok(region.text().into_bytes())
        }
    }

    #[test]
    fn typing_edits_and_tab_continues() {
        let mut journal = Journal::new(JournalOptions::default().with_typing_delay(Duration::ZERO));
        let mut state = UiState::new(settings(Exporter::default()));

        state.handle_key(&mut journal, press(KeyCode::Enter));
        assert_eq!(journal.cursor(), Cursor::Section(SectionKey::Dream));

        state.handle_key(&mut journal, press(KeyCode::Tab));
        assert_eq!(journal.walker().unwrap().index(), 0);

        type_text(&mut state, &mut journal, "héllo");
        state.handle_key(&mut journal, press(KeyCode::Left));
        state.handle_key(&mut journal, press(KeyCode::Backspace));
        state.handle_key(&mut journal, press(KeyCode::Home));
        state.handle_key(&mut journal, press(KeyCode::Delete));
        assert_eq!(journal.answer(), "élo");

        state.handle_key(&mut journal, press(KeyCode::Tab));
        assert_eq!(journal.walker().unwrap().index(), 1);
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn enter_inserts_newline_and_back_keeps_answer() {
        let mut journal = Journal::new(JournalOptions::default().with_typing_delay(Duration::ZERO));
        let mut state = UiState::new(settings(Exporter::default()));
        state.handle_key(&mut journal, press(KeyCode::Enter));

        type_text(&mut state, &mut journal, "a");
        state.handle_key(&mut journal, press(KeyCode::Enter));
        type_text(&mut state, &mut journal, "b");
        state.handle_key(&mut journal, press(KeyCode::Tab));
        state.handle_key(&mut journal, press(KeyCode::BackTab));

        assert_eq!(journal.answer(), "a\nb");
        assert_eq!(state.cursor, 3);
    }

    #[test]
    fn enter_skips_typing_delay() {
        let mut journal = Journal::new(JournalOptions::default());
        let mut state = UiState::new(settings(Exporter::default()));
        state.handle_key(&mut journal, press(KeyCode::Enter));
        assert!(!journal.walker().unwrap().is_ready());

        type_text(&mut state, &mut journal, "x");
        assert_eq!(journal.answer(), "");

        state.handle_key(&mut journal, press(KeyCode::Enter));
        assert!(journal.walker().unwrap().is_ready());
    }

    #[test]
    fn esc_and_ctrl_c_cancel_the_journey() {
        let mut journal = Journal::default();
        let mut state = UiState::new(settings(Exporter::default()));
        assert_eq!(state.handle_key(&mut journal, press(KeyCode::Esc)), Flow::Cancel);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(&mut journal, ctrl_c), Flow::Cancel);
    }

    #[test]
    fn summary_restart_and_quit() {
        let mut journal = finished_journal();
        let mut state = UiState::new(settings(Exporter::default()));
        state.scroll = 5;

        state.handle_key(&mut journal, press(KeyCode::Char('r')));
        assert_eq!(journal.cursor(), Cursor::Intro);
        assert!(journal.session().is_empty());
        assert_eq!(state.scroll, 0);

        let mut journal = finished_journal();
        assert_eq!(
            state.handle_key(&mut journal, press(KeyCode::Char('q'))),
            Flow::Quit
        );
    }

    #[test]
    fn text_and_html_exports_report_success() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = finished_journal();
        let mut state = UiState::new(settings(Exporter::new(dir.path())));
        state.date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        state.handle_key(&mut journal, press(KeyCode::Char('t')));
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Success);
        state.handle_key(&mut journal, press(KeyCode::Char('h')));
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Success);

        assert!(dir.path().join("dream-mate-journal-2026-10-18.txt").exists());
        assert!(dir.path().join("dream-mate-journal-2026-10-18.html").exists());
        assert!(!state.is_exporting());
    }

    #[test]
    fn image_export_without_capture_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = finished_journal();
        let mut state = UiState::new(settings(Exporter::new(dir.path())));

        state.handle_key(&mut journal, press(KeyCode::Char('i')));
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Error);
        assert!(!state.is_exporting());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn image_export_runs_once_at_a_time() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = finished_journal();
        let mut settings = settings(Exporter::new(dir.path()));
        settings.capture = Some(Arc::new(EchoCapture));
        let mut state = UiState::new(settings);
        state.date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

        state.handle_key(&mut journal, press(KeyCode::Char('i')));
        assert!(state.is_exporting());
        state.handle_key(&mut journal, press(KeyCode::Char('t')));
        assert_eq!(state.notice().unwrap().message, "Export already in progress");

        wait_for_export(&mut state);
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Success);
        let written =
            std::fs::read_to_string(dir.path().join("dream-mate-journal-2026-10-18.jpg")).unwrap();
        assert!(written.contains("Dream Journey"));
    }

    struct PanickingCapture;

    impl RasterCapture for PanickingCapture {
        fn capture(
            &self,
            _region: &CaptureRegion,
            _options: &CaptureOptions,
        ) -> Result<Vec<u8>, CaptureError> {
            panic!("encoder blew up");
        }
    }

    #[test]
    fn crashed_image_worker_is_reported_as_capture_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut journal = finished_journal();
        let mut settings = settings(Exporter::new(dir.path()));
        settings.capture = Some(Arc::new(PanickingCapture));
        let mut state = UiState::new(settings);

        state.handle_key(&mut journal, press(KeyCode::Char('i')));
        wait_for_export(&mut state);

        let notice = state.notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.contains("Capture failed"), "{}", notice.message);
        assert!(!notice.message.contains("not on screen"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        // The gate is open again.
        state.handle_key(&mut journal, press(KeyCode::Char('t')));
        assert_eq!(state.notice().unwrap().level, NoticeLevel::Success);
    }

    #[test]
    fn notices_expire() {
        let mut state = UiState::new(settings(Exporter::default()));
        state.set_notice(Notice::info("hello"));
        state.expire_notice(Instant::now());
        assert!(state.notice().is_some());
        state.expire_notice(Instant::now() + Duration::from_secs(5));
        assert!(state.notice().is_none());
    }
}
