use std::time::{Duration, Instant};

use dreammate_types::{SECTIONS, SectionKey};
use log::{debug, info};

use crate::backend::JournalBackend;
use crate::router::{self, Cursor, Screen};
use crate::session::{CommitError, Session, SessionHolder};
use crate::timer::TypingTimer;
use crate::walker::{Advance, PromptWalker, TypingTicket, WalkError};

/// Default "Dream Mate is typing" delay.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(1500);

/// Tunables for a journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JournalOptions {
    /// Cosmetic delay before each prompt is revealed. Zero reveals at once.
    pub typing_delay: Duration,
}

impl Default for JournalOptions {
    fn default() -> Self {
        Self {
            typing_delay: DEFAULT_TYPING_DELAY,
        }
    }
}

impl JournalOptions {
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }
}

/// Outcome of `Journal::advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Nothing happened: blank answer, prompt still typing, or not on a section.
    Blocked,
    /// Next prompt of the same section.
    NextPrompt,
    /// The section was committed and the next one started.
    NextSection(SectionKey),
    /// The last section was committed; the summary is current.
    Finished,
}

/// Top-level controller for one journaling pass.
///
/// Owns the session holder, the prompt walker and the typing timer. Frontends
/// receive it by mutable reference and drive it through the methods below.
#[derive(Debug, Clone)]
pub struct Journal {
    holder: SessionHolder,
    walker: PromptWalker,
    timer: TypingTimer,
}

impl Default for Journal {
    fn default() -> Self {
        Self::new(JournalOptions::default())
    }
}

impl Journal {
    pub fn new(options: JournalOptions) -> Self {
        Self {
            holder: SessionHolder::new(),
            walker: PromptWalker::new(&SECTIONS[0]),
            timer: TypingTimer::new(options.typing_delay),
        }
    }

    /// Run the journal with the given frontend.
    pub fn run<B: JournalBackend>(&mut self, backend: B) -> Result<(), anyhow::Error> {
        backend.run(self).map_err(Into::into)
    }

    pub fn cursor(&self) -> Cursor {
        self.holder.cursor()
    }

    pub fn screen(&self) -> Screen {
        router::route(self.cursor())
    }

    pub fn session(&self) -> &Session {
        self.holder.session()
    }

    pub fn typing_delay(&self) -> Duration {
        self.timer.delay()
    }

    /// The walker of the section on screen, if a section is on screen.
    pub fn walker(&self) -> Option<&PromptWalker> {
        self.cursor().section().map(|_| &self.walker)
    }

    /// Leave the intro and present the first prompt.
    ///
    /// Returns false when the intro is not on screen.
    pub fn begin(&mut self) -> bool {
        if self.cursor() != Cursor::Intro {
            return false;
        }
        self.holder.start();
        let ticket = self.walker.activate(SectionKey::Dream.section());
        self.schedule(ticket);
        info!("journey started");
        true
    }

    fn schedule(&mut self, ticket: TypingTicket) {
        if self.timer.delay().is_zero() {
            self.timer.cancel();
            self.walker.typing_elapsed(ticket);
        } else {
            self.timer.schedule(ticket, Instant::now());
        }
    }

    /// Fire the typing timer if it is due. Returns whether a prompt was revealed.
    pub fn poll_typing(&mut self, now: Instant) -> bool {
        match self.timer.due(now) {
            Some(ticket) => self.walker.typing_elapsed(ticket),
            None => false,
        }
    }

    /// How long until the pending prompt is revealed.
    pub fn typing_remaining(&self, now: Instant) -> Option<Duration> {
        self.timer.remaining(now)
    }

    /// Reveal the current prompt without waiting.
    pub fn reveal_now(&mut self) -> bool {
        if self.cursor().section().is_none() {
            return false;
        }
        self.timer.cancel();
        self.walker.reveal()
    }

    pub fn answer(&self) -> &str {
        self.walker().map_or("", PromptWalker::answer)
    }

    /// Edit the current answer in place.
    pub fn edit_answer(&mut self) -> Result<&mut String, WalkError> {
        self.on_screen_walker()?.answer_mut()
    }

    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), WalkError> {
        self.on_screen_walker()?.set_answer(text)
    }

    fn on_screen_walker(&mut self) -> Result<&mut PromptWalker, WalkError> {
        match self.cursor().section() {
            Some(_) => Ok(&mut self.walker),
            None => Err(WalkError::NoSection),
        }
    }

    pub fn can_advance(&self) -> bool {
        self.walker().is_some_and(PromptWalker::can_advance)
    }

    /// Move forward: next prompt, next section, or the summary.
    pub fn advance(&mut self) -> Result<Progress, CommitError> {
        let Some(key) = self.cursor().section() else {
            return Ok(Progress::Blocked);
        };

        match self.walker.advance() {
            Advance::Blocked => Ok(Progress::Blocked),
            Advance::Presenting(ticket) => {
                self.schedule(ticket);
                Ok(Progress::NextPrompt)
            }
            Advance::Complete(answers) => {
                self.holder.commit_section(key, answers)?;
                match self.holder.advance() {
                    Cursor::Section(next) => {
                        let ticket = self.walker.activate(next.section());
                        self.schedule(ticket);
                        Ok(Progress::NextSection(next))
                    }
                    Cursor::Summary | Cursor::Intro => {
                        self.timer.cancel();
                        info!("journey finished");
                        Ok(Progress::Finished)
                    }
                }
            }
        }
    }

    /// Go to the previous prompt of the current section.
    pub fn back(&mut self) -> bool {
        if self.cursor().section().is_none() {
            return false;
        }
        let moved = self.walker.back();
        if moved {
            debug!("back to prompt {}", self.walker.index());
        }
        moved
    }

    /// Clear everything and return to the intro.
    pub fn restart(&mut self) {
        self.timer.cancel();
        self.holder.restart();
        info!("journey restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_journal() -> Journal {
        Journal::new(JournalOptions::default().with_typing_delay(Duration::ZERO))
    }

    #[test]
    fn begin_only_from_intro() {
        let mut journal = instant_journal();
        assert!(journal.walker().is_none());
        assert!(journal.begin());
        assert!(!journal.begin());
        assert_eq!(journal.cursor(), Cursor::Section(SectionKey::Dream));
    }

    #[test]
    fn zero_delay_reveals_immediately() {
        let mut journal = instant_journal();
        journal.begin();
        assert!(journal.walker().unwrap().is_ready());
        assert!(journal.typing_remaining(Instant::now()).is_none());
    }

    #[test]
    fn typing_delay_gates_input_until_polled() {
        let mut journal = Journal::default();
        journal.begin();
        assert!(journal.set_answer("too soon").is_err());

        let now = Instant::now();
        assert!(journal.typing_remaining(now).is_some());
        assert!(journal.poll_typing(now + DEFAULT_TYPING_DELAY));
        journal.set_answer("now").unwrap();
        assert!(journal.can_advance());
    }

    #[test]
    fn answers_are_refused_off_section() {
        let mut journal = instant_journal();
        assert_eq!(journal.set_answer("early"), Err(WalkError::NoSection));

        journal.begin();
        journal.set_answer("kept").unwrap();
        journal.restart();

        assert_eq!(journal.set_answer("late"), Err(WalkError::NoSection));
        assert!(journal.edit_answer().is_err());
        assert_eq!(journal.walker.answer(), "kept");
        assert_eq!(journal.answer(), "");
    }

    #[test]
    fn advance_off_section_is_blocked() {
        let mut journal = instant_journal();
        assert_eq!(journal.advance(), Ok(Progress::Blocked));
        assert!(!journal.back());
        assert!(!journal.reveal_now());
    }

    #[test]
    fn completing_a_section_commits_and_moves_on() {
        let mut journal = instant_journal();
        journal.begin();
        for (i, text) in ["a", "b", "c"].into_iter().enumerate() {
            journal.set_answer(text).unwrap();
            let progress = journal.advance().unwrap();
            if i < 2 {
                assert_eq!(progress, Progress::NextPrompt);
            } else {
                assert_eq!(progress, Progress::NextSection(SectionKey::Challenge));
            }
        }
        assert_eq!(journal.session().answers(SectionKey::Dream), ["a", "b", "c"]);
        assert!(!journal.session().is_committed(SectionKey::Challenge));
        assert_eq!(journal.answer(), "");
    }

    #[test]
    fn skipping_typing_leaves_no_stale_reveal() {
        let mut journal = Journal::default();
        journal.begin();
        let start = Instant::now();

        assert!(journal.reveal_now());
        journal.set_answer("fine").unwrap();
        assert_eq!(journal.advance(), Ok(Progress::NextPrompt));

        // The second prompt's own timer is the only one pending.
        assert!(!journal.walker().unwrap().is_ready());
        let remaining = journal.typing_remaining(start).unwrap();
        assert!(remaining > Duration::ZERO);
    }
}
