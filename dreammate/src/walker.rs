//! Prompt-by-prompt walk through one section.

use dreammate_types::{Section, SectionKey};
use log::{debug, trace};

/// Identity of one prompt presentation.
///
/// A ticket is issued every time a prompt starts "typing". Only the ticket of
/// the current presentation can reveal the prompt; any other ticket is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypingTicket {
    section: SectionKey,
    prompt: usize,
    generation: u64,
}

impl TypingTicket {
    pub fn section(&self) -> SectionKey {
        self.section
    }

    pub fn prompt(&self) -> usize {
        self.prompt
    }
}

/// Where the walker is within the current prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptPhase {
    /// "Dream Mate is typing"; input is not accepted yet.
    Presenting(TypingTicket),
    /// Prompt is visible and accepts input.
    Ready,
    /// The last prompt was answered; answers were handed out.
    Complete,
}

/// Progress indicator for one prompt of the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressDot {
    Done,
    Current,
    Upcoming,
}

/// Result of `PromptWalker::advance`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Current answer is blank or the prompt is not ready.
    Blocked,
    /// Moved to the next prompt, which is now typing.
    Presenting(TypingTicket),
    /// The section is finished; answers are in prompt order.
    Complete(Vec<String>),
}

/// Error type for input the walker cannot take.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WalkError {
    #[error("Prompt {index} of section '{key}' is still being typed")]
    NotReady { key: SectionKey, index: usize },

    #[error("Section '{0}' is already complete")]
    Complete(SectionKey),

    #[error("No section is on screen")]
    NoSection,
}

/// State machine for one section activation.
#[derive(Debug, Clone)]
pub struct PromptWalker {
    section: &'static Section,
    index: usize,
    phase: PromptPhase,
    buffer: Vec<String>,
    /// Increases on every presentation, across activations.
    generation: u64,
}

impl PromptWalker {
    /// Create a walker already presenting the first prompt of `section`.
    pub fn new(section: &'static Section) -> Self {
        let mut walker = Self {
            section,
            index: 0,
            phase: PromptPhase::Complete,
            buffer: Vec::new(),
            generation: 0,
        };
        walker.activate(section);
        walker
    }

    /// Start a section afresh: empty buffer, first prompt, new typing ticket.
    pub fn activate(&mut self, section: &'static Section) -> TypingTicket {
        self.section = section;
        self.index = 0;
        self.buffer = vec![String::new(); section.prompt_count()];
        debug!("activated section {}", section.key);
        self.present()
    }

    fn present(&mut self) -> TypingTicket {
        self.generation += 1;
        let ticket = TypingTicket {
            section: self.section.key,
            prompt: self.index,
            generation: self.generation,
        };
        self.phase = PromptPhase::Presenting(ticket);
        trace!("presenting {}:{}", self.section.key, self.index);
        ticket
    }

    pub fn section(&self) -> &'static Section {
        self.section
    }

    /// Zero-based index of the current prompt.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn prompt(&self) -> &'static str {
        self.section.prompt(self.index).unwrap_or_default()
    }

    pub fn phase(&self) -> PromptPhase {
        self.phase
    }

    pub fn is_ready(&self) -> bool {
        self.phase == PromptPhase::Ready
    }

    pub fn is_complete(&self) -> bool {
        self.phase == PromptPhase::Complete
    }

    /// The ticket of the presentation in progress, if the prompt is typing.
    pub fn pending_ticket(&self) -> Option<TypingTicket> {
        match self.phase {
            PromptPhase::Presenting(ticket) => Some(ticket),
            PromptPhase::Ready | PromptPhase::Complete => None,
        }
    }

    /// The typing delay for `ticket` has elapsed.
    ///
    /// Returns whether the prompt was revealed. Stale tickets are ignored.
    pub fn typing_elapsed(&mut self, ticket: TypingTicket) -> bool {
        if self.pending_ticket() == Some(ticket) {
            self.phase = PromptPhase::Ready;
            true
        } else {
            trace!("ignored stale typing ticket {ticket:?}");
            false
        }
    }

    /// Skip the typing delay of the current prompt.
    pub fn reveal(&mut self) -> bool {
        match self.pending_ticket() {
            Some(ticket) => self.typing_elapsed(ticket),
            None => false,
        }
    }

    /// Buffered answer for the current prompt.
    pub fn answer(&self) -> &str {
        self.buffer.get(self.index).map_or("", String::as_str)
    }

    /// All buffered answers in prompt order.
    pub fn answers(&self) -> &[String] {
        &self.buffer
    }

    fn check_ready(&self) -> Result<(), WalkError> {
        match self.phase {
            PromptPhase::Ready => Ok(()),
            PromptPhase::Presenting(_) => Err(WalkError::NotReady {
                key: self.section.key,
                index: self.index,
            }),
            PromptPhase::Complete => Err(WalkError::Complete(self.section.key)),
        }
    }

    /// Edit the current answer in place.
    pub fn answer_mut(&mut self) -> Result<&mut String, WalkError> {
        self.check_ready()?;
        Ok(&mut self.buffer[self.index])
    }

    pub fn set_answer(&mut self, text: impl Into<String>) -> Result<(), WalkError> {
        *self.answer_mut()? = text.into();
        Ok(())
    }

    /// Advancing requires a visible prompt and a non-blank answer.
    pub fn can_advance(&self) -> bool {
        self.is_ready() && !self.answer().trim().is_empty()
    }

    pub fn advance(&mut self) -> Advance {
        if !self.can_advance() {
            return Advance::Blocked;
        }
        if self.section.is_last_prompt(self.index) {
            self.phase = PromptPhase::Complete;
            debug!("section {} complete", self.section.key);
            return Advance::Complete(self.buffer.clone());
        }
        self.index += 1;
        Advance::Presenting(self.present())
    }

    /// Back is possible from a visible prompt that has a predecessor.
    pub fn can_go_back(&self) -> bool {
        self.is_ready() && self.index > 0
    }

    /// Whether a frontend should show the back affordance at all.
    ///
    /// The first prompt of the first section has nothing behind it.
    pub fn shows_back(&self) -> bool {
        !(self.section.key.is_first() && self.index == 0)
    }

    /// Return to the previous prompt without replaying the typing delay.
    pub fn back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.index -= 1;
        self.phase = PromptPhase::Ready;
        true
    }

    /// One dot per prompt: answered, current, upcoming.
    pub fn progress(&self) -> Vec<ProgressDot> {
        (0..self.section.prompt_count())
            .map(|i| match i.cmp(&self.index) {
                std::cmp::Ordering::Less => ProgressDot::Done,
                std::cmp::Ordering::Equal => ProgressDot::Current,
                std::cmp::Ordering::Greater => ProgressDot::Upcoming,
            })
            .collect()
    }

    /// Label of the forward action for the current prompt.
    pub fn continue_label(&self) -> &'static str {
        if self.section.is_last_prompt(self.index) {
            "Next Section"
        } else {
            "Continue"
        }
    }
}
