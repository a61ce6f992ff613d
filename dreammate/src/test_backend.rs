//! Scripted backend for driving a journal without user interaction.
//!
//! `ScriptedBackend` plays a fixed list of steps against a journal. It skips
//! the typing delay and stops once the summary is reached.
//!
//! # Example
//!
//! ```rust
//! use dreammate::{Journal, JournalOptions, ScriptedBackend, SectionKey};
//!
//! let mut journal = Journal::new(JournalOptions::default());
//! journal
//!     .run(ScriptedBackend::new().with_answers((0..12).map(|i| format!("answer {i}"))))
//!     .unwrap();
//!
//! assert!(journal.session().is_complete());
//! assert_eq!(journal.session().answers(SectionKey::Letter), ["answer 11"]);
//! ```

use dreammate_types::SectionKey;

use crate::journal::Progress;
use crate::router::Cursor;
use crate::session::CommitError;
use crate::walker::WalkError;
use crate::{Journal, JournalBackend};

/// One scripted user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// Type this text into the current prompt and advance.
    Answer(String),
    /// Go back one prompt.
    Back,
}

/// A backend that replays pre-configured steps.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBackend {
    steps: Vec<ScriptStep>,
}

/// Error type for ScriptedBackend.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("Journal must be on the intro screen to start")]
    NotAtIntro,

    #[error("Script ran out at prompt {index} of section '{section}'")]
    MissingAnswer { section: SectionKey, index: usize },

    #[error("Answer for prompt {index} of section '{section}' did not advance")]
    Blocked { section: SectionKey, index: usize },

    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error(transparent)]
    Commit(#[from] CommitError),
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_answer(mut self, text: impl Into<String>) -> Self {
        self.steps.push(ScriptStep::Answer(text.into()));
        self
    }

    pub fn with_answers<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps
            .extend(answers.into_iter().map(|a| ScriptStep::Answer(a.into())));
        self
    }

    pub fn with_back(mut self) -> Self {
        self.steps.push(ScriptStep::Back);
        self
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }
}

impl JournalBackend for ScriptedBackend {
    type Error = ScriptError;

    fn run(&self, journal: &mut Journal) -> Result<(), Self::Error> {
        if !journal.begin() {
            return Err(ScriptError::NotAtIntro);
        }

        let mut steps = self.steps.iter();
        while journal.cursor() != Cursor::Summary {
            journal.reveal_now();
            let (section, index) = journal
                .walker()
                .map(|w| (w.section().key, w.index()))
                .unwrap_or((SectionKey::Dream, 0));

            match steps.next() {
                None => return Err(ScriptError::MissingAnswer { section, index }),
                Some(ScriptStep::Back) => {
                    journal.back();
                }
                Some(ScriptStep::Answer(text)) => {
                    journal.set_answer(text.as_str())?;
                    if journal.advance()? == Progress::Blocked {
                        return Err(ScriptError::Blocked { section, index });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::JournalOptions;

    #[test]
    fn short_script_reports_missing_answer() {
        let mut journal = Journal::new(JournalOptions::default());
        let err = ScriptedBackend::new()
            .with_answer("only one")
            .run(&mut journal)
            .unwrap_err();
        assert!(matches!(
            err,
            ScriptError::MissingAnswer {
                section: SectionKey::Dream,
                index: 1
            }
        ));
    }

    #[test]
    fn blank_answer_is_blocked() {
        let mut journal = Journal::new(JournalOptions::default());
        let err = ScriptedBackend::new()
            .with_answer("  ")
            .run(&mut journal)
            .unwrap_err();
        assert!(matches!(err, ScriptError::Blocked { index: 0, .. }));
    }

    #[test]
    fn refuses_to_start_twice() {
        let mut journal = Journal::new(JournalOptions::default());
        journal.begin();
        let err = ScriptedBackend::new().run(&mut journal).unwrap_err();
        assert!(matches!(err, ScriptError::NotAtIntro));
    }
}
