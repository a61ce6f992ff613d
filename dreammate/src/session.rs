use dreammate_types::SectionKey;
use log::{debug, info, warn};

use crate::router::{self, Cursor};

/// Rejected `commit_section` call.
///
/// These are precondition violations: frontends gate advancement so they
/// never reach the holder in normal operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommitError {
    #[error("Section '{key}' expects {expected} answers, got {actual}")]
    WrongLength {
        key: SectionKey,
        expected: usize,
        actual: usize,
    },

    #[error("Answer {index} of section '{key}' is blank")]
    BlankAnswer { key: SectionKey, index: usize },
}

/// Answers collected during one journaling pass.
///
/// Each section is either uncommitted (no answers) or committed with exactly
/// one answer per prompt. Only `SessionHolder` mutates a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    answers: [Vec<String>; 6],
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers for a section, empty while uncommitted.
    pub fn answers(&self, key: SectionKey) -> &[String] {
        &self.answers[key.index()]
    }

    pub fn is_committed(&self, key: SectionKey) -> bool {
        !self.answers[key.index()].is_empty()
    }

    /// Number of committed sections.
    pub fn committed_count(&self) -> usize {
        SectionKey::ALL
            .iter()
            .filter(|key| self.is_committed(**key))
            .count()
    }

    /// True once all six sections are committed.
    pub fn is_complete(&self) -> bool {
        self.committed_count() == SectionKey::ALL.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed_count() == 0
    }

    /// Iterate sections in journaling order with their answers.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKey, &[String])> {
        SectionKey::ALL
            .iter()
            .map(move |key| (*key, self.answers(*key)))
    }

    fn store(&mut self, key: SectionKey, answers: Vec<String>) {
        self.answers[key.index()] = answers;
    }

    fn clear(&mut self) {
        self.answers.iter_mut().for_each(Vec::clear);
    }
}

/// Owns the navigation cursor and the session.
///
/// This is the only place either is mutated; it is held by the journal
/// controller and handed to frontends by reference.
#[derive(Debug, Clone, Default)]
pub struct SessionHolder {
    cursor: Cursor,
    session: Session,
}

impl SessionHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Leave the intro: clear the session and move to the first section.
    pub fn start(&mut self) {
        self.session.clear();
        self.cursor = Cursor::Section(SectionKey::Dream);
        debug!("session started");
    }

    /// Store a finished section's answers, replacing any previous value.
    pub fn commit_section(
        &mut self,
        key: SectionKey,
        answers: Vec<String>,
    ) -> Result<(), CommitError> {
        let expected = key.section().prompt_count();
        if answers.len() != expected {
            warn!(
                "rejected commit for {key}: {} answers, expected {expected}",
                answers.len()
            );
            return Err(CommitError::WrongLength {
                key,
                expected,
                actual: answers.len(),
            });
        }
        if let Some(index) = answers.iter().position(|a| a.trim().is_empty()) {
            warn!("rejected commit for {key}: answer {index} is blank");
            return Err(CommitError::BlankAnswer { key, index });
        }

        self.session.store(key, answers);
        info!("committed section {key}");
        Ok(())
    }

    /// Move the cursor to the next screen.
    pub fn advance(&mut self) -> Cursor {
        self.cursor = router::following(self.cursor);
        debug!("cursor advanced to {:?}", self.cursor);
        self.cursor
    }

    /// Clear the session and go back to the intro.
    pub fn restart(&mut self) {
        self.session.clear();
        self.cursor = Cursor::Intro;
        debug!("session restarted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("answer {i}")).collect()
    }

    #[test]
    fn start_moves_to_first_section() {
        let mut holder = SessionHolder::new();
        assert_eq!(holder.cursor(), Cursor::Intro);
        holder.start();
        assert_eq!(holder.cursor(), Cursor::Section(SectionKey::Dream));
        assert!(holder.session().is_empty());
    }

    #[test]
    fn commit_rejects_wrong_length_for_every_section() {
        let mut holder = SessionHolder::new();
        for key in SectionKey::ALL {
            let count = key.section().prompt_count();
            for wrong in [count - 1, count + 1] {
                let err = holder.commit_section(key, answers(wrong)).unwrap_err();
                assert_eq!(
                    err,
                    CommitError::WrongLength {
                        key,
                        expected: count,
                        actual: wrong
                    }
                );
            }
            assert!(!holder.session().is_committed(key));
        }
    }

    #[test]
    fn commit_rejects_blank_answers() {
        let mut holder = SessionHolder::new();
        let err = holder
            .commit_section(
                SectionKey::Challenge,
                vec!["fine".to_string(), "  \n".to_string()],
            )
            .unwrap_err();
        assert_eq!(
            err,
            CommitError::BlankAnswer {
                key: SectionKey::Challenge,
                index: 1
            }
        );
    }

    #[test]
    fn commit_replaces_previous_value() {
        let mut holder = SessionHolder::new();
        holder
            .commit_section(SectionKey::Letter, vec!["first".to_string()])
            .unwrap();
        holder
            .commit_section(SectionKey::Letter, vec!["second".to_string()])
            .unwrap();
        assert_eq!(holder.session().answers(SectionKey::Letter), ["second"]);
        assert_eq!(holder.session().committed_count(), 1);
    }

    #[test]
    fn restart_is_idempotent() {
        let mut holder = SessionHolder::new();
        holder.start();
        holder
            .commit_section(SectionKey::Dream, answers(3))
            .unwrap();
        holder.restart();
        holder.restart();
        assert_eq!(holder.cursor(), Cursor::Intro);
        assert_eq!(holder.session(), &Session::new());
    }
}
