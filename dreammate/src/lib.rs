//! # dreammate
//!
//! A guided journaling session: an intro, six sections of reflective prompts
//! revealed one at a time, and a summary that can be exported.
//!
//! The crate is frontend-agnostic. A `Journal` owns all state; frontends
//! implement `JournalBackend` and drive the journal through its methods.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use dreammate::{Journal, JournalOptions};
//! use dreammate_ratatui::RatatuiBackend;
//!
//! let mut journal = Journal::new(JournalOptions::default());
//! journal.run(RatatuiBackend::new())?;
//! ```
//!
//! ## Flow
//!
//! - `Journal::begin` leaves the intro and starts the DREAM section
//! - each prompt is "typed" for `JournalOptions::typing_delay`, then accepts input
//! - `Journal::advance` needs a non-blank answer; the last prompt of a section
//!   commits all of its answers at once
//! - after LETTER the summary is current; `Journal::restart` goes back to the intro
//!
//! ## Backends
//!
//! - `dreammate-ratatui` - full-screen TUI
//! - `dreammate-dialoguer` - plain terminal prompts
//! - `ScriptedBackend` - replays answers, for tests

// Re-export all types from dreammate-types
pub use dreammate_types::*;

mod backend;
pub use backend::JournalBackend;

pub mod export;
pub use export::{ArtifactKind, ExportError, ExportGate, Exporter, Notice, NoticeLevel};

mod journal;
pub use journal::{DEFAULT_TYPING_DELAY, Journal, JournalOptions, Progress};

pub mod router;
pub use router::{Cursor, Screen};

mod session;
pub use session::{CommitError, Session, SessionHolder};

pub mod summary;
pub use summary::{Highlight, SectionDigest, SummaryCard};

mod timer;
pub use timer::TypingTimer;

mod walker;
pub use walker::{Advance, PromptPhase, PromptWalker, ProgressDot, TypingTicket, WalkError};

pub mod wording;

// Scripted backend for driving journals without user interaction
mod test_backend;
pub use test_backend::{ScriptError, ScriptStep, ScriptedBackend};
