//! # dreammate-dialoguer
//!
//! Plain terminal frontend for Dream Mate.
//!
//! Prompts are asked one at a time with `dialoguer`. After the typing pause
//! each prompt takes a single line; `:edit` opens `$EDITOR` for a longer
//! entry and `:back` returns to the previous prompt of the section.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dreammate::{Exporter, Journal, JournalOptions};
//! use dreammate_dialoguer::DialoguerBackend;
//!
//! fn main() -> anyhow::Result<()> {
//!     let backend = DialoguerBackend::new().with_exporter(Exporter::new("."));
//!     Journal::new(JournalOptions::default()).run(backend)?;
//!     Ok(())
//! }
//! ```

mod backend;

pub use backend::{DialoguerBackend, DialoguerError};
