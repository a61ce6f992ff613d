//! # dreammate-ratatui
//!
//! Full-screen terminal frontend for Dream Mate, built on ratatui and
//! crossterm.
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use dreammate::{Exporter, Journal, JournalOptions};
//! use dreammate_raster::GlyphRasterizer;
//! use dreammate_ratatui::RatatuiBackend;
//!
//! let backend = RatatuiBackend::new()
//!     .with_exporter(Exporter::new("."))
//!     .with_capture(Arc::new(GlyphRasterizer::new()));
//! Journal::new(JournalOptions::default()).run(backend)?;
//! ```
//!
//! ## Keys
//!
//! - intro: `Enter` begins, `Esc` quits
//! - while Dream Mate is typing: `Enter` skips the delay
//! - answering: type freely, `Enter` for a new line, `Tab` continues,
//!   `Shift+Tab` goes back, `Esc` quits
//! - summary: `t` text, `i` image, `h` HTML, `r` start again, `q` quit,
//!   arrows scroll the card

mod backend;
mod capture;
mod state;
mod view;

pub use backend::{RatatuiBackend, RatatuiError, Theme};
pub use capture::{buffer_to_region, card_region};
pub use view::SummaryCardWidget;
