//! Core types for the Dream Mate journal.
//!
//! This crate provides the foundational, presentation-agnostic types:
//! - `Section` and `SectionKey` - The six fixed journal sections and their prompts
//! - `SECTIONS` - The compiled-in section catalog
//! - `CaptureRegion` and `CaptureOptions` - What gets rasterized for image exports
//! - `RasterCapture` trait - The injected "capture region as image" capability

mod section;
pub use section::{Section, SectionKey};

mod catalog;
pub use catalog::{SECTIONS, TOTAL_PROMPTS, section};

mod capture;
pub use capture::{CaptureOptions, CaptureRegion, GridCell, ImageFormat, RasterCapture, Rgb};

mod error;
pub use error::{CaptureError, ParseColorError};
