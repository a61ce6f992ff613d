//! # dreammate-html-card
//!
//! Renders a `SummaryCard` as a standalone HTML page, so the card can be
//! opened in a browser and printed or shared.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use dreammate::{Session, SummaryCard};
//! use dreammate_html_card::{HtmlOptions, to_html};
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let card = SummaryCard::new(&Session::new(), date);
//! let html = to_html(&card, &HtmlOptions::new());
//! assert!(html.contains("Sunday, October 18, 2026"));
//! ```

mod generator;

pub use generator::{HtmlOptions, export_html, to_html};
