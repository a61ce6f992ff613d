//! The finished journal as a text document and as a summary card.

use chrono::NaiveDate;
use dreammate_types::SectionKey;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::session::Session;

pub const CARD_HEADING: &str = "Your Dream ID Card";
pub const CARD_TAGLINE: &str = "A beautiful summary of your journey today";
pub const CARD_TITLE: &str = "Dream Journey";
pub const CARD_CLOSING: &str = "Thank you for taking this journey with Dream Mate";

const TEXT_HEADER: &str = "DREAM MATE JOURNAL";
const TEXT_FOOTER: &str = "Created with Dream Mate";

/// One section's title and answers, the input of the text artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDigest {
    pub key: SectionKey,
    pub title: &'static str,
    pub answers: Vec<String>,
}

/// Group a session's answers by section heading, in journaling order.
pub fn digest(session: &Session) -> Vec<SectionDigest> {
    session
        .iter()
        .map(|(key, answers)| SectionDigest {
            key,
            title: key.section().title,
            answers: answers.to_vec(),
        })
        .collect()
}

/// Flatten digests into the plain-text journal.
pub fn render_text(digests: &[SectionDigest]) -> String {
    let mut text = String::new();
    text.push_str(TEXT_HEADER);
    text.push_str("\n\n");
    for section in digests {
        text.push_str(&format!(
            "{}:\n{}\n\n",
            section.title,
            section.answers.join("\n\n")
        ));
    }
    text.push_str(TEXT_FOOTER);
    text
}

/// Cut joined answers to `limit` characters, marking the cut with an ellipsis.
pub fn preview(answers: &[String], limit: usize) -> String {
    let joined = answers.join(" ");
    if joined.chars().count() <= limit {
        return joined;
    }
    let cut: String = joined.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}

/// One labelled preview on the summary card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    pub key: SectionKey,
    pub emoji: &'static str,
    pub label: &'static str,
    pub preview: String,
}

/// Presentation model of the summary screen.
///
/// Frontends render this; the image and HTML exports render the same model,
/// so every artifact shows the same content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryCard {
    pub heading: &'static str,
    pub tagline: &'static str,
    pub title: &'static str,
    /// e.g. "Sunday, October 18, 2026"
    pub date_line: String,
    /// Dream through Declaration.
    pub highlights: Vec<Highlight>,
    pub letter: Highlight,
    pub closing: &'static str,
}

impl SummaryCard {
    pub fn new(session: &Session, date: NaiveDate) -> Self {
        let highlight = |key: SectionKey| {
            let section = key.section();
            Highlight {
                key,
                emoji: section.emoji,
                label: section.summary_label,
                preview: preview(session.answers(key), section.preview_chars),
            }
        };

        Self {
            heading: CARD_HEADING,
            tagline: CARD_TAGLINE,
            title: CARD_TITLE,
            date_line: date.format("%A, %B %-d, %Y").to_string(),
            highlights: SectionKey::ALL
                .iter()
                .filter(|key| !key.is_last())
                .map(|key| highlight(*key))
                .collect(),
            letter: highlight(SectionKey::Letter),
            closing: CARD_CLOSING,
        }
    }

    /// Plain lines of the card, wrapped to `width` columns.
    pub fn lines(&self, width: usize) -> Vec<String> {
        let rule = "─".repeat(width);
        let mut lines = vec![
            center(self.title, width),
            center(&self.date_line, width),
            rule.clone(),
        ];
        for highlight in &self.highlights {
            lines.push(format!("{} {}", highlight.emoji, highlight.label));
            lines.extend(wrap(&highlight.preview, width));
            lines.push(String::new());
        }
        lines.push(rule);
        lines.push(format!("{} {}", self.letter.emoji, self.letter.label));
        lines.extend(wrap(&self.letter.preview, width));
        lines
    }
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.width()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Greedy word wrap on display columns.
///
/// Words wider than `width` are split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut used = 0;
        for word in paragraph.split_whitespace() {
            let gap = usize::from(!line.is_empty());
            let word_width = word.width();
            if used + gap + word_width <= width {
                if gap == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                used += gap + word_width;
                continue;
            }
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            for ch in word.chars() {
                let ch_width = ch.width().unwrap_or(0);
                if used + ch_width > width && !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                    used = 0;
                }
                line.push(ch);
                used += ch_width;
            }
        }
        lines.push(line);
    }
    lines
}
