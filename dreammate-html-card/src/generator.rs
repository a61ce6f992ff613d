//! HTML card generator implementation.

use std::path::PathBuf;

use chrono::NaiveDate;
use dreammate::{ArtifactKind, ExportError, Exporter, Highlight, Session, SummaryCard};

/// Options for HTML generation.
#[derive(Debug, Clone, Default)]
pub struct HtmlOptions {
    /// Title for the HTML document. Falls back to the card heading.
    pub title: Option<String>,
    /// Whether to include default CSS styling.
    pub include_styles: bool,
    /// Whether to generate a complete HTML document (with html/head/body tags).
    pub full_document: bool,
    /// Custom CSS class prefix for all generated elements.
    pub class_prefix: String,
}

impl HtmlOptions {
    /// Create new options with default values.
    pub fn new() -> Self {
        Self {
            title: None,
            include_styles: true,
            full_document: true,
            class_prefix: "dream".to_string(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enable or disable default CSS styling.
    pub fn with_styles(mut self, include: bool) -> Self {
        self.include_styles = include;
        self
    }

    /// Generate a complete HTML document or just the card fragment.
    pub fn full_document(mut self, full: bool) -> Self {
        self.full_document = full;
        self
    }

    /// Set a custom CSS class prefix.
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = prefix.into();
        self
    }
}

/// Render the summary card as HTML.
pub fn to_html(card: &SummaryCard, options: &HtmlOptions) -> String {
    let mut html = String::new();
    let prefix = &options.class_prefix;
    let title = options.title.as_deref().unwrap_or(card.heading);

    if options.full_document {
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("  <meta charset=\"UTF-8\">\n");
        html.push_str(
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str(&format!("  <title>{}</title>\n", escape_html(title)));

        if options.include_styles {
            html.push_str(&generate_styles(prefix));
        }

        html.push_str("</head>\n<body>\n");
    }

    html.push_str(&format!("<main class=\"{prefix}-summary\">\n"));
    html.push_str(&format!(
        "  <h1 class=\"{prefix}-heading\">{}</h1>\n",
        escape_html(card.heading)
    ));
    html.push_str(&format!(
        "  <p class=\"{prefix}-tagline\">{}</p>\n",
        escape_html(card.tagline)
    ));

    html.push_str(&format!("  <article class=\"{prefix}-card\">\n"));
    html.push_str(&format!(
        "    <h2 class=\"{prefix}-title\">{}</h2>\n",
        escape_html(card.title)
    ));
    html.push_str(&format!(
        "    <p class=\"{prefix}-date\">{}</p>\n",
        escape_html(&card.date_line)
    ));

    html.push_str(&format!("    <div class=\"{prefix}-highlights\">\n"));
    for highlight in &card.highlights {
        html.push_str(&generate_highlight(highlight, prefix, "highlight"));
    }
    html.push_str("    </div>\n");

    html.push_str(&generate_highlight(&card.letter, prefix, "letter"));
    html.push_str("  </article>\n");

    html.push_str(&format!(
        "  <p class=\"{prefix}-closing\">{}</p>\n",
        escape_html(card.closing)
    ));
    html.push_str("</main>\n");

    if options.full_document {
        html.push_str("</body>\n</html>\n");
    }

    html
}

/// Render the session's card and save it next to the other artifacts.
pub fn export_html(
    exporter: &Exporter,
    session: &Session,
    options: &HtmlOptions,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    Exporter::ensure_complete(session)?;
    let card = SummaryCard::new(session, date);
    let html = to_html(&card, options);
    exporter.save(ArtifactKind::Html, html.as_bytes(), date)
}

fn generate_highlight(highlight: &Highlight, prefix: &str, class: &str) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "      <section class=\"{prefix}-{class}\" data-section=\"{}\">\n",
        highlight.key.as_str()
    ));
    html.push_str(&format!(
        "        <h3><span class=\"{prefix}-emoji\">{}</span> {}</h3>\n",
        highlight.emoji,
        escape_html(highlight.label)
    ));
    html.push_str(&format!(
        "        <p>{}</p>\n",
        escape_html(&highlight.preview)
    ));
    html.push_str("      </section>\n");
    html
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Generate default CSS styles.
fn generate_styles(prefix: &str) -> String {
    format!(
        r#"  <style>
    body {{
      margin: 0;
      background: #fdf6ff;
      font-family: Georgia, serif;
      color: #3b2a4a;
    }}
    .{prefix}-summary {{
      max-width: 640px;
      margin: 2rem auto;
      padding: 1rem;
      text-align: center;
    }}
    .{prefix}-tagline, .{prefix}-closing {{
      color: #7a6a8a;
    }}
    .{prefix}-card {{
      margin: 1.5rem 0;
      padding: 1.5rem;
      text-align: left;
      background: #ffffff;
      border-radius: 16px;
      box-shadow: 0 4px 24px rgba(120, 80, 160, 0.15);
    }}
    .{prefix}-title, .{prefix}-date {{
      text-align: center;
      margin: 0.25rem 0;
    }}
    .{prefix}-highlight, .{prefix}-letter {{
      margin: 1rem 0;
    }}
    .{prefix}-highlight h3, .{prefix}-letter h3 {{
      margin-bottom: 0.25rem;
      font-size: 1rem;
    }}
    .{prefix}-highlight p, .{prefix}-letter p {{
      margin: 0;
      white-space: pre-wrap;
    }}
    .{prefix}-letter {{
      padding-top: 1rem;
      border-top: 1px solid #e6d8f0;
      font-style: italic;
    }}
  </style>
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreammate::{Journal, JournalOptions, ScriptedBackend, TOTAL_PROMPTS};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn finished_session() -> Session {
        let mut journal = Journal::new(JournalOptions::default());
        journal
            .run(ScriptedBackend::new().with_answers(
                (0..TOTAL_PROMPTS).map(|i| format!("<b>answer {i}</b> & more")),
            ))
            .unwrap();
        journal.session().clone()
    }

    #[test]
    fn html_options_chaining() {
        let options = HtmlOptions::new()
            .with_title("My Card")
            .with_styles(false)
            .full_document(false)
            .with_class_prefix("card");

        assert_eq!(options.title, Some("My Card".to_string()));
        assert!(!options.include_styles);
        assert!(!options.full_document);
        assert_eq!(options.class_prefix, "card");
    }

    #[test]
    fn full_document_wraps_card() {
        let card = SummaryCard::new(&finished_session(), date());
        let html = to_html(&card, &HtmlOptions::new());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Your Dream ID Card</title>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("Sunday, October 18, 2026"));
        assert_eq!(html.matches("class=\"dream-highlight\"").count(), 5);
        assert_eq!(html.matches("class=\"dream-letter\"").count(), 1);
        assert!(html.ends_with("</html>\n"));
    }

    #[test]
    fn fragment_has_no_document_shell() {
        let card = SummaryCard::new(&Session::new(), date());
        let html = to_html(&card, &HtmlOptions::new().full_document(false));
        assert!(html.starts_with("<main class=\"dream-summary\">"));
        assert!(!html.contains("<head>"));
    }

    #[test]
    fn answers_are_escaped() {
        let card = SummaryCard::new(&finished_session(), date());
        let html = to_html(&card, &HtmlOptions::new());
        assert!(html.contains("&lt;b&gt;answer 0&lt;/b&gt; &amp; more"));
        assert!(!html.contains("<b>answer"));
    }

    #[test]
    fn export_writes_dated_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let path = export_html(&exporter, &finished_session(), &HtmlOptions::new(), date()).unwrap();
        assert_eq!(
            path.file_name().unwrap(),
            "dream-mate-journal-2026-10-18.html"
        );
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("Your Letter"));
    }

    #[test]
    fn unfinished_session_is_not_exported() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = Exporter::new(dir.path());
        let err = export_html(&exporter, &Session::new(), &HtmlOptions::new(), date()).unwrap_err();
        assert!(matches!(err, ExportError::Incomplete { .. }));
    }
}
