//! Drawing the intro, prompt and summary screens.

use dreammate::{
    Journal, NoticeLevel, ProgressDot, PromptWalker, Screen, Section, SummaryCard, summary,
    wording,
};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;

use crate::backend::Theme;
use crate::state::UiState;

pub(crate) fn draw(frame: &mut Frame, journal: &Journal, state: &UiState, theme: &Theme, title: &str) {
    match journal.screen() {
        Screen::Intro => draw_intro(frame, theme, title),
        Screen::Prompt(section) => {
            if let Some(walker) = journal.walker() {
                draw_prompt(frame, section, walker, state, theme);
            }
        }
        Screen::Summary => {
            let card = SummaryCard::new(journal.session(), state.date);
            draw_summary(frame, &card, state, theme);
        }
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_intro(frame: &mut Frame, theme: &Theme, title: &str) {
    let area = centered(frame.area(), 64, 14);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary))
        .title(format!(" {title} "))
        .title_alignment(Alignment::Center);

    let lines = vec![
        Line::default(),
        Line::styled(wording::INTRO_TITLE, Style::default().fg(theme.primary).bold()),
        Line::default(),
        Line::styled(wording::INTRO_TAGLINE, Style::default().fg(theme.text)),
        Line::default(),
        Line::styled(wording::INTRO_BLURB, Style::default().fg(theme.muted)),
        Line::default(),
        Line::from(vec![
            Span::styled("[ Enter ] ", Style::default().fg(theme.highlight)),
            Span::styled(wording::INTRO_ACTION, Style::default().fg(theme.secondary).bold()),
        ]),
        Line::default(),
        Line::styled(
            wording::INTRO_FOOTNOTE,
            Style::default().fg(theme.muted).italic(),
        ),
    ];

    let intro = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(intro, area);
}

fn draw_prompt(
    frame: &mut Frame,
    section: &Section,
    walker: &PromptWalker,
    state: &UiState,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(5), // Dream Mate's bubble
            Constraint::Min(5),    // Answer
            Constraint::Length(1), // Navigation
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    // Header
    let header_block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(theme.border));
    let step = Paragraph::new(Line::styled(
        format!("Step {} · {}", section.step(), section.title),
        Style::default().fg(theme.primary).bold(),
    ))
    .block(header_block.clone());
    let subtitle = Paragraph::new(Line::styled(
        section.subtitle,
        Style::default().fg(theme.muted),
    ))
    .alignment(Alignment::Right)
    .block(header_block);
    frame.render_widget(step, chunks[0]);
    frame.render_widget(subtitle, chunks[0]);

    // Bubble
    let bubble_block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.primary))
        .title(Span::styled(
            " ✨ Dream Mate ",
            Style::default().fg(theme.highlight),
        ));
    let bubble = if walker.is_ready() {
        Paragraph::new(walker.prompt()).style(Style::default().fg(theme.text))
    } else {
        Paragraph::new(format!("{} ...", wording::TYPING))
            .style(Style::default().fg(theme.muted).italic())
    };
    frame.render_widget(
        bubble.wrap(Wrap { trim: true }).block(bubble_block),
        chunks[1],
    );

    if walker.is_ready() {
        draw_answer(frame, walker.answer(), state.cursor, chunks[2], theme);
        draw_navigation(frame, walker, chunks[3], theme);
    }

    draw_notice(frame, state, chunks[4], theme);

    let help = if walker.is_ready() {
        "Enter new line · Tab continue · Shift+Tab back · Esc quit"
    } else {
        "Enter skip typing · Esc quit"
    };
    frame.render_widget(
        Paragraph::new(help)
            .style(Style::default().fg(theme.muted))
            .alignment(Alignment::Center),
        chunks[5],
    );
}

fn draw_answer(frame: &mut Frame, answer: &str, cursor: usize, area: Rect, theme: &Theme) {
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.secondary))
        .title(" Your journal ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if answer.is_empty() {
        frame.render_widget(
            Paragraph::new(wording::PLACEHOLDER)
                .style(Style::default().fg(theme.muted).italic())
                .wrap(Wrap { trim: true }),
            inner,
        );
        frame.set_cursor_position((inner.x, inner.y));
        return;
    }

    let (lines, (col, row)) = layout_input(answer, cursor, inner.width);
    let offset = row.saturating_sub(inner.height.saturating_sub(1));
    let visible: Vec<Line> = lines
        .into_iter()
        .skip(offset as usize)
        .map(Line::from)
        .collect();
    frame.render_widget(
        Paragraph::new(visible).style(Style::default().fg(theme.text)),
        inner,
    );
    frame.set_cursor_position((inner.x + col, inner.y + row - offset));
}

fn draw_navigation(frame: &mut Frame, walker: &PromptWalker, area: Rect, theme: &Theme) {
    let parts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Fill(1), Constraint::Fill(1)])
        .split(area);

    if walker.shows_back() {
        let style = if walker.can_go_back() {
            Style::default().fg(theme.secondary)
        } else {
            Style::default().fg(theme.muted)
        };
        frame.render_widget(Paragraph::new(wording::BACK).style(style), parts[0]);
    }

    let dots: Vec<Span> = walker
        .progress()
        .into_iter()
        .map(|dot| match dot {
            ProgressDot::Done => Span::styled("● ", Style::default().fg(theme.secondary)),
            ProgressDot::Current => Span::styled("● ", Style::default().fg(theme.primary).bold()),
            ProgressDot::Upcoming => Span::styled("○ ", Style::default().fg(theme.border)),
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        parts[1],
    );

    let style = if walker.can_advance() {
        Style::default().fg(theme.primary).bold()
    } else {
        Style::default().fg(theme.muted)
    };
    frame.render_widget(
        Paragraph::new(format!("{} →", walker.continue_label()))
            .style(style)
            .alignment(Alignment::Right),
        parts[2],
    );
}

fn draw_notice(frame: &mut Frame, state: &UiState, area: Rect, theme: &Theme) {
    let Some(notice) = state.notice() else {
        return;
    };
    let color = match notice.level {
        NoticeLevel::Info => theme.highlight,
        NoticeLevel::Success => theme.success,
        NoticeLevel::Error => theme.error,
    };
    frame.render_widget(
        Paragraph::new(notice.message.as_str())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_summary(frame: &mut Frame, card: &SummaryCard, state: &UiState, theme: &Theme) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Heading
            Constraint::Min(5),    // Card
            Constraint::Length(1), // Notice
            Constraint::Length(1), // Help
        ])
        .split(frame.area());

    let heading = Paragraph::new(vec![
        Line::styled(card.heading, Style::default().fg(theme.primary).bold()),
        Line::styled(card.tagline, Style::default().fg(theme.muted)),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    let card_area = centered(chunks[1], 72, chunks[1].height);
    frame.render_widget(
        SummaryCardWidget::new(card, theme).with_scroll(state.scroll),
        card_area,
    );

    draw_notice(frame, state, chunks[2], theme);

    let export_style = if state.is_exporting() {
        Style::default().fg(theme.muted)
    } else {
        Style::default().fg(theme.highlight)
    };
    let key_style = Style::default().fg(theme.highlight);
    let help = Line::from(vec![
        Span::styled("[t] save text  ", export_style),
        Span::styled("[i] save image  ", export_style),
        Span::styled("[h] save HTML  ", export_style),
        Span::styled("[r] start again  ", key_style),
        Span::styled("[q] quit  ", key_style),
        Span::styled("↑↓ scroll", Style::default().fg(theme.muted)),
    ]);
    frame.render_widget(
        Paragraph::new(help).alignment(Alignment::Center),
        chunks[3],
    );
}

/// Hard-wrap `text` at `width` columns and locate the cursor.
///
/// Returns the display lines and the cursor's `(column, row)`.
pub(crate) fn layout_input(text: &str, cursor: usize, width: u16) -> (Vec<String>, (u16, u16)) {
    let width = width.max(1) as usize;
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut col = 0;
    let mut position = None;

    for (i, ch) in text.chars().enumerate() {
        let ch_width = ch.width().unwrap_or(0);
        if ch != '\n' && col > 0 && col + ch_width > width {
            lines.push(std::mem::take(&mut line));
            col = 0;
        }
        if i == cursor {
            position = Some((col, lines.len()));
        }
        if ch == '\n' {
            lines.push(std::mem::take(&mut line));
            col = 0;
        } else {
            line.push(ch);
            col += ch_width;
        }
    }

    let (col, row) = match position {
        Some(position) => position,
        None if col >= width => {
            lines.push(std::mem::take(&mut line));
            (0, lines.len())
        }
        None => (col, lines.len()),
    };
    lines.push(line);
    (lines, (col as u16, row as u16))
}

/// The summary card: title, date, one highlight per section and the letter.
pub struct SummaryCardWidget<'a> {
    card: &'a SummaryCard,
    theme: &'a Theme,
    scroll: u16,
}

impl<'a> SummaryCardWidget<'a> {
    pub fn new(card: &'a SummaryCard, theme: &'a Theme) -> Self {
        Self {
            card,
            theme,
            scroll: 0,
        }
    }

    pub fn with_scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    /// Rows needed to show the whole card at `width`.
    pub fn height(&self, width: u16) -> u16 {
        let lines = self.lines(inner_width(width)).len() + 2;
        u16::try_from(lines).unwrap_or(u16::MAX)
    }

    fn lines(&self, width: u16) -> Vec<Line<'static>> {
        let theme = self.theme;
        let width = width.max(1) as usize;
        let rule = Line::styled("─".repeat(width), Style::default().fg(theme.border));
        let label = |emoji: &'static str, label: &'static str| {
            Line::from(vec![
                Span::raw(emoji),
                Span::raw(" "),
                Span::styled(label, Style::default().fg(theme.secondary).bold()),
            ])
        };

        let mut lines = vec![
            Line::styled(self.card.title, Style::default().fg(theme.primary).bold()).centered(),
            Line::styled(self.card.date_line.clone(), Style::default().fg(theme.muted)).centered(),
            rule.clone(),
        ];
        for highlight in &self.card.highlights {
            lines.push(label(highlight.emoji, highlight.label));
            lines.extend(
                summary::wrap(&highlight.preview, width)
                    .into_iter()
                    .map(|text| Line::styled(text, Style::default().fg(theme.text))),
            );
            lines.push(Line::default());
        }
        lines.push(rule);
        lines.push(label(self.card.letter.emoji, self.card.letter.label));
        lines.extend(summary::wrap(&self.card.letter.preview, width).into_iter().map(|text| {
            Line::styled(
                text,
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::ITALIC),
            )
        }));
        lines
    }
}

/// Text columns inside the border and padding.
fn inner_width(width: u16) -> u16 {
    width.saturating_sub(4)
}

impl Widget for SummaryCardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.border))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.lines(inner.width))
            .scroll((self.scroll, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dreammate::{JournalOptions, ScriptedBackend, TOTAL_PROMPTS};
    use ratatui::{Terminal, backend::TestBackend};

    use crate::RatatuiBackend;

    fn screen_text(journal: &Journal, state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal
            .draw(|frame| draw(frame, journal, state, &Theme::default(), "Dream Mate"))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    fn state() -> UiState {
        let mut state = UiState::new(RatatuiBackend::new().export_settings());
        state.date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        state
    }

    #[test]
    fn intro_invites_to_begin() {
        let text = screen_text(&Journal::default(), &state());
        assert!(text.contains("Begin My Journey"));
        assert!(text.contains("A Conversation to Discover Your Dream"));
    }

    #[test]
    fn typing_indicator_hides_answer() {
        let mut journal = Journal::default();
        journal.begin();
        let text = screen_text(&journal, &state());
        assert!(text.contains("Step 1 · DREAM"));
        assert!(text.contains("Dream Mate is typing"));
        assert!(!text.contains("Your journal"));
    }

    #[test]
    fn revealed_prompt_shows_answer_box() {
        let mut journal = Journal::default();
        journal.begin();
        journal.reveal_now();
        let text = screen_text(&journal, &state());
        assert!(text.contains("How does this space feel to you?"));
        assert!(text.contains("Write freely"));
        assert!(text.contains("Continue →"));
        assert!(!text.contains(wording::BACK));
    }

    #[test]
    fn later_prompt_offers_back() {
        let mut journal = Journal::new(JournalOptions::default().with_typing_delay(std::time::Duration::ZERO));
        journal.begin();
        journal.set_answer("fine").unwrap();
        journal.advance().unwrap();
        let text = screen_text(&journal, &state());
        assert!(text.contains(wording::BACK));
    }

    #[test]
    fn summary_shows_card_and_actions() {
        let mut journal = Journal::default();
        journal
            .run(ScriptedBackend::new().with_answers((0..TOTAL_PROMPTS).map(|i| format!("answer {i}"))))
            .unwrap();
        let text = screen_text(&journal, &state());
        assert!(text.contains("Your Dream ID Card"));
        assert!(text.contains("Sunday, October 18, 2026"));
        assert!(text.contains("[t] save text"));
    }

    #[test]
    fn input_layout_wraps_and_tracks_cursor() {
        let (lines, cursor) = layout_input("abcdef", 6, 4);
        assert_eq!(lines, vec!["abcd", "ef"]);
        assert_eq!(cursor, (2, 1));

        let (lines, cursor) = layout_input("ab\ncd", 3, 10);
        assert_eq!(lines, vec!["ab", "cd"]);
        assert_eq!(cursor, (0, 1));

        let (lines, cursor) = layout_input("abcd", 4, 4);
        assert_eq!(lines, vec!["abcd", ""]);
        assert_eq!(cursor, (0, 1));
    }

    #[test]
    fn input_layout_measures_wide_characters() {
        let (lines, cursor) = layout_input("가나다", 3, 5);
        assert_eq!(lines, vec!["가나", "다"]);
        assert_eq!(cursor, (2, 1));

        let (lines, cursor) = layout_input("가나다", 1, 5);
        assert_eq!(lines, vec!["가나", "다"]);
        assert_eq!(cursor, (2, 0));

        let (lines, cursor) = layout_input("ab가", 3, 4);
        assert_eq!(lines, vec!["ab가", ""]);
        assert_eq!(cursor, (0, 1));
    }

    #[test]
    fn card_height_counts_every_line() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let card = SummaryCard::new(&dreammate::Session::new(), date);
        let theme = Theme::default();
        let widget = SummaryCardWidget::new(&card, &theme);
        // title, date, rule; label and blank per highlight; rule and letter label; borders
        assert_eq!(widget.height(40), 3 + 10 + 2 + 2);
    }
}
