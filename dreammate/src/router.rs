//! Maps the navigation cursor to screens.

use dreammate_types::{Section, SectionKey};

/// Which screen is current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Intro,
    Section(SectionKey),
    Summary,
}

impl Cursor {
    /// The section being journaled, if any.
    pub fn section(self) -> Option<SectionKey> {
        match self {
            Cursor::Section(key) => Some(key),
            Cursor::Intro | Cursor::Summary => None,
        }
    }

    /// Linear step number: 0 for the intro, 1..=6 for sections, 7 for the summary.
    pub fn step(self) -> usize {
        match self {
            Cursor::Intro => 0,
            Cursor::Section(key) => key.ordinal(),
            Cursor::Summary => SectionKey::ALL.len() + 1,
        }
    }
}

/// What a frontend should display for a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Prompt(&'static Section),
    Summary,
}

pub fn route(cursor: Cursor) -> Screen {
    match cursor {
        Cursor::Intro => Screen::Intro,
        Cursor::Section(key) => Screen::Prompt(key.section()),
        Cursor::Summary => Screen::Summary,
    }
}

/// The cursor after forward progress. The summary is terminal.
pub fn following(cursor: Cursor) -> Cursor {
    match cursor {
        Cursor::Intro => Cursor::Section(SectionKey::Dream),
        Cursor::Section(key) => key.next().map_or(Cursor::Summary, Cursor::Section),
        Cursor::Summary => Cursor::Summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_traversal_visits_every_section_once() {
        let mut cursor = Cursor::Intro;
        let mut steps = vec![cursor.step()];
        while cursor != Cursor::Summary {
            cursor = following(cursor);
            steps.push(cursor.step());
        }
        assert_eq!(steps, (0..=7).collect::<Vec<_>>());
    }

    #[test]
    fn summary_is_terminal() {
        assert_eq!(following(Cursor::Summary), Cursor::Summary);
    }

    #[test]
    fn route_supplies_section_record() {
        match route(Cursor::Section(SectionKey::Insight)) {
            Screen::Prompt(section) => {
                assert_eq!(section.title, "INSIGHT");
                assert_eq!(section.step(), 4);
            }
            other => panic!("Expected prompt screen, got {other:?}"),
        }
        assert_eq!(route(Cursor::Intro), Screen::Intro);
        assert_eq!(route(Cursor::Summary), Screen::Summary);
    }
}
