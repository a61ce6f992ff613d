use std::fmt;

/// Identifies one of the six journal sections.
///
/// The declaration order is the journaling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKey {
    Dream,
    Challenge,
    TurningPoint,
    Insight,
    Declaration,
    Letter,
}

impl SectionKey {
    /// All keys in journaling order.
    pub const ALL: [SectionKey; 6] = [
        SectionKey::Dream,
        SectionKey::Challenge,
        SectionKey::TurningPoint,
        SectionKey::Insight,
        SectionKey::Declaration,
        SectionKey::Letter,
    ];

    /// Zero-based position in journaling order.
    pub const fn index(self) -> usize {
        match self {
            SectionKey::Dream => 0,
            SectionKey::Challenge => 1,
            SectionKey::TurningPoint => 2,
            SectionKey::Insight => 3,
            SectionKey::Declaration => 4,
            SectionKey::Letter => 5,
        }
    }

    /// One-based step number shown to the user ("Step 3 · TURNING POINT").
    pub const fn ordinal(self) -> usize {
        self.index() + 1
    }

    /// Stable machine name, used in logs and config.
    pub const fn as_str(self) -> &'static str {
        match self {
            SectionKey::Dream => "dream",
            SectionKey::Challenge => "challenge",
            SectionKey::TurningPoint => "turning_point",
            SectionKey::Insight => "insight",
            SectionKey::Declaration => "declaration",
            SectionKey::Letter => "letter",
        }
    }

    /// The section that follows this one, if any.
    pub fn next(self) -> Option<Self> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub const fn is_first(self) -> bool {
        matches!(self, SectionKey::Dream)
    }

    pub const fn is_last(self) -> bool {
        matches!(self, SectionKey::Letter)
    }

    /// The static section record for this key.
    pub fn section(self) -> &'static Section {
        crate::catalog::section(self)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fixed group of reflective prompts.
///
/// Sections are compiled-in configuration, never user data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub key: SectionKey,
    /// Heading, e.g. "TURNING POINT".
    pub title: &'static str,
    /// Short line shown next to the heading.
    pub subtitle: &'static str,
    /// Label used on the summary card, e.g. "Turning Point".
    pub summary_label: &'static str,
    /// Marker shown before the summary label.
    pub emoji: &'static str,
    /// Number of characters of joined answers shown on the summary card.
    pub preview_chars: usize,
    pub prompts: &'static [&'static str],
}

impl Section {
    /// One-based step number.
    pub fn step(&self) -> usize {
        self.key.ordinal()
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    pub fn prompt(&self, index: usize) -> Option<&'static str> {
        self.prompts.get(index).copied()
    }

    pub fn is_last_prompt(&self, index: usize) -> bool {
        index + 1 == self.prompts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_follow_journaling_order() {
        for (index, key) in SectionKey::ALL.into_iter().enumerate() {
            assert_eq!(key.index(), index);
            assert_eq!(key.ordinal(), index + 1);
        }
    }

    #[test]
    fn next_walks_in_order_and_stops_after_letter() {
        let mut key = SectionKey::Dream;
        let mut visited = vec![key];
        while let Some(next) = key.next() {
            visited.push(next);
            key = next;
        }
        assert_eq!(visited, SectionKey::ALL);
        assert!(key.is_last());
    }

    #[test]
    fn display_uses_machine_name() {
        assert_eq!(SectionKey::TurningPoint.to_string(), "turning_point");
    }
}
