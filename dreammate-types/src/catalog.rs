use crate::{Section, SectionKey};

/// The six journal sections in journaling order.
pub static SECTIONS: [Section; 6] = [
    Section {
        key: SectionKey::Dream,
        title: "DREAM",
        subtitle: "Set your intention",
        summary_label: "Dream",
        emoji: "🌟",
        preview_chars: 120,
        prompts: &[
            "Hi there. I'm your KDreammate for today. How does this space feel to you?",
            "What feeling brought you here today?",
            "What quiet wish is waiting inside you?",
        ],
    },
    Section {
        key: SectionKey::Challenge,
        title: "CHALLENGE",
        subtitle: "Acknowledge the difficulty",
        summary_label: "Challenge",
        emoji: "⚡",
        preview_chars: 100,
        prompts: &[
            "What's been difficult while protecting your dream?",
            "What emotion has shaken you the most?",
        ],
    },
    Section {
        key: SectionKey::TurningPoint,
        title: "TURNING POINT",
        subtitle: "Find your resilience",
        summary_label: "Turning Point",
        emoji: "🌅",
        preview_chars: 100,
        prompts: &[
            "Was there a moment you nearly gave up?",
            "What helped you rise again?",
        ],
    },
    Section {
        key: SectionKey::Insight,
        title: "INSIGHT",
        subtitle: "Discover your wisdom",
        summary_label: "Insight",
        emoji: "💡",
        preview_chars: 100,
        prompts: &[
            "What word describes your heart right now?",
            "What lesson might your story be whispering to you?",
        ],
    },
    Section {
        key: SectionKey::Declaration,
        title: "DECLARATION & ACTION",
        subtitle: "Make gentle promises",
        summary_label: "Declaration",
        emoji: "✨",
        preview_chars: 100,
        prompts: &[
            "What small promise can you make to yourself today?",
            "Let's list 3 actions — gentle, doable, yours.",
        ],
    },
    Section {
        key: SectionKey::Letter,
        title: "LETTER",
        subtitle: "Write from your heart",
        summary_label: "Your Letter",
        emoji: "💌",
        preview_chars: 200,
        prompts: &[
            "Write a short letter — to your future self, to someone you care about, or to today's you.",
        ],
    },
];

/// Total number of prompts across all sections.
pub const TOTAL_PROMPTS: usize = 12;

/// The static section record for a key.
pub fn section(key: SectionKey) -> &'static Section {
    &SECTIONS[key.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_in_key_order() {
        for (index, section) in SECTIONS.iter().enumerate() {
            assert_eq!(section.key.index(), index);
            assert_eq!(section.step(), index + 1);
        }
    }

    #[test]
    fn prompt_counts_match_the_journey() {
        let counts: Vec<usize> = SECTIONS.iter().map(Section::prompt_count).collect();
        assert_eq!(counts, vec![3, 2, 2, 2, 2, 1]);
        assert_eq!(counts.iter().sum::<usize>(), TOTAL_PROMPTS);
    }

    #[test]
    fn titles_are_in_fixed_order() {
        let titles: Vec<&str> = SECTIONS.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec![
                "DREAM",
                "CHALLENGE",
                "TURNING POINT",
                "INSIGHT",
                "DECLARATION & ACTION",
                "LETTER"
            ]
        );
    }

    #[test]
    fn letter_has_a_single_last_prompt() {
        let letter = SectionKey::Letter.section();
        assert_eq!(letter.prompt_count(), 1);
        assert!(letter.is_last_prompt(0));
        assert!(letter.prompt(1).is_none());
    }
}
