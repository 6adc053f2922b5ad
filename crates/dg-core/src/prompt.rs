use rand::Rng;
use rand::seq::IndexedRandom;

/// The rotating prompt vocabulary. The classifier itself treats labels
/// as opaque strings; this list only seeds what users are asked to draw.
pub const VOCABULARY: &[&str] = &[
    "cat", "house", "sun", "tree", "fish", "star", "car", "shoe", "cup", "boat",
    "clock", "flower", "cloud", "bird", "ladder", "umbrella", "snake", "glasses",
];

/// Rotating prompt source: picks uniformly from the vocabulary, never
/// repeating the immediately previous prompt.
#[derive(Clone, Debug, Default)]
pub struct PromptDeck {
    last: Option<&'static str>,
}

impl PromptDeck {
    pub fn new() -> Self {
        Self { last: None }
    }

    /// Resume a deck that previously handed out `last`, so the next pick
    /// still avoids it. Unknown strings are ignored.
    pub fn resuming(last: Option<&str>) -> Self {
        let last = last.and_then(|l| VOCABULARY.iter().copied().find(|v| *v == l));
        Self { last }
    }

    pub fn next(&mut self, rng: &mut impl Rng) -> &'static str {
        let pick = loop {
            // Vocabulary is non-empty and > 1, so this terminates
            let candidate = *VOCABULARY.choose(rng).unwrap_or(&VOCABULARY[0]);
            if Some(candidate) != self.last {
                break candidate;
            }
        };
        self.last = Some(pick);
        pick
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn test_never_repeats_immediately() {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut deck = PromptDeck::new();
        let mut prev = deck.next(&mut rng);
        for _ in 0..200 {
            let next = deck.next(&mut rng);
            assert_ne!(next, prev);
            prev = next;
        }
    }

    #[test]
    fn test_resuming_avoids_previous_prompt() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let mut deck = PromptDeck::resuming(Some("cat"));
            assert_ne!(deck.next(&mut rng), "cat");
        }
    }

    #[test]
    fn test_resuming_ignores_unknown_label() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut deck = PromptDeck::resuming(Some("not-a-prompt"));
        assert!(VOCABULARY.contains(&deck.next(&mut rng)));
    }

    #[test]
    fn test_prompts_come_from_vocabulary() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut deck = PromptDeck::new();
        for _ in 0..50 {
            assert!(VOCABULARY.contains(&deck.next(&mut rng)));
        }
    }
}
