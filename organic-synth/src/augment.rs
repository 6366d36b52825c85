//! Word-level synonym swaps and character-level typos.

use std::collections::HashMap;

use rand::seq::{index, SliceRandom};
use rand::Rng;

pub const DEFAULT_WORD_SYNONYM_RATE: f64 = 0.10;
pub const DEFAULT_CHAR_TYPO_RATE: f64 = 0.02;

/// Perturbs user messages so replayed samples are not verbatim copies.
#[derive(Debug, Clone)]
pub struct Augmenter {
    synonyms: HashMap<String, Vec<String>>,
    word_rate: f64,
    typo_rate: f64,
}

impl Augmenter {
    pub fn new() -> Self {
        Self {
            synonyms: HashMap::new(),
            word_rate: DEFAULT_WORD_SYNONYM_RATE,
            typo_rate: DEFAULT_CHAR_TYPO_RATE,
        }
    }

    /// Register replacements for `word`. Entries equal to `word` are ignored.
    pub fn with_synonyms<I, S>(mut self, word: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let word = word.into();
        let entry = self.synonyms.entry(word.clone()).or_default();
        entry.extend(synonyms.into_iter().map(Into::into).filter(|s| *s != word));
        self
    }

    /// Override the fraction of words considered for replacement and the
    /// per-character typo rate. Both are clamped to `[0, 1]`.
    pub fn with_rates(mut self, word_rate: f64, typo_rate: f64) -> Self {
        self.word_rate = word_rate.clamp(0.0, 1.0);
        self.typo_rate = typo_rate.clamp(0.0, 1.0);
        self
    }

    pub fn synonym_for<R: Rng>(&self, word: &str, rng: &mut R) -> Option<&str> {
        self.synonyms
            .get(word)
            .and_then(|candidates| candidates.choose(rng))
            .map(String::as_str)
    }

    /// Augment one message. Assistant turns and blank messages pass through.
    pub fn augment<R: Rng>(&self, role: &str, message: &str, rng: &mut R) -> String {
        if role == "assistant" || message.trim().is_empty() {
            return message.to_string();
        }
        let swapped = self.swap_words(message, rng);
        self.inject_typos(&swapped, rng)
    }

    /// Replace between one and `word_rate` of the words with a synonym.
    /// Whitespace is normalized to single spaces.
    pub fn swap_words<R: Rng>(&self, message: &str, rng: &mut R) -> String {
        let mut words: Vec<&str> = message.split_whitespace().collect();
        if words.is_empty() {
            return message.to_string();
        }
        let budget = ((words.len() as f64 * self.word_rate) as usize).max(1);
        let count = rng.gen_range(1..=budget).min(words.len());
        for idx in index::sample(rng, words.len(), count).into_iter() {
            if let Some(synonym) = self.synonym_for(words[idx], rng) {
                words[idx] = synonym;
            }
        }
        words.join(" ")
    }

    /// Remove a character or insert a space at random positions,
    /// up to `typo_rate` of the message length (at least one candidate).
    pub fn inject_typos<R: Rng>(&self, message: &str, rng: &mut R) -> String {
        let mut chars: Vec<char> = message.chars().collect();
        if chars.is_empty() {
            return String::new();
        }
        let budget = ((chars.len() as f64 * self.typo_rate) as usize).max(1);
        let errors = rng.gen_range(0..=budget);
        for _ in 0..errors {
            if chars.is_empty() {
                break;
            }
            let position = rng.gen_range(0..chars.len());
            if rng.gen_bool(0.5) {
                chars.remove(position);
            } else {
                chars.insert(position, ' ');
            }
        }
        chars.into_iter().collect()
    }
}

impl Default for Augmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn assistant_and_blank_messages_pass_through() {
        let augmenter = Augmenter::new().with_synonyms("hello", ["hi"]);
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(augmenter.augment("assistant", "hello there", &mut rng), "hello there");
        assert_eq!(augmenter.augment("user", "   ", &mut rng), "   ");
        assert_eq!(augmenter.augment("user", "", &mut rng), "");
    }

    #[test]
    fn single_word_is_always_swapped() {
        let augmenter = Augmenter::new().with_synonyms("big", ["large", "big"]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            assert_eq!(augmenter.swap_words("big", &mut rng), "large");
        }
    }

    #[test]
    fn unknown_words_are_kept() {
        let augmenter = Augmenter::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            augmenter.swap_words("the  quick\tfox", &mut rng),
            "the quick fox"
        );
    }

    #[test]
    fn zero_typo_rate_still_bounded_by_one_edit() {
        let augmenter = Augmenter::new().with_rates(0.1, 0.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let out = augmenter.inject_typos("abcdef", &mut rng);
            let diff = out.chars().count() as i64 - 6;
            assert!((-1..=1).contains(&diff), "{out:?}");
        }
    }

    #[test]
    fn typos_never_exceed_budget() {
        let augmenter = Augmenter::new().with_rates(0.1, 0.05);
        let mut rng = StdRng::seed_from_u64(5);
        let message = "x".repeat(200);
        for _ in 0..20 {
            let len = augmenter.inject_typos(&message, &mut rng).chars().count();
            assert!((190..=210).contains(&len), "{len}");
        }
    }
}
