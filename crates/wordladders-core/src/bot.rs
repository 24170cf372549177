//! The automated opponent.
//!
//! The bot plays under exactly the same constraints as a human: the
//! rolled length, the required start letter, and the repeat rule. Its
//! word becomes the next start letter for the opponent, which is the
//! only lever skill tiers pull on.

use crate::dictionary::Dictionary;
use crate::rules::{BotProfile, BotSkill};
use rand::prelude::*;
use std::collections::HashSet;

/// English letters from most to least frequent; the further right a
/// word's last letter sits, the harder the follow-up turn is.
const FREQUENCY_ORDER: &str = "etaoinshrdlcumwfgypbvkjxqz";

/// Constraints the chosen word must satisfy.
#[derive(Debug, Clone)]
pub struct BotContext<'a> {
    pub length: usize,
    pub start_letter: char,
    pub used_words: &'a HashSet<String>,
    pub no_repeats: bool,
}

/// A bot player that picks words for its turns.
pub struct Bot {
    pub profile: BotProfile,
    rng: StdRng,
}

impl Bot {
    pub fn new(profile: BotProfile) -> Self {
        Self {
            profile,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(profile: BotProfile, seed: u64) -> Self {
        Self {
            profile,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Pick a word for the current constraints, or `None` to pass.
    pub fn choose_word(&mut self, dictionary: &Dictionary, ctx: &BotContext<'_>) -> Option<String> {
        let candidates = Self::candidates(dictionary, ctx);
        if candidates.is_empty() {
            return None;
        }

        let pick = match self.profile.skill {
            BotSkill::Easy | BotSkill::Normal => candidates.choose(&mut self.rng).copied(),
            BotSkill::Hard => self.choose_hard(&candidates),
        };
        pick.map(str::to_string)
    }

    /// Every playable word: exact length, required start letter, and
    /// not yet used when repeats are forbidden.
    fn candidates<'d>(dictionary: &'d Dictionary, ctx: &BotContext<'_>) -> Vec<&'d str> {
        let start = ctx.start_letter.to_ascii_lowercase();
        dictionary
            .iter()
            .filter(|w| w.chars().count() == ctx.length && w.starts_with(start))
            .filter(|w| !(ctx.no_repeats && ctx.used_words.contains(*w)))
            .collect()
    }

    /// Hard tier: rank candidates by how rare their final letter is,
    /// then pick from the top few so play stays varied.
    fn choose_hard<'d>(&mut self, candidates: &[&'d str]) -> Option<&'d str> {
        let mut scored: Vec<_> = candidates
            .iter()
            .map(|w| (*w, Self::end_letter_rarity(w)))
            .collect();
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let top: Vec<_> = scored.iter().take(3).map(|(w, _)| *w).collect();
        top.choose(&mut self.rng).copied()
    }

    fn end_letter_rarity(word: &str) -> usize {
        word.chars()
            .last()
            .and_then(|c| FREQUENCY_ORDER.find(c.to_ascii_lowercase()))
            .unwrap_or(0)
    }
}
