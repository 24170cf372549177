//! Word validation against the turn's constraints.
//!
//! Every way a submission can fail is a value in [`RejectReason`],
//! never a panic or an opaque error: rejections are expected outcomes
//! of play and the caller decides how to surface them.

use crate::dictionary::Dictionary;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Why a submission was turned down.
///
/// Serialized in kebab-case (`game-over`, `roll-pending`) for JSON
/// front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RejectReason {
    /// The word's letter count does not match the rolled length.
    #[error("word length does not match the rolled length")]
    Length,

    /// The word does not begin with the required letter.
    #[error("word does not start with the required letter")]
    Start,

    /// The word is not in the dictionary.
    #[error("word is not in the dictionary")]
    Dictionary,

    /// The word was already played this game.
    #[error("word has already been played")]
    Repeat,

    /// The move would carry the player past the goal cell.
    #[error("word would overshoot the final cell")]
    Overshoot,

    /// The game already has a winner.
    #[error("the game is over")]
    GameOver,

    /// No revealed die roll is awaiting a word.
    #[error("no die roll is awaiting a word")]
    RollPending,
}

/// The constraints a submitted word is checked against.
#[derive(Debug, Clone)]
pub struct WordConstraints<'a> {
    /// Exact letter count required by the die.
    pub length: usize,
    /// Letter the word must start with (lowercase).
    pub start_letter: char,
    /// Words already played this game.
    pub used_words: &'a HashSet<String>,
    /// Whether replays of used words are forbidden.
    pub no_repeats: bool,
    /// Whether a wildcard bypasses the start-letter rule this turn.
    pub use_wildcard: bool,
}

/// Trim and lowercase a raw submission.
pub fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Check a word against the turn constraints.
///
/// Checks run in fixed precedence and the first failure wins:
/// length, then start letter (skipped under a wildcard), then
/// dictionary membership, then repeat use.
pub fn validate_word(
    word: &str,
    dictionary: &Dictionary,
    constraints: &WordConstraints<'_>,
) -> Result<(), RejectReason> {
    let word = normalize(word);

    if word.chars().count() != constraints.length {
        return Err(RejectReason::Length);
    }

    if !constraints.use_wildcard
        && !word.starts_with(constraints.start_letter.to_ascii_lowercase())
    {
        return Err(RejectReason::Start);
    }

    if !dictionary.contains(&word) {
        return Err(RejectReason::Dictionary);
    }

    if constraints.no_repeats && constraints.used_words.contains(&word) {
        return Err(RejectReason::Repeat);
    }

    Ok(())
}
