//! Per-game rules configuration.
//!
//! A `Rules` value is an immutable snapshot taken when a game starts.
//! Malformed configuration (non-square boards, out-of-range links,
//! duplicate link sources) is rejected here, at configuration time,
//! so the movement code never has to defend against it.

use crate::board::{self, SnakeOrLadder};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Who plays the second seat, and whether turns alternate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Human versus an automated opponent in seat 1.
    Bot,
    /// Two humans sharing one device.
    Multi,
    /// Single player, no turn alternation.
    Zen,
}

/// Bot skill tier. Tiers beyond candidate filtering are a strategy
/// hook; the interface always carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BotSkill {
    Easy,
    Normal,
    Hard,
}

/// Display name and skill of the automated opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotProfile {
    pub name: String,
    pub skill: BotSkill,
}

impl Default for BotProfile {
    fn default() -> Self {
        Self {
            name: "Sidewinder".to_string(),
            skill: BotSkill::Normal,
        }
    }
}

/// Errors raised when a rules snapshot cannot describe a playable game.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum RulesError {
    #[error("board size {0} is not a perfect square of at least 4 cells")]
    InvalidBoardSize(usize),

    #[error("snake or ladder endpoint {cell} is outside the {board_size}-cell board")]
    LinkOutOfBounds { cell: usize, board_size: usize },

    #[error("snake or ladder may not start or end on the start or goal cell")]
    LinkOnTerminalCell,

    #[error("cell {0} is the source of more than one snake or ladder")]
    DuplicateLinkSource(usize),

    #[error("snake at cell {0} must lead downward")]
    SnakeGoesUp(usize),

    #[error("ladder at cell {0} must lead upward")]
    LadderGoesDown(usize),

    #[error("board of {board_size} cells cannot fit {snakes} snakes and {ladders} ladders")]
    BoardTooSmall {
        board_size: usize,
        snakes: usize,
        ladders: usize,
    },
}

/// The full rules snapshot for one game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Total cell count; must be a perfect square (64, 100, 144, ...).
    pub board_size: usize,
    pub snakes: Vec<SnakeOrLadder>,
    pub ladders: Vec<SnakeOrLadder>,
    /// Whether players may spend wildcards to skip the start-letter rule.
    pub allow_wildcards: bool,
    /// Rejected words cost the last die roll in backward movement.
    pub challenge_mode: bool,
    /// Words may only be played once per game.
    pub no_repeats: bool,
    /// 30-second countdown per turn, ticked by the front end.
    pub timer: bool,
    /// Chained words reuse the previous word's last letter as their
    /// first cell, so every word after the first moves one less.
    pub overlap_movement: bool,
    pub mode: GameMode,
    pub bot: Option<BotProfile>,
}

impl Default for Rules {
    /// The classic 100-cell layout.
    fn default() -> Self {
        Self {
            board_size: 100,
            snakes: vec![
                SnakeOrLadder::new(16, 6),
                SnakeOrLadder::new(48, 30),
                SnakeOrLadder::new(62, 19),
                SnakeOrLadder::new(88, 24),
            ],
            ladders: vec![
                SnakeOrLadder::new(2, 38),
                SnakeOrLadder::new(7, 14),
                SnakeOrLadder::new(8, 31),
                SnakeOrLadder::new(15, 26),
                SnakeOrLadder::new(21, 42),
                SnakeOrLadder::new(28, 84),
            ],
            allow_wildcards: true,
            challenge_mode: false,
            no_repeats: false,
            timer: false,
            overlap_movement: false,
            mode: GameMode::Multi,
            bot: None,
        }
    }
}

impl Rules {
    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), RulesError> {
        let width = board::board_width(self.board_size);
        if self.board_size < 4 || width * width != self.board_size {
            return Err(RulesError::InvalidBoardSize(self.board_size));
        }

        let goal = self.board_size - 1;
        let mut sources = std::collections::HashSet::new();

        for link in self.snakes.iter().chain(self.ladders.iter()) {
            for cell in [link.from, link.to] {
                if cell >= self.board_size {
                    return Err(RulesError::LinkOutOfBounds {
                        cell,
                        board_size: self.board_size,
                    });
                }
                if cell == 0 || cell == goal {
                    return Err(RulesError::LinkOnTerminalCell);
                }
            }
            if !sources.insert(link.from) {
                return Err(RulesError::DuplicateLinkSource(link.from));
            }
        }

        for snake in &self.snakes {
            if snake.from <= snake.to {
                return Err(RulesError::SnakeGoesUp(snake.from));
            }
        }
        for ladder in &self.ladders {
            if ladder.from >= ladder.to {
                return Err(RulesError::LadderGoesDown(ladder.from));
            }
        }

        Ok(())
    }

    /// Rules for a board of `board_size` cells with freshly generated
    /// snakes and ladders, scaled to the board area the same way the
    /// default 100-cell layout is.
    pub fn generated<R: Rng>(board_size: usize, rng: &mut R) -> Result<Self, RulesError> {
        let rules = Self {
            board_size,
            snakes: Vec::new(),
            ladders: Vec::new(),
            ..Self::default()
        };
        rules.validate()?;

        let snake_count = board_size / 25;
        let ladder_count = board_size / 16;
        let (snakes, ladders) =
            board::generate_snakes_and_ladders(board_size, snake_count, ladder_count, rng)?;
        Ok(Self {
            snakes,
            ladders,
            ..rules
        })
    }

    /// Merge partial overrides onto the defaults, the way a new game
    /// consumes a setup form. If the board size was overridden without
    /// explicit snake/ladder lists, a fresh layout is generated to fit.
    pub fn merged<R: Rng>(overrides: RulesOverride, rng: &mut R) -> Result<Self, RulesError> {
        let defaults = Self::default();
        let regenerate = overrides.board_size.is_some_and(|s| s != defaults.board_size)
            && overrides.snakes.is_none()
            && overrides.ladders.is_none();

        let mut rules = Self {
            board_size: overrides.board_size.unwrap_or(defaults.board_size),
            snakes: overrides.snakes.unwrap_or(defaults.snakes),
            ladders: overrides.ladders.unwrap_or(defaults.ladders),
            allow_wildcards: overrides
                .allow_wildcards
                .unwrap_or(defaults.allow_wildcards),
            challenge_mode: overrides.challenge_mode.unwrap_or(defaults.challenge_mode),
            no_repeats: overrides.no_repeats.unwrap_or(defaults.no_repeats),
            timer: overrides.timer.unwrap_or(defaults.timer),
            overlap_movement: overrides
                .overlap_movement
                .unwrap_or(defaults.overlap_movement),
            mode: overrides.mode.unwrap_or(defaults.mode),
            bot: overrides.bot.or(defaults.bot),
        };

        if regenerate {
            let generated = Self::generated(rules.board_size, rng)?;
            rules.snakes = generated.snakes;
            rules.ladders = generated.ladders;
        }

        rules.validate()?;
        Ok(rules)
    }
}

/// Partial rules, as produced by a setup form or a rules file. Absent
/// fields fall back to [`Rules::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesOverride {
    pub board_size: Option<usize>,
    pub snakes: Option<Vec<SnakeOrLadder>>,
    pub ladders: Option<Vec<SnakeOrLadder>>,
    pub allow_wildcards: Option<bool>,
    pub challenge_mode: Option<bool>,
    pub no_repeats: Option<bool>,
    pub timer: Option<bool>,
    pub overlap_movement: Option<bool>,
    pub mode: Option<GameMode>,
    pub bot: Option<BotProfile>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_rules_are_valid() {
        assert_eq!(Rules::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_square_boards() {
        let rules = Rules {
            board_size: 90,
            snakes: Vec::new(),
            ladders: Vec::new(),
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::InvalidBoardSize(90)));
    }

    #[test]
    fn rejects_out_of_bounds_links() {
        let rules = Rules {
            board_size: 64,
            snakes: vec![SnakeOrLadder::new(70, 3)],
            ladders: Vec::new(),
            ..Rules::default()
        };
        assert!(matches!(
            rules.validate(),
            Err(RulesError::LinkOutOfBounds { cell: 70, .. })
        ));
    }

    #[test]
    fn rejects_a_cell_sourcing_two_links() {
        let rules = Rules {
            snakes: vec![SnakeOrLadder::new(16, 6)],
            ladders: vec![SnakeOrLadder::new(16, 42)],
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::DuplicateLinkSource(16)));
    }

    #[test]
    fn rejects_links_touching_start_or_goal() {
        let rules = Rules {
            snakes: Vec::new(),
            ladders: vec![SnakeOrLadder::new(3, 99)],
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::LinkOnTerminalCell));
    }

    #[test]
    fn rejects_backward_ladders_and_upward_snakes() {
        let rules = Rules {
            snakes: vec![SnakeOrLadder::new(6, 16)],
            ladders: Vec::new(),
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::SnakeGoesUp(6)));

        let rules = Rules {
            snakes: Vec::new(),
            ladders: vec![SnakeOrLadder::new(42, 21)],
            ..Rules::default()
        };
        assert_eq!(rules.validate(), Err(RulesError::LadderGoesDown(42)));
    }

    #[test]
    fn generated_rules_fit_their_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let rules = Rules::generated(64, &mut rng).unwrap();
        assert_eq!(rules.board_size, 64);
        assert_eq!(rules.snakes.len(), 2);
        assert_eq!(rules.ladders.len(), 4);
        assert_eq!(rules.validate(), Ok(()));
    }

    #[test]
    fn merged_regenerates_links_for_a_resized_board() {
        let mut rng = StdRng::seed_from_u64(3);
        let rules = Rules::merged(
            RulesOverride {
                board_size: Some(64),
                ..RulesOverride::default()
            },
            &mut rng,
        )
        .unwrap();
        assert_eq!(rules.board_size, 64);
        for link in rules.snakes.iter().chain(rules.ladders.iter()) {
            assert!(link.from < 64 && link.to < 64);
        }
    }

    #[test]
    fn merged_keeps_explicit_links_as_given() {
        let mut rng = StdRng::seed_from_u64(3);
        let ladders = vec![SnakeOrLadder::new(4, 20)];
        let rules = Rules::merged(
            RulesOverride {
                board_size: Some(64),
                snakes: Some(Vec::new()),
                ladders: Some(ladders.clone()),
                ..RulesOverride::default()
            },
            &mut rng,
        )
        .unwrap();
        assert_eq!(rules.ladders, ladders);
        assert!(rules.snakes.is_empty());
    }

    #[test]
    fn merged_defaults_match_plain_defaults() {
        let mut rng = StdRng::seed_from_u64(3);
        let rules = Rules::merged(RulesOverride::default(), &mut rng).unwrap();
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn override_parses_from_partial_json() {
        let overrides: RulesOverride =
            serde_json::from_str(r#"{"board_size": 64, "no_repeats": true, "mode": "zen"}"#)
                .unwrap();
        assert_eq!(overrides.board_size, Some(64));
        assert_eq!(overrides.no_repeats, Some(true));
        assert_eq!(overrides.mode, Some(GameMode::Zen));
        assert!(overrides.snakes.is_none());
    }
}
