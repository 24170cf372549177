//! Core game state machine.
//!
//! This module contains the main `GameState` struct and the full turn
//! resolution flow: roll, word submission, movement, snake/ladder
//! resolution, wildcards, the turn timer, and win detection.

use crate::board::{clamp_index, resolve_jumps, CellIndex, JumpKind};
use crate::bot::{Bot, BotContext};
use crate::dice::roll_die;
use crate::dictionary::Dictionary;
use crate::rules::{GameMode, Rules, RulesError};
use crate::validate::{normalize, validate_word, RejectReason, WordConstraints};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Player identifier: seat 0 or seat 1.
pub type PlayerId = u8;

/// The seat an automated opponent occupies in bot mode.
pub const BOT_SEAT: PlayerId = 1;

/// Seconds on the clock each turn when the timer rule is on.
pub const TURN_TIME_SECS: u32 = 30;

/// Wildcards each player starts the game with.
const STARTING_WILDCARDS: u8 = 2;

/// Where the game sits in the turn cycle.
///
/// The phase itself is the guard: a word can only be submitted in
/// `AwaitingWord`, so "no submission while the roll is revealing" is
/// enforced by the machine rather than by collaborator discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the current player's roll.
    AwaitingRoll,
    /// A roll is underway; the value is hidden until revealed.
    RollRevealing,
    /// The die is revealed; waiting for a word.
    AwaitingWord,
    /// A word was accepted; waiting for the turn hand-off.
    TurnResolved,
    /// Somebody reached the goal cell.
    Finished { winner: PlayerId },
}

/// Observable results of a state transition, for front-end narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A die value was revealed and became the required word length.
    DieRolled { player: PlayerId, die: u8 },

    /// A word passed validation and the player moved.
    WordAccepted {
        player: PlayerId,
        word: String,
        from: CellIndex,
        to: CellIndex,
    },

    /// A snake or ladder carried the player along.
    JumpTaken {
        player: PlayerId,
        from: CellIndex,
        to: CellIndex,
        kind: JumpKind,
    },

    /// A wildcard was spent to bypass the start letter.
    WildcardSpent { player: PlayerId, remaining: u8 },

    /// The bot played a word on its inline turn.
    BotPlayed { player: PlayerId, word: String },

    /// The bot had no playable word and passed.
    BotPassed { player: PlayerId },

    /// The turn moved on.
    TurnEnded { player: PlayerId, next: PlayerId },

    /// The mover landed exactly on the goal cell.
    GameWon { player: PlayerId },
}

/// The complete state of one game.
///
/// All transitions are synchronous method calls; collaborators read
/// the public fields as immutable snapshots and never mutate them
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Immutable rules snapshot for this game.
    pub rules: Rules,
    /// Cell index per seat.
    pub positions: [CellIndex; 2],
    /// Whose turn it is.
    pub current: PlayerId,
    /// The most recent revealed die value.
    pub last_die: u8,
    /// Letter count the next word must have; `None` between turns.
    pub required_length: Option<usize>,
    /// Letter the next word must start with.
    pub start_letter: char,
    /// Where the game sits in the turn cycle.
    pub phase: TurnPhase,
    /// Wildcards left per seat.
    pub wildcards: [u8; 2],
    /// Every word accepted so far, normalized.
    pub used_words: HashSet<String>,
    /// Per-cell letter overlay left behind by played words.
    pub board_letters: Vec<Option<char>>,
    /// Seconds left on the turn clock; 0 when the timer is off.
    pub remaining_time: u32,
    /// Accepted word count, for the overlap movement rule.
    words_played: u32,
    /// Die value picked at `begin_roll`, hidden until `finish_roll`.
    pending_die: Option<u8>,
    /// Seed this game was created from, for deterministic replays.
    rng_seed: u64,
    #[serde(skip, default = "entropy_rng")]
    rng: StdRng,
}

fn entropy_rng() -> StdRng {
    StdRng::from_entropy()
}

impl GameState {
    /// Start a new game. Validates the rules, resets all turn state,
    /// and performs the first roll.
    pub fn new(rules: Rules) -> Result<Self, RulesError> {
        Self::with_seed(rules, rand::thread_rng().gen())
    }

    /// Start a new game with a fixed seed: the same seed replays the
    /// same dice, start letter, and bot picks.
    pub fn with_seed(rules: Rules, seed: u64) -> Result<Self, RulesError> {
        rules.validate()?;
        let mut rng = StdRng::seed_from_u64(seed);
        let start_letter = (b'a' + rng.gen_range(0..26u8)) as char;
        let board_letters = vec![None; rules.board_size];

        let mut state = Self {
            rules,
            positions: [0, 0],
            current: 0,
            last_die: 0,
            required_length: None,
            start_letter,
            phase: TurnPhase::AwaitingRoll,
            wildcards: [STARTING_WILDCARDS; 2],
            used_words: HashSet::new(),
            board_letters,
            remaining_time: 0,
            words_played: 0,
            pending_die: None,
            rng_seed: seed,
            rng,
        };
        state.roll();
        Ok(state)
    }

    /// The winner, once there is one.
    pub fn winner(&self) -> Option<PlayerId> {
        if let TurnPhase::Finished { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, TurnPhase::Finished { .. })
    }

    /// Roll and reveal in one step, for collaborators without a
    /// reveal animation. Returns the die, or `None` if no roll was
    /// due.
    pub fn roll(&mut self) -> Option<u8> {
        if !self.begin_roll() {
            return None;
        }
        self.finish_roll()
    }

    /// Start a roll: the die value is decided now but stays hidden
    /// until [`finish_roll`](Self::finish_roll) reveals it. Word
    /// submissions in between are rejected. Returns whether a roll
    /// actually started.
    pub fn begin_roll(&mut self) -> bool {
        if self.phase != TurnPhase::AwaitingRoll {
            return false;
        }
        self.pending_die = Some(roll_die(&mut self.rng));
        self.phase = TurnPhase::RollRevealing;
        true
    }

    /// Reveal the pending die into the required word length and arm
    /// the turn timer. Returns the die, or `None` if no roll was
    /// underway.
    pub fn finish_roll(&mut self) -> Option<u8> {
        if self.phase != TurnPhase::RollRevealing {
            return None;
        }
        let die = self.pending_die.take()?;
        self.last_die = die;
        self.required_length = Some(die as usize);
        self.phase = TurnPhase::AwaitingWord;
        if self.rules.timer {
            self.remaining_time = TURN_TIME_SECS;
        }
        Some(die)
    }

    /// Submit a word for the current player.
    ///
    /// On acceptance the player moves by the word's length, letters
    /// are written along the travelled path, snakes and ladders are
    /// resolved, and the last letter becomes the next start letter.
    /// On rejection the reason is returned; under challenge mode a
    /// rejected word also costs the last die roll in backward
    /// movement. An overshooting word consumes the whole turn.
    pub fn submit_word(
        &mut self,
        dictionary: &Dictionary,
        word: &str,
        use_wildcard: bool,
    ) -> Result<Vec<GameEvent>, RejectReason> {
        match self.phase {
            TurnPhase::Finished { .. } => return Err(RejectReason::GameOver),
            TurnPhase::AwaitingWord => {}
            _ => return Err(RejectReason::RollPending),
        }
        let length = self.required_length.ok_or(RejectReason::RollPending)?;

        let seat = self.current as usize;
        // The wildcard flag only takes effect when the rules allow it
        // and the player still has one to spend.
        let wildcard = use_wildcard && self.rules.allow_wildcards && self.wildcards[seat] > 0;

        let word = normalize(word);
        let constraints = WordConstraints {
            length,
            start_letter: self.start_letter,
            used_words: &self.used_words,
            no_repeats: self.rules.no_repeats,
            use_wildcard: wildcard,
        };
        if let Err(reason) = validate_word(&word, dictionary, &constraints) {
            if self.rules.challenge_mode {
                let penalized =
                    self.positions[seat] as isize - self.last_die as isize;
                self.positions[seat] = clamp_index(penalized, self.rules.board_size);
            }
            return Err(reason);
        }

        let word_len = word.chars().count();
        let movement = if self.rules.overlap_movement && self.words_played > 0 {
            word_len - 1
        } else {
            word_len
        };

        let from = self.positions[seat];
        let remaining = self.rules.board_size - 1 - from;
        if movement > remaining {
            // Exact roll to finish: the move fails but the turn is
            // still spent.
            self.end_turn(dictionary);
            return Err(RejectReason::Overshoot);
        }

        // Letters trail along the pre-jump path so the final letter
        // lands on the destination cell.
        let offset = word_len - movement;
        for (i, ch) in word.chars().enumerate() {
            let idx = from + 1 + i - offset;
            if idx < self.board_letters.len() {
                self.board_letters[idx] = Some(ch);
            }
        }

        let landing = clamp_index((from + movement) as isize, self.rules.board_size);
        let (resolved, hops) = resolve_jumps(landing, &self.rules.snakes, &self.rules.ladders);

        let player = self.current;
        let mut events = vec![GameEvent::WordAccepted {
            player,
            word: word.clone(),
            from,
            to: landing,
        }];
        for hop in hops {
            events.push(GameEvent::JumpTaken {
                player,
                from: hop.from,
                to: hop.to,
                kind: hop.kind,
            });
        }

        self.positions[seat] = resolved;
        if wildcard {
            self.wildcards[seat] -= 1;
            events.push(GameEvent::WildcardSpent {
                player,
                remaining: self.wildcards[seat],
            });
        }
        if let Some(last) = word.chars().last() {
            self.start_letter = last;
        }
        self.used_words.insert(word);
        self.words_played += 1;
        self.required_length = None;
        self.remaining_time = 0;

        if resolved == self.rules.board_size - 1 {
            self.phase = TurnPhase::Finished { winner: player };
            events.push(GameEvent::GameWon { player });
        } else {
            self.phase = TurnPhase::TurnResolved;
        }
        Ok(events)
    }

    /// Hand the turn over.
    ///
    /// Zen mode keeps the single player and rolls again. Multiplayer
    /// toggles the seat and waits for the next roll. Bot mode resolves
    /// the bot's entire turn inline (roll, choose, submit or pass) and
    /// hands back to the human with a fresh roll.
    pub fn end_turn(&mut self, dictionary: &Dictionary) -> Vec<GameEvent> {
        if self.is_finished() {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.pending_die = None;
        self.required_length = None;
        self.remaining_time = 0;

        match self.rules.mode {
            GameMode::Zen => {
                self.phase = TurnPhase::AwaitingRoll;
                events.push(GameEvent::TurnEnded {
                    player: self.current,
                    next: self.current,
                });
                if let Some(die) = self.roll() {
                    events.push(GameEvent::DieRolled {
                        player: self.current,
                        die,
                    });
                }
            }
            GameMode::Multi => {
                let prev = self.current;
                self.current ^= 1;
                self.phase = TurnPhase::AwaitingRoll;
                events.push(GameEvent::TurnEnded {
                    player: prev,
                    next: self.current,
                });
            }
            GameMode::Bot => {
                let prev = self.current;
                self.current ^= 1;
                self.phase = TurnPhase::AwaitingRoll;
                events.push(GameEvent::TurnEnded {
                    player: prev,
                    next: self.current,
                });
                if self.current == BOT_SEAT {
                    events.extend(self.play_bot_turn(dictionary));
                }
            }
        }

        events
    }

    /// Tick the turn clock down one second. The collaborator that
    /// drives the clock calls [`end_turn`](Self::end_turn) when it
    /// observes zero; expiry is reported here, not enforced.
    pub fn decrement_timer(&mut self) -> u32 {
        if self.remaining_time > 0 {
            self.remaining_time -= 1;
        }
        self.remaining_time
    }

    /// The bot's whole turn, resolved synchronously: roll, pick a
    /// word, submit or pass, then hand back to the human seat with a
    /// fresh roll.
    fn play_bot_turn(&mut self, dictionary: &Dictionary) -> Vec<GameEvent> {
        let mut events = Vec::new();
        let bot_seat = self.current;

        let die = match self.roll() {
            Some(die) => die,
            None => return events,
        };
        events.push(GameEvent::DieRolled {
            player: bot_seat,
            die,
        });

        let profile = self.rules.bot.clone().unwrap_or_default();
        let mut bot = Bot::with_seed(profile, self.rng.gen());
        let context = BotContext {
            length: die as usize,
            start_letter: self.start_letter,
            used_words: &self.used_words,
            no_repeats: self.rules.no_repeats,
        };
        match bot.choose_word(dictionary, &context) {
            Some(word) => match self.submit_word(dictionary, &word, false) {
                Ok(word_events) => {
                    events.push(GameEvent::BotPlayed {
                        player: bot_seat,
                        word,
                    });
                    events.extend(word_events);
                }
                // Candidates come straight from the dictionary, so a
                // rejection here can only be an overshoot; the turn is
                // already consumed by it.
                Err(_) => events.push(GameEvent::BotPassed { player: bot_seat }),
            },
            None => events.push(GameEvent::BotPassed { player: bot_seat }),
        }

        if !self.is_finished() {
            let human = bot_seat ^ 1;
            self.current = human;
            self.pending_die = None;
            self.required_length = None;
            self.phase = TurnPhase::AwaitingRoll;
            events.push(GameEvent::TurnEnded {
                player: bot_seat,
                next: human,
            });
            if let Some(die) = self.roll() {
                events.push(GameEvent::DieRolled { player: human, die });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{BotProfile, BotSkill};
    use pretty_assertions::assert_eq;

    fn bare_rules(board_size: usize) -> Rules {
        Rules {
            board_size,
            snakes: Vec::new(),
            ladders: Vec::new(),
            ..Rules::default()
        }
    }

    fn game(rules: Rules) -> GameState {
        GameState::with_seed(rules, 1234).unwrap()
    }

    fn dict(words: &[&str]) -> Dictionary {
        Dictionary::new(words.iter().copied())
    }

    #[test]
    fn new_game_performs_the_first_roll() {
        let state = game(bare_rules(100));
        assert_eq!(state.phase, TurnPhase::AwaitingWord);
        let required = state.required_length.unwrap();
        assert!((3..=6).contains(&required));
        assert_eq!(state.last_die as usize, required);
        assert_eq!(state.positions, [0, 0]);
        assert_eq!(state.wildcards, [2, 2]);
        assert!(state.used_words.is_empty());
        assert!(state.start_letter.is_ascii_lowercase());
    }

    #[test]
    fn seeded_games_replay_identically() {
        let a = GameState::with_seed(bare_rules(100), 7).unwrap();
        let b = GameState::with_seed(bare_rules(100), 7).unwrap();
        assert_eq!(a.last_die, b.last_die);
        assert_eq!(a.start_letter, b.start_letter);
    }

    #[test]
    fn invalid_rules_are_rejected_at_creation() {
        assert!(GameState::new(bare_rules(90)).is_err());
    }

    #[test]
    fn two_phase_roll_hides_the_die_and_blocks_submissions() {
        let mut state = game(bare_rules(100));
        // Finish the pre-rolled turn hand-off first.
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();
        let _ = state.end_turn(&words);

        assert_eq!(state.phase, TurnPhase::AwaitingRoll);
        assert!(state.begin_roll());
        assert_eq!(state.phase, TurnPhase::RollRevealing);
        assert_eq!(state.required_length, None);

        // Submitting mid-reveal is a hard rejection.
        assert_eq!(
            state.submit_word(&words, "eagle", false),
            Err(RejectReason::RollPending)
        );

        let die = state.finish_roll().unwrap();
        assert_eq!(state.phase, TurnPhase::AwaitingWord);
        assert_eq!(state.required_length, Some(die as usize));
    }

    #[test]
    fn begin_roll_only_fires_from_awaiting_roll() {
        let mut state = game(bare_rules(100));
        // Already AwaitingWord after the initial roll.
        assert!(!state.begin_roll());
        assert_eq!(state.finish_roll(), None);
        assert_eq!(state.roll(), None);
    }

    #[test]
    fn accepted_word_moves_and_advances_the_start_letter() {
        let mut state = game(bare_rules(100));
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';

        let events = state.submit_word(&words, "Apple ", false).unwrap();
        assert_eq!(state.positions[0], 5);
        assert_eq!(state.start_letter, 'e');
        assert!(state.used_words.contains("apple"));
        assert_eq!(state.phase, TurnPhase::TurnResolved);
        assert!(matches!(
            events[0],
            GameEvent::WordAccepted { from: 0, to: 5, .. }
        ));
    }

    #[test]
    fn letters_trail_along_the_travelled_path() {
        let mut state = game(bare_rules(100));
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();

        let trail: Vec<Option<char>> = state.board_letters[1..=5].to_vec();
        assert_eq!(
            trail,
            vec![Some('a'), Some('p'), Some('p'), Some('l'), Some('e')]
        );
        assert_eq!(state.board_letters[0], None);
        assert_eq!(state.board_letters[6], None);
    }

    #[test]
    fn accepted_word_rides_snakes_and_ladders() {
        let mut rules = bare_rules(100);
        rules.ladders = vec![crate::board::SnakeOrLadder::new(5, 40)];
        let mut state = game(rules);
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';

        let events = state.submit_word(&words, "apple", false).unwrap();
        assert_eq!(state.positions[0], 40);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::JumpTaken {
                from: 5,
                to: 40,
                kind: JumpKind::Ladder,
                ..
            }
        )));
    }

    #[test]
    fn rejection_leaves_position_alone_without_challenge_mode() {
        let mut state = game(bare_rules(100));
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.positions[0] = 8;

        let result = state.submit_word(&words, "zzzzz", false);
        assert_eq!(result, Err(RejectReason::Start));
        assert_eq!(state.positions[0], 8);
        // Turn is not consumed; the player may try again.
        assert_eq!(state.phase, TurnPhase::AwaitingWord);
    }

    #[test]
    fn challenge_mode_penalizes_rejections_with_the_last_die() {
        let mut rules = bare_rules(100);
        rules.challenge_mode = true;
        let mut state = game(rules);
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.positions[0] = 8;
        state.last_die = 4;

        let result = state.submit_word(&words, "zzzzz", false);
        assert!(result.is_err());
        assert_eq!(state.positions[0], 4);
    }

    #[test]
    fn challenge_penalty_clamps_at_the_start_cell() {
        let mut rules = bare_rules(100);
        rules.challenge_mode = true;
        let mut state = game(rules);
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.positions[0] = 2;
        state.last_die = 5;

        let _ = state.submit_word(&words, "zzzzz", false);
        assert_eq!(state.positions[0], 0);
    }

    #[test]
    fn wildcard_bypasses_start_letter_and_is_spent() {
        let mut state = game(bare_rules(100));
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'b';

        let events = state.submit_word(&words, "apple", true).unwrap();
        assert_eq!(state.wildcards[0], 1);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::WildcardSpent { remaining: 1, .. })));
    }

    #[test]
    fn wildcard_flag_is_ignored_when_rules_forbid_it() {
        let mut rules = bare_rules(100);
        rules.allow_wildcards = false;
        let mut state = game(rules);
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'b';

        assert_eq!(
            state.submit_word(&words, "apple", true),
            Err(RejectReason::Start)
        );
        assert_eq!(state.wildcards[0], 2);
    }

    #[test]
    fn wildcard_flag_is_ignored_when_none_remain() {
        let mut state = game(bare_rules(100));
        state.wildcards[0] = 0;
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'b';

        assert_eq!(
            state.submit_word(&words, "apple", true),
            Err(RejectReason::Start)
        );
    }

    #[test]
    fn overshoot_rejects_and_consumes_the_turn() {
        let mut rules = bare_rules(16);
        rules.mode = GameMode::Multi;
        let mut state = game(rules);
        let words = dict(&["perpendicular"]);
        state.positions[0] = 10;
        state.required_length = Some(13);
        state.start_letter = 'p';

        let result = state.submit_word(&words, "perpendicular", false);
        assert_eq!(result, Err(RejectReason::Overshoot));
        // Position unchanged, but the turn has moved on.
        assert_eq!(state.positions[0], 10);
        assert_eq!(state.current, 1);
        assert_eq!(state.phase, TurnPhase::AwaitingRoll);
        assert!(!state.used_words.contains("perpendicular"));
    }

    #[test]
    fn landing_exactly_on_the_goal_wins() {
        let mut state = game(bare_rules(16));
        let words = dict(&["apple"]);
        state.positions[0] = 10;
        state.required_length = Some(5);
        state.start_letter = 'a';

        let events = state.submit_word(&words, "apple", false).unwrap();
        assert_eq!(state.positions[0], 15);
        assert_eq!(state.winner(), Some(0));
        assert!(events.iter().any(|e| matches!(e, GameEvent::GameWon { player: 0 })));
    }

    #[test]
    fn finished_games_ignore_further_actions() {
        let mut state = game(bare_rules(16));
        let words = dict(&["apple", "eagle"]);
        state.positions[0] = 10;
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();
        assert!(state.is_finished());

        let snapshot_positions = state.positions;
        assert_eq!(
            state.submit_word(&words, "eagle", false),
            Err(RejectReason::GameOver)
        );
        assert_eq!(state.roll(), None);
        assert!(state.end_turn(&words).is_empty());
        assert_eq!(state.positions, snapshot_positions);
        assert_eq!(state.winner(), Some(0));
    }

    #[test]
    fn repeats_are_rejected_when_the_rule_is_on() {
        let mut rules = bare_rules(100);
        rules.no_repeats = true;
        let mut state = game(rules);
        let words = dict(&["apple", "eagle"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();
        let _ = state.end_turn(&words);
        state.roll();

        state.required_length = Some(5);
        state.start_letter = 'a';
        assert_eq!(
            state.submit_word(&words, "apple", false),
            Err(RejectReason::Repeat)
        );
    }

    #[test]
    fn overlap_movement_shortens_chained_words() {
        let mut rules = bare_rules(100);
        rules.overlap_movement = true;
        rules.mode = GameMode::Zen;
        let mut state = game(rules);
        let words = dict(&["apple", "eagle"]);

        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();
        // First word moves its full length.
        assert_eq!(state.positions[0], 5);

        let _ = state.end_turn(&words);
        state.required_length = Some(5);
        state.submit_word(&words, "eagle", false).unwrap();
        // Chained word reuses the shared letter's cell: 5 + 4.
        assert_eq!(state.positions[0], 9);
    }

    #[test]
    fn multi_mode_alternates_seats_and_waits_for_a_roll() {
        let mut state = game(bare_rules(100));
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();

        let events = state.end_turn(&words);
        assert_eq!(state.current, 1);
        assert_eq!(state.phase, TurnPhase::AwaitingRoll);
        assert_eq!(state.required_length, None);
        assert!(matches!(
            events[0],
            GameEvent::TurnEnded { player: 0, next: 1 }
        ));
    }

    #[test]
    fn zen_mode_keeps_the_player_and_rolls_again() {
        let mut rules = bare_rules(100);
        rules.mode = GameMode::Zen;
        let mut state = game(rules);
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();

        let events = state.end_turn(&words);
        assert_eq!(state.current, 0);
        assert_eq!(state.phase, TurnPhase::AwaitingWord);
        assert!(state.required_length.is_some());
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::DieRolled { player: 0, .. })));
    }

    #[test]
    fn bot_turn_resolves_inline_and_hands_back_to_the_human() {
        let mut rules = bare_rules(100);
        rules.mode = GameMode::Bot;
        rules.bot = Some(BotProfile {
            name: "Test".to_string(),
            skill: BotSkill::Easy,
        });
        let mut state = game(rules);
        // Words of every rollable length for every letter the chain
        // can reach, so the bot always has a move.
        let words = dict(&[
            "apple", "eee", "eagle", "eased", "easy", "ear", "yes", "yams", "year",
            "smart", "sam", "seas", "drag", "dam", "tab", "term", "tests",
        ]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();

        let events = state.end_turn(&words);
        // The bot rolled, acted, and play returned to the human with
        // a fresh roll.
        assert_eq!(state.current, 0);
        assert_eq!(state.phase, TurnPhase::AwaitingWord);
        assert!(state.required_length.is_some());
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::DieRolled { player: 1, .. })));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::BotPlayed { player: 1, .. } | GameEvent::BotPassed { player: 1 }
        )));
    }

    #[test]
    fn bot_with_no_candidates_passes_silently() {
        let mut rules = bare_rules(100);
        rules.mode = GameMode::Bot;
        let mut state = game(rules);
        let words = dict(&["apple"]);
        state.required_length = Some(5);
        state.start_letter = 'a';
        state.submit_word(&words, "apple", false).unwrap();

        // Dictionary has no words starting with 'e' for the bot.
        let events = state.end_turn(&words);
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::BotPassed { player: 1 })));
        assert_eq!(state.positions[1], 0);
        assert_eq!(state.current, 0);
    }

    #[test]
    fn timer_arms_on_roll_and_ticks_down() {
        let mut rules = bare_rules(100);
        rules.timer = true;
        let mut state = game(rules);
        assert_eq!(state.remaining_time, TURN_TIME_SECS);

        assert_eq!(state.decrement_timer(), TURN_TIME_SECS - 1);
        state.remaining_time = 1;
        assert_eq!(state.decrement_timer(), 0);
        // Ticking at zero stays at zero.
        assert_eq!(state.decrement_timer(), 0);
    }

    #[test]
    fn timer_stays_off_without_the_rule() {
        let state = game(bare_rules(100));
        assert_eq!(state.remaining_time, 0);
    }

    #[test]
    fn state_snapshot_round_trips_through_json() {
        let state = game(bare_rules(100));
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.positions, state.positions);
        assert_eq!(back.phase, state.phase);
        assert_eq!(back.start_letter, state.start_letter);
        assert_eq!(back.required_length, state.required_length);
    }
}
