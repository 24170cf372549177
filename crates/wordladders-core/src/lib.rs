//! Wordladders - snakes and ladders played with words.
//!
//! This crate provides the core rules engine for Wordladders, a
//! two-player (or player-versus-bot) race across a serpentine board
//! where every move is earned by playing a dictionary word of a
//! die-rolled length that starts with the required letter.
//!
//! # Architecture
//!
//! The engine is platform-agnostic and performs no I/O: dictionaries
//! are loaded by the surrounding application, timers are ticked by it,
//! and all state transitions are synchronous method calls. It can be
//! compiled to:
//! - Native Rust for a terminal or server front end
//! - WebAssembly for a browser front end (feature `wasm`)
//!
//! # Modules
//!
//! - [`board`]: serpentine cell indexing and snake/ladder resolution
//! - [`dice`]: the word-length die
//! - [`dictionary`]: the word set the engine plays against
//! - [`validate`]: word validation and the rejection-reason taxonomy
//! - [`bot`]: the automated opponent
//! - [`rules`]: per-game configuration and its validation
//! - [`game`]: the turn/game state machine

pub mod board;
pub mod bot;
pub mod dice;
pub mod dictionary;
pub mod game;
pub mod rules;
pub mod validate;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{
    board_width, clamp_index, generate_snakes_and_ladders, index_to_position, resolve_jumps,
    CellIndex, GridPos, JumpHop, JumpKind, SnakeOrLadder,
};
pub use bot::{Bot, BotContext};
pub use dice::{roll_die, MAX_DIE, MIN_DIE};
pub use dictionary::Dictionary;
pub use game::{GameEvent, GameState, PlayerId, TurnPhase, BOT_SEAT, TURN_TIME_SECS};
pub use rules::{BotProfile, BotSkill, GameMode, Rules, RulesError, RulesOverride};
pub use validate::{normalize, validate_word, RejectReason, WordConstraints};
