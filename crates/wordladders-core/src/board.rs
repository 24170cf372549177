//! Board topology for the serpentine snakes-and-ladders grid.
//!
//! This module contains:
//! - Linear cell indexing and the serpentine row/column mapping
//! - Snake and ladder links and chained jump resolution
//! - Random board generation with bounded retries
//!
//! The board is a single strip of `board_size` cells laid out on a
//! square grid. Rows fill bottom-to-top and alternate direction, the
//! way snakes-and-ladders boards are physically printed.

use crate::rules::RulesError;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Zero-based linear position on the board. 0 is the start cell,
/// `board_size - 1` is the goal cell.
pub type CellIndex = usize;

/// Attempt budget for random link placement before giving up.
const GENERATION_ATTEMPTS: usize = 1_000;

/// A single snake or ladder: stepping on `from` moves the player to `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnakeOrLadder {
    pub from: CellIndex,
    pub to: CellIndex,
}

impl SnakeOrLadder {
    pub const fn new(from: CellIndex, to: CellIndex) -> Self {
        Self { from, to }
    }
}

/// Which kind of link a jump followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpKind {
    Snake,
    Ladder,
}

/// One hop of a resolved snake/ladder chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpHop {
    pub from: CellIndex,
    pub to: CellIndex,
    pub kind: JumpKind,
}

/// Row/column coordinates of a cell on the drawn grid.
///
/// Row 0 is the bottom row (where the start cell sits); columns run
/// left-to-right on even rows and right-to-left on odd rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPos {
    pub row: usize,
    pub col: usize,
}

/// Side length of the square grid for a given board size.
///
/// Callers are expected to have validated that `board_size` is a
/// perfect square (see [`crate::rules::Rules::validate`]).
pub fn board_width(board_size: usize) -> usize {
    (board_size as f64).sqrt().round() as usize
}

/// Saturate an index to the valid cell range `[0, board_size - 1]`.
///
/// Takes a signed value so that backward penalty moves can underflow
/// past the start cell and still clamp cleanly.
pub fn clamp_index(i: isize, board_size: usize) -> CellIndex {
    if i < 0 {
        return 0;
    }
    let i = i as usize;
    if i >= board_size {
        board_size - 1
    } else {
        i
    }
}

/// Map a linear cell index onto the serpentine grid.
///
/// The index is clamped to the board before conversion, so callers can
/// pass provisional positions without range-checking first.
pub fn index_to_position(index: CellIndex, board_size: usize) -> GridPos {
    let width = board_width(board_size);
    let clamped = clamp_index(index as isize, board_size);
    let row = clamped / width;
    let col_in_row = clamped % width;
    let col = if row % 2 == 0 {
        col_in_row
    } else {
        width - 1 - col_in_row
    };
    GridPos { row, col }
}

/// Follow snake/ladder links from `index` until a cell with no
/// outgoing link is reached, recording each hop.
///
/// Snakes are consulted before ladders when both start on one cell.
/// Cycle policy: if resolution revisits a cell (e.g. a snake and a
/// ladder forming a two-cycle), it stops and settles on the minimum of
/// the revisited cell and the cell the chain came from. This breaks
/// the deadlock deterministically instead of looping.
pub fn resolve_jumps(
    index: CellIndex,
    snakes: &[SnakeOrLadder],
    ladders: &[SnakeOrLadder],
) -> (CellIndex, Vec<JumpHop>) {
    let mut current = index;
    let mut last = current;
    let mut visited: HashSet<CellIndex> = HashSet::new();
    let mut hops = Vec::new();

    while !visited.contains(&current) {
        visited.insert(current);

        if let Some(snake) = snakes.iter().find(|s| s.from == current) {
            hops.push(JumpHop {
                from: current,
                to: snake.to,
                kind: JumpKind::Snake,
            });
            last = current;
            current = snake.to;
            continue;
        }

        if let Some(ladder) = ladders.iter().find(|l| l.from == current) {
            hops.push(JumpHop {
                from: current,
                to: ladder.to,
                kind: JumpKind::Ladder,
            });
            last = current;
            current = ladder.to;
            continue;
        }

        return (current, hops);
    }

    (current.min(last), hops)
}

/// Randomly place non-overlapping ladders and snakes on a board.
///
/// Ladders go up (`from < to`), snakes go down (`from > to`), and no
/// link may touch the start cell, the goal cell, or a cell already
/// used by another link. Placement retries random picks up to a fixed
/// attempt budget and reports a configuration error when the board
/// cannot fit the requested counts.
pub fn generate_snakes_and_ladders<R: Rng>(
    board_size: usize,
    snake_count: usize,
    ladder_count: usize,
    rng: &mut R,
) -> Result<(Vec<SnakeOrLadder>, Vec<SnakeOrLadder>), RulesError> {
    // Interior cells only: 0 and board_size - 1 are never endpoints.
    let interior = board_size.saturating_sub(2);
    if 2 * (snake_count + ladder_count) > interior {
        return Err(RulesError::BoardTooSmall {
            board_size,
            snakes: snake_count,
            ladders: ladder_count,
        });
    }

    let mut used: HashSet<CellIndex> = HashSet::new();
    let mut ladders = Vec::with_capacity(ladder_count);
    let mut snakes = Vec::with_capacity(snake_count);
    let mut attempts = GENERATION_ATTEMPTS;

    while ladders.len() < ladder_count {
        attempts = attempts.checked_sub(1).ok_or(RulesError::BoardTooSmall {
            board_size,
            snakes: snake_count,
            ladders: ladder_count,
        })?;
        // `from` must leave room above it for `to`.
        let from = rng.gen_range(1..board_size - 2);
        let to = rng.gen_range(from + 1..board_size - 1);
        if used.contains(&from) || used.contains(&to) {
            continue;
        }
        used.insert(from);
        used.insert(to);
        ladders.push(SnakeOrLadder { from, to });
    }

    while snakes.len() < snake_count {
        attempts = attempts.checked_sub(1).ok_or(RulesError::BoardTooSmall {
            board_size,
            snakes: snake_count,
            ladders: ladder_count,
        })?;
        let from = rng.gen_range(2..board_size - 1);
        let to = rng.gen_range(1..from);
        if used.contains(&from) || used.contains(&to) {
            continue;
        }
        used.insert(from);
        used.insert(to);
        snakes.push(SnakeOrLadder { from, to });
    }

    Ok((snakes, ladders))
}
