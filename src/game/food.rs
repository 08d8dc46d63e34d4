//! Food placement
//!
//! Food goes on a random free cell. Random draws are tried first; when they
//! keep missing (a crowded board) the grid is scanned in row-major order so
//! spawning never stalls. Food never lands on a blocked cell.

use std::collections::HashSet;

use rand::{Rng, RngCore};

use super::maze::Maze;
use super::state::Position;
use crate::error::GameError;

/// Lower bound on random draws before falling back to a scan
pub const MIN_SPAWN_ATTEMPTS: usize = 100;

fn is_preferred(pos: Position, occupied: &HashSet<Position>, maze: &Maze) -> bool {
    !occupied.contains(&pos) && !maze.is_blocked(pos) && !maze.is_isolated(pos)
}

/// Pick a cell for the next food item, or `None` if the board is full
pub fn spawn(
    grid_size: usize,
    occupied: &HashSet<Position>,
    maze: &Maze,
    rng: &mut dyn RngCore,
) -> Option<Position> {
    let area = grid_size * grid_size;
    if occupied.len() >= area {
        return None;
    }

    let attempts = MIN_SPAWN_ATTEMPTS.max(area);
    for _ in 0..attempts {
        let pos = Position::new(
            rng.gen_range(0..grid_size) as i32,
            rng.gen_range(0..grid_size) as i32,
        );
        if is_preferred(pos, occupied, maze) {
            return Some(pos);
        }
    }

    let cells = || {
        (0..grid_size as i32).flat_map(|y| (0..grid_size as i32).map(move |x| Position::new(x, y)))
    };

    cells()
        .find(|pos| is_preferred(*pos, occupied, maze))
        .or_else(|| cells().find(|pos| !occupied.contains(pos) && !maze.is_blocked(*pos)))
}

/// Same as [`spawn`] but reports a full board as an error
pub fn spawn_or_err(
    grid_size: usize,
    occupied: &HashSet<Position>,
    maze: &Maze,
    rng: &mut dyn RngCore,
) -> Result<Position, GameError> {
    spawn(grid_size, occupied, maze, rng).ok_or(GameError::NoAvailablePosition)
}
