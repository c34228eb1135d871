//! Game state aggregate and observable events

use glam::IVec2;

use super::maze::{Maze, MAZES};
use crate::consts::LEVEL_TIME_SECS;

/// Where every level starts
pub const START_POS: IVec2 = IVec2::new(0, 0);
/// The goal cell of every level
pub const END_POS: IVec2 = IVec2::new(4, 4);

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Accepting moves, countdown running
    Playing,
    /// Final maze cleared
    Won,
    /// Countdown hit zero
    Lost,
}

/// Fire-and-forget signal emitted by a move attempt, consumed by the
/// audio/presentation shell. Carries no payload and mutates nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player stepped onto an open cell
    Moved,
    /// Move rejected by a wall or the board edge
    WallHit,
    /// Goal cell reached (fires for the final maze too)
    LevelCleared,
}

/// Complete game state. Mutated only through the operations in
/// [`super::tick`]; the active maze is always derived from `level` so the
/// two can never diverge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Index into [`MAZES`], 0-based
    pub level: usize,
    /// Player cell; invariant: always open and in bounds
    pub player: IVec2,
    pub status: GameStatus,
    /// Whole seconds remaining in the current level
    pub time_left: u32,
}

impl GameState {
    /// Fresh run: level 0, player at start, full clock
    pub fn new() -> Self {
        Self {
            level: 0,
            player: START_POS,
            status: GameStatus::Playing,
            time_left: LEVEL_TIME_SECS,
        }
    }

    /// The maze for the current level
    pub fn maze(&self) -> &'static Maze {
        &MAZES[self.level]
    }

    /// True once the run has ended, either way
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
