//! Game state machine
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Synchronous transitions only (no timers, no scheduling)
//! - Fixed, hand-authored maze data
//! - No rendering or platform dependencies

pub mod maze;
pub mod state;
pub mod tick;

pub use maze::{Cell, Maze, MAZES};
pub use state::{GameEvent, GameState, GameStatus, END_POS, START_POS};
pub use tick::{attempt_move, attempt_move_dir, restart, second_tick, Direction};
