//! Maze Dash - a timed 5x5 grid-maze game
//!
//! Core modules:
//! - `sim`: Game state machine (move validation, win/loss, countdown)
//! - `renderer`: WebGPU board rendering
//! - `audio`: Procedural sound cues via Web Audio
//! - `settings`: User preferences (volume, palette)

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Board is GRID_SIZE x GRID_SIZE cells
    pub const GRID_SIZE: i32 = 5;

    /// Seconds granted per level
    pub const LEVEL_TIME_SECS: u32 = 30;
    /// Seconds left at which the HUD and player marker switch to the warning look
    pub const TIME_WARN_SECS: u32 = 10;

    /// Board half-extent in board-space units (origin at board center)
    pub const BOARD_EXTENT: f32 = 400.0;
    /// Side length of one cell in board space
    pub const CELL_SIZE: f32 = 2.0 * BOARD_EXTENT / GRID_SIZE as f32;
    /// Gap between cells (grid line thickness)
    pub const CELL_GAP: f32 = 6.0;
    /// Player marker radius
    pub const PLAYER_RADIUS: f32 = CELL_SIZE * 0.3;
}

/// Center of a grid cell in board space.
///
/// Grid y grows downward (row index); board-space y grows upward, so rows
/// are flipped here.
#[inline]
pub fn cell_center(x: i32, y: i32) -> Vec2 {
    use consts::{BOARD_EXTENT, CELL_SIZE};
    Vec2::new(
        -BOARD_EXTENT + (x as f32 + 0.5) * CELL_SIZE,
        BOARD_EXTENT - (y as f32 + 0.5) * CELL_SIZE,
    )
}
