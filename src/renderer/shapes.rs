//! Shape tessellation for the board

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Palette, Vertex};
use crate::cell_center;
use crate::consts::{CELL_GAP, CELL_SIZE, PLAYER_RADIUS, TIME_WARN_SECS};
use crate::sim::{Cell, GameState, GameStatus, END_POS};

/// Generate vertices for an axis-aligned filled rectangle (two triangles)
pub fn quad(center: Vec2, half_w: f32, half_h: f32, color: [f32; 4]) -> [Vertex; 6] {
    let a = Vertex::new(center.x - half_w, center.y - half_h, color);
    let b = Vertex::new(center.x + half_w, center.y - half_h, color);
    let c = Vertex::new(center.x + half_w, center.y + half_h, color);
    let d = Vertex::new(center.x - half_w, center.y + half_h, color);
    [a, b, c, a, c, d]
}

/// Generate vertices for a filled circle (triangle fan)
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a diamond (rotated square) marking the goal
pub fn diamond(center: Vec2, radius: f32, color: [f32; 4]) -> [Vertex; 6] {
    let top = Vertex::new(center.x, center.y + radius, color);
    let right = Vertex::new(center.x + radius, center.y, color);
    let bottom = Vertex::new(center.x, center.y - radius, color);
    let left = Vertex::new(center.x - radius, center.y, color);
    [top, right, bottom, top, bottom, left]
}

/// Build the full vertex list for one frame from the game snapshot:
/// cell quads, the goal marker, then the player on top.
pub fn board_vertices(state: &GameState, palette: &Palette) -> Vec<Vertex> {
    let maze = state.maze();
    let half = CELL_SIZE / 2.0 - CELL_GAP / 2.0;

    let mut vertices = Vec::with_capacity(32 * 6);

    for (x, y, cell) in maze.iter_cells() {
        let color = match cell {
            Cell::Open => palette.open_cell,
            Cell::Wall => palette.wall_cell,
        };
        vertices.extend_from_slice(&quad(cell_center(x, y), half, half, color));
    }

    // Goal marker, skipped once the player stands on it (won)
    if state.player != END_POS {
        vertices.extend_from_slice(&diamond(
            cell_center(END_POS.x, END_POS.y),
            half * 0.5,
            palette.goal_cell,
        ));
    }

    let player_color = if state.status == GameStatus::Playing && state.time_left <= TIME_WARN_SECS
    {
        palette.player_warn
    } else {
        palette.player
    };
    vertices.extend(circle(
        cell_center(state.player.x, state.player.y),
        PLAYER_RADIUS,
        player_color,
        24,
    ));

    vertices
}
