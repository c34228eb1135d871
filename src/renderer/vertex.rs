//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Board palette, normal and high-contrast variants
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: [f32; 4],
    pub open_cell: [f32; 4],
    pub wall_cell: [f32; 4],
    pub goal_cell: [f32; 4],
    pub player: [f32; 4],
    pub player_warn: [f32; 4],
}

pub const PALETTE: Palette = Palette {
    background: [0.02, 0.02, 0.05, 1.0],
    open_cell: [0.12, 0.13, 0.2, 1.0],
    wall_cell: [0.3, 0.3, 0.4, 1.0],
    goal_cell: [0.9, 0.75, 0.2, 1.0],
    player: [0.2, 0.8, 0.4, 1.0],
    player_warn: [1.0, 0.4, 0.2, 1.0],
};

pub const PALETTE_HIGH_CONTRAST: Palette = Palette {
    background: [0.0, 0.0, 0.0, 1.0],
    open_cell: [0.1, 0.1, 0.1, 1.0],
    wall_cell: [0.95, 0.95, 0.95, 1.0],
    goal_cell: [1.0, 0.9, 0.0, 1.0],
    player: [0.0, 1.0, 0.4, 1.0],
    player_warn: [1.0, 0.2, 0.0, 1.0],
};

impl Palette {
    pub fn for_settings(high_contrast: bool) -> &'static Palette {
        if high_contrast {
            &PALETTE_HIGH_CONTRAST
        } else {
            &PALETTE
        }
    }
}
