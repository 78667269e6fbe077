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

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.059, 0.059, 0.086, 1.0];
    pub const ROAD: [f32; 4] = [0.067, 0.067, 0.133, 1.0];
    pub const LANE_LINE: [f32; 4] = [1.0, 1.0, 1.0, 0.35];

    pub const PLAYER_BODY: [f32; 4] = [0.949, 0.949, 0.961, 1.0];
    pub const PLAYER_GLASS: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const PLAYER_TAIL: [f32; 4] = [1.0, 0.176, 0.333, 0.9];

    pub const CONE: [f32; 4] = [1.0, 0.647, 0.0, 0.95];
    pub const CONE_STRIPE: [f32; 4] = [1.0, 1.0, 1.0, 0.55];
    pub const BARRIER: [f32; 4] = [0.22, 0.741, 0.973, 0.9];
    pub const BARRIER_INSET: [f32; 4] = [0.0, 0.0, 0.0, 0.28];
    pub const SLICK: [f32; 4] = [1.0, 0.176, 0.333, 0.65];

    pub const CHASER: [f32; 4] = [1.0, 0.176, 0.333, 0.95];
    pub const CHASER_GLOW: [f32; 4] = [1.0, 0.176, 0.333, 0.21];
    pub const CHASER_DOT: [f32; 4] = [1.0, 1.0, 1.0, 0.85];
    /// Warning tint base; alpha is scaled by how close the chaser is
    pub const WARNING_TINT: [f32; 3] = [1.0, 0.176, 0.333];

    pub const BAR_TRACK: [f32; 4] = [1.0, 1.0, 1.0, 0.07];
    pub const BAR_FILL: [f32; 4] = [1.0, 0.176, 0.333, 0.6];

    pub const VIGNETTE: [f32; 3] = [0.0, 0.0, 0.0];
}
