//! Vertex types and palette for 2D rendering

use bytemuck::{Pod, Zeroable};

/// RGBA, each channel 0-1
pub type Color = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Color,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Color) -> Self {
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

/// Opaque color from a 0xRRGGBB literal
pub const fn hex(rgb: u32) -> Color {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        1.0,
    ]
}

/// Same color with a different alpha
pub const fn with_alpha(color: Color, alpha: f32) -> Color {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    use super::{Color, hex, with_alpha};

    pub const SKY: Color = hex(0x87CEEB);
    pub const GROUND: Color = hex(0x4CAF50);
    pub const CLOUD: Color = hex(0xE0E0E0);
    pub const CLOUD_CORE: Color = hex(0xFFFFFF);

    pub const SHADOW: Color = [0.0, 0.0, 0.0, 0.3];
    pub const TREE_SHADOW: Color = [0.0, 0.0, 0.0, 0.2];
    pub const TRUNK: Color = hex(0x8B4513);
    pub const TRUNK_DARK: Color = hex(0x5D2906);
    pub const FOLIAGE: Color = hex(0x006400);
    pub const FOLIAGE_LIGHT: Color = hex(0x32CD32);

    pub const ROCK_FRONT: Color = hex(0x808080);
    pub const ROCK_TOP: Color = hex(0xA0A0A0);
    pub const ROCK_SIDE: Color = hex(0x505050);
    pub const ROCK_EDGE: Color = hex(0x606060);

    pub const MANNEQUIN: Color = hex(0x333333);
    pub const ENEMY: Color = hex(0x8B1A1A);
    pub const HIT_FLASH: Color = hex(0xFFFFFF);

    pub const HEART: Color = hex(0xFF0000);
    pub const HEART_SHINE: Color = [1.0, 1.0, 1.0, 0.5];

    pub const PROJECTILE: Color = hex(0x00FFFF);
    pub const PROJECTILE_GLOW: Color = with_alpha(hex(0x0000FF), 0.35);

    pub const SHOCKWAVE: Color = [1.0, 0.95, 0.6, 0.8];
    pub const SHOCKWAVE_FILL: Color = [1.0, 0.95, 0.6, 0.15];

    pub const PIP_EMPTY: Color = hex(0x9E9E9E);
    pub const METER_BACK: Color = [0.0, 0.0, 0.0, 0.4];
    pub const METER_READY: Color = hex(0xFFD54F);
    pub const METER_CHARGING: Color = hex(0x90A4AE);

    pub const OVERLAY: Color = [0.0, 0.0, 0.0, 0.45];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(hex(0xFF0000), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hex(0x000000), [0.0, 0.0, 0.0, 1.0]);
        let c = hex(0x4CAF50);
        assert!((c[1] - 175.0 / 255.0).abs() < 1e-6);
    }
}
