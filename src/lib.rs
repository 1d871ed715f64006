//! Gannon's Quest - a 2.5D browser action game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, projectiles, game state)
//! - `renderer`: Immediate-mode draw list, tessellation and the WebGPU pipeline
//! - `platform`: Keyboard mapping into simulation input
//! - `persistence`: JSON over LocalStorage
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, GameResult};
pub use settings::{QualityPreset, Settings};
pub use tuning::Tuning;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Fraction of the viewport height where the walkable ground starts
    pub const GROUND_TOP_FRACTION: f32 = 0.45;

    /// Player / enemy body
    pub const BODY_WIDTH: f32 = 40.0;
    pub const BODY_HEIGHT: f32 = 100.0;
    /// Feet box at the bottom of the body, used against rocks
    pub const FOOT_HEIGHT: f32 = 20.0;
    /// Chest offset from the body's top-left (projectile origin / aim point)
    pub const CHEST_OFFSET_X: f32 = BODY_WIDTH / 2.0;
    pub const CHEST_OFFSET_Y: f32 = 35.0;

    pub const PROJECTILE_RADIUS: f32 = 10.0;
    /// Projectiles fly at chest height; their ground shadow sits this far below
    pub const PROJECTILE_SHADOW_DROP: f32 = 50.0;

    pub const HEART_SIZE: f32 = 20.0;

    /// Visual depth of the rock's extruded faces
    pub const ROCK_DEPTH: f32 = 20.0;
}

/// Axis-aligned rectangle in screen pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap test - rects sharing an edge do not intersect
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    /// Circle overlap via the closest point on the rect
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = Vec2::new(
            center.x.clamp(self.x, self.right()),
            center.y.clamp(self.y, self.bottom()),
        );
        closest.distance_squared(center) < radius * radius
    }

    /// Same rect shifted by an offset
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.x + offset.x, self.y + offset.y, self.w, self.h)
    }
}

/// Convert a duration in seconds to whole simulation ticks
#[inline]
pub fn secs_to_ticks(secs: f32) -> u32 {
    (secs / consts::SIM_DT).round().max(0.0) as u32
}
