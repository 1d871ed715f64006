//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod scene;
pub mod state;
pub mod tick;

pub use collision::{MoveResult, clamp_to_band, move_body, resolve_axis_x, resolve_axis_y};
pub use state::{
    Ability, Cloud, Enemy, GamePhase, GameState, Heart, HillLayer, Obstacle, ObstacleKind, Player,
    Projectile, Scenery, Tree,
};
pub use tick::{TickInput, restart, tick};
