//! Data-driven game balance
//!
//! Every field has a default so a JSON override only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, GameResult};
use crate::persistence;

/// How much decorative scenery the scene generator places
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDensity {
    pub trees: u32,
    pub clouds: u32,
    /// Parallax hill layers (1..=3)
    pub hill_layers: u32,
}

impl Default for SceneDensity {
    fn default() -> Self {
        Self {
            trees: 6,
            clouds: 5,
            hill_layers: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Player
    pub move_speed: f32,
    pub depth_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub max_health: u8,
    /// Invulnerability after a hit (seconds)
    pub invuln: f32,

    // Enemy
    pub enemy_health: u8,
    pub enemy_speed: f32,
    pub enemy_patrol_span: f32,
    pub fire_interval: f32,
    pub projectile_speed: f32,
    pub projectile_damage: u8,
    pub enemy_respawn: f32,
    pub hit_flash: f32,

    // Shockwave ability
    pub ability_duration: f32,
    pub ability_cooldown: f32,
    pub ability_radius: f32,

    // Scenery
    pub cloud_speed: f32,
    pub parallax_factor: f32,
    pub density: SceneDensity,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 300.0,
            depth_speed: 180.0,
            jump_speed: 720.0,
            gravity: 1800.0,
            max_health: 5,
            invuln: 1.0,

            enemy_health: 3,
            enemy_speed: 60.0,
            enemy_patrol_span: 120.0,
            fire_interval: 2.0,
            projectile_speed: 300.0,
            projectile_damage: 1,
            enemy_respawn: 3.0,
            hit_flash: 0.15,

            ability_duration: 0.4,
            ability_cooldown: 5.0,
            ability_radius: 160.0,

            cloud_speed: 15.0,
            parallax_factor: 0.1,
            density: SceneDensity::default(),
        }
    }
}

impl Tuning {
    /// LocalStorage key for a balance override
    pub const STORAGE_KEY: &'static str = "gannons_quest_tuning";

    /// Stored override if present and valid, defaults otherwise
    pub fn load() -> Self {
        let loaded = persistence::load_json::<Tuning>(Self::STORAGE_KEY)
            .and_then(|t| t.map(|t| t.validate().map(|()| t)).transpose());
        match loaded {
            Ok(Some(tuning)) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                if let Err(e) = persistence::remove(Self::STORAGE_KEY) {
                    log::warn!("Stale tuning override left in storage: {}", e);
                }
                Self::default()
            }
        }
    }

    /// Parse a (partial) JSON override and validate it
    pub fn from_json(json: &str) -> GameResult<Self> {
        let tuning: Tuning = serde_json::from_str(json).map_err(GameError::Tuning)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> GameResult<()> {
        if self.max_health == 0 {
            return Err(GameError::TuningRange("max_health must be at least 1".into()));
        }
        if self.enemy_health == 0 {
            return Err(GameError::TuningRange("enemy_health must be at least 1".into()));
        }
        if self.ability_duration <= 0.0 {
            return Err(GameError::TuningRange("ability_duration must be positive".into()));
        }
        if self.fire_interval <= 0.0 {
            return Err(GameError::TuningRange("fire_interval must be positive".into()));
        }
        if !self.gravity.is_finite() || self.gravity <= 0.0 {
            return Err(GameError::TuningRange("gravity must be positive".into()));
        }
        if !self.ability_radius.is_finite() || self.ability_radius <= 0.0 {
            return Err(GameError::TuningRange("ability_radius must be positive".into()));
        }
        let non_negative = [
            ("move_speed", self.move_speed),
            ("depth_speed", self.depth_speed),
            ("jump_speed", self.jump_speed),
            ("invuln", self.invuln),
            ("enemy_speed", self.enemy_speed),
            ("enemy_patrol_span", self.enemy_patrol_span),
            ("projectile_speed", self.projectile_speed),
            ("enemy_respawn", self.enemy_respawn),
            ("hit_flash", self.hit_flash),
            ("ability_cooldown", self.ability_cooldown),
            ("cloud_speed", self.cloud_speed),
            ("parallax_factor", self.parallax_factor),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(GameError::TuningRange(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(1..=3).contains(&self.density.hill_layers) {
            return Err(GameError::TuningRange(format!(
                "hill_layers must be 1..=3, got {}",
                self.density.hill_layers
            )));
        }
        Ok(())
    }
}
