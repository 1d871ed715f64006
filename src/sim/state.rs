//! Game state and core simulation types
//!
//! Everything the tick needs lives here; `GameState` is plain data and serializable.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;
use crate::{Rect, secs_to_ticks};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player ran out of health
    GameOver,
}

/// The player-controlled mannequin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left of the body rect, on the ground (not raised by `lift`)
    pub pos: Vec2,
    pub vel: Vec2,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    /// Height above the ground while hopping
    pub lift: f32,
    pub lift_vel: f32,
    pub health: u8,
    pub max_health: u8,
    pub invuln_ticks: u32,
}

impl Player {
    pub fn new(pos: Vec2, max_health: u8) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            facing: 1.0,
            lift: 0.0,
            lift_vel: 0.0,
            health: max_health,
            max_health,
            invuln_ticks: 0,
        }
    }

    /// Feet box used against rocks and the walkable band
    pub fn footprint(&self) -> Rect {
        footprint_at(self.pos)
    }

    /// Body rect raised by the current hop, used for projectiles and pickups
    pub fn hitbox(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y - self.lift, BODY_WIDTH, BODY_HEIGHT)
    }

    pub fn chest(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + CHEST_OFFSET_X,
            self.pos.y + CHEST_OFFSET_Y - self.lift,
        )
    }

    pub fn grounded(&self) -> bool {
        self.lift <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Apply damage unless invulnerable. Returns true if it landed.
    pub fn take_hit(&mut self, damage: u8, invuln_ticks: u32) -> bool {
        if self.invuln_ticks > 0 || !self.is_alive() {
            return false;
        }
        self.health = self.health.saturating_sub(damage);
        self.invuln_ticks = invuln_ticks;
        true
    }

    /// Heal by one, capped at max. Returns false when already full.
    pub fn heal(&mut self) -> bool {
        if self.health >= self.max_health {
            return false;
        }
        self.health += 1;
        true
    }
}

/// Footprint of a 40x100 body whose top-left is `pos`
pub fn footprint_at(pos: Vec2) -> Rect {
    Rect::new(
        pos.x,
        pos.y + BODY_HEIGHT - FOOT_HEIGHT,
        BODY_WIDTH,
        FOOT_HEIGHT,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObstacleKind {
    #[default]
    Rock,
}

/// A static obstacle; `rect` is its ground footprint and its front face
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub rect: Rect,
    pub kind: ObstacleKind,
}

/// A patrolling enemy that shoots at the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Top-left of the body rect
    pub pos: Vec2,
    pub health: u8,
    /// +1 walking right, -1 walking left
    pub patrol_dir: f32,
    pub patrol_min: f32,
    pub patrol_max: f32,
    /// Ticks until the next shot
    pub fire_ticks: u32,
    /// Ticks left of the hit flash
    pub flash_ticks: u32,
}

impl Enemy {
    pub fn body(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BODY_WIDTH, BODY_HEIGHT)
    }

    pub fn footprint(&self) -> Rect {
        footprint_at(self.pos)
    }

    pub fn chest(&self) -> Vec2 {
        self.pos + Vec2::new(CHEST_OFFSET_X, CHEST_OFFSET_Y)
    }
}

/// An enemy projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub active: bool,
}

/// A floating heart that restores one health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    /// `x` is the horizontal center, `y` the top
    pub pos: Vec2,
}

impl Heart {
    /// Ground point under the heart, used for depth sorting
    pub fn ground_y(&self) -> f32 {
        self.pos.y + BODY_HEIGHT / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.pos.x - HEART_SIZE / 2.0,
            self.pos.y,
            HEART_SIZE,
            HEART_SIZE,
        )
    }
}

/// The shockwave special ability
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ability {
    /// Ticks left of the current expansion (0 = inactive)
    pub active_ticks: u32,
    /// Ticks until it can be used again
    pub cooldown_ticks: u32,
    pub center: Vec2,
    pub radius: f32,
    /// Enemies already damaged by this activation
    pub hit_enemies: Vec<u32>,
}

impl Ability {
    pub fn is_active(&self) -> bool {
        self.active_ticks > 0
    }

    pub fn ready(&self) -> bool {
        self.cooldown_ticks == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cloud {
    pub pos: Vec2,
    pub size: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub x: f32,
    /// Ground line the trunk stands on
    pub base_y: f32,
    pub trunk_w: f32,
    pub trunk_h: f32,
    pub foliage: f32,
}

/// A scrolling band of hills drawn behind the ground
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HillLayer {
    /// Scroll offset, kept in (-width, 0]
    pub offset: f32,
    /// Base scroll speed (px/s)
    pub speed: f32,
    /// How far above the ground line the hills sit
    pub elevation: f32,
    pub color: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenery {
    pub clouds: Vec<Cloud>,
    pub trees: Vec<Tree>,
    /// Far layer first
    pub layers: Vec<HillLayer>,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
    /// Number of respawns drawn so far; mixed into the respawn seed
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed, stream: 0 }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }

    /// Fresh generator for the next draw; advances the stream
    pub fn next_rng(&mut self) -> Pcg32 {
        self.stream += 1;
        Pcg32::seed_from_u64(self.seed ^ self.stream.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng_state: RngState,
    pub tuning: Tuning,
    /// Viewport size in pixels
    pub bounds: Vec2,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub hearts: Vec<Heart>,
    pub ability: Ability,
    pub scenery: Scenery,
    /// Enemies defeated this run
    pub kills: u32,
    /// Ticks until a replacement enemy spawns (0 = none pending)
    pub respawn_ticks: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game with a freshly generated scene
    pub fn new(seed: u64, bounds: Vec2, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            rng_state: RngState::new(seed),
            player: Player::new(Vec2::ZERO, tuning.max_health),
            tuning,
            bounds,
            phase: GamePhase::Playing,
            time_ticks: 0,
            obstacles: Vec::new(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            hearts: Vec::new(),
            ability: Ability::default(),
            scenery: Scenery::default(),
            kills: 0,
            respawn_ticks: 0,
            next_id: 1,
        };

        super::scene::generate(&mut state);

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Top of the walkable ground band
    pub fn ground_top(&self) -> f32 {
        self.bounds.y * GROUND_TOP_FRACTION
    }

    /// Build a new enemy with the tuning's stats, patrolling around `pos.x`
    pub fn make_enemy(&mut self, pos: Vec2) -> Enemy {
        let span = self.tuning.enemy_patrol_span;
        let max_x = (self.bounds.x - BODY_WIDTH).max(0.0);
        Enemy {
            id: self.next_entity_id(),
            pos,
            health: self.tuning.enemy_health,
            patrol_dir: -1.0,
            patrol_min: (pos.x - span).clamp(0.0, max_x),
            patrol_max: (pos.x + span).clamp(0.0, max_x),
            fire_ticks: secs_to_ticks(self.tuning.fire_interval),
            flash_ticks: 0,
        }
    }

    /// Viewport changed: keep the player inside the walkable band
    pub fn resize(&mut self, bounds: Vec2) {
        log::info!(
            "Viewport resized {}x{} -> {}x{}",
            self.bounds.x,
            self.bounds.y,
            bounds.x,
            bounds.y
        );
        self.bounds = bounds;
        let ground_top = self.ground_top();
        self.player.pos = super::collision::clamp_to_band(self.player.pos, bounds, ground_top);
        for enemy in &mut self.enemies {
            enemy.pos = super::collision::clamp_to_band(enemy.pos, bounds, ground_top);
            let max_x = (bounds.x - BODY_WIDTH).max(0.0);
            enemy.patrol_min = enemy.patrol_min.min(max_x);
            enemy.patrol_max = enemy.patrol_max.min(max_x);
        }
    }

    /// Ensure entities are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.obstacles.sort_by_key(|o| o.id);
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
        self.hearts.sort_by_key(|h| h.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_respects_invulnerability() {
        let mut p = Player::new(Vec2::ZERO, 5);
        assert!(p.take_hit(1, 120));
        assert_eq!(p.health, 4);
        assert!(!p.take_hit(1, 120));
        assert_eq!(p.health, 4);
        p.invuln_ticks = 0;
        assert!(p.take_hit(10, 120));
        assert_eq!(p.health, 0);
        assert!(!p.is_alive());
    }

    #[test]
    fn heal_caps_at_max() {
        let mut p = Player::new(Vec2::ZERO, 2);
        assert!(!p.heal());
        p.health = 1;
        assert!(p.heal());
        assert_eq!(p.health, 2);
    }

    #[test]
    fn hitbox_rises_with_lift_but_footprint_does_not() {
        let mut p = Player::new(Vec2::new(10.0, 300.0), 5);
        p.lift = 30.0;
        assert_eq!(p.hitbox().y, 270.0);
        assert_eq!(p.footprint().y, 300.0 + BODY_HEIGHT - FOOT_HEIGHT);
    }

    #[test]
    fn new_state_is_sorted_and_populated() {
        let state = GameState::new(7, Vec2::new(1280.0, 720.0), Tuning::default());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.hearts.len(), 2);
        assert!(state.obstacles.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(state.player.health, state.tuning.max_health);
    }

    #[test]
    fn resize_clamps_player_into_band() {
        let mut state = GameState::new(7, Vec2::new(1280.0, 720.0), Tuning::default());
        state.player.pos = Vec2::new(1200.0, 600.0);
        state.resize(Vec2::new(800.0, 500.0));
        let feet = state.player.footprint();
        assert!(feet.right() <= 800.0);
        assert!(feet.bottom() <= 500.0);
        assert!(feet.y >= state.ground_top());
    }
}
