//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::collision::{move_body, projectile_hits_rect, projectile_out_of_bounds};
use super::scene::random_ground_spot;
use super::state::{GamePhase, GameState, Heart, Projectile};
use crate::consts::*;
use crate::secs_to_ticks;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held directions
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Hop (one-shot)
    pub jump: bool,
    /// Shockwave (one-shot)
    pub special: bool,
    /// Pause toggle (one-shot)
    pub pause: bool,
    /// Start over after game over (one-shot)
    pub restart: bool,
}

impl TickInput {
    /// Direction the held keys point in, components in {-1, 0, 1}
    pub fn axis(&self) -> Vec2 {
        let x = (self.right as i32 - self.left as i32) as f32;
        let y = (self.down as i32 - self.up as i32) as f32;
        Vec2::new(x, y)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                log::info!("Paused");
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                log::info!("Resumed");
                state.phase = GamePhase::Playing;
            }
            GamePhase::GameOver => {}
        }
    }

    if input.restart && state.phase == GamePhase::GameOver {
        restart(state);
        return;
    }

    // Don't tick if paused or game over
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    update_player(state, input, dt);
    update_ability(state, input);
    update_enemies(state, dt);
    update_projectiles(state, dt);
    collect_hearts(state);
    resolve_defeats(state);
    update_scenery(state, dt);

    if !state.player.is_alive() {
        log::info!(
            "Game over after {:.1}s with {} kills",
            state.time_ticks as f32 * SIM_DT,
            state.kills
        );
        state.phase = GamePhase::GameOver;
    }

    // Ensure deterministic ordering
    state.normalize_order();
}

/// Start a new run in the same viewport with the next seed
pub fn restart(state: &mut GameState) {
    let seed = state.seed.wrapping_add(1);
    log::info!("Restarting with seed {}", seed);
    *state = GameState::new(seed, state.bounds, state.tuning.clone());
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let tuning = &state.tuning;
    let axis = input.axis();
    let player = &mut state.player;

    player.vel = Vec2::new(axis.x * tuning.move_speed, axis.y * tuning.depth_speed);
    if axis.x != 0.0 {
        player.facing = axis.x;
    }

    let ground_top = state.bounds.y * GROUND_TOP_FRACTION;
    let moved = move_body(
        player.pos,
        player.vel * dt,
        state.bounds,
        ground_top,
        &state.obstacles,
    );
    player.pos = moved.pos;

    // Hop: vertical lift with gravity, independent of the ground position
    if input.jump && player.grounded() {
        player.lift_vel = tuning.jump_speed;
    }
    player.lift_vel -= tuning.gravity * dt;
    player.lift += player.lift_vel * dt;
    if player.lift <= 0.0 {
        player.lift = 0.0;
        player.lift_vel = 0.0;
    }

    player.invuln_ticks = player.invuln_ticks.saturating_sub(1);
}

fn update_ability(state: &mut GameState, input: &TickInput) {
    let duration_ticks = secs_to_ticks(state.tuning.ability_duration).max(1);
    let ability = &mut state.ability;

    ability.cooldown_ticks = ability.cooldown_ticks.saturating_sub(1);

    if input.special && ability.ready() && state.player.is_alive() {
        ability.active_ticks = duration_ticks;
        ability.cooldown_ticks = secs_to_ticks(state.tuning.ability_cooldown);
        ability.center = state.player.footprint().center();
        ability.radius = 0.0;
        ability.hit_enemies.clear();
        log::debug!("Shockwave at ({:.0}, {:.0})", ability.center.x, ability.center.y);
    }

    if !ability.is_active() {
        return;
    }

    ability.active_ticks -= 1;
    let progress = 1.0 - ability.active_ticks as f32 / duration_ticks as f32;
    ability.radius = state.tuning.ability_radius * progress;

    let center = ability.center;
    let radius = ability.radius;

    for projectile in &mut state.projectiles {
        if projectile.pos.distance(center) <= radius + projectile.radius {
            projectile.active = false;
        }
    }

    let flash_ticks = secs_to_ticks(state.tuning.hit_flash);
    for enemy in &mut state.enemies {
        if enemy.health == 0 || ability.hit_enemies.contains(&enemy.id) {
            continue;
        }
        if enemy.body().intersects_circle(center, radius) {
            enemy.health -= 1;
            enemy.flash_ticks = flash_ticks;
            ability.hit_enemies.push(enemy.id);
            log::debug!("Shockwave hit enemy {} ({} hp left)", enemy.id, enemy.health);
        }
    }

    if !ability.is_active() {
        ability.radius = 0.0;
    }
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let ground_top = state.ground_top();
    let fire_interval = secs_to_ticks(state.tuning.fire_interval).max(1);
    let target = state.player.chest();
    let mut shots: Vec<(Vec2, Vec2)> = Vec::new();

    for enemy in &mut state.enemies {
        enemy.flash_ticks = enemy.flash_ticks.saturating_sub(1);

        // Patrol back and forth, turning at the ends or at a rock
        let dx = enemy.patrol_dir * state.tuning.enemy_speed * dt;
        let moved = move_body(
            enemy.pos,
            Vec2::new(dx, 0.0),
            state.bounds,
            ground_top,
            &state.obstacles,
        );
        enemy.pos = moved.pos;
        if moved.blocked_x
            || (enemy.patrol_dir > 0.0 && enemy.pos.x >= enemy.patrol_max)
            || (enemy.patrol_dir < 0.0 && enemy.pos.x <= enemy.patrol_min)
        {
            enemy.patrol_dir = -enemy.patrol_dir;
        }

        enemy.fire_ticks = enemy.fire_ticks.saturating_sub(1);
        if enemy.fire_ticks == 0 {
            enemy.fire_ticks = fire_interval;
            let origin = enemy.chest();
            let dir = (target - origin).normalize_or_zero();
            if dir != Vec2::ZERO {
                shots.push((origin, dir * state.tuning.projectile_speed));
            }
        }
    }

    for (pos, vel) in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            active: true,
        });
    }
}

fn update_projectiles(state: &mut GameState, dt: f32) {
    let invuln_ticks = secs_to_ticks(state.tuning.invuln);
    let damage = state.tuning.projectile_damage;

    for projectile in &mut state.projectiles {
        if !projectile.active {
            continue;
        }
        projectile.pos += projectile.vel * dt;

        if projectile_out_of_bounds(projectile, state.bounds)
            || state
                .obstacles
                .iter()
                .any(|o| projectile_hits_rect(projectile, &o.rect))
        {
            projectile.active = false;
            continue;
        }

        // Invulnerable players let projectiles fly through
        if state.player.invuln_ticks == 0
            && projectile_hits_rect(projectile, &state.player.hitbox())
            && state.player.take_hit(damage, invuln_ticks)
        {
            log::debug!("Player hit, {} health left", state.player.health);
            projectile.active = false;
        }
    }

    state.projectiles.retain(|p| p.active);
}

fn collect_hearts(state: &mut GameState) {
    let hitbox = state.player.hitbox();
    let player = &mut state.player;
    state.hearts.retain(|heart| {
        // At full health hearts stay put
        !(heart.rect().intersects(&hitbox) && player.heal())
    });
}

fn resolve_defeats(state: &mut GameState) {
    let mut drops = Vec::new();
    state.enemies.retain(|enemy| {
        if enemy.health == 0 {
            drops.push(enemy.pos + Vec2::new(BODY_WIDTH / 2.0, BODY_HEIGHT / 2.0));
            false
        } else {
            true
        }
    });

    for pos in drops {
        state.kills += 1;
        log::info!("Enemy defeated ({} total)", state.kills);
        let id = state.next_entity_id();
        state.hearts.push(Heart { id, pos });
    }

    if state.enemies.is_empty() {
        if state.respawn_ticks == 0 {
            state.respawn_ticks = secs_to_ticks(state.tuning.enemy_respawn).max(1);
        } else {
            state.respawn_ticks -= 1;
            if state.respawn_ticks == 0 {
                let mut rng = state.rng_state.next_rng();
                let pos = random_ground_spot(state, &mut rng, state.bounds.x * 0.5);
                let enemy = state.make_enemy(pos);
                log::info!("Enemy {} spawned at ({:.0}, {:.0})", enemy.id, pos.x, pos.y);
                state.enemies.push(enemy);
            }
        }
    }
}

fn update_scenery(state: &mut GameState, dt: f32) {
    let width = state.bounds.x.max(1.0);

    for cloud in &mut state.scenery.clouds {
        cloud.pos.x -= state.tuning.cloud_speed * dt;
        // Cloud spans roughly 2.6x its size to the right of its anchor
        if cloud.pos.x + cloud.size * 2.6 < 0.0 {
            cloud.pos.x = width + cloud.size;
        }
    }

    let player_dx = state.player.vel.x * state.tuning.parallax_factor;
    for layer in &mut state.scenery.layers {
        layer.offset = wrap_offset(layer.offset - (layer.speed + player_dx) * dt, width);
    }
}

/// Wrap a scroll offset into (-width, 0]
pub fn wrap_offset(offset: f32, width: f32) -> f32 {
    let wrapped = offset.rem_euclid(width);
    if wrapped == 0.0 { 0.0 } else { wrapped - width }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rect;
    use crate::sim::state::{Obstacle, ObstacleKind};
    use crate::tuning::Tuning;

    const BOUNDS: Vec2 = Vec2::new(1280.0, 720.0);

    /// A scene with nothing in it but the player
    fn empty_state() -> GameState {
        let mut state = GameState::new(12345, BOUNDS, Tuning::default());
        state.obstacles.clear();
        state.enemies.clear();
        state.hearts.clear();
        state.projectiles.clear();
        // Keep the empty scene from spawning a replacement enemy
        state.respawn_ticks = u32::MAX;
        state.player.pos = Vec2::new(100.0, 400.0);
        state
    }

    fn held(f: impl FnOnce(&mut TickInput)) -> TickInput {
        let mut input = TickInput::default();
        f(&mut input);
        input
    }

    fn spawn_projectile(state: &mut GameState, pos: Vec2, vel: Vec2) {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            active: true,
        });
    }

    #[test]
    fn test_tick_pause() {
        let mut state = empty_state();
        let pause = held(|i| i.pause = true);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);
        let ticks = state.time_ticks;

        // Paused: nothing advances
        tick(&mut state, &held(|i| i.right = true), SIM_DT);
        assert_eq!(state.time_ticks, ticks);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn walking_moves_at_tuned_speed() {
        let mut state = empty_state();
        let start = state.player.pos;
        let right = held(|i| i.right = true);
        for _ in 0..120 {
            tick(&mut state, &right, SIM_DT);
        }
        assert!((state.player.pos.x - start.x - 300.0).abs() < 0.5);
        assert_eq!(state.player.pos.y, start.y);
        assert_eq!(state.player.facing, 1.0);

        let up = held(|i| i.up = true);
        tick(&mut state, &up, SIM_DT);
        assert!(state.player.pos.y < start.y);
    }

    #[test]
    fn rock_blocks_walking() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        // Rock directly to the right of the feet
        let feet = state.player.footprint();
        state.obstacles.push(Obstacle {
            id,
            rect: Rect::new(feet.right() + 10.0, feet.y - 10.0, 60.0, 40.0),
            kind: ObstacleKind::Rock,
        });
        let right = held(|i| i.right = true);
        for _ in 0..60 {
            tick(&mut state, &right, SIM_DT);
        }
        assert!((state.player.footprint().right() - (feet.right() + 10.0)).abs() < 0.01);
    }

    #[test]
    fn hop_rises_and_lands() {
        let mut state = empty_state();
        tick(&mut state, &held(|i| i.jump = true), SIM_DT);
        assert!(state.player.lift > 0.0);

        // Mid-air jump presses are ignored
        let lift_vel = state.player.lift_vel;
        tick(&mut state, &held(|i| i.jump = true), SIM_DT);
        assert!(state.player.lift_vel < lift_vel);

        // 720 / 1800 = 0.4s up, 0.4s down
        for _ in 0..120 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.lift, 0.0);
        assert_eq!(state.player.lift_vel, 0.0);
    }

    #[test]
    fn projectile_hit_damages_once_then_invulnerable() {
        let mut state = empty_state();
        let chest = state.player.chest();
        spawn_projectile(&mut state, chest + Vec2::new(30.0, 0.0), Vec2::new(-300.0, 0.0));
        spawn_projectile(&mut state, chest + Vec2::new(35.0, 0.0), Vec2::new(-300.0, 0.0));

        for _ in 0..30 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.health, state.player.max_health - 1);
        assert!(state.player.invuln_ticks > 0);
        // Second shot passed through the invulnerable player and is still flying
        assert_eq!(state.projectiles.len(), 1);
    }

    #[test]
    fn hopping_dodges_low_shots() {
        let mut state = empty_state();
        // Aimed at the shins
        let shin = state.player.pos + Vec2::new(20.0, 90.0);
        spawn_projectile(&mut state, shin + Vec2::new(200.0, 0.0), Vec2::new(-300.0, 0.0));
        tick(&mut state, &held(|i| i.jump = true), SIM_DT);
        // Projectile reaches the player around 0.55s into the hop
        for _ in 0..80 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.player.health, state.player.max_health);
    }

    #[test]
    fn projectiles_stop_at_rocks_and_bounds() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            rect: Rect::new(600.0, 300.0, 50.0, 200.0),
            kind: ObstacleKind::Rock,
        });
        spawn_projectile(&mut state, Vec2::new(500.0, 350.0), Vec2::new(300.0, 0.0));
        spawn_projectile(&mut state, Vec2::new(1270.0, 50.0), Vec2::new(300.0, 0.0));
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn enemy_fires_at_interval() {
        let mut state = empty_state();
        let enemy = state.make_enemy(Vec2::new(900.0, 400.0));
        state.enemies.push(enemy);
        let interval = secs_to_ticks(state.tuning.fire_interval);

        for _ in 0..interval - 1 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(state.projectiles.is_empty());
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.projectiles.len(), 1);
        // Aimed left, toward the player
        assert!(state.projectiles[0].vel.x < 0.0);
        assert!((state.projectiles[0].vel.length() - 300.0).abs() < 0.01);
    }

    #[test]
    fn enemy_turns_at_patrol_limits() {
        let mut state = empty_state();
        let mut enemy = state.make_enemy(Vec2::new(900.0, 400.0));
        enemy.fire_ticks = u32::MAX;
        state.enemies.push(enemy);
        for _ in 0..(120.0 / 60.0 * 120.0) as u32 + 10 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let enemy = &state.enemies[0];
        assert!(enemy.patrol_dir > 0.0);
        assert!(enemy.pos.x >= enemy.patrol_min - 1.0);
    }

    #[test]
    fn enemy_turns_when_a_rock_blocks_its_patrol() {
        let mut state = empty_state();
        let mut enemy = state.make_enemy(Vec2::new(900.0, 400.0));
        enemy.fire_ticks = u32::MAX;
        assert!(enemy.patrol_dir < 0.0);
        // Right face at x = 890, well inside the patrol range
        assert!(enemy.patrol_min < 850.0);
        state.enemies.push(enemy);
        state.obstacles.push(Obstacle {
            id: 900,
            rect: Rect::new(850.0, 470.0, 40.0, 40.0),
            kind: ObstacleKind::Rock,
        });

        for _ in 0..40 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        let enemy = &state.enemies[0];
        assert!(enemy.patrol_dir > 0.0);
        assert!(enemy.pos.x >= 890.0);
    }

    #[test]
    fn respawned_enemy_stays_clear_of_rocks() {
        for seed in 0..10 {
            let mut state = GameState::new(seed, BOUNDS, Tuning::default());
            let ground_top = state.ground_top();
            state.enemies.clear();
            state.respawn_ticks = 0;
            // Only a 60 px gap is left in the right half
            state.obstacles = vec![Obstacle {
                id: 900,
                rect: Rect::new(700.0, ground_top - 10.0, 600.0, BOUNDS.y - ground_top + 20.0),
                kind: ObstacleKind::Rock,
            }];

            let respawn = secs_to_ticks(state.tuning.enemy_respawn);
            for _ in 0..=respawn {
                tick(&mut state, &TickInput::default(), SIM_DT);
            }
            assert_eq!(state.enemies.len(), 1, "seed {seed}");
            let footprint = state.enemies[0].footprint();
            assert!(
                state.obstacles.iter().all(|o| !o.rect.intersects(&footprint)),
                "seed {seed}: enemy spawned inside a rock"
            );
        }
    }

    #[test]
    fn shockwave_clears_projectiles_and_cools_down() {
        let mut state = empty_state();
        let center = state.player.footprint().center();
        spawn_projectile(&mut state, center + Vec2::new(100.0, 0.0), Vec2::ZERO);
        spawn_projectile(&mut state, center + Vec2::new(400.0, 0.0), Vec2::ZERO);

        let special = held(|i| i.special = true);
        tick(&mut state, &special, SIM_DT);
        assert!(state.ability.is_active());
        let cooldown = state.ability.cooldown_ticks;
        assert_eq!(cooldown, secs_to_ticks(state.tuning.ability_cooldown));

        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert!(!state.ability.is_active());
        assert_eq!(state.projectiles.len(), 1);
        assert!(state.projectiles[0].pos.x > center.x + 300.0);

        // Still cooling down: a second press does nothing
        tick(&mut state, &special, SIM_DT);
        assert!(!state.ability.is_active());
        assert!(state.ability.cooldown_ticks < cooldown);
    }

    #[test]
    fn shockwave_damages_each_enemy_once() {
        let mut state = empty_state();
        let near = state.player.pos + Vec2::new(80.0, 0.0);
        let mut enemy = state.make_enemy(near);
        enemy.fire_ticks = u32::MAX;
        state.enemies.push(enemy);

        tick(&mut state, &held(|i| i.special = true), SIM_DT);
        for _ in 0..60 {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.enemies[0].health, state.tuning.enemy_health - 1);
    }

    #[test]
    fn defeated_enemy_drops_heart_and_respawns() {
        let mut state = empty_state();
        state.respawn_ticks = 0;
        let mut enemy = state.make_enemy(Vec2::new(900.0, 400.0));
        enemy.health = 0;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.kills, 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.hearts.len(), 1);

        let respawn = secs_to_ticks(state.tuning.enemy_respawn);
        for _ in 0..respawn {
            tick(&mut state, &TickInput::default(), SIM_DT);
        }
        assert_eq!(state.enemies.len(), 1);
        assert!(state.enemies[0].pos.x >= BOUNDS.x * 0.5);
    }

    #[test]
    fn hearts_heal_only_when_hurt() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        let chest = state.player.chest();
        state.hearts.push(Heart { id, pos: chest });

        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.hearts.len(), 1);

        state.player.health -= 2;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.hearts.is_empty());
        assert_eq!(state.player.health, state.player.max_health - 1);
    }

    #[test]
    fn death_ends_the_run_and_restart_reseeds() {
        let mut state = empty_state();
        state.player.health = 1;
        let chest = state.player.chest();
        spawn_projectile(&mut state, chest, Vec2::ZERO);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Pause is ignored once the run is over
        tick(&mut state, &held(|i| i.pause = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::GameOver);

        let seed = state.seed;
        tick(&mut state, &held(|i| i.restart = true), SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.seed, seed + 1);
        assert_eq!(state.player.health, state.tuning.max_health);
        assert_eq!(state.bounds, BOUNDS);
    }

    #[test]
    fn parallax_offsets_stay_wrapped() {
        assert_eq!(wrap_offset(-10.0, 100.0), -10.0);
        assert_eq!(wrap_offset(-100.0, 100.0), 0.0);
        assert_eq!(wrap_offset(-130.0, 100.0), -30.0);
        assert_eq!(wrap_offset(20.0, 100.0), -80.0);

        let mut state = empty_state();
        let left = held(|i| i.left = true);
        for _ in 0..2000 {
            tick(&mut state, &left, SIM_DT);
            for layer in &state.scenery.layers {
                assert!(layer.offset <= 0.0 && layer.offset > -BOUNDS.x);
            }
        }
    }

    #[test]
    fn entities_stay_sorted_by_id_while_spawning_and_removing() {
        let tuning = Tuning {
            fire_interval: 0.25,
            enemy_health: 1,
            enemy_respawn: 0.5,
            ..Tuning::default()
        };
        let mut state = GameState::new(21, BOUNDS, tuning);
        // Out of order on purpose: id 0 predates every generated entity
        let chest = state.player.chest();
        state.hearts.push(Heart { id: 0, pos: chest + Vec2::new(600.0, 0.0) });

        let is_sorted = |ids: Vec<u32>| ids.windows(2).all(|w| w[0] < w[1]);
        let mut saw_projectile = false;
        for t in 0..1200u32 {
            let input = TickInput {
                right: (t / 120) % 2 == 0,
                left: (t / 120) % 2 == 1,
                special: t % 60 == 0,
                ..TickInput::default()
            };
            tick(&mut state, &input, SIM_DT);
            saw_projectile |= !state.projectiles.is_empty();

            assert!(is_sorted(state.obstacles.iter().map(|o| o.id).collect()));
            assert!(is_sorted(state.enemies.iter().map(|e| e.id).collect()));
            assert!(is_sorted(state.projectiles.iter().map(|p| p.id).collect()));
            assert!(is_sorted(state.hearts.iter().map(|h| h.id).collect()));
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(saw_projectile);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999, BOUNDS, Tuning::default());
        let mut state2 = GameState::new(99999, BOUNDS, Tuning::default());

        let inputs = [
            held(|i| i.right = true),
            held(|i| i.down = true),
            held(|i| i.special = true),
            held(|i| i.jump = true),
            TickInput::default(),
        ];

        for n in 0..2000 {
            let input = &inputs[(n / 97) % inputs.len()];
            tick(&mut state1, input, SIM_DT);
            tick(&mut state2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.player.pos, state2.player.pos);
        assert_eq!(state1.player.health, state2.player.health);
        assert_eq!(state1.projectiles.len(), state2.projectiles.len());
        assert_eq!(state1.kills, state2.kills);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }
}
