//! Seeded scene layout: rocks, scenery, the first enemy and hearts
//!
//! Placement is a pure function of the run seed, the viewport and the tuning.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::collision::{clamp_to_band, overlaps_any};
use super::state::{Cloud, GameState, Heart, HillLayer, Obstacle, ObstacleKind, Tree, footprint_at};
use crate::Rect;
use crate::consts::*;
use crate::tuning::SceneDensity;

/// Far hills, mid hills (High only), near hills
const HILL_FAR: (u32, f32, f32) = (0x6B8E23, 10.0, 60.0);
const HILL_MID: (u32, f32, f32) = (0x7BA05B, 18.0, 40.0);
const HILL_NEAR: (u32, f32, f32) = (0x556B2F, 25.0, 20.0);

/// Attempts before a placement gives up and uses its fallback
const PLACEMENT_ATTEMPTS: u32 = 16;

/// Build the whole scene for a fresh run
pub fn generate(state: &mut GameState) {
    let mut rng = state.rng_state.to_rng();
    let bounds = state.bounds;
    let ground_top = state.ground_top();

    generate_scenery(state, &mut rng);

    // Rocks keep clear of the player's spawn (left quarter) and of each other
    let rock_count = rng.random_range(3..=5);
    for _ in 0..rock_count {
        for _ in 0..PLACEMENT_ATTEMPTS {
            let w = rng.random_range(40.0..90.0);
            let h = rng.random_range(30.0..60.0);
            let x = rng.random_range(bounds.x * 0.25..(bounds.x - w - ROCK_DEPTH).max(bounds.x * 0.25 + 1.0));
            let y = rng.random_range(ground_top + FOOT_HEIGHT..(bounds.y - h).max(ground_top + FOOT_HEIGHT + 1.0));
            let rect = Rect::new(x, y, w, h);
            // Leave a walkable gap between rocks
            let padded = Rect::new(x - BODY_WIDTH, y - FOOT_HEIGHT, w + BODY_WIDTH * 2.0, h + FOOT_HEIGHT * 2.0);
            if !overlaps_any(&padded, &state.obstacles) {
                let id = state.next_entity_id();
                state.obstacles.push(Obstacle {
                    id,
                    rect,
                    kind: ObstacleKind::Rock,
                });
                break;
            }
        }
    }

    // Player spawns on the left, nudged out of any rock
    let band = bounds.y - ground_top;
    let spawn = clamp_to_band(
        Vec2::new(bounds.x * 0.15, ground_top + band * 0.5 - BODY_HEIGHT),
        bounds,
        ground_top,
    );
    state.player.pos = free_spot(state, spawn, &mut rng);

    // First enemy in the right half
    let enemy_pos = random_ground_spot(state, &mut rng, bounds.x * 0.5);
    let enemy = state.make_enemy(enemy_pos);
    state.enemies.push(enemy);

    for _ in 0..2 {
        let pos = random_heart_spot(state, &mut rng);
        let id = state.next_entity_id();
        state.hearts.push(Heart { id, pos });
    }

    state.normalize_order();

    log::info!(
        "Scene generated: {} rocks, {} trees, {} clouds, {} hill layers",
        state.obstacles.len(),
        state.scenery.trees.len(),
        state.scenery.clouds.len(),
        state.scenery.layers.len()
    );
}

/// Decorative scenery only; can be re-run when the quality preset changes
pub fn generate_scenery(state: &mut GameState, rng: &mut Pcg32) {
    let bounds = state.bounds;
    let ground_top = state.ground_top();
    let density = state.tuning.density;

    state.scenery.clouds = (0..density.clouds)
        .map(|_| Cloud {
            pos: Vec2::new(
                rng.random_range(0.0..bounds.x.max(1.0)),
                rng.random_range(0.05 * bounds.y..(0.35 * bounds.y).max(0.05 * bounds.y + 1.0)),
            ),
            size: rng.random_range(30.0..50.0),
        })
        .collect();

    let band = bounds.y - ground_top;
    state.scenery.trees = (0..density.trees)
        .map(|_| Tree {
            x: rng.random_range(0.0..bounds.x.max(1.0)),
            base_y: ground_top + rng.random_range(0.0..(band * 0.25).max(1.0)),
            trunk_w: rng.random_range(20.0..30.0),
            trunk_h: rng.random_range(60.0..120.0),
            foliage: rng.random_range(40.0..60.0),
        })
        .collect();

    let presets: &[(u32, f32, f32)] = match density.hill_layers {
        0 | 1 => &[HILL_FAR],
        2 => &[HILL_FAR, HILL_NEAR],
        _ => &[HILL_FAR, HILL_MID, HILL_NEAR],
    };
    state.scenery.layers = presets
        .iter()
        .map(|&(color, speed, elevation)| HillLayer {
            offset: 0.0,
            speed,
            elevation,
            color,
        })
        .collect();
}

/// Swap the scenery density mid-run; gameplay entities are untouched
pub fn apply_density(state: &mut GameState, density: SceneDensity) {
    if state.tuning.density == density {
        return;
    }
    state.tuning.density = density;
    let mut rng = state.rng_state.next_rng();
    generate_scenery(state, &mut rng);
    log::info!(
        "Scenery rebuilt: {} trees, {} clouds, {} hill layers",
        state.scenery.trees.len(),
        state.scenery.clouds.len(),
        state.scenery.layers.len()
    );
}

/// Random body position in the ground band, right of `min_x`, clear of rocks
pub fn random_ground_spot(state: &GameState, rng: &mut Pcg32, min_x: f32) -> Vec2 {
    let bounds = state.bounds;
    let ground_top = state.ground_top();
    let max_x = (bounds.x - BODY_WIDTH).max(min_x + 1.0);

    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = rng.random_range(min_x..max_x);
        let feet_y = rng.random_range(ground_top..(bounds.y - FOOT_HEIGHT).max(ground_top + 1.0));
        let pos = clamp_to_band(
            Vec2::new(x, feet_y - (BODY_HEIGHT - FOOT_HEIGHT)),
            bounds,
            ground_top,
        );
        if !overlaps_any(&footprint_at(pos), &state.obstacles) {
            return pos;
        }
    }

    scan_for_clear_spot(state, min_x)
        .unwrap_or_else(|| clamp_to_band(Vec2::new(bounds.x, bounds.y), bounds, ground_top))
}

/// Walk left from the bottom-right corner, one row at a time moving up the
/// band, and return the first position whose footprint is clear of rocks
fn scan_for_clear_spot(state: &GameState, min_x: f32) -> Option<Vec2> {
    let bounds = state.bounds;
    let ground_top = state.ground_top();
    let step = BODY_WIDTH / 2.0;

    let mut feet_bottom = bounds.y;
    while feet_bottom - FOOT_HEIGHT >= ground_top {
        let mut x = bounds.x - BODY_WIDTH;
        while x >= min_x {
            let pos = clamp_to_band(Vec2::new(x, feet_bottom - BODY_HEIGHT), bounds, ground_top);
            if pos.x >= min_x && !overlaps_any(&footprint_at(pos), &state.obstacles) {
                return Some(pos);
            }
            x -= step;
        }
        feet_bottom -= FOOT_HEIGHT;
    }
    None
}

/// `preferred` if clear, otherwise the nearest clear spot found by scanning right
fn free_spot(state: &GameState, preferred: Vec2, rng: &mut Pcg32) -> Vec2 {
    if !overlaps_any(&footprint_at(preferred), &state.obstacles) {
        return preferred;
    }
    let mut pos = preferred;
    for _ in 0..PLACEMENT_ATTEMPTS {
        pos.x += BODY_WIDTH;
        pos = clamp_to_band(pos, state.bounds, state.ground_top());
        if !overlaps_any(&footprint_at(pos), &state.obstacles) {
            return pos;
        }
    }
    random_ground_spot(state, rng, 0.0)
}

fn random_heart_spot(state: &GameState, rng: &mut Pcg32) -> Vec2 {
    let bounds = state.bounds;
    let ground_top = state.ground_top();

    for _ in 0..PLACEMENT_ATTEMPTS {
        let x = rng.random_range(HEART_SIZE..(bounds.x - HEART_SIZE).max(HEART_SIZE + 1.0));
        // Hearts float at chest height above a ground point
        let ground_y = rng.random_range(ground_top + FOOT_HEIGHT..bounds.y.max(ground_top + FOOT_HEIGHT + 1.0));
        let pos = Vec2::new(x, ground_y - BODY_HEIGHT / 2.0);
        let shadow = Rect::new(x - HEART_SIZE / 2.0, ground_y - FOOT_HEIGHT, HEART_SIZE, FOOT_HEIGHT);
        if !overlaps_any(&shadow, &state.obstacles) {
            return pos;
        }
    }

    Vec2::new(bounds.x * 0.5, ground_top)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::{SceneDensity, Tuning};
    use rand::SeedableRng;

    fn state(seed: u64) -> GameState {
        GameState::new(seed, Vec2::new(1280.0, 720.0), Tuning::default())
    }

    #[test]
    fn same_seed_same_scene() {
        let a = state(42);
        let b = state(42);
        let rects_a: Vec<_> = a.obstacles.iter().map(|o| o.rect).collect();
        let rects_b: Vec<_> = b.obstacles.iter().map(|o| o.rect).collect();
        assert_eq!(rects_a, rects_b);
        assert_eq!(a.player.pos, b.player.pos);
        assert_eq!(a.enemies[0].pos, b.enemies[0].pos);
    }

    #[test]
    fn spawns_are_clear_of_rocks() {
        for seed in 0..50 {
            let s = state(seed);
            assert!(s.obstacles.len() <= 5);
            assert!(!overlaps_any(&s.player.footprint(), &s.obstacles), "seed {seed}");
            assert!(s.enemies[0].pos.x >= s.bounds.x * 0.5, "seed {seed}");
        }
    }

    #[test]
    fn rocks_sit_on_the_ground_band() {
        for seed in 0..20 {
            let s = state(seed);
            for rock in &s.obstacles {
                assert!(rock.rect.y >= s.ground_top());
                assert!(rock.rect.bottom() <= s.bounds.y);
                assert!(rock.rect.x >= s.bounds.x * 0.25);
            }
        }
    }

    #[test]
    fn density_controls_scenery_counts() {
        let tuning = Tuning {
            density: SceneDensity {
                trees: 10,
                clouds: 8,
                hill_layers: 3,
            },
            ..Tuning::default()
        };
        let s = GameState::new(3, Vec2::new(1280.0, 720.0), tuning);
        assert_eq!(s.scenery.trees.len(), 10);
        assert_eq!(s.scenery.clouds.len(), 8);
        assert_eq!(s.scenery.layers.len(), 3);
        // Far layer first
        assert!(s.scenery.layers[0].speed < s.scenery.layers[2].speed);
    }

    #[test]
    fn density_swap_keeps_gameplay_entities() {
        let mut s = state(8);
        let rocks: Vec<Rect> = s.obstacles.iter().map(|o| o.rect).collect();
        let player = s.player.pos;
        apply_density(&mut s, SceneDensity { trees: 2, clouds: 1, hill_layers: 1 });
        assert_eq!(s.scenery.trees.len(), 2);
        assert_eq!(s.scenery.clouds.len(), 1);
        assert_eq!(s.scenery.layers.len(), 1);
        let after: Vec<Rect> = s.obstacles.iter().map(|o| o.rect).collect();
        assert_eq!(after, rocks);
        assert_eq!(s.player.pos, player);
    }

    /// Rocks wall off everything right of x = 700 across the whole band
    fn walled_state(seed: u64) -> GameState {
        let mut s = state(seed);
        let ground_top = s.ground_top();
        s.obstacles = vec![Obstacle {
            id: 999,
            rect: Rect::new(700.0, ground_top - 10.0, 600.0, s.bounds.y - ground_top + 20.0),
            kind: ObstacleKind::Rock,
        }];
        s
    }

    #[test]
    fn ground_spot_avoids_rocks_even_when_crowded() {
        for seed in 0..20 {
            let s = walled_state(seed);
            let mut rng = Pcg32::seed_from_u64(seed);
            let pos = random_ground_spot(&s, &mut rng, 640.0);
            assert!(pos.x >= 640.0);
            assert!(!overlaps_any(&footprint_at(pos), &s.obstacles));
        }
    }

    #[test]
    fn corner_scan_walks_left_past_rocks() {
        let s = walled_state(1);
        let pos = scan_for_clear_spot(&s, 640.0).unwrap();
        assert!(pos.x >= 640.0 && pos.x + BODY_WIDTH <= 700.0);
        assert_eq!(footprint_at(pos).bottom(), s.bounds.y);

        // No room at all right of min_x
        assert_eq!(scan_for_clear_spot(&s, 690.0), None);
    }
}
