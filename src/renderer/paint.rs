//! Frame painting: turns a `GameState` into a draw list
//!
//! Layers are painted back to front: sky, clouds, hills, ground, then every
//! standing thing sorted by where it touches the ground (painter's algorithm),
//! then the HUD on top.

use glam::Vec2;
use std::f32::consts::TAU;

use super::draw::DrawList;
use super::vertex::{Color, colors, hex};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::state::{Enemy, GamePhase, GameState, Heart, HillLayer, Obstacle, Player, Projectile, Tree};
use crate::{Rect, secs_to_ticks};

/// Hill silhouettes are sampled every this many pixels
const HILL_STEP: f32 = 50.0;
/// Extra samples past the right edge so the strip never shows a gap
const HILL_OVERDRAW: f32 = 100.0;

const PIP_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);
const PIP_SPACING: f32 = 24.0;
const PIP_RADIUS: f32 = 9.0;
const METER_WIDTH: f32 = 120.0;
const METER_HEIGHT: f32 = 8.0;

const LIMB_WIDTH: f32 = 4.0;

/// Anything that takes part in depth sorting
#[derive(Debug, Clone, Copy)]
pub enum Actor<'a> {
    Rock(&'a Obstacle),
    Tree(&'a Tree),
    Heart(&'a Heart),
    Enemy(&'a Enemy),
    Player(&'a Player),
    Projectile(&'a Projectile),
}

/// Every actor paired with its ground line, sorted back to front.
///
/// The sort is stable, so actors on the same line keep their collection order.
pub fn depth_sorted(state: &GameState) -> Vec<(f32, Actor<'_>)> {
    let mut actors = Vec::with_capacity(
        state.obstacles.len()
            + state.scenery.trees.len()
            + state.hearts.len()
            + state.enemies.len()
            + state.projectiles.len()
            + 1,
    );

    actors.extend(state.obstacles.iter().map(|o| (o.rect.bottom(), Actor::Rock(o))));
    actors.extend(state.scenery.trees.iter().map(|t| (t.base_y, Actor::Tree(t))));
    actors.extend(state.hearts.iter().map(|h| (h.ground_y(), Actor::Heart(h))));
    actors.extend(state.enemies.iter().map(|e| (e.pos.y + BODY_HEIGHT, Actor::Enemy(e))));
    // Hopping does not change where the player stands
    actors.push((state.player.footprint().bottom(), Actor::Player(&state.player)));
    actors.extend(
        state
            .projectiles
            .iter()
            .map(|p| (p.pos.y + PROJECTILE_SHADOW_DROP, Actor::Projectile(p))),
    );

    actors.sort_by(|a, b| a.0.total_cmp(&b.0));
    actors
}

/// Paint the whole frame
pub fn paint(state: &GameState, settings: &Settings) -> DrawList {
    let mut list = DrawList::new();
    paint_into(&mut list, state, settings);
    list
}

/// Paint into an existing list, reusing its allocation
pub fn paint_into(list: &mut DrawList, state: &GameState, settings: &Settings) {
    let time_secs = state.time_ticks as f32 * SIM_DT;

    list.clear(colors::SKY);

    if settings.clouds {
        for cloud in &state.scenery.clouds {
            paint_cloud(list, cloud.pos, cloud.size);
        }
    }

    let ground_top = state.ground_top();
    if settings.parallax {
        for (index, layer) in state.scenery.layers.iter().enumerate() {
            paint_hills(list, layer, index, state.bounds.x, ground_top);
        }
    }

    list.fill_rect(
        Rect::new(0.0, ground_top, state.bounds.x, state.bounds.y - ground_top),
        colors::GROUND,
    );

    if state.ability.is_active() {
        let center = state.ability.center;
        let radius = state.ability.radius;
        list.fill_circle(center, radius, colors::SHOCKWAVE_FILL);
        list.stroke_circle(center, radius, 4.0, colors::SHOCKWAVE);
    }

    for (_, actor) in depth_sorted(state) {
        match actor {
            Actor::Rock(rock) => paint_rock(list, &rock.rect),
            Actor::Tree(tree) => paint_tree(list, tree),
            Actor::Heart(heart) => {
                let bob = if settings.reduced_motion {
                    0.0
                } else {
                    (time_secs * 5.0).sin() * 5.0
                };
                paint_heart(list, Vec2::new(heart.pos.x, heart.pos.y + bob), HEART_SIZE);
            }
            Actor::Enemy(enemy) => {
                let color = if enemy.flash_ticks > 0 {
                    colors::HIT_FLASH
                } else {
                    colors::ENEMY
                };
                paint_mannequin(list, enemy.pos, 0.0, -1.0, 0.0, color);
            }
            Actor::Player(player) => {
                let blink = !settings.reduced_motion
                    && player.invuln_ticks > 0
                    && (player.invuln_ticks / 6) % 2 == 1;
                if !blink {
                    let stride = if player.vel == Vec2::ZERO {
                        0.0
                    } else {
                        (time_secs * 12.0).sin()
                    };
                    paint_mannequin(
                        list,
                        player.pos,
                        player.lift,
                        player.facing,
                        stride,
                        colors::MANNEQUIN,
                    );
                }
            }
            Actor::Projectile(projectile) => paint_projectile(list, projectile),
        }
    }

    paint_hud(list, state);

    if state.phase != GamePhase::Playing {
        list.fill_rect(
            Rect::new(0.0, 0.0, state.bounds.x, state.bounds.y),
            colors::OVERLAY,
        );
    }
}

fn paint_cloud(list: &mut DrawList, pos: Vec2, size: f32) {
    let puffs = [
        pos,
        pos + Vec2::new(size * 0.8, -size * 0.5),
        pos + Vec2::new(size * 1.6, 0.0),
    ];
    for puff in puffs {
        list.fill_circle(puff, size, colors::CLOUD);
    }
    // Brighter core stands in for the radial gradient
    for puff in puffs {
        list.fill_circle(puff + Vec2::new(0.0, -10.0), size * 0.6, colors::CLOUD_CORE);
    }
}

/// Height of a hill layer at `i` pixels into its tile; periodic over `width`
pub fn hill_height(i: f32, width: f32, layer_index: usize) -> f32 {
    // Roughly 0.01 rad/px, snapped so the tile repeats seamlessly
    let waves = (width * 0.01 / TAU).round().max(1.0);
    let phase = layer_index as f32 * 1.7;
    100.0 + (i / width * waves * TAU + phase).sin() * 50.0
}

fn paint_hills(list: &mut DrawList, layer: &HillLayer, index: usize, width: f32, ground_top: f32) {
    if width <= 0.0 {
        return;
    }
    let color = hex(layer.color);
    let base = ground_top - layer.elevation;

    // Two copies side by side so the scroll loops
    for copy in 0..2 {
        let origin = layer.offset + copy as f32 * width;
        let mut i = 0.0;
        while i < width + HILL_OVERDRAW {
            let x0 = origin + i;
            let x1 = x0 + HILL_STEP;
            if x1 >= 0.0 && x0 <= width {
                let y0 = base - hill_height(i, width, index);
                let y1 = base - hill_height(i + HILL_STEP, width, index);
                list.fill_polygon(
                    &[
                        Vec2::new(x0, y0),
                        Vec2::new(x1, y1),
                        Vec2::new(x1, ground_top),
                        Vec2::new(x0, ground_top),
                    ],
                    color,
                );
            }
            i += HILL_STEP;
        }
    }
}

fn paint_rock(list: &mut DrawList, r: &Rect) {
    let d = ROCK_DEPTH;

    list.fill_ellipse(
        Vec2::new(r.x + r.w / 2.0, r.bottom()),
        Vec2::new(r.w / 1.5, d / 2.0),
        colors::SHADOW,
    );

    // Right face (darker)
    list.fill_polygon(
        &[
            Vec2::new(r.right(), r.y),
            Vec2::new(r.right() + d, r.y - d),
            Vec2::new(r.right() + d, r.bottom() - d),
            Vec2::new(r.right(), r.bottom()),
        ],
        colors::ROCK_SIDE,
    );

    // Top face (lighter)
    list.fill_polygon(
        &[
            Vec2::new(r.x, r.y),
            Vec2::new(r.x + d, r.y - d),
            Vec2::new(r.right() + d, r.y - d),
            Vec2::new(r.right(), r.y),
        ],
        colors::ROCK_TOP,
    );

    list.fill_rect(*r, colors::ROCK_FRONT);
    list.stroke_rect(*r, 1.0, colors::ROCK_EDGE);
}

fn paint_tree(list: &mut DrawList, tree: &Tree) {
    let center_x = tree.x + tree.trunk_w / 2.0;
    let crown = Vec2::new(center_x, tree.base_y - tree.trunk_h);

    list.fill_ellipse(
        Vec2::new(center_x, tree.base_y),
        Vec2::new(tree.trunk_w, 10.0),
        colors::TREE_SHADOW,
    );

    list.fill_rect(
        Rect::new(tree.x, tree.base_y - tree.trunk_h, tree.trunk_w, tree.trunk_h),
        colors::TRUNK,
    );
    // Shaded strip on the right side of the trunk
    list.fill_rect(
        Rect::new(
            tree.x + tree.trunk_w * 0.6,
            tree.base_y - tree.trunk_h,
            tree.trunk_w * 0.4,
            tree.trunk_h,
        ),
        colors::TRUNK_DARK,
    );

    list.fill_circle(crown, tree.foliage, colors::FOLIAGE);
    list.fill_circle(crown + Vec2::new(-10.0, -10.0), tree.foliage * 0.6, colors::FOLIAGE_LIGHT);
}

/// Heart with its top-center at `top`
pub fn paint_heart(list: &mut DrawList, top: Vec2, size: f32) {
    let lobe = size / 4.0;
    let lobe_y = top.y + size * 0.3;
    list.fill_circle(Vec2::new(top.x - lobe, lobe_y), lobe * 1.1, colors::HEART);
    list.fill_circle(Vec2::new(top.x + lobe, lobe_y), lobe * 1.1, colors::HEART);
    list.fill_polygon(
        &[
            Vec2::new(top.x - size / 2.0, lobe_y + lobe * 0.4),
            Vec2::new(top.x + size / 2.0, lobe_y + lobe * 0.4),
            Vec2::new(top.x, top.y + size),
        ],
        colors::HEART,
    );
    list.fill_circle(Vec2::new(top.x - lobe, top.y + lobe), size * 0.15, colors::HEART_SHINE);
}

/// Stick figure: head, torso, arms, legs. `stride` in [-1, 1] swings the legs.
fn paint_mannequin(list: &mut DrawList, pos: Vec2, lift: f32, facing: f32, stride: f32, color: Color) {
    let head_radius = 15.0;
    let torso_w = 20.0;
    let torso_h = 50.0;
    let center_x = pos.x + BODY_WIDTH / 2.0;

    // Ground shadow shrinks as the figure rises
    let shadow_scale = (1.0 - lift / 200.0).clamp(0.4, 1.0);
    list.fill_ellipse(
        Vec2::new(center_x, pos.y + BODY_HEIGHT),
        Vec2::new(BODY_WIDTH * 0.6 * shadow_scale, 6.0 * shadow_scale),
        colors::SHADOW,
    );

    let top = pos.y - lift;

    list.fill_circle(Vec2::new(center_x, top + head_radius), head_radius, color);
    // Eye toward the facing direction
    list.fill_circle(
        Vec2::new(center_x + facing * 7.0, top + head_radius - 3.0),
        2.5,
        colors::HIT_FLASH,
    );

    let torso_y = top + head_radius * 2.0;
    list.fill_rect(Rect::new(center_x - torso_w / 2.0, torso_y, torso_w, torso_h), color);

    list.line(
        Vec2::new(center_x - torso_w / 2.0, torso_y + 5.0),
        Vec2::new(center_x - torso_w / 2.0 - 15.0, torso_y + 30.0),
        LIMB_WIDTH,
        color,
    );
    list.line(
        Vec2::new(center_x + torso_w / 2.0, torso_y + 5.0),
        Vec2::new(center_x + torso_w / 2.0 + 15.0, torso_y + 30.0),
        LIMB_WIDTH,
        color,
    );

    let leg_y = torso_y + torso_h;
    let feet_y = top + BODY_HEIGHT;
    let swing = stride * 6.0;
    list.line(
        Vec2::new(center_x - 5.0, leg_y),
        Vec2::new(center_x - 10.0 + swing, feet_y),
        LIMB_WIDTH,
        color,
    );
    list.line(
        Vec2::new(center_x + 5.0, leg_y),
        Vec2::new(center_x + 10.0 - swing, feet_y),
        LIMB_WIDTH,
        color,
    );
}

fn paint_projectile(list: &mut DrawList, p: &Projectile) {
    list.fill_ellipse(
        p.pos + Vec2::new(0.0, PROJECTILE_SHADOW_DROP),
        Vec2::new(p.radius, p.radius * 0.4),
        colors::SHADOW,
    );
    list.fill_circle(p.pos, p.radius * 1.6, colors::PROJECTILE_GLOW);
    list.fill_circle(p.pos, p.radius, colors::PROJECTILE);
}

fn paint_hud(list: &mut DrawList, state: &GameState) {
    let player = &state.player;
    for i in 0..player.max_health {
        let center = PIP_ORIGIN + Vec2::new(i as f32 * PIP_SPACING, 0.0);
        if i < player.health {
            list.fill_circle(center, PIP_RADIUS, colors::HEART);
        } else {
            list.stroke_circle(center, PIP_RADIUS - 1.0, 2.0, colors::PIP_EMPTY);
        }
    }

    let meter = Rect::new(
        PIP_ORIGIN.x - PIP_RADIUS,
        PIP_ORIGIN.y + PIP_RADIUS + 8.0,
        METER_WIDTH,
        METER_HEIGHT,
    );
    list.fill_rect(meter, colors::METER_BACK);

    let total = secs_to_ticks(state.tuning.ability_cooldown).max(1);
    let charge = 1.0 - state.ability.cooldown_ticks as f32 / total as f32;
    let color = if state.ability.ready() {
        colors::METER_READY
    } else {
        colors::METER_CHARGING
    };
    list.fill_rect(
        Rect::new(meter.x, meter.y, meter.w * charge.clamp(0.0, 1.0), meter.h),
        color,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::draw::Shape;
    use crate::sim::state::ObstacleKind;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(5, Vec2::new(1280.0, 720.0), Tuning::default())
    }

    #[test]
    fn actors_are_sorted_back_to_front() {
        let s = state();
        let sorted = depth_sorted(&s);
        assert!(sorted.windows(2).all(|w| w[0].0 <= w[1].0));
        let expected = s.obstacles.len()
            + s.scenery.trees.len()
            + s.hearts.len()
            + s.enemies.len()
            + s.projectiles.len()
            + 1;
        assert_eq!(sorted.len(), expected);
    }

    #[test]
    fn player_in_front_of_rock_it_stands_below() {
        let mut s = state();
        s.scenery.trees.clear();
        s.hearts.clear();
        s.enemies.clear();
        s.obstacles = vec![Obstacle {
            id: 1,
            rect: Rect::new(500.0, 400.0, 60.0, 40.0),
            kind: ObstacleKind::Rock,
        }];

        // Feet below the rock's base: drawn after it
        s.player.pos = Vec2::new(500.0, 440.0 - (BODY_HEIGHT - FOOT_HEIGHT));
        let order: Vec<bool> = depth_sorted(&s)
            .iter()
            .map(|(_, a)| matches!(a, Actor::Player(_)))
            .collect();
        assert_eq!(order, vec![false, true]);

        // Feet above the rock's top: drawn before it, and hopping doesn't change that
        s.player.pos = Vec2::new(500.0, 400.0 - BODY_HEIGHT);
        s.player.lift = 80.0;
        let order: Vec<bool> = depth_sorted(&s)
            .iter()
            .map(|(_, a)| matches!(a, Actor::Player(_)))
            .collect();
        assert_eq!(order, vec![true, false]);
    }

    #[test]
    fn hud_shows_one_pip_per_max_health() {
        let mut s = state();
        s.player.health = 2;
        let mut list = DrawList::new();
        paint_hud(&mut list, &s);
        let rings = list
            .commands()
            .iter()
            .filter(|c| matches!(c, Shape::Ring { .. }))
            .count();
        let filled = list
            .commands()
            .iter()
            .filter(|c| matches!(c, Shape::Ellipse { color, .. } if *color == colors::HEART))
            .count();
        assert_eq!(filled, 2);
        assert_eq!(rings, (s.player.max_health - 2) as usize);
    }

    #[test]
    fn hills_tile_seamlessly() {
        let width = 1280.0;
        for layer in 0..3 {
            let a = hill_height(0.0, width, layer);
            let b = hill_height(width, width, layer);
            assert!((a - b).abs() < 1e-2);
        }
    }

    #[test]
    fn overlay_only_when_not_playing() {
        let mut s = state();
        let settings = Settings::default();
        let last_is_overlay = |list: &DrawList| {
            matches!(list.commands().last(), Some(Shape::Rect { color, .. }) if *color == colors::OVERLAY)
        };
        assert!(!last_is_overlay(&paint(&s, &settings)));
        s.phase = GamePhase::Paused;
        assert!(last_is_overlay(&paint(&s, &settings)));
    }

    #[test]
    fn scenery_toggles_are_respected() {
        let s = state();
        let full = paint(&s, &Settings::default());
        let bare = paint(
            &s,
            &Settings {
                clouds: false,
                parallax: false,
                ..Settings::default()
            },
        );
        assert!(bare.len() < full.len());
        assert_eq!(full.clear_color(), colors::SKY);
    }
}
