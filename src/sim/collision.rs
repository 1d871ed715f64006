//! Collision detection and response for ground rectangles
//!
//! Movement is resolved one axis at a time: move along x and snap to the nearest
//! face in the way, then do the same along y. Resolving the axes separately is
//! what lets a figure slide along a rock instead of sticking to its corner.

use glam::Vec2;

use super::state::{Obstacle, Projectile};
use crate::Rect;
use crate::consts::*;

/// Slack for faces that were snapped last tick and sit a rounding error inside
const FACE_EPSILON: f32 = 0.01;

/// Move `rect` horizontally by `dx`, stopping at the first obstacle face in the way.
///
/// Returns the new x and whether an obstacle blocked the move. Obstacles the rect
/// already overlaps are ignored so an overlapping figure can walk free.
pub fn resolve_axis_x(rect: Rect, dx: f32, obstacles: &[Obstacle]) -> (f32, bool) {
    let mut new_x = rect.x + dx;
    let mut blocked = false;

    for obs in obstacles {
        let o = &obs.rect;
        // Only rocks sharing our row can be hit by a horizontal move
        if !(rect.y < o.bottom() && rect.bottom() > o.y) {
            continue;
        }
        if dx > 0.0 {
            // Moving right: left face must be ahead of our right edge
            if o.x >= rect.right() - FACE_EPSILON && o.x < new_x + rect.w {
                new_x = o.x - rect.w;
                blocked = true;
            }
        } else if dx < 0.0 {
            // Moving left: right face must be behind our left edge
            if o.right() <= rect.x + FACE_EPSILON && o.right() > new_x {
                new_x = o.right();
                blocked = true;
            }
        }
    }

    (new_x, blocked)
}

/// Vertical counterpart of [`resolve_axis_x`]
pub fn resolve_axis_y(rect: Rect, dy: f32, obstacles: &[Obstacle]) -> (f32, bool) {
    let mut new_y = rect.y + dy;
    let mut blocked = false;

    for obs in obstacles {
        let o = &obs.rect;
        if !(rect.x < o.right() && rect.right() > o.x) {
            continue;
        }
        if dy > 0.0 {
            // Moving down (toward the viewer)
            if o.y >= rect.bottom() - FACE_EPSILON && o.y < new_y + rect.h {
                new_y = o.y - rect.h;
                blocked = true;
            }
        } else if dy < 0.0 {
            // Moving up (away from the viewer)
            if o.bottom() <= rect.y + FACE_EPSILON && o.bottom() > new_y {
                new_y = o.bottom();
                blocked = true;
            }
        }
    }

    (new_y, blocked)
}

/// Keep a body (top-left `pos`) inside the viewport with its feet on the ground band
pub fn clamp_to_band(pos: Vec2, bounds: Vec2, ground_top: f32) -> Vec2 {
    let max_x = (bounds.x - BODY_WIDTH).max(0.0);
    let min_y = ground_top - (BODY_HEIGHT - FOOT_HEIGHT);
    let max_y = bounds.y - BODY_HEIGHT;
    Vec2::new(pos.x.clamp(0.0, max_x), pos.y.min(max_y).max(min_y))
}

/// Result of moving a body through the rocks
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResult {
    pub pos: Vec2,
    pub blocked_x: bool,
    pub blocked_y: bool,
}

/// Move a body by `delta`: clamp to the band, then resolve x before y against the rocks
pub fn move_body(
    pos: Vec2,
    delta: Vec2,
    bounds: Vec2,
    ground_top: f32,
    obstacles: &[Obstacle],
) -> MoveResult {
    let offset = Vec2::new(0.0, BODY_HEIGHT - FOOT_HEIGHT);

    // Horizontal
    let target = clamp_to_band(Vec2::new(pos.x + delta.x, pos.y), bounds, ground_top);
    let feet = Rect::new(pos.x, pos.y + offset.y, BODY_WIDTH, FOOT_HEIGHT);
    let (x, blocked_x) = resolve_axis_x(feet, target.x - pos.x, obstacles);

    // Vertical, from the resolved x
    let target = clamp_to_band(Vec2::new(x, pos.y + delta.y), bounds, ground_top);
    let feet = Rect::new(x, pos.y + offset.y, BODY_WIDTH, FOOT_HEIGHT);
    let (feet_y, blocked_y) = resolve_axis_y(feet, target.y - pos.y, obstacles);

    MoveResult {
        pos: Vec2::new(x, feet_y - offset.y),
        blocked_x,
        blocked_y,
    }
}

/// Whether a projectile touches a rect
#[inline]
pub fn projectile_hits_rect(projectile: &Projectile, rect: &Rect) -> bool {
    rect.intersects_circle(projectile.pos, projectile.radius)
}

/// Whether a projectile has fully left the viewport
pub fn projectile_out_of_bounds(projectile: &Projectile, bounds: Vec2) -> bool {
    let p = projectile.pos;
    let r = projectile.radius;
    p.x + r < 0.0 || p.x - r > bounds.x || p.y + r < 0.0 || p.y - r > bounds.y
}

/// Whether any rock overlaps `rect`
pub fn overlaps_any(rect: &Rect, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| o.rect.intersects(rect))
}
