//! Triangulation of draw-list shapes into vertices

use glam::Vec2;
use std::f32::consts::TAU;

use super::draw::{DrawList, Shape};
use super::vertex::{Color, Vertex};
use crate::Rect;

/// Segments used for circles and ellipses
pub const CURVE_SEGMENTS: u32 = 32;

/// Triangulate a whole draw list, in recording order
pub fn tessellate(list: &DrawList) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.len() * 12);
    for shape in list.commands() {
        match shape {
            Shape::Rect { rect, color } => rect_fill(&mut vertices, rect, *color),
            Shape::RectOutline { rect, width, color } => {
                rect_outline(&mut vertices, rect, *width, *color)
            }
            Shape::Ellipse {
                center,
                radii,
                color,
            } => ellipse(&mut vertices, *center, *radii, *color, CURVE_SEGMENTS),
            Shape::Ring {
                center,
                radius,
                width,
                color,
            } => ring(
                &mut vertices,
                *center,
                (radius - width / 2.0).max(0.0),
                radius + width / 2.0,
                *color,
                CURVE_SEGMENTS,
            ),
            Shape::Polygon { points, color } => convex_fan(&mut vertices, points, *color),
            Shape::Line {
                from,
                to,
                width,
                color,
            } => line(&mut vertices, *from, *to, *width, *color),
        }
    }
    vertices
}

fn quad(out: &mut Vec<Vertex>, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(b.x, b.y, color));
    out.push(Vertex::new(c.x, c.y, color));

    out.push(Vertex::new(a.x, a.y, color));
    out.push(Vertex::new(c.x, c.y, color));
    out.push(Vertex::new(d.x, d.y, color));
}

fn rect_fill(out: &mut Vec<Vertex>, rect: &Rect, color: Color) {
    quad(
        out,
        Vec2::new(rect.x, rect.y),
        Vec2::new(rect.right(), rect.y),
        Vec2::new(rect.right(), rect.bottom()),
        Vec2::new(rect.x, rect.bottom()),
        color,
    );
}

fn rect_outline(out: &mut Vec<Vertex>, rect: &Rect, width: f32, color: Color) {
    let h = width / 2.0;
    // Top and bottom span the full width, sides fill between them
    rect_fill(out, &Rect::new(rect.x - h, rect.y - h, rect.w + width, width), color);
    rect_fill(out, &Rect::new(rect.x - h, rect.bottom() - h, rect.w + width, width), color);
    rect_fill(out, &Rect::new(rect.x - h, rect.y + h, width, rect.h - width), color);
    rect_fill(out, &Rect::new(rect.right() - h, rect.y + h, width, rect.h - width), color);
}

/// Filled ellipse as a triangle fan around the center
pub fn ellipse(out: &mut Vec<Vertex>, center: Vec2, radii: Vec2, color: Color, segments: u32) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        out.push(Vertex::new(center.x, center.y, color));
        out.push(Vertex::new(
            center.x + radii.x * theta1.cos(),
            center.y + radii.y * theta1.sin(),
            color,
        ));
        out.push(Vertex::new(
            center.x + radii.x * theta2.cos(),
            center.y + radii.y * theta2.sin(),
            color,
        ));
    }
}

/// Ring (hollow circle)
pub fn ring(
    out: &mut Vec<Vertex>,
    center: Vec2,
    inner_radius: f32,
    outer_radius: f32,
    color: Color,
    segments: u32,
) {
    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;
        let dir1 = Vec2::new(theta1.cos(), theta1.sin());
        let dir2 = Vec2::new(theta2.cos(), theta2.sin());

        quad(
            out,
            center + dir1 * inner_radius,
            center + dir1 * outer_radius,
            center + dir2 * outer_radius,
            center + dir2 * inner_radius,
            color,
        );
    }
}

fn convex_fan(out: &mut Vec<Vertex>, points: &[Vec2], color: Color) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    for pair in rest.windows(2) {
        out.push(Vertex::new(first.x, first.y, color));
        out.push(Vertex::new(pair[0].x, pair[0].y, color));
        out.push(Vertex::new(pair[1].x, pair[1].y, color));
    }
}

/// Thick line segment as a quad
fn line(out: &mut Vec<Vertex>, from: Vec2, to: Vec2, width: f32, color: Color) {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return;
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(out, from + perp, to + perp, to - perp, from - perp, color);
}
