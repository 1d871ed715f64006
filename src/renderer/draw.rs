//! Immediate-mode draw list
//!
//! Painting code issues canvas-style calls; each call records a [`Shape`] in
//! screen pixels. Nothing touches the GPU until the list is tessellated.

use glam::Vec2;

use super::vertex::Color;
use crate::Rect;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Rect {
        rect: Rect,
        color: Color,
    },
    /// Outline of a rect, stroke centered on the edges
    RectOutline {
        rect: Rect,
        width: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        radii: Vec2,
        color: Color,
    },
    /// Circle outline between `radius - width/2` and `radius + width/2`
    Ring {
        center: Vec2,
        radius: f32,
        width: f32,
        color: Color,
    },
    /// Convex polygon, points in order
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    clear: Color,
    shapes: Vec<Shape>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the list and set the background color
    pub fn clear(&mut self, color: Color) {
        self.clear = color;
        self.shapes.clear();
    }

    pub fn clear_color(&self) -> Color {
        self.clear
    }

    pub fn commands(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.w > 0.0 && rect.h > 0.0 {
            self.shapes.push(Shape::Rect { rect, color });
        }
    }

    pub fn stroke_rect(&mut self, rect: Rect, width: f32, color: Color) {
        if rect.w > 0.0 && rect.h > 0.0 && width > 0.0 {
            self.shapes.push(Shape::RectOutline { rect, width, color });
        }
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.fill_ellipse(center, Vec2::splat(radius), color);
    }

    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color) {
        if radius > 0.0 {
            self.shapes.push(Shape::Ring {
                center,
                radius,
                width,
                color,
            });
        }
    }

    pub fn fill_ellipse(&mut self, center: Vec2, radii: Vec2, color: Color) {
        if radii.x > 0.0 && radii.y > 0.0 {
            self.shapes.push(Shape::Ellipse {
                center,
                radii,
                color,
            });
        }
    }

    pub fn fill_polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() >= 3 {
            self.shapes.push(Shape::Polygon {
                points: points.to_vec(),
                color,
            });
        }
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        if from == to || width <= 0.0 {
            return;
        }
        self.shapes.push(Shape::Line {
            from,
            to,
            width,
            color,
        });
    }
}
