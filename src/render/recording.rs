use bevy::color::Srgba;
use bevy::prelude::*;

use super::{Stroke, Surface};

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect { min: Vec2, max: Vec2, color: Srgba },
    Polygon { points: Vec<Vec2>, fill: Srgba, stroke_width: f32 },
    Circle { center: Vec2, radius: f32 },
    Line { from: Vec2, to: Vec2 },
    Text { pos: Vec2, text: String },
    Gradient { center: Vec2, outer: f32 },
}

/// A [`Surface`] that keeps every call in order.
pub struct RecordingSurface {
    size: Vec2,
    pub ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(size: Vec2) -> Self {
        Self { size, ops: Vec::new() }
    }

    /// Number of six-sided polygons, i.e. board hexes drawn.
    pub fn count_hexes(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Polygon { points, .. } if points.len() == 6))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Srgba) {
        self.ops.push(DrawOp::Rect { min, max, color });
    }

    fn polygon(&mut self, points: &[Vec2], fill: Srgba, stroke: Stroke) {
        self.ops.push(DrawOp::Polygon {
            points: points.to_vec(),
            fill,
            stroke_width: stroke.width,
        });
    }

    fn circle(&mut self, center: Vec2, radius: f32, _fill: Srgba, _stroke: Stroke) {
        self.ops.push(DrawOp::Circle { center, radius });
    }

    fn line(&mut self, from: Vec2, to: Vec2, _stroke: Stroke) {
        self.ops.push(DrawOp::Line { from, to });
    }

    fn text(&mut self, pos: Vec2, text: &str, _size: f32, _color: Srgba) {
        self.ops.push(DrawOp::Text {
            pos,
            text: text.to_owned(),
        });
    }

    fn radial_gradient(&mut self, center: Vec2, _inner: f32, outer: f32, _inner_color: Srgba, _outer_color: Srgba) {
        self.ops.push(DrawOp::Gradient { center, outer });
    }
}
