use bevy::color::Srgba;
use bevy::prelude::*;
use bevy_egui::egui;

use super::{Stroke, Surface};

/// Segments used to tessellate a radial gradient.
const GRADIENT_SEGMENTS: u32 = 48;

fn color32(c: Srgba) -> egui::Color32 {
    let byte = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(byte(c.red), byte(c.green), byte(c.blue), byte(c.alpha))
}

fn pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

fn stroke(s: Stroke) -> egui::Stroke {
    egui::Stroke::new(s.width, color32(s.color))
}

/// [`Surface`] backed by an egui painter.
pub struct EguiSurface {
    painter: egui::Painter,
}

impl EguiSurface {
    /// Draws through `painter`, usually the background layer.
    pub fn new(painter: egui::Painter) -> Self {
        Self { painter }
    }
}

impl Surface for EguiSurface {
    fn size(&self) -> Vec2 {
        let rect = self.painter.clip_rect();
        Vec2::new(rect.width(), rect.height())
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Srgba) {
        self.painter
            .rect_filled(egui::Rect::from_min_max(pos(min), pos(max)), 0.0, color32(color));
    }

    fn polygon(&mut self, points: &[Vec2], fill: Srgba, s: Stroke) {
        let points = points.iter().copied().map(pos).collect();
        self.painter
            .add(egui::Shape::convex_polygon(points, color32(fill), stroke(s)));
    }

    fn circle(&mut self, center: Vec2, radius: f32, fill: Srgba, s: Stroke) {
        self.painter.circle(pos(center), radius, color32(fill), stroke(s));
    }

    fn line(&mut self, from: Vec2, to: Vec2, s: Stroke) {
        self.painter.line_segment([pos(from), pos(to)], stroke(s));
    }

    fn text(&mut self, at: Vec2, text: &str, size: f32, color: Srgba) {
        self.painter.text(
            pos(at),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::monospace(size),
            color32(color),
        );
    }

    fn radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, inner_color: Srgba, outer_color: Srgba) {
        if inner_color.alpha > 0.0 {
            self.painter.circle_filled(pos(center), inner, color32(inner_color));
        }
        let (ci, co) = (color32(inner_color), color32(outer_color));
        let mut mesh = egui::Mesh::default();
        for i in 0..GRADIENT_SEGMENTS {
            let angle = i as f32 / GRADIENT_SEGMENTS as f32 * std::f32::consts::TAU;
            let dir = Vec2::from_angle(angle);
            mesh.colored_vertex(pos(center + dir * inner), ci);
            mesh.colored_vertex(pos(center + dir * outer), co);
        }
        for i in 0..GRADIENT_SEGMENTS {
            let a = i * 2;
            let b = (i + 1) % GRADIENT_SEGMENTS * 2;
            mesh.add_triangle(a, a + 1, b);
            mesh.add_triangle(b, a + 1, b + 1);
        }
        self.painter.add(egui::Shape::mesh(mesh));
    }
}
