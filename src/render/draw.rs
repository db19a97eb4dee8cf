use std::f64::consts::TAU;

use bevy::color::Srgba;
use bevy::prelude::*;
use hexx::Hex;

use super::{RenderConfig, Stroke, Surface};
use crate::game::GameState;
use crate::hex;
use crate::math;

const SQRT_3: f32 = 1.732_050_8;

fn fade(color: Srgba, k: f32) -> Srgba {
    Srgba {
        alpha: color.alpha * k.clamp(0.0, 1.0),
        ..color
    }
}

/// Window-space bounds used for culling.
struct View {
    size: Vec2,
    margin: f32,
}

impl View {
    fn contains(&self, p: Vec2) -> bool {
        p.x >= -self.margin
            && p.y >= -self.margin
            && p.x <= self.size.x + self.margin
            && p.y <= self.size.y + self.margin
    }

    /// Hex distance from the centre hex that covers the whole view.
    fn reach(&self, hex_size: f32) -> u32 {
        let half_diagonal = self.size.length() / 2.0 + self.margin;
        (half_diagonal / (SQRT_3 * hex_size)).ceil() as u32 + 1
    }
}

/// Paints one frame of `state` onto `surface` at time `now` (ms).
///
/// Layers, back to front: background, board, trail, agents, enemies, player,
/// death flash, scanlines, vignette. Anything whose centre falls outside the
/// window plus [`RenderConfig::cull_margin`] is skipped.
pub fn draw_frame<S: Surface + ?Sized>(state: &GameState, surface: &mut S, now: f64, cfg: &RenderConfig) {
    let view = View {
        size: surface.size(),
        margin: cfg.cull_margin,
    };
    let palette = &cfg.palette;

    surface.fill_rect(Vec2::ZERO, view.size, palette.background);

    draw_board(state, surface, &view, cfg);
    draw_trail(state, surface, &view, cfg);
    draw_agents(state, surface, &view, cfg);
    draw_enemies(state, surface, &view, now, cfg);
    draw_player(state, surface, cfg);

    if state.is_dead {
        draw_death_flash(state, surface, &view, now, cfg);
    }

    let mut y = 0.0;
    while y < view.size.y {
        surface.line(
            Vec2::new(0.0, y),
            Vec2::new(view.size.x, y),
            Stroke::new(1.0, palette.scanline),
        );
        y += cfg.scanline_spacing.max(1.0);
    }

    let center = view.size / 2.0;
    let outer = view.size.length() / 2.0;
    surface.radial_gradient(
        center,
        outer * cfg.vignette_inner,
        outer,
        fade(palette.vignette, 0.0),
        palette.vignette,
    );
}

fn draw_board<S: Surface + ?Sized>(state: &GameState, surface: &mut S, view: &View, cfg: &RenderConfig) {
    let size = state.hex_size;
    let palette = &cfg.palette;
    let centre = hex::pixel_to_hex(state.camera, size);
    let outline = size - cfg.hex_gap;

    for h in hex::hexes_in_range(centre, view.reach(size)) {
        if !hex::in_bounds(h, state.grid_radius) {
            continue;
        }
        let screen = state.world_to_screen(hex::hex_to_pixel(h, size));
        if !view.contains(screen) {
            continue;
        }
        let alpha = hex_alpha(state, h, cfg);
        let corners = hex::hex_corners(screen, outline);

        if let Some(feature) = state.feature_map.get(&h) {
            let color = palette.feature(feature.kind);
            let focus = if state.active_feature == Some(h) { 1.0 } else { 0.6 };
            surface.polygon(
                &corners,
                fade(color, 0.18 * alpha * focus),
                Stroke::new(2.0, fade(color, alpha * focus)),
            );
            surface.text(screen, feature.kind.tag(), size * 0.28, fade(color, alpha));
            continue;
        }

        surface.polygon(&corners, Srgba::NONE, Stroke::new(1.0, fade(palette.grid_line, alpha)));
        if let Some(&glyph) = state.hex_fills.get(&h).filter(|&&g| g != ' ') {
            let mut buf = [0u8; 4];
            surface.text(screen, glyph.encode_utf8(&mut buf), size * 0.4, fade(palette.fill_glyph, alpha));
        }
    }
}

/// Edge fog times distance-from-player falloff.
fn hex_alpha(state: &GameState, h: Hex, cfg: &RenderConfig) -> f32 {
    let edge = math::edge_fog_alpha(
        hex::hex_distance(Hex::ZERO, h),
        state.grid_radius,
        cfg.fog_band,
        cfg.fog_min_alpha,
    );
    let sight = math::sight_falloff(
        hex::hex_distance(state.player.hex, h),
        cfg.sight_clear_radius,
        cfg.sight_fade_width,
        cfg.sight_min_alpha,
    );
    edge * sight
}

fn draw_trail<S: Surface + ?Sized>(state: &GameState, surface: &mut S, view: &View, cfg: &RenderConfig) {
    let trail = &state.player.trail;
    let len = trail.len() as f32;
    for (i, &h) in trail.iter().enumerate() {
        let screen = state.world_to_screen(hex::hex_to_pixel(h, state.hex_size));
        if !view.contains(screen) {
            continue;
        }
        // Oldest first, so the first entry is the faintest.
        let k = (i as f32 + 1.0) / (len + 1.0);
        surface.circle(
            screen,
            state.hex_size * (0.08 + 0.06 * k),
            fade(cfg.palette.trail, 0.7 * k),
            Stroke::NONE,
        );
    }
}

fn draw_agents<S: Surface + ?Sized>(state: &GameState, surface: &mut S, view: &View, cfg: &RenderConfig) {
    let size = state.hex_size;
    let color = cfg.palette.agent;
    for (i, agent) in state.agents.iter().enumerate() {
        let screen = state.world_to_screen(agent.pixel);
        if !view.contains(screen) {
            continue;
        }
        let alpha = hex_alpha(state, agent.coord, cfg);
        surface.circle(
            screen,
            size * 0.32,
            fade(color, 0.2 * alpha),
            Stroke::new(1.5, fade(color, alpha)),
        );
        let mut buf = [0u8; 4];
        surface.text(screen, agent.glyph.encode_utf8(&mut buf), size * 0.36, fade(color, alpha));
        if state.active_agent == Some(i) {
            surface.circle(screen, size * 0.5, Srgba::NONE, Stroke::new(1.0, fade(color, 0.8)));
        }
    }
}

fn draw_enemies<S: Surface + ?Sized>(
    state: &GameState,
    surface: &mut S,
    view: &View,
    now: f64,
    cfg: &RenderConfig,
) {
    let color = cfg.palette.enemy;
    let phase = if cfg.enemy_pulse_ms > 0.0 {
        (now / cfg.enemy_pulse_ms * TAU).sin() as f32
    } else {
        0.0
    };
    let r = state.hex_size * 0.36 * (1.0 + 0.1 * phase);
    for enemy in &state.enemies {
        let c = state.world_to_screen(enemy.pixel);
        if !view.contains(c) {
            continue;
        }
        let diamond = [
            c + Vec2::new(0.0, -r),
            c + Vec2::new(r, 0.0),
            c + Vec2::new(0.0, r),
            c + Vec2::new(-r, 0.0),
        ];
        surface.polygon(&diamond, fade(color, 0.35), Stroke::new(2.0, color));
    }
}

fn draw_player<S: Surface + ?Sized>(state: &GameState, surface: &mut S, cfg: &RenderConfig) {
    let screen = state.world_to_screen(state.player.pixel);
    let size = state.hex_size;
    let color = if state.is_dead {
        cfg.palette.enemy
    } else {
        cfg.palette.player
    };
    surface.circle(screen, size * 0.45, fade(color, 0.12), Stroke::NONE);
    surface.circle(screen, size * 0.26, color, Stroke::new(2.0, fade(color, 0.6)));
}

fn draw_death_flash<S: Surface + ?Sized>(
    state: &GameState,
    surface: &mut S,
    view: &View,
    now: f64,
    cfg: &RenderConfig,
) {
    let elapsed = now - state.death_flash_time;
    let k = math::death_flash_intensity(elapsed, cfg.flash_rise_ms, cfg.flash_decay_ms);
    if k > 0.0 {
        surface.fill_rect(Vec2::ZERO, view.size, fade(cfg.palette.death_flash, 0.55 * k));
    }
    if (0.0..cfg.caption_ms).contains(&elapsed) {
        surface.text(view.size / 2.0, "CAUGHT!", 48.0, cfg.palette.caption);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::GameConfig;
    use crate::render::recording::{DrawOp, RecordingSurface};

    fn board(radius: u32) -> GameState {
        let mut cfg = GameConfig::default();
        cfg.grid.radius = radius;
        let mut state = GameState::new(&cfg);
        state.initialize(false, &cfg.grid, &mut StdRng::seed_from_u64(9));
        state.resize(Vec2::new(1280.0, 720.0), 1.0, None);
        state
    }

    fn render(state: &GameState, now: f64) -> RecordingSurface {
        let mut surface = RecordingSurface::new(Vec2::new(1280.0, 720.0));
        draw_frame(state, &mut surface, now, &RenderConfig::default());
        surface
    }

    fn has_caption(surface: &RecordingSurface) -> bool {
        surface
            .ops
            .iter()
            .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "CAUGHT!"))
    }

    // ── layering ───────────────────────────────────────────────────

    #[test]
    fn background_first_vignette_last() {
        let surface = render(&board(30), 0.0);
        assert!(matches!(surface.ops.first(), Some(DrawOp::Rect { .. })));
        assert!(matches!(surface.ops.last(), Some(DrawOp::Gradient { .. })));
    }

    #[test]
    fn background_covers_window() {
        let surface = render(&board(30), 0.0);
        let Some(DrawOp::Rect { min, max, color }) = surface.ops.first() else {
            panic!("background missing");
        };
        assert_eq!(*min, Vec2::ZERO);
        assert_eq!(*max, Vec2::new(1280.0, 720.0));
        assert_eq!(*color, RenderConfig::default().palette.background);
    }

    #[test]
    fn scanlines_cover_height() {
        let surface = render(&board(30), 0.0);
        let lines: Vec<(Vec2, Vec2)> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Line { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect();
        assert_eq!(lines.len(), 240);
        for (from, to) in lines {
            assert_eq!(from.x, 0.0);
            assert_eq!(to.x, 1280.0);
            assert_eq!(from.y, to.y);
        }
    }

    #[test]
    fn vignette_is_centred() {
        let surface = render(&board(30), 0.0);
        let Some(DrawOp::Gradient { center, outer }) = surface.ops.last() else {
            panic!("vignette missing");
        };
        assert_eq!(*center, Vec2::new(640.0, 360.0));
        assert!((outer - Vec2::new(1280.0, 720.0).length() / 2.0).abs() < 1e-3);
    }

    #[test]
    fn board_drawn_before_entities() {
        let mut state = board(30);
        state.player.trail.push_back(Hex::new(-1, 0));
        let surface = render(&state, 0.0);
        let last_polygon_of_board = surface
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Polygon { points, .. } if points.len() == 6))
            .unwrap();
        let first_circle = surface
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::Circle { .. }))
            .unwrap();
        assert!(last_polygon_of_board < first_circle);
    }

    // ── culling ────────────────────────────────────────────────────

    #[test]
    fn cost_independent_of_board_radius() {
        let small = render(&board(30), 0.0).count_hexes();
        let large = render(&board(200), 0.0).count_hexes();
        assert_eq!(small, large);
        assert!(small < 3 * 30 * 31 + 1);
    }

    #[test]
    fn offscreen_entities_are_culled() {
        let mut state = board(30);
        for enemy in &mut state.enemies {
            enemy.pixel = Vec2::new(50_000.0, 0.0);
        }
        let surface = render(&state, 0.0);
        let diamonds = surface
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Polygon { points, .. } if points.len() == 4))
            .count();
        assert_eq!(diamonds, 0);
    }

    #[test]
    fn board_edge_is_fogged() {
        let mut state = board(8);
        let edge = Hex::new(8, 0);
        state.player.hex = edge;
        state.player.pixel = hex::hex_to_pixel(edge, state.hex_size);
        state.camera = state.player.pixel;
        let cfg = RenderConfig::default();
        assert!(hex_alpha(&state, edge, &cfg) < hex_alpha(&state, Hex::new(5, 0), &cfg));
    }

    // ── features ───────────────────────────────────────────────────

    #[test]
    fn feature_hex_shows_its_tag() {
        let surface = render(&board(30), 0.0);
        assert!(
            surface
                .ops
                .iter()
                .any(|op| matches!(op, DrawOp::Text { text, .. } if text == "GAME"))
        );
    }

    #[test]
    fn feature_hexes_are_filled_blank_hexes_are_not() {
        let surface = render(&board(30), 0.0);
        let mut features = 0;
        for op in &surface.ops {
            if let DrawOp::Polygon { points, fill, stroke_width } = op {
                if points.len() != 6 {
                    continue;
                }
                if *stroke_width > 1.0 {
                    features += 1;
                    assert!(fill.alpha > 0.0);
                } else {
                    assert_eq!(fill.alpha, 0.0);
                }
            }
        }
        assert!(features >= 1);
    }

    // ── entities ───────────────────────────────────────────────────

    #[test]
    fn active_agent_gets_ring() {
        let mut state = board(30);
        state.active_agent = Some(0);
        let screen = state.world_to_screen(state.agents[0].pixel);
        let ring = state.hex_size * 0.5;
        let surface = render(&state, 0.0);
        assert!(surface.ops.iter().any(|op| matches!(
            op,
            DrawOp::Circle { center, radius } if *center == screen && (*radius - ring).abs() < 1e-4
        )));
    }

    // ── death flash ────────────────────────────────────────────────

    #[test]
    fn caption_only_while_recently_dead() {
        let mut state = board(30);
        assert!(!has_caption(&render(&state, 500.0)));

        state.is_dead = true;
        state.death_flash_time = 1000.0;
        let surface = render(&state, 1050.0);
        assert!(has_caption(&surface));
        assert!(surface.ops.iter().any(|op| matches!(
            op,
            DrawOp::Text { pos, text } if text == "CAUGHT!" && *pos == Vec2::new(640.0, 360.0)
        )));
        assert!(has_caption(&render(&state, 1999.0)));
        assert!(!has_caption(&render(&state, 2000.0)));
    }

    #[test]
    fn flash_overlay_sits_above_player() {
        let mut state = board(30);
        state.is_dead = true;
        state.death_flash_time = 0.0;
        let surface = render(&state, 100.0);
        let rects: Vec<usize> = surface
            .ops
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, DrawOp::Rect { .. }))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(rects.len(), 2);
        let last_circle = surface
            .ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::Circle { .. }))
            .unwrap();
        assert!(rects[1] > last_circle);
    }
}
