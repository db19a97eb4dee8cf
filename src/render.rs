//! Immediate-mode board renderer.
//!
//! [`draw_frame`] reads a [`GameState`](crate::game::GameState) and paints it
//! onto any [`Surface`]. In the app the surface is the egui background layer
//! ([`EguiSurface`]); tests use a recording surface.

mod draw;
mod egui_surface;
#[cfg(test)]
mod recording;
pub mod systems;

pub use draw::draw_frame;
pub use egui_surface::EguiSurface;

use bevy::color::Srgba;
use bevy::prelude::*;

use crate::WidgetState;
use crate::content::FeatureKind;
use crate::game;

/// Outline style for shapes. Zero width means no outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Line width in px.
    pub width: f32,
    /// Line colour.
    pub color: Srgba,
}

impl Stroke {
    /// No outline.
    pub const NONE: Self = Self {
        width: 0.0,
        color: Srgba::NONE,
    };

    /// Outline of `width` px in `color`.
    pub const fn new(width: f32, color: Srgba) -> Self {
        Self { width, color }
    }
}

/// A 2D drawing target in window coordinates (`y` down).
pub trait Surface {
    /// Drawable size in logical px.
    fn size(&self) -> Vec2;
    /// Axis-aligned filled rectangle.
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Srgba);
    /// Convex polygon.
    fn polygon(&mut self, points: &[Vec2], fill: Srgba, stroke: Stroke);
    /// Circle.
    fn circle(&mut self, center: Vec2, radius: f32, fill: Srgba, stroke: Stroke);
    /// Straight line.
    fn line(&mut self, from: Vec2, to: Vec2, stroke: Stroke);
    /// Text centred on `pos`.
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Srgba);
    /// Radial gradient from `inner_color` at `inner` to `outer_color` at `outer`.
    fn radial_gradient(&mut self, center: Vec2, inner: f32, outer: f32, inner_color: Srgba, outer_color: Srgba);
}

/// Colours used by the renderer.
#[derive(Clone, Debug, Reflect)]
pub struct Palette {
    /// Backdrop behind the board.
    pub background: Srgba,
    /// Hex outlines.
    pub grid_line: Srgba,
    /// Decorative fill glyphs.
    pub fill_glyph: Srgba,
    /// Game feature hexes.
    pub game: Srgba,
    /// Lore feature hexes.
    pub lore: Srgba,
    /// Agent feature hexes.
    pub agent_feature: Srgba,
    /// Token feature hexes.
    pub token: Srgba,
    /// Community feature hexes.
    pub community: Srgba,
    /// Trail dots.
    pub trail: Srgba,
    /// Agent markers.
    pub agent: Srgba,
    /// Enemy markers.
    pub enemy: Srgba,
    /// Player marker.
    pub player: Srgba,
    /// Death flash overlay.
    pub death_flash: Srgba,
    /// Death caption.
    pub caption: Srgba,
    /// Scanline overlay.
    pub scanline: Srgba,
    /// Vignette edge colour.
    pub vignette: Srgba,
}

impl Palette {
    /// Highlight colour for a feature category.
    pub fn feature(&self, kind: FeatureKind) -> Srgba {
        match kind {
            FeatureKind::Game => self.game,
            FeatureKind::Lore => self.lore,
            FeatureKind::Agent => self.agent_feature,
            FeatureKind::Token => self.token,
            FeatureKind::Community => self.community,
        }
    }
}

/// Renderer tuning.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct RenderConfig {
    /// Colours.
    pub palette: Palette,
    /// Rings inside the board edge over which hexes fade out.
    pub fog_band: u32,
    /// Opacity of the outermost ring.
    pub fog_min_alpha: f32,
    /// Hex distance from the player drawn at full brightness.
    pub sight_clear_radius: u32,
    /// Rings over which brightness falls off beyond the clear radius.
    pub sight_fade_width: u32,
    /// Brightness floor far from the player.
    pub sight_min_alpha: f32,
    /// Extra px around the window still drawn before culling.
    pub cull_margin: f32,
    /// Gap between neighbouring hex outlines (px).
    pub hex_gap: f32,
    /// Vertical distance between scanlines (px).
    pub scanline_spacing: f32,
    /// Vignette clear radius as a fraction of the half diagonal.
    pub vignette_inner: f32,
    /// Death flash rise time (ms).
    pub flash_rise_ms: f64,
    /// Death flash decay time (ms).
    pub flash_decay_ms: f64,
    /// How long the death caption stays up (ms).
    pub caption_ms: f64,
    /// Period of the enemy pulse (ms).
    pub enemy_pulse_ms: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette {
                background: Srgba::rgb(0.02, 0.03, 0.06),
                grid_line: Srgba::new(0.25, 0.85, 0.95, 0.35),
                fill_glyph: Srgba::new(0.45, 0.75, 0.85, 0.45),
                game: Srgba::rgb(0.3, 1.0, 0.55),
                lore: Srgba::rgb(0.75, 0.55, 1.0),
                agent_feature: Srgba::rgb(0.35, 0.75, 1.0),
                token: Srgba::rgb(1.0, 0.8, 0.25),
                community: Srgba::rgb(1.0, 0.45, 0.75),
                trail: Srgba::rgb(0.3, 0.95, 1.0),
                agent: Srgba::rgb(0.55, 0.85, 1.0),
                enemy: Srgba::rgb(1.0, 0.2, 0.25),
                player: Srgba::rgb(0.95, 1.0, 1.0),
                death_flash: Srgba::rgb(0.9, 0.05, 0.1),
                caption: Srgba::WHITE,
                scanline: Srgba::new(0.0, 0.0, 0.0, 0.18),
                vignette: Srgba::new(0.0, 0.0, 0.0, 0.75),
            },
            fog_band: 6,
            fog_min_alpha: 0.08,
            sight_clear_radius: 5,
            sight_fade_width: 9,
            sight_min_alpha: 0.3,
            cull_margin: 60.0,
            hex_gap: 1.5,
            scanline_spacing: 3.0,
            vignette_inner: 0.55,
            flash_rise_ms: 100.0,
            flash_decay_ms: 1000.0,
            caption_ms: 1000.0,
            enemy_pulse_ms: 900.0,
        }
    }
}

/// Camera, clear colour and debug overlay for the board.
pub struct RenderPlugin(pub RenderConfig);

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<RenderConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(ClearColor(self.0.palette.background.into()))
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                systems::draw_feature_labels
                    .run_if(in_state(WidgetState::Debugging))
                    .after(game::systems::run_frame),
            );
    }
}
