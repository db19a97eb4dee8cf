use bevy::prelude::*;
use bevy_egui::egui;

use crate::game::GameState;
use crate::hex;

/// Spawns the 2D camera egui draws through.
pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, Name::new("Board Camera")));
}

/// Labels every on-screen feature hex with its `q,r` key.
pub fn draw_feature_labels(
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    state: Res<GameState>,
    mut ready: Local<bool>,
) {
    if !*ready {
        *ready = true;
        return;
    }
    let Ok(mut ctx) = egui_ctx.single_mut() else {
        return;
    };

    let painter = ctx.get_mut().layer_painter(egui::LayerId::background());
    let offset = Vec2::new(0.0, state.hex_size * 0.45);

    for &h in state.feature_map.keys() {
        let screen = state.world_to_screen(hex::hex_to_pixel(h, state.hex_size)) + offset;
        if screen.cmplt(Vec2::ZERO).any() || screen.cmpgt(state.viewport.size).any() {
            continue;
        }
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_CENTER,
            hex::hex_key(h),
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
    }
}
