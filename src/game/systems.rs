use bevy::app::AppExit;
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowCloseRequested, WindowResized};
use bevy_egui::egui;
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{AgentCard, AgentNearby, FeatureActivated, FirstInputReceived, FrameLoop, GameConfig, GameState, Notice};
use crate::render::{self, EguiSurface, RenderConfig};

/// Forwards [`Notice`]s to the host as Bevy messages.
#[derive(SystemParam)]
pub struct NoticeWriters<'w> {
    features: MessageWriter<'w, FeatureActivated>,
    agents: MessageWriter<'w, AgentNearby>,
    first_input: MessageWriter<'w, FirstInputReceived>,
}

impl NoticeWriters<'_> {
    /// Writes the message matching `notice`.
    pub fn send(&mut self, notice: Notice) {
        match notice {
            Notice::FeatureChanged(feature) => {
                self.features.write(FeatureActivated(feature));
            }
            Notice::AgentNearby(focus) => {
                let (agent, screen) = match focus {
                    Some(f) => (
                        Some(AgentCard {
                            id: f.id,
                            glyph: f.glyph,
                            phrase: f.phrase,
                        }),
                        Some(f.screen),
                    ),
                    None => (None, None),
                };
                self.agents.write(AgentNearby { agent, screen });
            }
            Notice::FirstInput => {
                self.first_input.write(FirstInputReceived);
            }
        }
    }
}

// ── Startup ────────────────────────────────────────────────────────

/// Initializes [`GameState`] against the primary window and starts the loop.
///
/// Without a primary window the loop is inserted already cancelled.
pub fn start_frame_loop(
    mut commands: Commands,
    cfg: Res<GameConfig>,
    mut state: ResMut<GameState>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let Ok(window) = windows.single() else {
        warn!("no primary window, frame loop not started");
        commands.insert_resource(FrameLoop::detached(rng));
        return;
    };

    state.resize(window.size(), window.scale_factor(), cfg.grid.hex_size_override);
    state.initialize(cfg.prefers_reduced_motion, &cfg.grid, &mut rng);
    commands.insert_resource(FrameLoop::start(rng));
}

// ── Update ─────────────────────────────────────────────────────────

/// Advances one frame and paints it onto the egui background layer.
#[allow(clippy::too_many_arguments)]
pub fn run_frame(
    time: Res<Time<Real>>,
    cfg: Res<GameConfig>,
    render_cfg: Res<RenderConfig>,
    mut state: ResMut<GameState>,
    frame_loop: Option<ResMut<FrameLoop>>,
    mut egui_ctx: Query<&mut bevy_egui::EguiContext>,
    mut writers: NoticeWriters,
    mut ready: Local<bool>,
) {
    let Some(mut frame_loop) = frame_loop else {
        return;
    };
    // Egui fonts aren't available until after the first Context::run() in the render pass.
    let paint = *ready;
    *ready = true;

    let now = time.elapsed_secs_f64() * 1000.0;
    let mut ctx = egui_ctx.single_mut().ok();
    let notices = frame_loop.frame(&mut state, &cfg, now, |s| {
        let Some(ctx) = ctx.as_mut().filter(|_| paint) else {
            return;
        };
        let painter = ctx.get_mut().layer_painter(egui::LayerId::background());
        render::draw_frame(s, &mut EguiSurface::new(painter), now, &render_cfg);
    });
    for notice in notices {
        writers.send(notice);
    }
}

/// Re-derives hex size and pixel positions when the window changes size.
///
/// A stopped loop leaves the state as it was.
pub fn handle_resize(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cfg: Res<GameConfig>,
    frame_loop: Option<Res<FrameLoop>>,
    mut state: ResMut<GameState>,
) {
    let Some(event) = resized.read().last() else {
        return;
    };
    if !frame_loop.is_some_and(|l| l.is_running()) {
        return;
    }
    let Ok(window) = windows.get(event.window) else {
        return;
    };
    state.resize(
        Vec2::new(event.width, event.height),
        window.scale_factor(),
        cfg.grid.hex_size_override,
    );
}

/// Cancels the loop when the window closes or the app exits.
pub fn cancel_on_close(
    mut close: MessageReader<WindowCloseRequested>,
    mut exit: MessageReader<AppExit>,
    frame_loop: Option<Res<FrameLoop>>,
) {
    let closing = close.read().count() > 0;
    let exiting = exit.read().count() > 0;
    if !closing && !exiting {
        return;
    }
    if let Some(frame_loop) = frame_loop {
        frame_loop.handle().cancel();
    }
}
