//! Hex Quest launcher.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy::window::{WindowFocused, WindowResolution};
use bevy_inspector_egui::quick::WorldInspectorPlugin;
#[cfg(feature = "native")]
use clap::Parser;

use hex_quest::config::LaunchOptions;
use hex_quest::{WidgetState, game, hud, input, render};

#[cfg(feature = "native")]
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Seed for agent and enemy randomness; omit for a fresh board each run.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// Resolve every move and interpolation in a single frame.
    #[arg(long)]
    reduced_motion: bool,
    /// Maximum hex distance from the origin that is walkable.
    #[arg(long, value_name = "RINGS")]
    grid_radius: Option<u32>,
    /// Fixed hex size in pixels instead of sizing by window width.
    #[arg(long, value_name = "PIXELS")]
    hex_size: Option<f32>,
    /// Initial window width.
    #[arg(long, value_name = "PIXELS")]
    width: Option<u32>,
    /// Initial window height.
    #[arg(long, value_name = "PIXELS")]
    height: Option<u32>,
}

#[cfg(feature = "native")]
fn launch_options() -> LaunchOptions {
    let args = CliArgs::parse();
    LaunchOptions {
        seed: args.seed,
        reduced_motion: args.reduced_motion,
        grid_radius: args.grid_radius,
        hex_size: args.hex_size,
        width: args.width,
        height: args.height,
    }
}

#[cfg(not(feature = "native"))]
fn launch_options() -> LaunchOptions {
    LaunchOptions::default()
}

fn main() {
    let launch = match launch_options().validate() {
        Ok(launch) => launch,
        Err(err) => {
            eprintln!("hex-quest: {err}");
            std::process::exit(2);
        }
    };
    let (width, height) = launch.window;

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Quest".into(),
            resolution: WindowResolution::new(width, height),
            prevent_default_event_handling: true,
            ..default()
        }),
        ..default()
    }))
    .register_type::<WidgetState>()
    .init_state::<WidgetState>()
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(game::GamePlugin(launch.game))
    .add_plugins(input::InputPlugin(input::InputConfig::default()))
    .add_plugins(render::RenderPlugin(render::RenderConfig::default()))
    .add_plugins(hud::HudPlugin)
    .add_systems(Update, (exit_on_esc, toggle_inspector, track_focus))
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(WidgetState::Debugging)));

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run();
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<WidgetState>>,
    mut next: ResMut<NextState<WidgetState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            WidgetState::Active => WidgetState::Debugging,
            WidgetState::Debugging => WidgetState::Active,
            WidgetState::Inactive => return,
        };
        info!("widget state -> {new_state:?}");
        next.set(new_state);
    }
}

/// Input is only processed while the window has focus.
fn track_focus(
    mut focus: MessageReader<WindowFocused>,
    state: Res<State<WidgetState>>,
    mut next: ResMut<NextState<WidgetState>>,
) {
    let Some(event) = focus.read().last() else {
        return;
    };
    match (state.get(), event.focused) {
        (WidgetState::Active, false) => next.set(WidgetState::Inactive),
        (WidgetState::Inactive, true) => next.set(WidgetState::Active),
        _ => {}
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
