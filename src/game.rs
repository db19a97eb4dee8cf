//! The hex board simulation: state, AI, and the per-frame loop.
//!
//! [`GameState`] is the single blackboard. [`ai`] advances agents and enemies,
//! [`frame`] orders one frame of work, and [`systems`] wires both into Bevy.

pub mod ai;
pub mod frame;
mod state;
pub mod systems;

pub use frame::{AgentFocus, FrameLoop, LoopHandle, Notice};
pub use state::{Agent, Enemy, GameState, MoveError, Player, PlayerPhase, Viewport};

use bevy::prelude::*;

use crate::content::Feature;

/// Nested configuration for the simulation.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct GameConfig {
    /// Board geometry and decorative fill.
    pub grid: GridSettings,
    /// Interpolation speeds and durations.
    pub motion: MotionSettings,
    /// Agent and enemy cadence.
    pub ai: AiSettings,
    /// Number of visited hexes kept in the player's trail.
    pub trail_length: usize,
    /// Time from a catch until the board resets (ms).
    pub death_reset_ms: f64,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Host preference for reduced motion, read once at startup.
    pub prefers_reduced_motion: bool,
}

/// Board geometry and decorative fill parameters.
#[derive(Clone, Debug, Reflect)]
pub struct GridSettings {
    /// Hex size in px before breakpoint sizing kicks in.
    pub hex_size: f32,
    /// Fixed hex size that disables breakpoint sizing.
    pub hex_size_override: Option<f32>,
    /// Maximum hex distance from the origin that is in bounds.
    pub radius: u32,
    /// Seed for the fill-density noise field.
    pub fill_noise_seed: u32,
    /// Octaves for the fill-density noise field.
    pub fill_noise_octaves: usize,
    /// Spatial scale divisor for fill-density sampling (in hexes).
    pub fill_noise_scale: f64,
    /// Lowest probability that a hex carries a glyph.
    pub min_fill_density: f32,
    /// Highest probability that a hex carries a glyph.
    pub max_fill_density: f32,
}

/// Interpolation speeds. See [`MotionSettings::effective`].
#[derive(Clone, Debug, Reflect)]
pub struct MotionSettings {
    /// Duration of one player step (ms).
    pub move_duration_ms: f64,
    /// Fraction of the remaining distance agents cover per frame.
    pub agent_lerp: f32,
    /// Fraction of the remaining distance enemies cover per frame.
    pub enemy_lerp: f32,
    /// Exponential smoothing factor of the camera per frame.
    pub camera_smoothing: f32,
}

/// Agent and enemy cadence.
#[derive(Clone, Debug, Reflect)]
pub struct AiSettings {
    /// Interval between agent wander-target picks (ms).
    pub wander_interval_ms: f64,
    /// Interval between enemy decisions (ms).
    pub enemy_interval_ms: f64,
    /// Probability an enemy chases instead of wandering.
    pub chase_probability: f64,
    /// Hex distance at which an agent counts as nearby.
    pub proximity_radius: u32,
}

impl MotionSettings {
    /// Speed constants to use for the given reduced-motion preference.
    ///
    /// Reduced motion zeroes the step duration and sets every rate to `1.0`,
    /// so everything lands in a single frame.
    pub fn effective(&self, reduced: bool) -> Self {
        if !reduced {
            return self.clone();
        }
        Self {
            move_duration_ms: 0.0,
            agent_lerp: 1.0,
            enemy_lerp: 1.0,
            camera_smoothing: 1.0,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid: GridSettings {
                hex_size: 44.0,
                hex_size_override: None,
                radius: 30,
                fill_noise_seed: 7,
                fill_noise_octaves: 3,
                fill_noise_scale: 6.0,
                min_fill_density: 0.05,
                max_fill_density: 0.55,
            },
            motion: MotionSettings {
                move_duration_ms: 150.0,
                agent_lerp: 0.03,
                enemy_lerp: 0.025,
                camera_smoothing: 0.08,
            },
            ai: AiSettings {
                wander_interval_ms: 2500.0,
                enemy_interval_ms: 3000.0,
                chase_probability: 0.7,
                proximity_radius: 2,
            },
            trail_length: 6,
            death_reset_ms: 1200.0,
            seed: None,
            prefers_reduced_motion: false,
        }
    }
}

/// Focus moved onto (or off) a feature hex.
#[derive(Message, Debug, Clone)]
pub struct FeatureActivated(pub Option<&'static Feature>);

/// Card data for an agent the player is standing near.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentCard {
    /// Agent identifier.
    pub id: &'static str,
    /// Marker glyph.
    pub glyph: char,
    /// Phrase picked when the agent became nearby.
    pub phrase: &'static str,
}

/// An agent came within range (or the last one left).
#[derive(Message, Debug, Clone)]
pub struct AgentNearby {
    /// The nearby agent, if any.
    pub agent: Option<AgentCard>,
    /// Agent position in window coordinates.
    pub screen: Option<Vec2>,
}

/// The first directional input was received.
#[derive(Message, Debug, Clone, Copy)]
pub struct FirstInputReceived;

/// Simulation plugin: owns [`GameState`] and runs the frame loop in `Update`.
pub struct GamePlugin(pub GameConfig);

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GameConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(GameState::new(&self.0))
            .add_message::<FeatureActivated>()
            .add_message::<AgentNearby>()
            .add_message::<FirstInputReceived>()
            .add_systems(Startup, systems::start_frame_loop)
            .add_systems(
                Update,
                (
                    systems::handle_resize,
                    systems::run_frame.after(systems::handle_resize),
                    systems::cancel_on_close,
                ),
            );
    }
}
