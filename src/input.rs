//! Keyboard and touch input mapped to hex directions.
//!
//! [`DirectionMapper`] does the mapping and throttling, [`systems`] feeds it
//! from Bevy's input resources and applies the result to the game state.

mod mapper;
pub mod systems;

pub use mapper::DirectionMapper;

use bevy::prelude::*;

use crate::WidgetState;
use crate::game;

/// Input tuning.
#[derive(Resource, Clone, Debug, Reflect)]
pub struct InputConfig {
    /// Minimum time between two emitted directions (ms), shared by all sources.
    pub throttle_ms: f64,
    /// Minimum swipe length (px) that counts as a direction.
    pub swipe_min_px: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            throttle_ms: 180.0,
            swipe_min_px: 30.0,
        }
    }
}

/// Reads arrows and swipes while the widget is active.
pub struct InputPlugin(pub InputConfig);

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<InputConfig>()
            .insert_resource(self.0.clone())
            .insert_resource(DirectionMapper::new(&self.0))
            .add_systems(
                Update,
                systems::read_direction_input
                    .run_if(in_state(WidgetState::Active))
                    .before(game::systems::run_frame),
            );
    }
}
