#![warn(missing_docs)]
//! Hex-grid exploration widget.
//!
//! The player steps across a pointy-top hex board while ambient agents wander
//! and hunters give chase. Feature hexes surface cards, nearby agents speak,
//! and a catch flashes the screen red before the board resets.
//!
//! The simulation ([`game`]) is plain data advanced one frame at a time; the
//! Bevy plugins only feed it input and time and paint the result.

pub mod config;
pub mod content;
pub mod game;
pub mod hex;
pub mod hud;
pub mod input;
pub mod math;
pub mod render;

use bevy::prelude::*;

/// Whether the widget is the focused view, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum WidgetState {
    /// Focused and accepting input.
    #[default]
    Active,
    /// Window lost focus; the board keeps animating but ignores input.
    Inactive,
    /// Debug overlay active (Tab to toggle).
    Debugging,
}
