use bevy::prelude::*;

use super::InputConfig;
use crate::hex::Direction;

/// Turns key presses and swipes into throttled [`Direction`]s.
///
/// Only four of the six directions are reachable: East, NorthEast, West and
/// SouthWest.
#[derive(Resource, Debug, Clone)]
pub struct DirectionMapper {
    throttle_ms: f64,
    swipe_min_px: f32,
    last_emit: Option<f64>,
}

impl DirectionMapper {
    /// A mapper that has never emitted.
    pub fn new(cfg: &InputConfig) -> Self {
        Self {
            throttle_ms: cfg.throttle_ms,
            swipe_min_px: cfg.swipe_min_px,
            last_emit: None,
        }
    }

    /// Direction bound to an arrow key.
    pub fn map_key(key: KeyCode) -> Option<Direction> {
        match key {
            KeyCode::ArrowRight => Some(Direction::East),
            KeyCode::ArrowUp => Some(Direction::NorthEast),
            KeyCode::ArrowLeft => Some(Direction::West),
            KeyCode::ArrowDown => Some(Direction::SouthWest),
            _ => None,
        }
    }

    /// Direction of a completed swipe with screen-space displacement `delta`.
    ///
    /// `delta.y` grows downwards. Quadrants are split at ±45° and ±135°; an
    /// exact diagonal counts as horizontal.
    pub fn classify_swipe(&self, delta: Vec2) -> Option<Direction> {
        if delta.length() < self.swipe_min_px {
            return None;
        }
        let direction = if delta.x.abs() >= delta.y.abs() {
            if delta.x >= 0.0 {
                Direction::East
            } else {
                Direction::West
            }
        } else if delta.y > 0.0 {
            Direction::SouthWest
        } else {
            Direction::NorthEast
        };
        Some(direction)
    }

    /// Emits `direction` unless the throttle window since the last emission
    /// is still open.
    pub fn emit(&mut self, direction: Direction, now: f64) -> Option<Direction> {
        if self.last_emit.is_some_and(|last| now - last < self.throttle_ms) {
            return None;
        }
        self.last_emit = Some(now);
        Some(direction)
    }

    /// [`Self::map_key`] then [`Self::emit`]. Unbound keys leave the throttle alone.
    pub fn key(&mut self, key: KeyCode, now: f64) -> Option<Direction> {
        Self::map_key(key).and_then(|d| self.emit(d, now))
    }

    /// [`Self::classify_swipe`] then [`Self::emit`].
    pub fn swipe(&mut self, delta: Vec2, now: f64) -> Option<Direction> {
        self.classify_swipe(delta).and_then(|d| self.emit(d, now))
    }
}
