//! Non-player behaviour: agent wandering, enemy chase/wander, and catches.
//!
//! Every function takes the blackboard by `&mut` and is called once per frame
//! by [`super::FrameLoop`]. Randomness comes in through `R: Rng` so tests can
//! pass a seeded generator.

use bevy::prelude::*;
use hexx::Hex;
use rand::Rng;

use super::{AiSettings, GameState};
use crate::hex::{self, Direction};
use crate::math;

/// Squared pixel distance under which an interpolating entity has arrived.
const ARRIVAL_EPSILON_SQ: f32 = 1.0;

/// Neighbor of `from` in a uniformly random direction, if it is on the board.
fn random_step<R: Rng + ?Sized>(from: Hex, radius: u32, rng: &mut R) -> Option<Hex> {
    let next = hex::hex_neighbor(from, rng.random_range(0..6));
    hex::in_bounds(next, radius).then_some(next)
}

/// The on-board neighbor of `from` closest to `toward`.
///
/// Ties go to the lowest direction index. `None` when no neighbor is on the
/// board.
pub fn greedy_chase_step(from: Hex, toward: Hex, radius: u32) -> Option<Hex> {
    Direction::ALL
        .iter()
        .map(|dir| hex::hex_neighbor(from, dir.index()))
        .filter(|&next| hex::in_bounds(next, radius))
        .min_by_key(|&next| hex::hex_distance(next, toward))
}

/// Every `wander_interval_ms`, gives each agent a random neighbor as its target.
///
/// An off-board pick leaves that agent's previous target in place.
pub fn update_agent_wander<R: Rng + ?Sized>(
    state: &mut GameState,
    now: f64,
    cfg: &AiSettings,
    rng: &mut R,
) {
    if now - state.last_agent_wander < cfg.wander_interval_ms {
        return;
    }
    state.last_agent_wander = now;

    let radius = state.grid_radius;
    for agent in &mut state.agents {
        if let Some(next) = random_step(agent.coord, radius, rng) {
            agent.target = next;
        }
    }
}

/// Moves each agent's pixel a fraction `rate` towards its target hex.
pub fn lerp_agents(state: &mut GameState, rate: f32) {
    let size = state.hex_size;
    for agent in &mut state.agents {
        let goal = hex::hex_to_pixel(agent.target, size);
        agent.pixel = math::approach(agent.pixel, goal, rate);
        if agent.pixel.distance_squared(goal) < ARRIVAL_EPSILON_SQ {
            agent.pixel = goal;
            agent.coord = agent.target;
        }
    }
}

/// Every `enemy_interval_ms`, each enemy either chases or wanders.
///
/// Enemies stay dormant until the player has moved, and freeze while the
/// player is dead. A chase step that finds no on-board neighbor keeps the
/// previous target.
pub fn update_enemies<R: Rng + ?Sized>(
    state: &mut GameState,
    now: f64,
    cfg: &AiSettings,
    rng: &mut R,
) {
    if !state.has_received_input || state.is_dead {
        return;
    }
    if now - state.last_enemy_decision < cfg.enemy_interval_ms {
        return;
    }
    state.last_enemy_decision = now;

    let radius = state.grid_radius;
    let player = state.player.hex;
    for enemy in &mut state.enemies {
        let chase = rng.random::<f64>() < cfg.chase_probability;
        let next = if chase {
            greedy_chase_step(enemy.coord, player, radius)
        } else {
            random_step(enemy.coord, radius, rng)
        };
        if let Some(next) = next {
            debug!(
                "{} {} -> {}",
                enemy.id,
                if chase { "chases" } else { "wanders" },
                hex::hex_key(next)
            );
            enemy.target = next;
        }
    }
}

/// Moves each enemy's pixel a fraction `rate` towards its target hex.
pub fn lerp_enemies(state: &mut GameState, rate: f32) {
    let size = state.hex_size;
    for enemy in &mut state.enemies {
        let goal = hex::hex_to_pixel(enemy.target, size);
        enemy.pixel = math::approach(enemy.pixel, goal, rate);
        if enemy.pixel.distance_squared(goal) < ARRIVAL_EPSILON_SQ {
            enemy.pixel = goal;
            enemy.coord = enemy.target;
        }
    }
}

/// Marks the player dead when an enemy's settled hex equals the player's.
///
/// Only checked once the player has moved and while alive. Returns `true` on
/// the frame the catch happens.
pub fn check_enemy_collision(state: &mut GameState, now: f64) -> bool {
    if !state.has_received_input || state.is_dead {
        return false;
    }
    let player = state.player.hex;
    let Some(enemy) = state.enemies.iter().find(|e| e.coord == player) else {
        return false;
    };
    info!("caught by {} at {}", enemy.id, hex::hex_key(player));

    state.is_dead = true;
    state.death_flash_time = now;
    let p = &mut state.player;
    p.is_moving = false;
    p.target = p.hex;
    true
}
