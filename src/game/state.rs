use std::collections::VecDeque;

use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use hexx::Hex;
use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use rand::Rng;
use thiserror::Error;

use super::{GameConfig, GridSettings};
use crate::content::{self, Feature};
use crate::hex::{self, Direction};
use crate::math;

/// Why a requested step was not issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The player was caught and is waiting for the reset.
    #[error("player is dead")]
    Dead,
    /// A step is already in flight.
    #[error("player is already moving")]
    AlreadyMoving,
    /// The target lies beyond the board radius.
    #[error("target {0:?} is outside the board")]
    OutOfBounds(Hex),
}

/// Coarse player state derived from [`GameState`] flags.
///
/// Transitions: `Idle` → `Moving` on an accepted step, back to `Idle` when it
/// lands; `Idle`/`Moving` → `Dead` on a catch; `Dead` → `Idle` only through
/// [`GameState::reset_after_death`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerPhase {
    /// Standing on a hex, accepting input.
    Idle,
    /// Interpolating towards the target hex.
    Moving,
    /// Caught by an enemy.
    Dead,
}

/// The player-controlled marker.
#[derive(Debug, Clone)]
pub struct Player {
    /// Committed hex.
    pub hex: Hex,
    /// Destination of the current step (equals `hex` when idle).
    pub target: Hex,
    /// Interpolated pixel position.
    pub pixel: Vec2,
    /// Pixel position the current step started from.
    pub start_pixel: Vec2,
    /// Pixel position of `target`.
    pub target_pixel: Vec2,
    /// Whether a step is in flight.
    pub is_moving: bool,
    /// Timestamp the current step started (ms).
    pub move_start: f64,
    /// Recently left hexes, oldest first.
    pub trail: VecDeque<Hex>,
}

impl Player {
    fn at(hex: Hex) -> Self {
        Self {
            hex,
            target: hex,
            pixel: Vec2::ZERO,
            start_pixel: Vec2::ZERO,
            target_pixel: Vec2::ZERO,
            is_moving: false,
            move_start: 0.0,
            trail: VecDeque::new(),
        }
    }

    /// Appends `hex` to the trail, evicting the oldest entries beyond `cap`.
    pub fn push_trail(&mut self, hex: Hex, cap: usize) {
        self.trail.push_back(hex);
        while self.trail.len() > cap {
            self.trail.pop_front();
        }
    }
}

/// A wandering, harmless board inhabitant.
#[derive(Debug, Clone)]
pub struct Agent {
    /// Stable identifier.
    pub id: &'static str,
    /// Settled hex.
    pub coord: Hex,
    /// Hex the agent is walking towards.
    pub target: Hex,
    /// Interpolated pixel position.
    pub pixel: Vec2,
    /// Current speech line.
    pub phrase: &'static str,
    /// Marker glyph.
    pub glyph: char,
}

/// A hunter that chases the player once they start moving.
#[derive(Debug, Clone)]
pub struct Enemy {
    /// Stable identifier.
    pub id: &'static str,
    /// Settled hex.
    pub coord: Hex,
    /// Hex the enemy returns to after a catch.
    pub start: Hex,
    /// Hex the enemy is walking towards.
    pub target: Hex,
    /// Interpolated pixel position.
    pub pixel: Vec2,
}

/// Drawing-area dimensions supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Logical size in px.
    pub size: Vec2,
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            size: Vec2::new(1280.0, 720.0),
            scale_factor: 1.0,
        }
    }
}

/// The single mutable blackboard shared by the loop, AI and renderer.
#[derive(Resource, Debug)]
pub struct GameState {
    /// Hex size in px.
    pub hex_size: f32,
    /// Maximum in-bounds distance from the origin.
    pub grid_radius: u32,
    /// Decorative glyph per in-bounds hex (`' '` for blank).
    pub hex_fills: HashMap<Hex, char>,
    /// The player.
    pub player: Player,
    /// Camera centre in world pixels.
    pub camera: Vec2,
    /// Ambient agents in list order.
    pub agents: Vec<Agent>,
    /// Enemies in list order.
    pub enemies: Vec<Enemy>,
    /// Whether the player has been caught.
    pub is_dead: bool,
    /// Timestamp of the catch (ms).
    pub death_flash_time: f64,
    /// Feature hex the player stood on last frame.
    pub active_feature: Option<Hex>,
    /// Index of the agent that was nearby last frame.
    pub active_agent: Option<usize>,
    /// Feature descriptors by hex.
    pub feature_map: HashMap<Hex, &'static Feature>,
    /// Set by the first directional input.
    pub has_received_input: bool,
    /// Reduced-motion preference captured at initialization.
    pub prefers_reduced_motion: bool,
    /// Set once [`GameState::initialize`] has run.
    pub initialized: bool,
    /// Drawing-area dimensions.
    pub viewport: Viewport,
    /// Last agent wander pick (ms).
    pub last_agent_wander: f64,
    /// Last enemy decision (ms).
    pub last_enemy_decision: f64,
    /// Maximum trail length.
    pub trail_length: usize,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameState {
    /// Fresh, uninitialized state with entities copied from the static tables.
    pub fn new(cfg: &GameConfig) -> Self {
        let agents = content::AGENT_SPAWNS
            .iter()
            .map(|spawn| {
                let coord = Hex::new(spawn.q, spawn.r);
                Agent {
                    id: spawn.id,
                    coord,
                    target: coord,
                    pixel: Vec2::ZERO,
                    phrase: content::AGENT_PHRASES[0],
                    glyph: spawn.glyph,
                }
            })
            .collect();
        let enemies = content::ENEMY_SPAWNS
            .iter()
            .map(|spawn| {
                let coord = Hex::new(spawn.q, spawn.r);
                Enemy {
                    id: spawn.id,
                    coord,
                    start: coord,
                    target: coord,
                    pixel: Vec2::ZERO,
                }
            })
            .collect();

        Self {
            hex_size: cfg.grid.hex_size_override.unwrap_or(cfg.grid.hex_size),
            grid_radius: cfg.grid.radius,
            hex_fills: HashMap::new(),
            player: Player::at(Hex::ZERO),
            camera: Vec2::ZERO,
            agents,
            enemies,
            is_dead: false,
            death_flash_time: 0.0,
            active_feature: None,
            active_agent: None,
            feature_map: HashMap::new(),
            has_received_input: false,
            prefers_reduced_motion: false,
            initialized: false,
            viewport: Viewport::default(),
            last_agent_wander: 0.0,
            last_enemy_decision: 0.0,
            trail_length: cfg.trail_length,
        }
    }

    /// One-time setup: feature lookup, fill glyphs and pixel positions.
    ///
    /// Does nothing when called again on the same state.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        prefers_reduced_motion: bool,
        grid: &GridSettings,
        rng: &mut R,
    ) {
        if self.initialized {
            return;
        }
        self.prefers_reduced_motion = prefers_reduced_motion;

        for feature in content::FEATURES {
            let hex = feature.hex();
            if hex::in_bounds(hex, self.grid_radius) {
                self.feature_map.insert(hex, feature);
            }
        }

        let density: Fbm<Perlin> =
            Fbm::new(grid.fill_noise_seed).set_octaves(grid.fill_noise_octaves);
        for hex in hex::hexes_in_range(Hex::ZERO, self.grid_radius) {
            let sample = density.get([
                hex.x as f64 / grid.fill_noise_scale,
                hex.y as f64 / grid.fill_noise_scale,
            ]);
            let chance =
                math::map_noise_to_range(sample, grid.min_fill_density, grid.max_fill_density);
            let glyph = if rng.random::<f32>() < chance {
                content::FILL_GLYPHS[rng.random_range(0..content::FILL_GLYPHS.len())]
            } else {
                ' '
            };
            self.hex_fills.insert(hex, glyph);
        }

        self.sync_pixels();
        self.camera = self.player.pixel;
        self.initialized = true;
        info!(
            "board initialized: radius {}, {} features, {} agents, {} enemies, reduced motion {}",
            self.grid_radius,
            self.feature_map.len(),
            self.agents.len(),
            self.enemies.len(),
            self.prefers_reduced_motion
        );
    }

    /// Applies new drawing-area dimensions.
    ///
    /// The hex size follows the width breakpoints unless `size_override` is
    /// set. Pixel positions are recomputed from hex coordinates and the camera
    /// snaps to the player.
    pub fn resize(&mut self, size: Vec2, scale_factor: f32, size_override: Option<f32>) {
        self.viewport = Viewport { size, scale_factor };
        let hex_size = size_override.unwrap_or_else(|| math::hex_size_for_width(size.x));
        if (hex_size - self.hex_size).abs() > f32::EPSILON {
            debug!("hex size {} -> {}", self.hex_size, hex_size);
            self.hex_size = hex_size;
        }
        self.sync_pixels();
        self.camera = self.player.pixel;
    }

    /// Recomputes every entity's pixel position from its hex coordinate.
    ///
    /// A step in flight restarts from the committed hex.
    fn sync_pixels(&mut self) {
        let size = self.hex_size;
        let p = &mut self.player;
        p.pixel = hex::hex_to_pixel(p.hex, size);
        p.start_pixel = p.pixel;
        p.target_pixel = hex::hex_to_pixel(p.target, size);
        for agent in &mut self.agents {
            agent.pixel = hex::hex_to_pixel(agent.coord, size);
        }
        for enemy in &mut self.enemies {
            enemy.pixel = hex::hex_to_pixel(enemy.coord, size);
        }
    }

    /// Current coarse player state.
    pub fn phase(&self) -> PlayerPhase {
        if self.is_dead {
            PlayerPhase::Dead
        } else if self.player.is_moving {
            PlayerPhase::Moving
        } else {
            PlayerPhase::Idle
        }
    }

    /// Records that directional input arrived. Returns `true` the first time.
    pub fn register_input(&mut self) -> bool {
        let first = !self.has_received_input;
        self.has_received_input = true;
        first
    }

    /// Starts a one-hex step in `direction`.
    ///
    /// Rejected while dead, while a step is in flight, or when the target is
    /// outside the board. Returns the target hex.
    pub fn try_move(&mut self, direction: Direction, now: f64) -> Result<Hex, MoveError> {
        if self.is_dead {
            return Err(MoveError::Dead);
        }
        if self.player.is_moving {
            return Err(MoveError::AlreadyMoving);
        }
        let target = hex::hex_neighbor(self.player.hex, direction.index());
        if !hex::in_bounds(target, self.grid_radius) {
            return Err(MoveError::OutOfBounds(target));
        }

        let p = &mut self.player;
        p.target = target;
        p.start_pixel = p.pixel;
        p.target_pixel = hex::hex_to_pixel(target, self.hex_size);
        p.is_moving = true;
        p.move_start = now;
        Ok(target)
    }

    /// Returns the board to its post-catch starting layout.
    ///
    /// The player goes back to the origin with an empty trail and every enemy
    /// to its spawn hex. Agents keep their positions.
    pub fn reset_after_death(&mut self) {
        self.is_dead = false;
        self.death_flash_time = 0.0;

        let size = self.hex_size;
        let p = &mut self.player;
        p.hex = Hex::ZERO;
        p.target = Hex::ZERO;
        p.pixel = hex::hex_to_pixel(Hex::ZERO, size);
        p.start_pixel = p.pixel;
        p.target_pixel = p.pixel;
        p.is_moving = false;
        p.trail.clear();

        for enemy in &mut self.enemies {
            enemy.coord = enemy.start;
            enemy.target = enemy.start;
            enemy.pixel = hex::hex_to_pixel(enemy.start, size);
        }
        info!("board reset after catch");
    }

    /// Converts a world pixel position to window coordinates.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.camera + self.viewport.size / 2.0
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    fn ready_state() -> GameState {
        let cfg = GameConfig::default();
        let mut state = GameState::new(&cfg);
        state.initialize(false, &cfg.grid, &mut StdRng::seed_from_u64(1));
        state
    }

    // ── construction / initialization ──────────────────────────────

    #[test]
    fn new_state_uses_default_grid() {
        let state = GameState::default();
        assert_eq!(state.hex_size, 44.0);
        assert_eq!(state.grid_radius, 30);
        assert!(state.player.trail.is_empty());
        assert!(!state.initialized);
        assert_eq!(state.agents.len(), content::AGENT_SPAWNS.len());
        assert_eq!(state.enemies.len(), content::ENEMY_SPAWNS.len());
    }

    #[test]
    fn initialize_fills_every_hex_and_features() {
        let state = ready_state();
        let r = state.grid_radius;
        assert_eq!(state.hex_fills.len() as u32, 3 * r * (r + 1) + 1);
        assert_eq!(state.feature_map.len(), content::FEATURES.len());
        assert!(state.initialized);
    }

    #[test]
    fn initialize_computes_pixels() {
        let state = ready_state();
        for agent in &state.agents {
            assert_eq!(agent.pixel, hex::hex_to_pixel(agent.coord, state.hex_size));
        }
        for enemy in &state.enemies {
            assert_eq!(enemy.pixel, hex::hex_to_pixel(enemy.coord, state.hex_size));
        }
    }

    #[test]
    fn initialize_is_idempotent() {
        let cfg = GameConfig::default();
        let mut state = ready_state();
        let fills = state.hex_fills.clone();
        let features = state.feature_map.len();
        state.initialize(true, &cfg.grid, &mut StdRng::seed_from_u64(99));
        assert_eq!(state.hex_fills, fills);
        assert_eq!(state.feature_map.len(), features);
        assert!(!state.prefers_reduced_motion);
    }

    #[test]
    fn small_board_drops_out_of_range_features() {
        let mut cfg = GameConfig::default();
        cfg.grid.radius = 2;
        let mut state = GameState::new(&cfg);
        state.initialize(false, &cfg.grid, &mut StdRng::seed_from_u64(3));
        assert!(state.feature_map.keys().all(|&h| hex::in_bounds(h, 2)));
        assert!(state.feature_map.len() < content::FEATURES.len());
    }

    // ── moves ──────────────────────────────────────────────────────

    #[test]
    fn accepted_move_sets_target() {
        let mut state = ready_state();
        let target = state.try_move(Direction::East, 10.0).unwrap();
        assert_eq!(target, Hex::new(1, 0));
        assert!(state.player.is_moving);
        assert_eq!(state.player.hex, Hex::ZERO);
        assert_eq!(state.phase(), PlayerPhase::Moving);
    }

    #[test]
    fn second_move_while_moving_is_rejected() {
        let mut state = ready_state();
        state.try_move(Direction::East, 10.0).unwrap();
        assert_eq!(state.try_move(Direction::West, 20.0), Err(MoveError::AlreadyMoving));
        assert_eq!(state.player.target, Hex::new(1, 0));
    }

    #[test]
    fn move_while_dead_is_rejected() {
        let mut state = ready_state();
        state.is_dead = true;
        assert_eq!(state.try_move(Direction::East, 0.0), Err(MoveError::Dead));
        assert!(!state.player.is_moving);
    }

    #[test]
    fn boundary_move_leaves_player_untouched() {
        let mut state = ready_state();
        let edge = Hex::new(30, 0);
        state.player.hex = edge;
        state.player.target = edge;
        let err = state.try_move(Direction::East, 0.0).unwrap_err();
        assert_eq!(err, MoveError::OutOfBounds(Hex::new(31, 0)));
        assert_eq!(state.player.hex, edge);
        assert!(!state.player.is_moving);
    }

    #[test]
    fn first_input_reported_once() {
        let mut state = ready_state();
        assert!(state.register_input());
        assert!(!state.register_input());
        assert!(state.has_received_input);
    }

    // ── trail ──────────────────────────────────────────────────────

    #[test]
    fn trail_evicts_oldest_first() {
        let mut player = Player::at(Hex::ZERO);
        for q in 0..7 {
            player.push_trail(Hex::new(q, 0), 6);
        }
        assert_eq!(player.trail.len(), 6);
        assert_eq!(player.trail.front(), Some(&Hex::new(1, 0)));
        assert_eq!(player.trail.back(), Some(&Hex::new(6, 0)));
    }

    // ── reset ──────────────────────────────────────────────────────

    #[test]
    fn reset_restores_player_and_enemies_only() {
        let mut state = ready_state();
        state.player.hex = Hex::new(3, -1);
        state.player.target = Hex::new(4, -1);
        state.player.is_moving = true;
        state.player.push_trail(Hex::new(2, -1), 6);
        state.is_dead = true;
        state.death_flash_time = 500.0;
        for enemy in &mut state.enemies {
            enemy.coord = Hex::new(1, 1);
            enemy.target = Hex::new(1, 2);
        }
        let agent_coords: Vec<Hex> = state.agents.iter().map(|a| a.coord).collect();
        state.agents[0].coord = Hex::new(5, 0);

        state.reset_after_death();

        assert!(!state.is_dead);
        assert_eq!(state.phase(), PlayerPhase::Idle);
        assert_eq!(state.player.hex, Hex::ZERO);
        assert!(!state.player.is_moving);
        assert!(state.player.trail.is_empty());
        for enemy in &state.enemies {
            assert_eq!(enemy.coord, enemy.start);
            assert_eq!(enemy.target, enemy.start);
        }
        assert_eq!(state.agents[0].coord, Hex::new(5, 0));
        assert_eq!(state.agents[1].coord, agent_coords[1]);
    }

    // ── resize ─────────────────────────────────────────────────────

    #[test]
    fn resize_applies_breakpoints_and_rescales() {
        let mut state = ready_state();
        state.resize(Vec2::new(600.0, 800.0), 2.0, None);
        assert_eq!(state.hex_size, 30.0);
        assert_eq!(state.viewport.scale_factor, 2.0);
        let agent = &state.agents[0];
        assert_eq!(agent.pixel, hex::hex_to_pixel(agent.coord, 30.0));

        state.resize(Vec2::new(600.0, 800.0), 1.0, Some(50.0));
        assert_eq!(state.hex_size, 50.0);
    }

    #[test]
    fn world_to_screen_centres_camera() {
        let mut state = ready_state();
        state.viewport.size = Vec2::new(800.0, 600.0);
        state.camera = Vec2::new(100.0, 50.0);
        assert_eq!(state.world_to_screen(Vec2::new(100.0, 50.0)), Vec2::new(400.0, 300.0));
    }
}
