//! One frame of simulation, in a fixed order, behind a cancellable handle.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use hexx::Hex;
use rand::Rng;
use rand::rngs::StdRng;

use super::{GameConfig, GameState, ai};
use crate::content::{self, Feature};
use crate::hex;
use crate::math;

/// An agent within proximity range of the player.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentFocus {
    /// Position in [`GameState::agents`].
    pub index: usize,
    /// Agent identifier.
    pub id: &'static str,
    /// Marker glyph.
    pub glyph: char,
    /// Phrase picked on activation.
    pub phrase: &'static str,
    /// Agent position in window coordinates.
    pub screen: Vec2,
}

/// An edge-triggered change the host should hear about.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The feature under the player changed (`None`: left all features).
    FeatureChanged(Option<&'static Feature>),
    /// The nearby agent changed (`None`: nobody nearby).
    AgentNearby(Option<AgentFocus>),
    /// The first directional input arrived.
    FirstInput,
}

/// Shared cancellation flag for a [`FrameLoop`].
///
/// Cloning yields a handle to the same loop; cancelling any clone stops it.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle(Arc<AtomicBool>);

impl LoopHandle {
    /// Stops the loop. Safe to call any number of times.
    pub fn cancel(&self) {
        if !self.0.swap(true, Ordering::SeqCst) {
            info!("frame loop cancelled");
        }
    }

    /// Whether [`LoopHandle::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Drives [`GameState`] one frame at a time.
#[derive(Resource, Debug)]
pub struct FrameLoop {
    handle: LoopHandle,
    rng: StdRng,
}

impl FrameLoop {
    /// A running loop drawing randomness from `rng`.
    pub fn start(rng: StdRng) -> Self {
        info!("frame loop started");
        Self {
            handle: LoopHandle::default(),
            rng,
        }
    }

    /// A loop that was never started: every frame is a no-op.
    pub fn detached(rng: StdRng) -> Self {
        let handle = LoopHandle::default();
        handle.0.store(true, Ordering::SeqCst);
        Self { handle, rng }
    }

    /// Cleanup handle for this loop.
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Whether frames still advance the state.
    pub fn is_running(&self) -> bool {
        !self.handle.is_cancelled()
    }

    /// Advances `state` to time `now` (ms) and hands it to `render`.
    ///
    /// Steps run in this order: player step, AI, collision, death reset,
    /// camera, feature proximity, agent proximity, render. Returns the
    /// notices raised this frame. A cancelled loop returns nothing and leaves
    /// `state` untouched.
    pub fn frame<F>(&mut self, state: &mut GameState, cfg: &GameConfig, now: f64, render: F) -> Vec<Notice>
    where
        F: FnOnce(&GameState),
    {
        let mut notices = Vec::new();
        if self.handle.is_cancelled() {
            return notices;
        }
        let motion = cfg.motion.effective(state.prefers_reduced_motion);

        step_player(state, now, motion.move_duration_ms);

        ai::update_agent_wander(state, now, &cfg.ai, &mut self.rng);
        ai::lerp_agents(state, motion.agent_lerp);
        ai::update_enemies(state, now, &cfg.ai, &mut self.rng);
        ai::lerp_enemies(state, motion.enemy_lerp);

        ai::check_enemy_collision(state, now);

        if state.is_dead && now - state.death_flash_time >= cfg.death_reset_ms {
            state.reset_after_death();
            state.active_feature = None;
            state.active_agent = None;
            notices.push(Notice::FeatureChanged(None));
            notices.push(Notice::AgentNearby(None));
        }

        state.camera = math::approach(state.camera, state.player.pixel, motion.camera_smoothing);

        if let Some(notice) = update_feature_focus(state) {
            notices.push(notice);
        }
        if let Some(notice) = update_agent_focus(state, cfg.ai.proximity_radius, &mut self.rng) {
            notices.push(notice);
        }

        render(state);
        notices
    }
}

/// Eases the player towards its target and commits the hex on arrival.
fn step_player(state: &mut GameState, now: f64, duration_ms: f64) {
    let trail_length = state.trail_length;
    let p = &mut state.player;
    if !p.is_moving {
        return;
    }
    let t = math::progress(now - p.move_start, duration_ms);
    p.pixel = p.start_pixel.lerp(p.target_pixel, math::ease_out_quad(t));
    if t >= 1.0 {
        let left = p.hex;
        p.push_trail(left, trail_length);
        p.hex = p.target;
        p.pixel = p.target_pixel;
        p.is_moving = false;
    }
}

fn update_feature_focus(state: &mut GameState) -> Option<Notice> {
    let here = state.player.hex;
    let feature = state.feature_map.get(&here).copied();
    let current: Option<Hex> = feature.map(|_| here);
    if current == state.active_feature {
        return None;
    }
    debug!("feature focus: {:?}", feature.map(|f| f.label));
    state.active_feature = current;
    Some(Notice::FeatureChanged(feature))
}

fn update_agent_focus<R: Rng + ?Sized>(state: &mut GameState, radius: u32, rng: &mut R) -> Option<Notice> {
    let player = state.player.hex;
    let nearby = state
        .agents
        .iter()
        .position(|agent| hex::hex_distance(agent.coord, player) <= radius);
    if nearby == state.active_agent {
        return None;
    }
    state.active_agent = nearby;

    let Some(index) = nearby else {
        debug!("agent focus cleared");
        return Some(Notice::AgentNearby(None));
    };
    let phrase = content::AGENT_PHRASES[rng.random_range(0..content::AGENT_PHRASES.len())];
    state.agents[index].phrase = phrase;
    let agent = &state.agents[index];
    debug!("agent focus: {}", agent.id);
    Some(Notice::AgentNearby(Some(AgentFocus {
        index,
        id: agent.id,
        glyph: agent.glyph,
        phrase,
        screen: state.world_to_screen(agent.pixel),
    })))
}
