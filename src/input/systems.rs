use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::platform::collections::HashMap;
use bevy::prelude::*;

use super::DirectionMapper;
use crate::game::systems::NoticeWriters;
use crate::game::{FrameLoop, GameState, Notice};
use crate::hex;

/// Applies at most one throttled direction per frame as a player step.
///
/// Touch starts are tracked across frames so a swipe is measured from where
/// the finger went down. Input is dropped while the player is moving or dead,
/// and once the loop has been cancelled.
#[allow(clippy::too_many_arguments)]
pub fn read_direction_input(
    time: Res<Time<Real>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut touches: MessageReader<TouchInput>,
    mut touch_starts: Local<HashMap<u64, Vec2>>,
    mut mapper: ResMut<DirectionMapper>,
    mut state: ResMut<GameState>,
    frame_loop: Option<Res<FrameLoop>>,
    mut writers: NoticeWriters,
) {
    let mut swipes = Vec::new();
    for touch in touches.read() {
        match touch.phase {
            TouchPhase::Started => {
                touch_starts.insert(touch.id, touch.position);
            }
            TouchPhase::Ended => {
                if let Some(start) = touch_starts.remove(&touch.id) {
                    swipes.push(touch.position - start);
                }
            }
            TouchPhase::Canceled => {
                touch_starts.remove(&touch.id);
            }
            TouchPhase::Moved => {}
        }
    }

    if !frame_loop.is_some_and(|l| l.is_running()) || state.player.is_moving || state.is_dead {
        return;
    }

    let now = time.elapsed_secs_f64() * 1000.0;
    let direction = keys
        .get_just_pressed()
        .find_map(|&key| mapper.key(key, now))
        .or_else(|| swipes.into_iter().find_map(|delta| mapper.swipe(delta, now)));
    let Some(direction) = direction else {
        return;
    };

    if state.register_input() {
        info!("first input received");
        writers.send(Notice::FirstInput);
    }
    match state.try_move(direction, now) {
        Ok(target) => debug!("step {:?} -> {}", direction, hex::hex_key(target)),
        Err(err) => debug!("step {:?} rejected: {err}", direction),
    }
}
