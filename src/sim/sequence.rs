//! Room 2 ordered color sequence
//!
//! Stages: Idle -> InProgress -> Complete -> Solved. A correct switch
//! appends its color; a wrong one discards the whole run. Once all four
//! are in, only the buzzer does anything, and pressing it opens the gate.

use super::interact::{Target, nearest_within};
use super::state::{GameEvent, GameState, RoomIndex, SequenceStage, SwitchColor};
use crate::ground_distance;

/// What a Room 2 interact press would hit
pub fn target(state: &GameState) -> Option<Target> {
    let room = &state.room_two;
    let player = state.player.pos;

    match state.sequence_stage() {
        SequenceStage::Solved => None,
        SequenceStage::Complete => {
            let dist = ground_distance(player, room.buzzer_pos);
            (dist < state.tuning.buzzer_radius).then_some(Target::Buzzer)
        }
        SequenceStage::Idle | SequenceStage::InProgress => {
            let switches = room.switches.iter().enumerate().map(|(i, s)| (i, s.pos));
            nearest_within(player, state.tuning.switch_radius, switches).map(Target::Switch)
        }
    }
}

/// Color the next correct press must have, if any press is still needed
pub fn expected_next(state: &GameState) -> Option<SwitchColor> {
    let progress = &state.room_two.progress;
    state.room_two.target.get(progress.entered.len()).copied()
}

fn cooling_down(state: &GameState, now: f64) -> bool {
    state
        .room_two
        .last_activation
        .is_some_and(|last| now - last < state.tuning.switch_cooldown)
}

/// Handle an interact press in Room 2
pub fn try_activate(state: &mut GameState, now: f64) {
    if state.current_room != RoomIndex::ColorSequence || cooling_down(state, now) {
        return;
    }

    match target(state) {
        Some(Target::Buzzer) => press_buzzer(state, now),
        Some(Target::Switch(index)) => press_switch(state, index, now),
        _ => {}
    }
}

fn press_switch(state: &mut GameState, index: usize, now: f64) {
    state.room_two.last_activation = Some(now);
    let color = state.room_two.switches[index].color;
    let expected = expected_next(state);

    if expected != Some(color) {
        log::debug!(
            "Wrong switch: expected {}, got {}",
            expected.map(SwitchColor::name).unwrap_or("none"),
            color
        );
        reset(state);
        state.notify("Wrong switch! The sequence resets.", now);
        state.push_event(GameEvent::SequenceReset { expected, got: color });
        return;
    }

    let room = &mut state.room_two;
    room.switches[index].active = true;
    room.progress.entered.push(color);
    let position = room.progress.entered.len() - 1;
    log::debug!("Activated {} switch ({}/{})", color, position + 1, room.target.len());
    state.push_event(GameEvent::SwitchAccepted { color, position });

    if state.room_two.progress.entered.len() == state.room_two.target.len() {
        state.room_two.progress.complete = true;
        log::info!("Color sequence complete");
        state.notify("Sequence complete! Activate the central buzzer.", now);
        state.push_event(GameEvent::SequenceComplete);
    }
}

fn press_buzzer(state: &mut GameState, now: f64) {
    state.room_two.last_activation = Some(now);
    log::info!("Buzzer activated");
    state.open_gate(RoomIndex::ColorSequence, now);
}

/// Clear progress and switch every light off
pub fn reset(state: &mut GameState) {
    let room = &mut state.room_two;
    room.progress.entered.clear();
    room.progress.complete = false;
    for switch in &mut room.switches {
        switch.active = false;
    }
}
