//! Fixed-interval session tick
//!
//! The scheduler calls [`tick`] once per interval with the input snapshot
//! and the current wall-clock time. Everything the session does happens in
//! here, in a fixed order.

use glam::Vec3;

use super::interact;
use super::movement;
use super::state::{GameEvent, GamePhase, GameState, RoomIndex};

/// Held controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Forward,
    Backward,
    Left,
    Right,
    RotateLeft,
    RotateRight,
}

/// Discrete events from the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Control),
    Released(Control),
    Interact,
    ToggleCamera,
}

/// Which controls are held right now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
}

impl Intent {
    pub fn any_movement(&self) -> bool {
        self.forward || self.backward || self.left || self.right
    }

    pub fn set(&mut self, control: Control, held: bool) {
        let flag = match control {
            Control::Forward => &mut self.forward,
            Control::Backward => &mut self.backward,
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::RotateLeft => &mut self.rotate_left,
            Control::RotateRight => &mut self.rotate_right,
        };
        *flag = held;
    }
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub intent: Intent,
    /// One-shot: resolve an interaction this tick
    pub interact: bool,
    /// One-shot: flip between first and third person
    pub toggle_camera: bool,
}

impl TickInput {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed(control) => self.intent.set(control, true),
            InputEvent::Released(control) => self.intent.set(control, false),
            InputEvent::Interact => self.interact = true,
            InputEvent::ToggleCamera => self.toggle_camera = true,
        }
    }

    /// Call after each tick so one-shots fire once
    pub fn clear_one_shots(&mut self) {
        self.interact = false;
        self.toggle_camera = false;
    }
}

/// Advance the session by one tick at wall-clock time `now` (seconds)
pub fn tick(state: &mut GameState, input: &TickInput, now: f64) {
    // Terminal states freeze gameplay
    if state.phase.is_terminal() {
        return;
    }

    state.time_ticks += 1;

    if input.toggle_camera {
        state.player.camera = state.player.camera.toggled();
        log::debug!("Camera mode: {:?}", state.player.camera);
        state.push_event(GameEvent::CameraChanged {
            mode: state.player.camera,
        });
    }

    movement::advance_player(state, &input.intent);

    check_room_transition(state);

    if input.interact {
        interact::interact(state, now);
    }

    let step = state.tuning.gate_step;
    for gate in &mut state.gates {
        gate.animate(step);
    }

    let time_remaining = state.clock.update(now);
    if time_remaining == 0 && !state.all_gates_open() {
        log::info!("Time's up! Game over.");
        state.phase = GamePhase::TimedOut;
        state.push_event(GameEvent::TimeUp);
        return;
    }

    check_escape(state);
}

/// Move the player into Room 2 once they walk through Room 1's open gate
fn check_room_transition(state: &mut GameState) {
    if state.current_room != RoomIndex::FruitPuzzle || !state.gates[0].open {
        return;
    }
    let threshold = state.tuning.half_room() + state.tuning.transition_margin;
    if state.player.pos.z <= threshold {
        return;
    }

    state.current_room = RoomIndex::ColorSequence;
    let entry_z = -state.tuning.half_room() + state.tuning.room_two_entry_offset;
    state.player.pos = Vec3::new(0.0, state.player.pos.y, entry_z);
    log::info!(
        "Entering {} - sequence to follow: {}",
        RoomIndex::ColorSequence.title(),
        state.room_two.target.map(|c| c.name()).join(" -> ")
    );
    state.push_event(GameEvent::RoomEntered {
        room: RoomIndex::ColorSequence,
    });
}

/// Freeze the score the first tick Room 2's gate is open
fn check_escape(state: &mut GameState) {
    if !state.gates[RoomIndex::ColorSequence.index()].open || state.outcome.completed {
        return;
    }
    state.outcome.completed = true;
    state.outcome.final_score = state.clock.time_remaining;
    state.phase = GamePhase::Escaped;
    log::info!(
        "Escaped the Puzzle Prison with {} seconds remaining!",
        state.outcome.final_score
    );
    state.push_event(GameEvent::Escaped {
        score: state.outcome.final_score,
    });
}
