//! Interaction resolver
//!
//! On an interact press, find the one object the player means and apply
//! its effect. Room 1 searches clues, then boxes, then keys, then loose
//! fruit: the first category with anything in reach wins, and within it
//! the nearest object. Room 2 goes through [`super::sequence`].

use glam::Vec3;

use super::sequence;
use super::state::{FruitKind, GameEvent, GameState, RoomIndex};
use crate::ground_distance;

/// Something the player can interact with right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Clue(usize),
    Box(usize),
    Key(usize),
    Fruit(usize),
    Switch(usize),
    Buzzer,
}

/// Index of the nearest candidate within `radius`, first wins on ties
pub(crate) fn nearest_within<I>(player: Vec3, radius: f32, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, Vec3)>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, pos) in candidates {
        let dist = ground_distance(player, pos);
        if dist >= radius {
            continue;
        }
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }
    best.map(|(index, _)| index)
}

/// The Room 1 object an interact press would hit
pub fn room_one_target(state: &GameState) -> Option<Target> {
    let room = &state.room_one;
    let player = state.player.pos;
    let radius = state.tuning.interact_radius;

    let clues = room.clues.iter().enumerate().map(|(i, c)| (i, c.pos));
    if let Some(i) = nearest_within(player, radius, clues) {
        return Some(Target::Clue(i));
    }

    let boxes = room.boxes.iter().enumerate().map(|(i, b)| (i, b.pos));
    if let Some(i) = nearest_within(player, radius, boxes) {
        return Some(Target::Box(i));
    }

    let keys = room
        .keys
        .iter()
        .enumerate()
        .filter(|(_, k)| !k.collected)
        .map(|(i, k)| (i, k.pos));
    if let Some(i) = nearest_within(player, radius, keys) {
        return Some(Target::Key(i));
    }

    let fruits = room
        .fruits
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.collected)
        .map(|(i, f)| (i, f.pos));
    nearest_within(player, radius, fruits).map(Target::Fruit)
}

/// Whatever an interact press would hit in the current room
pub fn current_target(state: &GameState) -> Option<Target> {
    match state.current_room {
        RoomIndex::FruitPuzzle => room_one_target(state),
        RoomIndex::ColorSequence => sequence::target(state),
    }
}

/// Resolve one interact press. Does nothing once the session has ended.
pub fn interact(state: &mut GameState, now: f64) {
    if state.phase.is_terminal() {
        return;
    }
    match state.current_room {
        RoomIndex::FruitPuzzle => interact_room_one(state, now),
        RoomIndex::ColorSequence => sequence::try_activate(state, now),
    }
}

fn interact_room_one(state: &mut GameState, now: f64) {
    let Some(target) = room_one_target(state) else {
        return;
    };

    match target {
        Target::Clue(i) => {
            let clue = &mut state.room_one.clues[i];
            clue.read = true;
            let text = clue.text.clone();
            log::debug!("Clue: {}", text);
            state.notify(text, now);
            state.push_event(GameEvent::ClueRead { index: i });
        }
        Target::Key(i) => {
            let key = &mut state.room_one.keys[i];
            key.collected = true;
            let hint = key.hint.clone();
            state.room_one.keys_found += 1;
            let keys_found = state.room_one.keys_found;
            log::debug!("Picked up a key ({} held)", keys_found);
            if !hint.is_empty() {
                state.notify(hint, now);
            }
            state.push_event(GameEvent::KeyCollected { keys_found });
        }
        Target::Box(i) => open_box(state, i, now),
        Target::Fruit(i) => {
            let fruit = &mut state.room_one.fruits[i];
            fruit.collected = true;
            let kind = fruit.kind;
            grant_fruit(state, kind, now);
        }
        Target::Switch(_) | Target::Buzzer => {}
    }
}

fn open_box(state: &mut GameState, index: usize, now: f64) {
    let keys_found = state.room_one.keys_found;
    let fruit_box = &mut state.room_one.boxes[index];

    let unlocked = if fruit_box.locked {
        if keys_found == 0 {
            log::debug!("Box {} is locked and no key is held", index);
            state.notify("This box is locked! Find a key to open it.", now);
            state.push_event(GameEvent::BoxLocked { index });
            return;
        }
        fruit_box.locked = false;
        true
    } else if fruit_box.opened {
        // Already emptied
        return;
    } else {
        false
    };

    fruit_box.opened = true;
    let riddle = fruit_box.riddle.clone();
    let contents = fruit_box.contents;
    if unlocked {
        state.room_one.keys_found -= 1;
        log::debug!("Unlocked box {} ({} keys left)", index, state.room_one.keys_found);
    }

    if !riddle.is_empty() {
        state.notify(riddle, now);
    }
    state.push_event(GameEvent::BoxOpened { index, unlocked });

    if let Some(kind) = contents {
        grant_fruit(state, kind, now);
    }
}

fn grant_fruit(state: &mut GameState, kind: FruitKind, now: f64) {
    state.room_one.collected.push(kind);
    log::debug!(
        "Collected {} ({}/{})",
        kind,
        state.room_one.collected.len(),
        state.room_one.required.len()
    );
    state.notify(format!("You got {} {kind}!", kind.article()), now);
    state.push_event(GameEvent::FruitCollected { kind });
    check_room_one_solved(state, now);
}

/// Open Room 1's gate the first time the required fruit are all held
pub fn check_room_one_solved(state: &mut GameState, now: f64) {
    if state.room_one.requirement_met() && !state.gates[RoomIndex::FruitPuzzle.index()].open {
        log::info!("Room 1 puzzle solved");
        state.open_gate(RoomIndex::FruitPuzzle, now);
    }
}
