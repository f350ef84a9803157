//! HUD view model
//!
//! Everything the on-screen overlay shows, computed from the session.
//! Renderers draw this; nothing here feeds back into the simulation.

use serde::Serialize;

use crate::sim::interact::{Target, current_target};
use crate::sim::state::{GamePhase, GameState, RoomIndex, SequenceStage, SwitchColor};

pub const CONTROLS_LINE: &str =
    "WASD: Move | Q/E: Rotate | F: Interact | C: Change Camera | ESC: Quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HintCategory {
    Clue,
    Box,
    Key,
    Fruit,
    Switch,
    Buzzer,
}

/// Prompt for the object an interact press would hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hint {
    pub category: HintCategory,
    pub prompt: String,
}

impl Hint {
    pub fn for_target(state: &GameState, target: Target) -> Self {
        let (category, prompt) = match target {
            Target::Clue(_) => (HintCategory::Clue, "Press F to read clue".to_string()),
            Target::Key(_) => (HintCategory::Key, "Press F to pick up key".to_string()),
            Target::Fruit(i) => (
                HintCategory::Fruit,
                format!("Press F to collect {}", state.room_one.fruits[i].kind),
            ),
            Target::Box(i) => {
                let b = &state.room_one.boxes[i];
                let prompt = if b.locked {
                    "Press F to unlock (needs key)"
                } else if !b.opened {
                    "Press F to open box"
                } else {
                    "Box is empty"
                };
                (HintCategory::Box, prompt.to_string())
            }
            Target::Switch(i) => (
                HintCategory::Switch,
                format!("Press F to press the {} switch", state.room_two.switches[i].color),
            ),
            Target::Buzzer => (
                HintCategory::Buzzer,
                "Press F to activate the buzzer".to_string(),
            ),
        };
        Self { category, prompt }
    }
}

/// One frame's worth of overlay text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudView {
    pub timer: String,
    pub room_title: &'static str,
    /// Room-specific counter lines
    pub status: Vec<String>,
    pub hint: Option<Hint>,
    pub banner: Option<String>,
    pub score_line: Option<String>,
    pub message: Option<String>,
    /// Seconds the message stays up
    pub message_remaining: f64,
    pub controls: &'static str,
}

impl HudView {
    pub fn from_state(state: &GameState, now: f64) -> Self {
        let remaining = state.clock.time_remaining;
        let timer = format!("Time: {:02}:{:02}", remaining / 60, remaining % 60);

        let status = match state.current_room {
            RoomIndex::FruitPuzzle => vec![
                format!(
                    "Fruits: {}/{}",
                    state
                        .room_one
                        .collected_kinds()
                        .intersection(&state.room_one.required)
                        .count(),
                    state.room_one.required.len()
                ),
                format!("Keys: {}", state.room_one.keys_found),
            ],
            RoomIndex::ColorSequence => {
                let entered = &state.room_two.progress.entered;
                let sequence = if entered.is_empty() {
                    "Start!".to_string()
                } else {
                    join_colors(entered)
                };
                vec![
                    format!("Sequence: {sequence}"),
                    format!("Target: {}", join_colors(&state.room_two.target)),
                ]
            }
        };

        let hint = if state.phase.is_terminal() {
            None
        } else {
            current_target(state).map(|t| Hint::for_target(state, t))
        };

        let score_line = state
            .outcome
            .completed
            .then(|| format!("Your Score: {} seconds", state.outcome.final_score));

        Self {
            timer,
            room_title: state.current_room.title(),
            status,
            hint,
            banner: banner(state),
            score_line,
            message: state.message.active(now).map(str::to_string),
            message_remaining: state.message.remaining(now),
            controls: CONTROLS_LINE,
        }
    }
}

fn banner(state: &GameState) -> Option<String> {
    if state.phase == GamePhase::TimedOut {
        return Some("TIME'S UP! Game Over.".into());
    }
    let text = match state.current_room {
        RoomIndex::FruitPuzzle if state.gates[0].open => {
            "PUZZLE SOLVED! Walk through the gate to Room 2!"
        }
        RoomIndex::ColorSequence => match state.sequence_stage() {
            SequenceStage::Complete => "Sequence Complete! Activate the central buzzer (Press F)",
            SequenceStage::Solved => "GAME COMPLETE!",
            SequenceStage::Idle | SequenceStage::InProgress => return None,
        },
        RoomIndex::FruitPuzzle => return None,
    };
    Some(text.into())
}

fn join_colors(colors: &[SwitchColor]) -> String {
    colors
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::sim::interact::interact;
    use crate::sim::state::FruitKind;
    use crate::sim::state::SwitchColor::*;

    #[test]
    fn test_room_one_hud() {
        let mut state = GameState::new(1, 0.0);
        let hud = HudView::from_state(&state, 0.0);
        assert_eq!(hud.timer, "Time: 01:00");
        assert_eq!(hud.room_title, "Room 1: The Fruit Puzzle");
        assert_eq!(hud.status, vec!["Fruits: 0/3".to_string(), "Keys: 0".to_string()]);
        assert_eq!(hud.hint, None);
        assert_eq!(hud.banner, None);
        assert_eq!(hud.message, None);

        state.player.pos = Vec3::new(6.0, 1.7, -4.5);
        let hint = HudView::from_state(&state, 0.0).hint.unwrap();
        assert_eq!(hint.category, HintCategory::Box);
        assert_eq!(hint.prompt, "Press F to unlock (needs key)");

        state.player.pos = Vec3::new(-6.0, 1.7, -4.5);
        interact(&mut state, 1.0);
        let hud = HudView::from_state(&state, 2.0);
        assert_eq!(hud.hint.unwrap().prompt, "Box is empty");
        assert_eq!(hud.message.as_deref(), Some("You got an apple!"));
        assert!((hud.message_remaining - 2.0).abs() < 1e-9);
        assert_eq!(hud.status[0], "Fruits: 1/3");
    }

    #[test]
    fn test_fruit_counter_ignores_extras() {
        let mut state = GameState::new(1, 0.0);
        state.room_one.collected = vec![FruitKind::Grape, FruitKind::Apple, FruitKind::Apple];
        let hud = HudView::from_state(&state, 0.0);
        assert_eq!(hud.status[0], "Fruits: 1/3");
    }

    #[test]
    fn test_room_two_hud() {
        let mut state = GameState::new(1, 0.0);
        state.current_room = RoomIndex::ColorSequence;
        state.room_two.target = [Yellow, Green, Blue, Red];
        state.clock.time_remaining = 75;

        let hud = HudView::from_state(&state, 0.0);
        assert_eq!(hud.timer, "Time: 01:15");
        assert_eq!(hud.status[0], "Sequence: Start!");
        assert_eq!(hud.status[1], "Target: yellow -> green -> blue -> red");

        state.player.pos = Vec3::new(3.0, 1.7, -2.5);
        let hint = HudView::from_state(&state, 0.0).hint.unwrap();
        assert_eq!(hint.category, HintCategory::Switch);
        assert_eq!(hint.prompt, "Press F to press the yellow switch");

        state.room_two.progress.entered = vec![Yellow, Green, Blue, Red];
        state.room_two.progress.complete = true;
        state.player.pos = Vec3::new(0.0, 1.7, 0.2);
        let hud = HudView::from_state(&state, 0.0);
        assert_eq!(hud.hint.unwrap().category, HintCategory::Buzzer);
        assert_eq!(
            hud.banner.as_deref(),
            Some("Sequence Complete! Activate the central buzzer (Press F)")
        );
    }

    #[test]
    fn test_end_screens() {
        let mut state = GameState::new(1, 0.0);
        state.phase = GamePhase::TimedOut;
        assert_eq!(
            HudView::from_state(&state, 0.0).banner.as_deref(),
            Some("TIME'S UP! Game Over.")
        );

        let mut state = GameState::new(1, 0.0);
        state.current_room = RoomIndex::ColorSequence;
        state.gates = Default::default();
        state.gates[1].open(1.0);
        state.outcome.completed = true;
        state.outcome.final_score = 23;
        state.phase = GamePhase::Escaped;
        let hud = HudView::from_state(&state, 0.0);
        assert_eq!(hud.banner.as_deref(), Some("GAME COMPLETE!"));
        assert_eq!(hud.score_line.as_deref(), Some("Your Score: 23 seconds"));
        assert_eq!(hud.hint, None);
    }
}
