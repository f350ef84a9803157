//! Room content
//!
//! Layouts are plain data so tests and tuning files can rearrange rooms.
//! They are checked once, at session construction, for puzzles that could
//! never be solved.

use std::collections::BTreeSet;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Clue, ColorSwitch, Fruit, FruitBox, FruitKind, Key, RoomOne, RoomTwo, SwitchColor};
use crate::error::SetupError;

/// Box dimensions used by the shipped room (width, height, depth)
pub const BOX_SIZE: Vec3 = Vec3::new(1.0, 0.8, 1.0);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxSpec {
    pub pos: Vec3,
    pub size: Vec3,
    pub locked: bool,
    pub contents: Option<FruitKind>,
    pub riddle: String,
}

impl BoxSpec {
    pub fn new(pos: Vec3, locked: bool, contents: Option<FruitKind>, riddle: &str) -> Self {
        Self {
            pos,
            size: BOX_SIZE,
            locked,
            contents,
            riddle: riddle.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomOneLayout {
    pub boxes: Vec<BoxSpec>,
    /// Key positions and hints
    pub keys: Vec<(Vec3, String)>,
    /// Clue positions and texts
    pub clues: Vec<(Vec3, String)>,
    /// Fruit lying loose on the floor
    pub fruits: Vec<(FruitKind, Vec3)>,
    pub required: BTreeSet<FruitKind>,
}

impl Default for RoomOneLayout {
    fn default() -> Self {
        Self {
            boxes: vec![
                BoxSpec::new(
                    Vec3::new(-6.0, 0.0, -6.0),
                    false,
                    Some(FruitKind::Apple),
                    "I am red and keep doctors away. What am I?",
                ),
                BoxSpec::new(
                    Vec3::new(6.0, 0.0, -6.0),
                    true,
                    Some(FruitKind::Banana),
                    "Yellow and curved, monkeys love me. Find the key near the center.",
                ),
                BoxSpec::new(
                    Vec3::new(-6.0, 0.0, 6.0),
                    false,
                    Some(FruitKind::Grape),
                    "Purple and small, I grow in bunches.",
                ),
                BoxSpec::new(
                    Vec3::new(6.0, 0.0, 6.0),
                    true,
                    Some(FruitKind::Orange),
                    "I am round and orange. My key is in the corner.",
                ),
            ],
            keys: vec![
                (
                    Vec3::new(-3.0, 0.5, 0.0),
                    "This key unlocks the yellow fruit box.".into(),
                ),
                (
                    Vec3::new(3.0, 0.5, 3.0),
                    "This key unlocks the orange fruit box.".into(),
                ),
            ],
            clues: vec![
                (
                    Vec3::new(0.0, 0.5, -8.0),
                    "Collect: Apple, Banana, and Orange to escape!".into(),
                ),
                (
                    Vec3::new(-8.0, 0.5, 0.0),
                    "Red boxes are unlocked. Dark boxes need keys.".into(),
                ),
                (
                    Vec3::new(8.0, 0.5, 0.0),
                    "Look for shiny objects - they might be keys!".into(),
                ),
            ],
            fruits: Vec::new(),
            required: [FruitKind::Apple, FruitKind::Banana, FruitKind::Orange]
                .into_iter()
                .collect(),
        }
    }
}

impl RoomOneLayout {
    /// Reject rooms whose gate could never open
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.required.is_empty() {
            return Err(SetupError::EmptyRequirement);
        }

        let available: BTreeSet<FruitKind> = self
            .boxes
            .iter()
            .filter_map(|b| b.contents)
            .chain(self.fruits.iter().map(|(kind, _)| *kind))
            .collect();
        let missing: Vec<FruitKind> = self.required.difference(&available).copied().collect();
        if !missing.is_empty() {
            return Err(SetupError::UnsatisfiableFruits { missing });
        }

        // Required fruit that only sits in locked boxes needs a key per box
        let loose: BTreeSet<FruitKind> = self
            .boxes
            .iter()
            .filter(|b| !b.locked)
            .filter_map(|b| b.contents)
            .chain(self.fruits.iter().map(|(kind, _)| *kind))
            .collect();
        let locked = self
            .required
            .iter()
            .filter(|kind| !loose.contains(kind))
            .count();
        if locked > self.keys.len() {
            return Err(SetupError::NotEnoughKeys {
                locked,
                keys: self.keys.len(),
            });
        }

        Ok(())
    }

    pub(crate) fn build(self) -> RoomOne {
        RoomOne {
            boxes: self
                .boxes
                .into_iter()
                .map(|b| FruitBox {
                    pos: b.pos,
                    size: b.size,
                    locked: b.locked,
                    opened: false,
                    contents: b.contents,
                    riddle: b.riddle,
                })
                .collect(),
            keys: self
                .keys
                .into_iter()
                .map(|(pos, hint)| Key {
                    pos,
                    collected: false,
                    hint,
                })
                .collect(),
            clues: self
                .clues
                .into_iter()
                .map(|(pos, text)| Clue {
                    pos,
                    text,
                    read: false,
                })
                .collect(),
            fruits: self
                .fruits
                .into_iter()
                .map(|(kind, pos)| Fruit {
                    kind,
                    pos,
                    collected: false,
                })
                .collect(),
            required: self.required,
            collected: Vec::new(),
            keys_found: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTwoLayout {
    pub switches: Vec<(SwitchColor, Vec3)>,
    pub buzzer_pos: Vec3,
}

impl Default for RoomTwoLayout {
    fn default() -> Self {
        Self {
            switches: vec![
                (SwitchColor::Red, Vec3::new(-3.0, 0.0, 2.0)),
                (SwitchColor::Blue, Vec3::new(3.0, 0.0, 2.0)),
                (SwitchColor::Green, Vec3::new(-3.0, 0.0, -2.0)),
                (SwitchColor::Yellow, Vec3::new(3.0, 0.0, -2.0)),
            ],
            buzzer_pos: Vec3::ZERO,
        }
    }
}

impl RoomTwoLayout {
    /// One switch per palette color, no more, no fewer
    pub fn validate(&self) -> Result<(), SetupError> {
        if self.switches.len() != SwitchColor::PALETTE.len() {
            return Err(SetupError::SwitchPalette(format!(
                "expected {} switches, found {}",
                SwitchColor::PALETTE.len(),
                self.switches.len()
            )));
        }
        for color in SwitchColor::PALETTE {
            let count = self.switches.iter().filter(|(c, _)| *c == color).count();
            if count != 1 {
                return Err(SetupError::SwitchPalette(format!(
                    "{color} appears {count} times"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn build(self, target: [SwitchColor; 4]) -> RoomTwo {
        RoomTwo {
            switches: self
                .switches
                .into_iter()
                .map(|(color, pos)| ColorSwitch {
                    pos,
                    color,
                    active: false,
                })
                .collect(),
            buzzer_pos: self.buzzer_pos,
            target,
            progress: Default::default(),
            last_activation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layouts_are_valid() {
        RoomOneLayout::default().validate().unwrap();
        RoomTwoLayout::default().validate().unwrap();
    }

    #[test]
    fn test_empty_requirement_rejected() {
        let mut layout = RoomOneLayout::default();
        layout.required.clear();
        assert!(matches!(layout.validate(), Err(SetupError::EmptyRequirement)));
    }

    #[test]
    fn test_missing_fruit_rejected() {
        let mut layout = RoomOneLayout::default();
        // Nothing in the room holds an orange any more
        layout.boxes.pop();
        match layout.validate() {
            Err(SetupError::UnsatisfiableFruits { missing }) => {
                assert_eq!(missing, vec![FruitKind::Orange]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_loose_fruit_satisfies_requirement() {
        let mut layout = RoomOneLayout::default();
        layout.boxes.pop();
        layout.fruits.push((FruitKind::Orange, Vec3::new(0.0, 0.3, -3.0)));
        layout.validate().unwrap();
    }

    #[test]
    fn test_too_few_keys_rejected() {
        let mut layout = RoomOneLayout::default();
        layout.keys.truncate(1);
        assert!(matches!(
            layout.validate(),
            Err(SetupError::NotEnoughKeys { locked: 2, keys: 1 })
        ));
    }

    #[test]
    fn test_switch_palette_checked() {
        let mut layout = RoomTwoLayout::default();
        layout.switches[1].0 = SwitchColor::Red;
        assert!(matches!(layout.validate(), Err(SetupError::SwitchPalette(_))));

        let mut layout = RoomTwoLayout::default();
        layout.switches.pop();
        assert!(matches!(layout.validate(), Err(SetupError::SwitchPalette(_))));
    }

    #[test]
    fn test_build_starts_untouched() {
        let room = RoomOneLayout::default().build();
        assert!(room.boxes.iter().all(|b| !b.opened));
        assert!(room.keys.iter().all(|k| !k.collected));
        assert!(room.clues.iter().all(|c| !c.read));
        assert!(room.collected.is_empty());

        let target = SwitchColor::PALETTE;
        let room = RoomTwoLayout::default().build(target);
        assert!(room.switches.iter().all(|s| !s.active));
        assert_eq!(room.target, target);
        assert!(room.progress.entered.is_empty());
    }
}
