//! Gameplay tuning
//!
//! Every constant the simulation reads lives here so a JSON file can
//! rebalance the game without a rebuild. Missing fields fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;
use crate::sim::state::CameraMode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Geometry ===
    pub room_size: f32,
    pub player_radius: f32,
    pub player_height: f32,
    pub gate_width: f32,

    // === Motion (per tick) ===
    pub move_speed: f32,
    /// Degrees
    pub rotation_speed: f32,
    pub gate_step: f32,

    // === Room flow ===
    pub transition_margin: f32,
    pub room_two_entry_offset: f32,

    // === Interaction ===
    pub interact_radius: f32,
    pub switch_radius: f32,
    pub buzzer_radius: f32,
    /// Seconds
    pub switch_cooldown: f64,

    // === Session ===
    /// Seconds
    pub time_limit: u32,
    /// Seconds
    pub message_duration: f64,

    // === Spawn ===
    /// Ground-plane (x, z); the eye sits at `player_height`
    pub start_position: Vec2,
    pub start_yaw: f32,
    pub start_camera: CameraMode,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            room_size: ROOM_SIZE,
            player_radius: PLAYER_RADIUS,
            player_height: PLAYER_HEIGHT,
            gate_width: GATE_WIDTH,

            move_speed: MOVE_SPEED,
            rotation_speed: ROTATION_SPEED,
            gate_step: GATE_STEP,

            transition_margin: TRANSITION_MARGIN,
            room_two_entry_offset: ROOM_TWO_ENTRY_OFFSET,

            interact_radius: INTERACT_RADIUS,
            switch_radius: SWITCH_RADIUS,
            buzzer_radius: BUZZER_RADIUS,
            switch_cooldown: SWITCH_COOLDOWN,

            time_limit: TIME_LIMIT,
            message_duration: MESSAGE_DURATION,

            start_position: Vec2::new(0.0, PLAYER_START_Z),
            start_yaw: 0.0,
            start_camera: CameraMode::FirstPerson,
        }
    }
}

impl Tuning {
    /// Half the room's side length
    #[inline]
    pub fn half_room(&self) -> f32 {
        self.room_size / 2.0
    }

    /// Furthest the player's center may stray from the room center per axis
    #[inline]
    pub fn walkable_half_extent(&self) -> f32 {
        self.half_room() - self.player_radius
    }

    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SetupError> {
        let positive = [
            ("room_size", self.room_size),
            ("player_radius", self.player_radius),
            ("player_height", self.player_height),
            ("gate_width", self.gate_width),
            ("move_speed", self.move_speed),
            ("interact_radius", self.interact_radius),
            ("switch_radius", self.switch_radius),
            ("buzzer_radius", self.buzzer_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !(self.rotation_speed.is_finite() && self.rotation_speed >= 0.0) {
            return Err(invalid(format!(
                "rotation_speed must be non-negative, got {}",
                self.rotation_speed
            )));
        }
        if !(self.gate_step > 0.0 && self.gate_step <= 1.0) {
            return Err(invalid(format!(
                "gate_step must be in (0, 1], got {}",
                self.gate_step
            )));
        }
        if self.time_limit == 0 {
            return Err(invalid("time_limit must be at least one second".into()));
        }
        if !(self.message_duration > 0.0) {
            return Err(invalid("message_duration must be positive".into()));
        }
        if !(self.switch_cooldown.is_finite() && self.switch_cooldown >= 0.0) {
            return Err(invalid("switch_cooldown must be non-negative".into()));
        }
        if !(self.transition_margin.is_finite() && self.transition_margin >= 0.0) {
            return Err(invalid("transition_margin must be non-negative".into()));
        }
        if self.player_radius * 2.0 >= self.room_size {
            return Err(invalid("player does not fit inside the room".into()));
        }
        if self.gate_width >= self.room_size {
            return Err(invalid("gate is wider than the wall".into()));
        }
        let reach = self.walkable_half_extent();
        if self.start_position.x.abs() > reach || self.start_position.y.abs() > reach {
            return Err(invalid(format!(
                "start position {} is outside the room",
                self.start_position
            )));
        }
        // Entry sits at -half + offset and must be walkable
        let entry = self.room_two_entry_offset;
        if !(entry >= self.player_radius && entry <= self.room_size - self.player_radius) {
            return Err(invalid("room_two_entry_offset puts the player in a wall".into()));
        }
        Ok(())
    }
}

fn invalid(reason: String) -> SetupError {
    SetupError::InvalidTuning(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "time_limit": 90, "move_speed": 0.2 }"#).unwrap();
        assert_eq!(tuning.time_limit, 90);
        assert!((tuning.move_speed - 0.2).abs() < 1e-6);
        assert_eq!(tuning.room_size, ROOM_SIZE);
        assert_eq!(tuning.start_camera, CameraMode::FirstPerson);
    }

    #[test]
    fn test_camera_mode_from_json() {
        let tuning = Tuning::from_json(r#"{ "start_camera": "third_person" }"#).unwrap();
        assert_eq!(tuning.start_camera, CameraMode::ThirdPerson);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "time_limit": 0 }"#),
            Err(SetupError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "gate_step": 1.5 }"#),
            Err(SetupError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "player_radius": -1.0 }"#),
            Err(SetupError::InvalidTuning(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "start_position": [50.0, 0.0] }"#),
            Err(SetupError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_room_two_entry_must_be_walkable() {
        let at = |offset: f32| Tuning {
            room_two_entry_offset: offset,
            ..Default::default()
        };
        at(0.5).validate().unwrap();
        at(19.5).validate().unwrap();
        assert!(matches!(at(0.4).validate(), Err(SetupError::InvalidTuning(_))));
        assert!(matches!(at(19.8).validate(), Err(SetupError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_bad_margin_and_cooldown() {
        assert!(matches!(
            Tuning::from_json(r#"{ "transition_margin": -0.1 }"#),
            Err(SetupError::InvalidTuning(_))
        ));
        let tuning = Tuning {
            switch_cooldown: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(SetupError::InvalidTuning(_))));
        let tuning = Tuning {
            transition_margin: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(SetupError::InvalidTuning(_))));
    }

    #[test]
    fn test_rejects_non_positive_height() {
        assert!(matches!(
            Tuning::from_json(r#"{ "player_height": 0.0 }"#),
            Err(SetupError::InvalidTuning(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Tuning::from_json("{ time_limit: "),
            Err(SetupError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Tuning::load("/definitely/not/here/tuning.json"),
            Err(SetupError::Io(_))
        ));
    }
}
