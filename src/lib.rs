//! Puzzle Prison - A two-room escape puzzle against the clock
//!
//! Core modules:
//! - `sim`: Tick-driven gameplay core (movement, puzzles, room lifecycle)
//! - `tuning`: Data-driven gameplay constants
//! - `hud`: Read-only view model for whoever draws the screen
//! - `error`: Construction-time setup failures

pub mod error;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use error::SetupError;
pub use hud::{Hint, HintCategory, HudView};
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Nominal scheduler interval (16 ms)
    pub const TICK_INTERVAL_SECS: f64 = 0.016;

    /// Square room, centered on the origin
    pub const ROOM_SIZE: f32 = 20.0;

    /// Player body
    pub const PLAYER_HEIGHT: f32 = 1.7;
    pub const PLAYER_RADIUS: f32 = 0.5;
    /// Units per tick
    pub const MOVE_SPEED: f32 = 0.15;
    /// Degrees per tick
    pub const ROTATION_SPEED: f32 = 2.0;
    /// Where the player stands when the session starts
    pub const PLAYER_START_Z: f32 = 5.0;

    /// Gate aperture on the far (+z) wall
    pub const GATE_WIDTH: f32 = 3.0;
    /// Opening progress added per tick once open
    pub const GATE_STEP: f32 = 0.02;

    /// How far past the far wall the player must walk to leave Room 1
    pub const TRANSITION_MARGIN: f32 = 0.5;
    /// Distance from Room 2's near wall where the player arrives
    pub const ROOM_TWO_ENTRY_OFFSET: f32 = 2.0;

    /// Room 1 interaction reach
    pub const INTERACT_RADIUS: f32 = 2.0;
    /// Room 2 reach for switches and the buzzer
    pub const SWITCH_RADIUS: f32 = 1.0;
    pub const BUZZER_RADIUS: f32 = 1.0;
    /// Minimum seconds between two switch/buzzer activations
    pub const SWITCH_COOLDOWN: f64 = 0.5;

    /// Session length in seconds
    pub const TIME_LIMIT: u32 = 60;
    /// How long a notification stays on screen
    pub const MESSAGE_DURATION: f64 = 3.0;
}

/// Project a world position onto the ground plane (x, z)
#[inline]
pub fn ground(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Horizontal distance between two world positions (height ignored)
#[inline]
pub fn ground_distance(a: Vec3, b: Vec3) -> f32 {
    ground(a).distance(ground(b))
}

/// Wrap a yaw angle in degrees to [0, 360)
#[inline]
pub fn normalize_yaw(yaw: f32) -> f32 {
    yaw.rem_euclid(360.0)
}
