//! Player movement and collision
//!
//! Movement is all-or-nothing: the full displacement for a tick is tried as
//! one candidate position, and if it hits a wall or a box the player stays
//! put. There is no sliding.

use glam::{Vec2, Vec3};

use super::state::{CameraMode, FruitBox, GameState, RoomIndex};
use super::tick::Intent;
use crate::tuning::Tuning;
use crate::{ground, normalize_yaw};

/// Ground-plane unit vectors for "forward" and "right"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    pub forward: Vec2,
    pub right: Vec2,
}

/// Map control directions to world directions for a camera mode and yaw
///
/// First person: forward is the camera's facing, `(cos yaw, sin yaw)`.
/// Third person: forward is the world's -z axis rotated by yaw, so strafing
/// is relative to the avatar, not the orbiting camera.
pub fn direction_for(mode: CameraMode, yaw_degrees: f32) -> Basis {
    let (sin, cos) = yaw_degrees.to_radians().sin_cos();
    match mode {
        CameraMode::FirstPerson => Basis {
            forward: Vec2::new(cos, sin),
            right: Vec2::new(-sin, cos),
        },
        CameraMode::ThirdPerson => Basis {
            forward: Vec2::new(-sin, -cos),
            right: Vec2::new(cos, -sin),
        },
    }
}

/// Ground-plane displacement requested by the held movement controls
pub fn displacement(intent: &Intent, mode: CameraMode, yaw_degrees: f32, speed: f32) -> Vec2 {
    let basis = direction_for(mode, yaw_degrees);
    let axis = |pos: bool, neg: bool| f32::from(u8::from(pos)) - f32::from(u8::from(neg));
    let forward = axis(intent.forward, intent.backward);
    let strafe = axis(intent.right, intent.left);
    (basis.forward * forward + basis.right * strafe) * speed
}

/// Yaw after applying held rotation controls (same in both camera modes)
pub fn rotated_yaw(yaw: f32, intent: &Intent, speed: f32) -> f32 {
    let mut yaw = yaw;
    if intent.rotate_left {
        yaw -= speed;
    }
    if intent.rotate_right {
        yaw += speed;
    }
    normalize_yaw(yaw)
}

/// True if `point` lies outside the room walls
///
/// With the gate open, a point past the far (+z) wall inside the gate
/// aperture is not rejected.
pub fn hits_wall(point: Vec2, gate_open: bool, tuning: &Tuning) -> bool {
    let half = tuning.walkable_half_extent();
    if gate_open && point.y > half && point.x.abs() < tuning.gate_width / 2.0 {
        return false;
    }
    point.x.abs() > half || point.y.abs() > half
}

/// Axis-aligned footprint overlap between the player and a box
pub fn hits_box(point: Vec2, fruit_box: &FruitBox, player_radius: f32) -> bool {
    let center = ground(fruit_box.pos);
    let reach_x = fruit_box.size.x / 2.0 + player_radius;
    let reach_z = fruit_box.size.z / 2.0 + player_radius;
    (point.x - center.x).abs() < reach_x && (point.y - center.y).abs() < reach_z
}

/// Whether the player may occupy `point` in the current room
pub fn can_move_to(state: &GameState, point: Vec2) -> bool {
    if hits_wall(point, state.current_gate().open, &state.tuning) {
        return false;
    }
    if state.current_room == RoomIndex::FruitPuzzle {
        let radius = state.tuning.player_radius;
        if state.room_one.boxes.iter().any(|b| hits_box(point, b, radius)) {
            return false;
        }
    }
    true
}

/// Rotate, then try the full move for this tick. Returns true if the
/// player's position changed.
pub fn advance_player(state: &mut GameState, intent: &Intent) -> bool {
    state.player.yaw = rotated_yaw(state.player.yaw, intent, state.tuning.rotation_speed);

    if !intent.any_movement() {
        return false;
    }

    let step = displacement(
        intent,
        state.player.camera,
        state.player.yaw,
        state.tuning.move_speed,
    );
    let candidate = ground(state.player.pos) + step;
    if !can_move_to(state, candidate) {
        return false;
    }

    state.player.pos = Vec3::new(candidate.x, state.player.pos.y, candidate.y);
    true
}
