//! Gameplay simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Driven only by `tick(state, input, now)`
//! - Seeded RNG only
//! - Stable iteration order (collection order decides ties)
//! - No rendering or platform dependencies

pub mod interact;
pub mod layout;
pub mod movement;
pub mod sequence;
pub mod state;
pub mod tick;

pub use interact::{Target, current_target, interact};
pub use layout::{BoxSpec, RoomOneLayout, RoomTwoLayout};
pub use movement::{Basis, can_move_to, direction_for};
pub use state::{
    CameraMode, Clue, ColorSwitch, Fruit, FruitBox, FruitKind, GameEvent, GameOutcome, GamePhase,
    GameState, Gate, Key, MessageSlot, Player, RoomIndex, SequenceProgress, SequenceStage,
    SessionClock, SwitchColor,
};
pub use tick::{Control, InputEvent, Intent, TickInput, tick};
