//! Game state and core simulation types
//!
//! One owned [`GameState`] holds the whole session. Components never keep
//! references into each other; they all read and write through it.

use std::collections::BTreeSet;
use std::fmt;

use glam::Vec3;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::layout::{RoomOneLayout, RoomTwoLayout};
use crate::error::SetupError;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Clock running, puzzles live
    Playing,
    /// Both gates open before the clock ran out
    Escaped,
    /// Clock hit zero first
    TimedOut,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Which room the player is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomIndex {
    FruitPuzzle = 0,
    ColorSequence = 1,
}

impl RoomIndex {
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            RoomIndex::FruitPuzzle => "Room 1: The Fruit Puzzle",
            RoomIndex::ColorSequence => "Room 2: Color Sequence",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraMode {
    #[default]
    FirstPerson,
    /// Orbit camera behind the avatar
    ThirdPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            CameraMode::FirstPerson => CameraMode::ThirdPerson,
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
        }
    }
}

/// The player avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Heading in degrees
    pub yaw: f32,
    pub camera: CameraMode,
}

/// A one-way gate in a room's far wall
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub open: bool,
    /// 0 = shut, 1 = fully raised. Stays 0 until `open`.
    pub opening_progress: f32,
    pub opened_at: Option<f64>,
}

impl Gate {
    /// Open the gate. Returns true only on the first call.
    pub fn open(&mut self, now: f64) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.opened_at = Some(now);
        true
    }

    /// Raise an open gate by `step`, saturating at 1
    pub fn animate(&mut self, step: f32) {
        if self.open && self.opening_progress < 1.0 {
            self.opening_progress = (self.opening_progress + step).min(1.0);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FruitKind {
    Apple,
    Banana,
    Orange,
    Grape,
}

impl FruitKind {
    pub const ALL: [FruitKind; 4] = [
        FruitKind::Apple,
        FruitKind::Banana,
        FruitKind::Orange,
        FruitKind::Grape,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FruitKind::Apple => "apple",
            FruitKind::Banana => "banana",
            FruitKind::Orange => "orange",
            FruitKind::Grape => "grape",
        }
    }

    pub fn article(self) -> &'static str {
        match self {
            FruitKind::Apple | FruitKind::Orange => "an",
            FruitKind::Banana | FruitKind::Grape => "a",
        }
    }
}

impl fmt::Display for FruitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A loose fruit lying in Room 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fruit {
    pub kind: FruitKind,
    pub pos: Vec3,
    pub collected: bool,
}

/// A box in Room 1. Solid; may be locked; may hold one fruit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FruitBox {
    pub pos: Vec3,
    /// Width, height, depth
    pub size: Vec3,
    pub locked: bool,
    pub opened: bool,
    pub contents: Option<FruitKind>,
    pub riddle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Key {
    pub pos: Vec3,
    pub collected: bool,
    pub hint: String,
}

/// Readable note. `read` is cosmetic only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clue {
    pub pos: Vec3,
    pub text: String,
    pub read: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwitchColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl SwitchColor {
    pub const PALETTE: [SwitchColor; 4] = [
        SwitchColor::Red,
        SwitchColor::Blue,
        SwitchColor::Green,
        SwitchColor::Yellow,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SwitchColor::Red => "red",
            SwitchColor::Blue => "blue",
            SwitchColor::Green => "green",
            SwitchColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for SwitchColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorSwitch {
    pub pos: Vec3,
    pub color: SwitchColor,
    pub active: bool,
}

/// Colors accepted so far in Room 2, always a prefix of the target ordering
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceProgress {
    pub entered: Vec<SwitchColor>,
    pub complete: bool,
}

/// Room 2 puzzle stage, derived from progress and the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStage {
    Idle,
    InProgress,
    Complete,
    Solved,
}

/// Room 1: boxes, keys, clues and fruit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomOne {
    pub boxes: Vec<FruitBox>,
    pub keys: Vec<Key>,
    pub clues: Vec<Clue>,
    pub fruits: Vec<Fruit>,
    pub required: BTreeSet<FruitKind>,
    /// Every fruit picked up, in pickup order (duplicates kept)
    pub collected: Vec<FruitKind>,
    /// Keys held and not yet spent
    pub keys_found: u32,
}

impl RoomOne {
    /// Distinct fruit types gathered so far
    pub fn collected_kinds(&self) -> BTreeSet<FruitKind> {
        self.collected.iter().copied().collect()
    }

    /// True once every required fruit type has been gathered
    pub fn requirement_met(&self) -> bool {
        self.required.is_subset(&self.collected_kinds())
    }
}

/// Room 2: four color switches and the central buzzer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomTwo {
    pub switches: Vec<ColorSwitch>,
    pub buzzer_pos: Vec3,
    /// Fixed for the whole session
    pub target: [SwitchColor; 4],
    pub progress: SequenceProgress,
    /// Time of the last accepted switch or buzzer activation
    pub last_activation: Option<f64>,
}

/// Session countdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClock {
    pub start_time: f64,
    /// Seconds
    pub time_limit: u32,
    /// Whole seconds left, recomputed every tick
    pub time_remaining: u32,
}

impl SessionClock {
    pub fn new(start_time: f64, time_limit: u32) -> Self {
        Self {
            start_time,
            time_limit,
            time_remaining: time_limit,
        }
    }

    /// Recompute `time_remaining` from wall-clock `now`
    pub fn update(&mut self, now: f64) -> u32 {
        let elapsed = (now - self.start_time).max(0.0).floor();
        let left = f64::from(self.time_limit) - elapsed;
        self.time_remaining = left.max(0.0) as u32;
        self.time_remaining
    }
}

/// Final result; written once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub completed: bool,
    /// Seconds left on the clock when Room 2's gate opened
    pub final_score: u32,
}

/// Transient on-screen notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub text: String,
    pub shown_at: f64,
    pub duration: f64,
}

/// Single overwrite-on-write notification slot
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageSlot {
    pub current: Option<Message>,
}

impl MessageSlot {
    pub fn show(&mut self, text: impl Into<String>, now: f64, duration: f64) {
        self.current = Some(Message {
            text: text.into(),
            shown_at: now,
            duration,
        });
    }

    /// Display time left, zero once expired
    pub fn remaining(&self, now: f64) -> f64 {
        self.current
            .as_ref()
            .map(|m| (m.duration - (now - m.shown_at)).max(0.0))
            .unwrap_or(0.0)
    }

    /// The message text, if still on screen
    pub fn active(&self, now: f64) -> Option<&str> {
        match &self.current {
            Some(m) if self.remaining(now) > 0.0 => Some(m.text.as_str()),
            _ => None,
        }
    }
}

/// Things that happened, for audio/console/renderer collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ClueRead { index: usize },
    KeyCollected { keys_found: u32 },
    BoxOpened { index: usize, unlocked: bool },
    BoxLocked { index: usize },
    FruitCollected { kind: FruitKind },
    GateOpened { room: RoomIndex },
    RoomEntered { room: RoomIndex },
    SwitchAccepted { color: SwitchColor, position: usize },
    SequenceReset { expected: Option<SwitchColor>, got: SwitchColor },
    SequenceComplete,
    Escaped { score: u32 },
    TimeUp,
    CameraChanged { mode: CameraMode },
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Seed the target ordering was drawn from
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub current_room: RoomIndex,
    /// Indexed by [`RoomIndex::index`]
    pub gates: [Gate; 2],
    pub player: Player,
    pub room_one: RoomOne,
    pub room_two: RoomTwo,
    pub clock: SessionClock,
    pub outcome: GameOutcome,
    pub message: MessageSlot,
    /// Simulation tick counter
    pub time_ticks: u64,
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl GameState {
    /// New session with the default tuning and room content
    pub fn new(seed: u64, now: f64) -> Self {
        Self::assemble(
            seed,
            now,
            Tuning::default(),
            RoomOneLayout::default(),
            RoomTwoLayout::default(),
        )
    }

    /// New session from custom data; everything is validated first
    pub fn with_setup(
        seed: u64,
        now: f64,
        tuning: Tuning,
        room_one: RoomOneLayout,
        room_two: RoomTwoLayout,
    ) -> Result<Self, SetupError> {
        tuning.validate()?;
        room_one.validate()?;
        room_two.validate()?;
        Ok(Self::assemble(seed, now, tuning, room_one, room_two))
    }

    fn assemble(
        seed: u64,
        now: f64,
        tuning: Tuning,
        room_one: RoomOneLayout,
        room_two: RoomTwoLayout,
    ) -> Self {
        let target = shuffled_palette(seed);
        log::info!(
            "Session seed {}: room 2 order {}",
            seed,
            target.map(SwitchColor::name).join(" -> ")
        );

        Self {
            seed,
            phase: GamePhase::Playing,
            current_room: RoomIndex::FruitPuzzle,
            gates: [Gate::default(), Gate::default()],
            player: Player {
                pos: Vec3::new(
                    tuning.start_position.x,
                    tuning.player_height,
                    tuning.start_position.y,
                ),
                yaw: tuning.start_yaw,
                camera: tuning.start_camera,
            },
            room_one: room_one.build(),
            room_two: room_two.build(target),
            clock: SessionClock::new(now, tuning.time_limit),
            outcome: GameOutcome::default(),
            message: MessageSlot::default(),
            time_ticks: 0,
            events: Vec::new(),
            tuning,
        }
    }

    /// Gate of the room the player is in
    pub fn current_gate(&self) -> &Gate {
        &self.gates[self.current_room.index()]
    }

    pub fn all_gates_open(&self) -> bool {
        self.gates.iter().all(|g| g.open)
    }

    pub fn sequence_stage(&self) -> SequenceStage {
        if self.gates[RoomIndex::ColorSequence.index()].open {
            SequenceStage::Solved
        } else if self.room_two.progress.complete {
            SequenceStage::Complete
        } else if self.room_two.progress.entered.is_empty() {
            SequenceStage::Idle
        } else {
            SequenceStage::InProgress
        }
    }

    /// Open a room's gate once, recording the event
    pub fn open_gate(&mut self, room: RoomIndex, now: f64) {
        if self.gates[room.index()].open(now) {
            log::info!("{} gate opening", room.title());
            self.push_event(GameEvent::GateOpened { room });
        }
    }

    /// Post a notification using the tuned display duration
    pub fn notify(&mut self, text: impl Into<String>, now: f64) {
        let duration = self.tuning.message_duration;
        self.message.show(text, now, duration);
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take every event raised since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }
}

/// Seeded permutation of the four switch colors
pub fn shuffled_palette(seed: u64) -> [SwitchColor; 4] {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut order = SwitchColor::PALETTE;
    order.shuffle(&mut rng);
    order
}
