//! Puzzle Prison entry point
//!
//! Stand-in for the windowed shell: reads commands from stdin, catches the
//! simulation up on wall-clock time and prints the HUD after every line.

use std::io::{self, BufRead, Write};
use std::time::Instant;

use puzzle_prison::consts::TICK_INTERVAL_SECS;
use puzzle_prison::sim::{Control, GameEvent, GameState, InputEvent, TickInput, tick};
use puzzle_prison::{HudView, Tuning};

/// Maximum ticks run per input line to prevent spiral of death
const MAX_SUBSTEPS: u32 = 8;

enum Command {
    Toggle(Control),
    Event(InputEvent),
    Quit,
}

fn parse(token: &str) -> Option<Command> {
    let control = match token {
        "w" => Control::Forward,
        "s" => Control::Backward,
        "a" => Control::Left,
        "d" => Control::Right,
        "q" => Control::RotateLeft,
        "e" => Control::RotateRight,
        "f" => return Some(Command::Event(InputEvent::Interact)),
        "c" => return Some(Command::Event(InputEvent::ToggleCamera)),
        "esc" | "quit" | "exit" => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Toggle(control))
}

fn is_held(input: &TickInput, control: Control) -> bool {
    let intent = &input.intent;
    match control {
        Control::Forward => intent.forward,
        Control::Backward => intent.backward,
        Control::Left => intent.left,
        Control::Right => intent.right,
        Control::RotateLeft => intent.rotate_left,
        Control::RotateRight => intent.rotate_right,
    }
}

struct Game {
    state: GameState,
    input: TickInput,
    epoch: Instant,
    accumulator: f64,
    last_time: f64,
}

impl Game {
    fn new(tuning: Tuning) -> Self {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let state = GameState::with_setup(
            seed,
            0.0,
            tuning,
            Default::default(),
            Default::default(),
        )
        .unwrap_or_else(|e| {
            log::warn!("Rejected setup ({e}), using defaults");
            GameState::new(seed, 0.0)
        });
        log::info!("Game initialized with seed: {}", seed);

        Self {
            state,
            input: TickInput::default(),
            epoch: Instant::now(),
            accumulator: 0.0,
            last_time: 0.0,
        }
    }

    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Run the ticks owed since the last update
    fn update(&mut self) {
        let now = self.now();
        self.accumulator += now - self.last_time;
        self.last_time = now;

        // Always tick at least once so one-shots land
        let mut substeps = 0;
        loop {
            tick(&mut self.state, &self.input, now);
            self.input.clear_one_shots();
            substeps += 1;
            self.accumulator -= TICK_INTERVAL_SECS;
            if self.accumulator < TICK_INTERVAL_SECS || substeps >= MAX_SUBSTEPS {
                break;
            }
        }
        self.accumulator = self.accumulator.max(0.0);
    }

    fn print_hud(&mut self, out: &mut impl Write) -> io::Result<()> {
        for event in self.state.drain_events() {
            match event {
                GameEvent::RoomEntered { room } => writeln!(out, "=== Entering {} ===", room.title())?,
                GameEvent::Escaped { score } => {
                    writeln!(out, "You have escaped the Puzzle Prison! Score: {score}")?
                }
                GameEvent::TimeUp => writeln!(out, "TIME'S UP! Game Over.")?,
                other => log::debug!("{:?}", other),
            }
        }

        let hud = HudView::from_state(&self.state, self.now());
        writeln!(out, "{}  |  {}", hud.timer, hud.room_title)?;
        for line in &hud.status {
            writeln!(out, "  {line}")?;
        }
        if let Some(hint) = &hud.hint {
            writeln!(out, "  > {}", hint.prompt)?;
        }
        if let Some(message) = &hud.message {
            writeln!(out, "  \"{message}\"")?;
        }
        if let Some(banner) = &hud.banner {
            writeln!(out, "  {banner}")?;
        }
        if let Some(score) = &hud.score_line {
            writeln!(out, "  {score}")?;
        }
        let p = self.state.player.pos;
        writeln!(
            out,
            "  pos ({:.2}, {:.2}) yaw {:.0} {:?}",
            p.x, p.z, self.state.player.yaw, self.state.player.camera
        )?;
        out.flush()
    }
}

fn load_tuning() -> Tuning {
    match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path).unwrap_or_else(|e| {
            log::warn!("Could not load tuning from {path}: {e}; using defaults");
            Tuning::default()
        }),
        None => Tuning::default(),
    }
}

fn main() -> io::Result<()> {
    env_logger::init();
    log::info!("Puzzle Prison starting...");

    let mut game = Game::new(load_tuning());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "WELCOME TO THE PUZZLE PRISON")?;
    writeln!(out, "Collect apple, banana and orange, then follow the color sequence.")?;
    writeln!(out, "{}", puzzle_prison::hud::CONTROLS_LINE)?;
    writeln!(out, "(type keys separated by spaces; w/a/s/d/q/e toggle held controls)")?;
    game.print_hud(&mut out)?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        let mut quit = false;
        for token in line.split_whitespace() {
            match parse(&token.to_lowercase()) {
                Some(Command::Toggle(control)) => {
                    let event = if is_held(&game.input, control) {
                        InputEvent::Released(control)
                    } else {
                        InputEvent::Pressed(control)
                    };
                    game.input.apply(event);
                }
                Some(Command::Event(event)) => game.input.apply(event),
                Some(Command::Quit) => quit = true,
                None => writeln!(out, "unknown command: {token}")?,
            }
        }
        if quit {
            break;
        }

        game.update();
        game.print_hud(&mut out)?;
        if game.state.phase.is_terminal() {
            break;
        }
    }

    log::info!("Puzzle Prison exiting");
    Ok(())
}
