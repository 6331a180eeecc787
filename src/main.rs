//! Gesture Chess - Unified CLI
//!
//! Selects board moves from keyboard input or replayed intent scripts.

#![warn(missing_docs)]

mod board;
mod cli;
mod config;
mod gesture;
mod input;
mod moves;
mod players;
mod selection;
mod tracking;

use std::cell::RefCell;
use std::collections::HashSet;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyCode, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use board::{BoardBounds, RectBoard, Square};
use cli::{Cli, Command};
use config::PipelineConfig;
use input::{Intent, IntentSource, KeySource, KeyboardIntents, LogicalKey, ScriptedIntents};
use moves::{AllowAll, Side};
use players::{HumanPlayer, Player, TurnOutcome};
use selection::{FocusNotifier, NullNotifier};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Keys {
            config,
            side,
            focus,
            tick_rate,
        } => run_keys(&config, &side, &focus, tick_rate),
        Command::Replay {
            script,
            config,
            side,
            focus,
        } => run_replay(&script, &config, &side, &focus),
    }
}

/// Run the interactive keyboard selection loop
#[instrument(skip_all, fields(config_path = %config_path.display()))]
fn run_keys(config_path: &Path, side: &str, focus: &str, tick_rate: u32) -> Result<()> {
    let config = load_pipeline_config(config_path)?;
    let side = parse_side(side)?;
    let focus = parse_square(focus)?;
    ensure!(tick_rate > 0, "Tick rate must be positive");
    ensure_on_board(&config, focus)?;

    let keys = FrameKeys::default();
    let intents = KeyboardIntents::new(Box::new(keys.clone()));
    let mut player = build_player(&config, side, Box::new(intents), Box::new(FocusPrinter));
    player.start_move(focus);

    print!("Arrows move the cursor, Space locks the source, Enter submits, Esc aborts.\r\n");

    terminal::enable_raw_mode().context("Failed to enter raw terminal mode")?;
    // Ask the terminal to tag repeats and releases; without the flags OS
    // autorepeat arrives as plain presses and a held arrow keeps stepping.
    let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            io::stdout(),
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();
    let result = drive_keys_loop(&keys, &mut player, tick_rate);
    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    terminal::disable_raw_mode().context("Failed to leave raw terminal mode")?;
    result?;

    report_outcome(&player)
}

/// Polls key events and ticks the player until the turn finishes.
fn drive_keys_loop(keys: &FrameKeys, player: &mut HumanPlayer, tick_rate: u32) -> Result<()> {
    let tick = Duration::from_millis(1000 / u64::from(tick_rate));

    while !player.is_done() {
        keys.begin_frame();
        let mut aborted = false;

        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if is_abort(&event) {
                aborted = true;
            } else if let Some(key) = pressed_key(&event) {
                keys.press(key);
            }
        }

        if aborted {
            player.cancel();
        }
        player.tick();

        if !player.is_done() {
            std::thread::sleep(tick);
        }
    }
    Ok(())
}

/// Maps a terminal event to the logical key it presses, if any.
///
/// Only key-down edges count: repeat and release events never press a
/// key, so terminals that tag them deliver one intent per physical press.
fn pressed_key(event: &Event) -> Option<LogicalKey> {
    let Event::Key(key) = event else {
        return None;
    };
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(LogicalKey::Up),
        KeyCode::Down => Some(LogicalKey::Down),
        KeyCode::Left => Some(LogicalKey::Left),
        KeyCode::Right => Some(LogicalKey::Right),
        KeyCode::Char(' ') => Some(LogicalKey::Confirm),
        KeyCode::Enter => Some(LogicalKey::Cancel),
        _ => None,
    }
}

/// True for the abort chords: Esc, q, or Ctrl-C.
fn is_abort(event: &Event) -> bool {
    let Event::Key(key) = event else {
        return false;
    };
    if key.kind != KeyEventKind::Press {
        return false;
    }
    matches!(key.code, KeyCode::Esc | KeyCode::Char('q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Rejects a starting focus the configured board does not contain.
fn ensure_on_board(config: &PipelineConfig, focus: Square) -> Result<()> {
    let board = RectBoard::new(*config.board_width(), *config.board_height());
    ensure!(
        board.contains(focus),
        "Focus {} is outside the {}x{} board",
        focus,
        board.width,
        board.height
    );
    Ok(())
}

/// Replay a scripted intent stream and print the outcome
#[instrument(skip_all, fields(config_path = %config_path.display()))]
fn run_replay(script: &str, config_path: &Path, side: &str, focus: &str) -> Result<()> {
    let config = load_pipeline_config(config_path)?;
    let side = parse_side(side)?;
    let focus = parse_square(focus)?;
    ensure_on_board(&config, focus)?;
    let intents = parse_script(script)?;

    let ticks = intents.len();
    let mut player = build_player(
        &config,
        side,
        Box::new(ScriptedIntents::new(intents)),
        Box::new(NullNotifier),
    );
    player.start_move(focus);

    // Once the script runs dry every further tick is Intent::None, which
    // can never finish a selection, so there is no point ticking past it.
    for _ in 0..ticks {
        player.tick();
        if player.is_done() {
            break;
        }
    }
    if !player.is_done() {
        info!("Script ended without finishing the selection");
        player.cancel();
    }

    report_outcome(&player)
}

/// Assembles a human player from the pipeline configuration.
fn build_player(
    config: &PipelineConfig,
    side: Side,
    intents: Box<dyn IntentSource>,
    notifier: Box<dyn FocusNotifier>,
) -> HumanPlayer {
    let bounds = RectBoard::new(*config.board_width(), *config.board_height());
    let mut player = HumanPlayer::new(side, intents, Box::new(bounds), Box::new(AllowAll), notifier);
    if let Some(budget) = config.tick_budget() {
        player = player.with_tick_budget(*budget);
    }
    player
}

#[instrument]
fn load_pipeline_config(path: &Path) -> Result<PipelineConfig> {
    if path.exists() {
        info!("Loading pipeline configuration");
        Ok(PipelineConfig::from_file(path)?)
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Ok(PipelineConfig::default())
    }
}

fn parse_side(s: &str) -> Result<Side> {
    match s.to_ascii_lowercase().as_str() {
        "white" => Ok(Side::White),
        "black" => Ok(Side::Black),
        other => bail!("Unknown side {:?}, expected white or black", other),
    }
}

fn parse_square(s: &str) -> Result<Square> {
    let (x, y) = s
        .split_once(',')
        .with_context(|| format!("Square {:?} is not of the form x,y", s))?;
    let x = x.trim().parse().with_context(|| format!("Bad file coordinate in {:?}", s))?;
    let y = y.trim().parse().with_context(|| format!("Bad rank coordinate in {:?}", s))?;
    Ok(Square::new(x, y))
}

fn parse_script(script: &str) -> Result<Vec<Intent>> {
    script
        .split(',')
        .map(|token| match token.trim().to_ascii_lowercase().as_str() {
            "north" | "move-north" | "up" => Ok(Intent::MoveNorth),
            "south" | "move-south" | "down" => Ok(Intent::MoveSouth),
            "west" | "move-west" | "left" => Ok(Intent::MoveWest),
            "east" | "move-east" | "right" => Ok(Intent::MoveEast),
            "start" | "start-selection" => Ok(Intent::StartSelection),
            "end" | "end-selection" => Ok(Intent::EndSelection),
            "none" | "" => Ok(Intent::None),
            other => bail!("Unknown intent {:?}", other),
        })
        .collect()
}

/// Prints the finished turn as JSON (moves) or a plain line (everything else).
fn report_outcome(player: &HumanPlayer) -> Result<()> {
    match player.outcome() {
        Some(TurnOutcome::Committed(mv)) => {
            let json = serde_json::to_string_pretty(mv)?;
            print!("{}\r\n", json);
        }
        Some(TurnOutcome::Cancelled) => print!("Selection cancelled.\r\n"),
        Some(TurnOutcome::Forfeited) => print!("Turn forfeited: tick budget exhausted.\r\n"),
        None => print!("Selection never finished.\r\n"),
    }
    Ok(())
}

/// Key-down edges collected from the terminal for the current tick.
///
/// Clones share one pressed set, so the event loop can record presses on
/// one handle while the intent source reads through the other.
#[derive(Clone, Default)]
struct FrameKeys {
    pressed: Rc<RefCell<HashSet<LogicalKey>>>,
}

impl FrameKeys {
    fn begin_frame(&self) {
        self.pressed.borrow_mut().clear();
    }

    fn press(&self, key: LogicalKey) {
        self.pressed.borrow_mut().insert(key);
    }
}

impl KeySource for FrameKeys {
    fn was_pressed(&self, key: LogicalKey) -> bool {
        self.pressed.borrow().contains(&key)
    }
}

/// Writes every cursor move to the terminal, raw-mode friendly.
struct FocusPrinter;

impl FocusNotifier for FocusPrinter {
    fn on_focus_changed(&mut self, focus: Square) {
        print!("focus {}\r\n", focus);
    }
}
