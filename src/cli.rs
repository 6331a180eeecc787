//! Command-line interface for gesture_chess.

use clap::{Parser, Subcommand};

/// Gesture Chess - body tracking to board moves
#[derive(Parser, Debug)]
#[command(name = "gesture-chess")]
#[command(about = "Turns tracked gestures or key presses into board moves", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Select a move interactively with the keyboard
    Keys {
        /// Path to pipeline configuration file
        #[arg(short, long, default_value = "gesture_chess.toml")]
        config: std::path::PathBuf,

        /// Side to move (white or black)
        #[arg(long, default_value = "white")]
        side: String,

        /// Starting focus square, as "x,y"
        #[arg(long, default_value = "0,0")]
        focus: String,

        /// Selection loop ticks per second
        #[arg(long, default_value = "30")]
        tick_rate: u32,
    },

    /// Replay a scripted intent stream and print the outcome
    Replay {
        /// Comma-separated intents: north, south, west, east, start, end, none
        script: String,

        /// Path to pipeline configuration file
        #[arg(short, long, default_value = "gesture_chess.toml")]
        config: std::path::PathBuf,

        /// Side to move (white or black)
        #[arg(long, default_value = "white")]
        side: String,

        /// Starting focus square, as "x,y"
        #[arg(long, default_value = "0,0")]
        focus: String,
    },
}
