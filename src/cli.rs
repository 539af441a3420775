//! Command-line interface for the dockspace inspector
//!
//! Supports:
//! - Replaying a recorded message script and printing the resulting layout
//! - Resolving the drop target under a pointer after a replay
//! - Showing the saved layout snapshot

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::model::{Point, Size};

/// Inspect and exercise dock layouts
#[derive(Parser, Debug)]
#[command(name = "dockspace", version, about = "Inspect and exercise dock layouts")]
pub struct CliArgs {
    /// Config file to use instead of ~/.config/dockspace/config.yaml
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply a JSON array of messages to an empty layout and print the result
    Replay {
        /// Message script (JSON array)
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Write the resulting snapshot to this file
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replay a script, then print the drop target under a pointer
    Resolve {
        /// Message script (JSON array); omit for an empty layout
        #[arg(long, value_name = "SCRIPT")]
        script: Option<PathBuf>,

        /// Pointer x coordinate
        #[arg(short, long, allow_negative_numbers = true)]
        x: f32,

        /// Pointer y coordinate
        #[arg(short, long, allow_negative_numbers = true)]
        y: f32,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the saved layout snapshot
    Show {
        /// Snapshot file to read instead of ~/.config/dockspace/layout.json
        #[arg(long, value_name = "FILE")]
        layout: Option<PathBuf>,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone, Copy)]
pub struct OutputArgs {
    /// Container width
    #[arg(long, default_value_t = 1280.0)]
    pub width: f32,

    /// Container height
    #[arg(long, default_value_t = 800.0)]
    pub height: f32,

    /// Print JSON instead of a text tree
    #[arg(long)]
    pub json: bool,
}

impl OutputArgs {
    pub fn container(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl Command {
    pub fn output(&self) -> OutputArgs {
        match self {
            Command::Replay { output, .. }
            | Command::Resolve { output, .. }
            | Command::Show { output, .. } => *output,
        }
    }

    /// Pointer location for `resolve`
    pub fn pointer(&self) -> Option<Point> {
        match self {
            Command::Resolve { x, y, .. } => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}
