//! CLI command definitions using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// memocalc: terminal calculator with persistent history and memory
#[derive(Parser, Debug)]
#[command(name = "memocalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding history.json and memory.json
    #[arg(long, env = "MEMOCALC_DATA_DIR", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Keep history and memory in memory only; nothing is read or written
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Write logs to this file (the TUI defaults to <data-dir>/memocalc.log)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to run (defaults to the interactive calculator)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the interactive calculator
    Tui,

    /// Evaluate one expression and record it in history
    Eval(EvalArgs),

    /// Show or clear the calculation history
    History(ClearArgs),

    /// Show or clear the memory register
    Memory(ClearArgs),
}

/// Arguments for the eval command
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct EvalArgs {
    /// Expression using + - * x / and parentheses, e.g. "2+3x4"
    #[arg(allow_hyphen_values = true)]
    pub expression: String,
}

/// Arguments shared by history and memory
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearArgs {
    /// Reset instead of printing
    #[arg(long)]
    pub clear: bool,
}
