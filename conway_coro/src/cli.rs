// cli.rs - Process arguments and the line-oriented command language

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Interactive Game of Life harness. Reads commands from stdin, one per line.
#[derive(Debug, Parser)]
#[command(name = "conway_coro", version)]
pub struct Cli {
    /// Directory holding default.toml and user.toml
    #[arg(long, default_value = "config")]
    pub config_dir: PathBuf,

    /// Grid width in cells
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height in cells
    #[arg(long)]
    pub height: Option<usize>,

    /// Default clock interval for `run`
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Default log filter
    #[arg(long)]
    pub log_level: Option<String>,
}

/// One input line. Single-letter aliases follow the keyboard bindings
/// s (start), q (stop), c (clear) and t (tick).
#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct CommandLine {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Advance one generation
    #[command(visible_aliases = ["t", "tick"])]
    Step,
    /// Start the simulation clock
    #[command(visible_aliases = ["s", "start"])]
    Run {
        /// Tick interval in milliseconds
        ms: Option<u64>,
    },
    /// Stop the simulation clock
    #[command(visible_aliases = ["q", "stop"])]
    Halt,
    /// Stop the clock and kill every cell
    #[command(visible_aliases = ["c", "clear"])]
    Reset,
    /// Make a cell alive
    Set { row: usize, col: usize },
    /// Make a cell dead
    Unset { row: usize, col: usize },
    /// Flip a cell
    Toggle { row: usize, col: usize },
    /// Print whether a cell is alive
    Get { row: usize, col: usize },
    /// Draw the grid
    Show,
    /// Leave the harness
    #[command(visible_alias = "exit")]
    Quit,
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, clap::Error> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    CommandLine::try_parse_from(line.split_whitespace()).map(|parsed| Some(parsed.command))
}
