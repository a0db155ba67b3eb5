// session.rs - Applies harness commands to one engine and its clock

use std::io::{self, Write};
use std::sync::MutexGuard;
use std::time::Duration;

use conway::{shared, ClockError, GridEngine, GridError, SharedEngine, SimulationClock, TickReport};
use log::{debug, warn};
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::cli::{parse_line, Command};
use crate::config::AppConfig;
use crate::ui;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Clock(#[from] ClockError),
    #[error("output failed: {0}")]
    Io(#[from] io::Error),
    #[error("grid engine lock poisoned")]
    Poisoned,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

pub struct Session {
    engine: SharedEngine,
    clock: SimulationClock,
    default_interval: Duration,
    failed: bool,
}

impl Session {
    /// Builds the grid from `config`. Fails on a zero width or height.
    pub fn new(
        config: &AppConfig,
        runtime: Handle,
        listener: Option<UnboundedSender<TickReport>>,
    ) -> Result<Self, GridError> {
        let engine = shared(GridEngine::new(config.width, config.height)?);
        let mut clock = SimulationClock::new(engine.clone(), runtime);
        if let Some(listener) = listener {
            clock = clock.with_listener(listener);
        }

        Ok(Self {
            engine,
            clock,
            default_interval: config.tick_interval(),
            failed: false,
        })
    }

    pub fn engine(&self) -> &SharedEngine {
        &self.engine
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// True once any command has failed.
    pub fn failed(&self) -> bool {
        self.failed
    }

    /// Parses and runs one input line, reporting errors to `out`.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Outcome {
        let command = match parse_line(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Outcome::Continue,
            Err(err) => {
                if !matches!(err.kind(), clap::error::ErrorKind::DisplayHelp) {
                    self.failed = true;
                }
                let _ = write!(out, "{}", err.render());
                return Outcome::Continue;
            }
        };

        match self.execute(command, out) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("command failed: {err}");
                self.failed = true;
                let _ = writeln!(out, "error: {err}");
                Outcome::Continue
            }
        }
    }

    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Outcome, SessionError> {
        debug!("executing {command:?}");

        match command {
            Command::Step => {
                let changed = self.lock()?.tick();
                writeln!(out, "{} cells changed", changed.len())?;
            }
            Command::Run { ms } => {
                if let Some(interval) = self.clock.interval() {
                    writeln!(out, "already running every {} ms", interval.as_millis())?;
                } else {
                    let interval = ms.map(Duration::from_millis).unwrap_or(self.default_interval);
                    self.clock.start(interval)?;
                    writeln!(out, "running every {} ms", interval.as_millis())?;
                }
            }
            Command::Halt => {
                self.clock.stop();
                writeln!(out, "halted")?;
            }
            Command::Reset => {
                self.clock.stop();
                self.lock()?.clear();
                writeln!(out, "cleared")?;
            }
            Command::Set { row, col } => self.lock()?.set_alive(row, col)?,
            Command::Unset { row, col } => self.lock()?.set_dead(row, col)?,
            Command::Toggle { row, col } => {
                let alive = self.lock()?.toggle(row, col)?;
                writeln!(out, "{}", state_name(alive))?;
            }
            Command::Get { row, col } => {
                let alive = self.lock()?.is_alive(row, col)?;
                writeln!(out, "{}", state_name(alive))?;
            }
            Command::Show => {
                let grid = self.lock()?;
                ui::render(&grid, out)?;
            }
            Command::Quit => {
                self.clock.stop();
                return Ok(Outcome::Quit);
            }
        }
        Ok(Outcome::Continue)
    }

    fn lock(&self) -> Result<MutexGuard<'_, GridEngine>, SessionError> {
        self.engine.lock().map_err(|_| SessionError::Poisoned)
    }
}

fn state_name(alive: bool) -> &'static str {
    if alive { "alive" } else { "dead" }
}
