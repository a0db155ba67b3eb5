//! conway_coro - terminal harness for the `conway` engine
//!
//! Reads line commands, applies them to one shared grid, and runs the
//! simulation clock as a tokio task beside the input loop.

pub mod cli;
pub mod config;
pub mod session;
pub mod ui;

pub use cli::{parse_line, Cli, Command};
pub use config::{AppConfig, ConfigError};
pub use session::{Outcome, Session, SessionError};
