// lib.rs - Conway's Game of Life engine
//
// `GridEngine` holds a bounded, non-wrapping grid and advances it one
// generation at a time; `SimulationClock` ticks a shared engine on a timer.

pub mod clock;
pub mod error;
pub mod grid;

pub use clock::{shared, ClockState, SharedEngine, SimulationClock, TickReport, DEFAULT_TICK_INTERVAL};
pub use error::{ClockError, GridError};
pub use grid::{Cell, GridEngine, DEFAULT_HEIGHT, DEFAULT_WIDTH};
