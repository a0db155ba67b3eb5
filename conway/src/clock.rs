// clock.rs - Fixed-cadence tick driver for a shared GridEngine
//
// One tokio task per running clock. The task takes the engine lock for each
// tick and checks its cancellation flag under that lock, so a tick observed
// by `stop` either has already finished or never starts.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use log::{debug, error, info, trace, warn};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::error::ClockError;
use crate::grid::{Cell, GridEngine};

/// The single engine instance shared by the clock and any manual caller.
/// Holding the lock is what serializes ticks and mutations.
pub type SharedEngine = Arc<Mutex<GridEngine>>;

pub fn shared(engine: GridEngine) -> SharedEngine {
    Arc::new(Mutex::new(engine))
}

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    Running,
    Stopped,
}

/// Sent to the listener after every clock-driven tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub generation: u64,
    pub changed: Vec<Cell>,
}

struct Driver {
    interval: Duration,
    cancelled: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

/// Repeatedly ticks a [`SharedEngine`] at a fixed interval.
///
/// Starts in [`ClockState::Stopped`]. `start` while running and `stop` while
/// stopped are no-ops, so at most one driver task exists per clock.
pub struct SimulationClock {
    engine: SharedEngine,
    runtime: Handle,
    driver: Option<Driver>,
    ticks: Arc<AtomicU64>,
    listener: Option<UnboundedSender<TickReport>>,
}

impl SimulationClock {
    pub fn new(engine: SharedEngine, runtime: Handle) -> Self {
        Self {
            engine,
            runtime,
            driver: None,
            ticks: Arc::new(AtomicU64::new(0)),
            listener: None,
        }
    }

    /// Receives a [`TickReport`] for each tick this clock dispatches.
    /// Applies to drivers started after the call.
    pub fn with_listener(mut self, listener: UnboundedSender<TickReport>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// A driver whose task has exited (poisoned engine lock) counts as stopped.
    pub fn state(&self) -> ClockState {
        if self.live_driver().is_some() { ClockState::Running } else { ClockState::Stopped }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// Interval of the running driver, if any.
    pub fn interval(&self) -> Option<Duration> {
        self.live_driver().map(|driver| driver.interval)
    }

    fn live_driver(&self) -> Option<&Driver> {
        self.driver.as_ref().filter(|driver| !driver.task.is_finished())
    }

    /// Ticks dispatched by this clock since it was created.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Begins ticking every `interval`, first tick one interval from now.
    pub fn start(&mut self, interval: Duration) -> Result<(), ClockError> {
        if let Some(driver) = self.live_driver() {
            debug!("clock already running every {} ms, start ignored", driver.interval.as_millis());
            return Ok(());
        }
        if interval.is_zero() {
            return Err(ClockError::ZeroInterval);
        }
        if self.driver.take().is_some() {
            warn!("previous clock driver had exited, starting a new one");
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let task = self.runtime.spawn(drive(
            Arc::clone(&self.engine),
            interval,
            Arc::clone(&cancelled),
            Arc::clone(&self.ticks),
            self.listener.clone(),
        ));

        info!("simulation clock started, interval {} ms", interval.as_millis());
        self.driver = Some(Driver { interval, cancelled, task });
        Ok(())
    }

    /// Cancels periodic ticking. Waits for a tick already in progress.
    pub fn stop(&mut self) {
        let Some(driver) = self.driver.take() else {
            debug!("clock already stopped, stop ignored");
            return;
        };

        {
            let _engine = self.engine.lock().unwrap_or_else(PoisonError::into_inner);
            driver.cancelled.store(true, Ordering::SeqCst);
        }
        driver.task.abort();

        info!("simulation clock stopped after {} ticks", self.ticks());
    }
}

impl Drop for SimulationClock {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drive(
    engine: SharedEngine,
    period: Duration,
    cancelled: Arc<AtomicBool>,
    ticks: Arc<AtomicU64>,
    listener: Option<UnboundedSender<TickReport>>,
) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;

        let report = {
            let Ok(mut grid) = engine.lock() else {
                error!("grid engine lock poisoned, clock driver exiting");
                return;
            };
            if cancelled.load(Ordering::SeqCst) {
                return;
            }
            let changed = grid.tick();
            let generation = ticks.fetch_add(1, Ordering::SeqCst) + 1;
            TickReport { generation, changed }
        };

        trace!("generation {}: {} cells changed", report.generation, report.changed.len());

        if let Some(tx) = &listener {
            if tx.send(report).is_err() {
                debug!("tick listener dropped");
            }
        }
    }
}
