//! Background reminder loop.
//!
//! A worker thread sweeps immediately on start and then once per interval
//! until stopped. Each sweep holds the registry lock for its whole duration,
//! so it never interleaves with user commands.

use super::sweep::sweep;
use crate::announce::Announcer;
use crate::repo::task_repo::TaskRepository;
use crate::service::task_registry::{lock_registry, SharedRegistry};
use chrono::{Local, NaiveDateTime};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use log::{debug, error, info};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Interval between sweeps.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

const WORKER_THREAD_NAME: &str = "reminder-scheduler";

/// Source of the current naive local time.
pub type Clock = Arc<dyn Fn() -> NaiveDateTime + Send + Sync>;

/// Builder for the recurring reminder sweep.
pub struct ReminderScheduler<R: TaskRepository> {
    registry: SharedRegistry<R>,
    announcer: Arc<dyn Announcer>,
    interval: Duration,
    clock: Clock,
}

impl<R: TaskRepository + Send + 'static> ReminderScheduler<R> {
    pub fn new(registry: SharedRegistry<R>, announcer: Arc<dyn Announcer>) -> Self {
        Self {
            registry,
            announcer,
            interval: DEFAULT_SWEEP_INTERVAL,
            clock: Arc::new(|| Local::now().naive_local()),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replaces the wall clock, e.g. with a fixed instant in tests.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Spawns the worker thread.
    ///
    /// # Errors
    /// Returns the OS error when the thread cannot be spawned.
    pub fn start(self) -> std::io::Result<ReminderHandle> {
        let (stop_tx, stop_rx) = bounded::<()>(1);
        let interval = self.interval;

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || {
                info!(
                    "event=reminder_scheduler module=scheduler status=start interval_secs={}",
                    interval.as_secs()
                );
                loop {
                    self.run_once();
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                info!("event=reminder_scheduler module=scheduler status=stop");
            })?;

        Ok(ReminderHandle {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// Runs one sweep, containing any panic raised while it ran.
    fn run_once(&self) {
        let now = (self.clock)();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let mut registry = lock_registry(&self.registry);
            sweep(&mut *registry, self.announcer.as_ref(), now)
        }));

        match outcome {
            Ok(report) => debug!(
                "event=reminder_tick module=scheduler status=ok fired={}",
                report.fired.len()
            ),
            Err(_) => error!("event=reminder_tick module=scheduler status=panicked"),
        }
    }
}

/// Running reminder loop. Dropping the handle stops it.
pub struct ReminderHandle {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ReminderHandle {
    /// Signals the worker and waits for the in-flight sweep to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.worker
            .as_ref()
            .is_some_and(|worker| !worker.is_finished())
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.try_send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("event=reminder_scheduler module=scheduler status=join_failed");
            }
        }
    }
}

impl Drop for ReminderHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
