//! Overdue-task reminders.
//!
//! # Responsibility
//! - Detect tasks whose `date + end` has passed and announce them once.
//! - Run that detection on a fixed cadence for the life of the session.
//!
//! # Invariants
//! - Completed tasks never fire.
//! - A task fires at most once: `reminded` is persisted right after the
//!   announcement.
//! - One malformed task never aborts a sweep, and one failed sweep never
//!   stops the cadence.

mod runner;
mod sweep;

pub use runner::{Clock, ReminderHandle, ReminderScheduler, DEFAULT_SWEEP_INTERVAL};
pub use sweep::{overdue_phrase, sweep, SweepReport};
