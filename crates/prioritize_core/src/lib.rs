//! Core domain logic for Prioritize Me.
//! This crate owns task persistence, the session task registry, priority
//! sorting and overdue reminders; presentation layers call into it.

pub mod announce;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod scheduler;
pub mod service;
pub mod sort;

pub use announce::{Announcer, LogAnnouncer};
pub use config::{AppConfig, ConfigError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Category, DueTimeError, Priority, Task, TaskDraft, TaskId, TaskValidationError,
};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use scheduler::{sweep, ReminderHandle, ReminderScheduler, SweepReport};
pub use service::commands::{dispatch, Command, CommandOutcome};
pub use service::task_registry::{
    lock_registry, RegistryError, RegistryResult, SharedRegistry, TaskRegistry,
};
pub use sort::{sort_by_priority, SortKey};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
