//! Single overdue-detection pass.

use crate::announce::Announcer;
use crate::model::task::TaskId;
use crate::repo::task_repo::TaskRepository;
use crate::service::task_registry::TaskRegistry;
use chrono::NaiveDateTime;
use log::{debug, error, warn};

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepReport {
    /// Tasks announced and flagged as reminded.
    pub fired: Vec<TaskId>,
    /// Tasks whose date/end fields could not be parsed.
    pub malformed: Vec<TaskId>,
    /// Tasks announced whose `reminded` flag could not be persisted.
    pub failed: Vec<TaskId>,
}

pub fn overdue_phrase(name: &str) -> String {
    format!("Time out for the task {name}")
}

/// Announces and flags every pending task that is overdue at `now`.
///
/// Pending means `completed = false` and `reminded = false`; a task is overdue
/// when `now` is strictly after its `date + end`.
pub fn sweep<R: TaskRepository>(
    registry: &mut TaskRegistry<R>,
    announcer: &dyn Announcer,
    now: NaiveDateTime,
) -> SweepReport {
    let mut report = SweepReport::default();
    let mut overdue: Vec<(TaskId, String)> = Vec::new();

    for task in registry.list() {
        match task.reminder_due(now) {
            Ok(true) => overdue.push((task.id, task.name.clone())),
            Ok(false) => {}
            Err(err) => {
                warn!(
                    "event=reminder_skip module=scheduler status=malformed task_id={} error={}",
                    task.id, err
                );
                report.malformed.push(task.id);
            }
        }
    }

    for (id, name) in overdue {
        announcer.announce(&overdue_phrase(&name));
        match registry.remind(id) {
            Ok(_) => report.fired.push(id),
            Err(err) => {
                error!(
                    "event=reminder_flag module=scheduler status=error task_id={id} error={err}"
                );
                report.failed.push(id);
            }
        }
    }

    debug!(
        "event=reminder_sweep module=scheduler status=ok now={} fired={} malformed={} failed={}",
        now,
        report.fired.len(),
        report.malformed.len(),
        report.failed.len()
    );
    report
}
