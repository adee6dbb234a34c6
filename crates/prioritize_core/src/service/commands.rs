//! User actions as commands.
//!
//! Each presentation event maps to one [`Command`]; [`dispatch`] runs it
//! against the registry and speaks the confirmation phrase for mutations.

use crate::announce::Announcer;
use crate::model::task::{Task, TaskDraft, TaskId};
use crate::repo::task_repo::TaskRepository;
use crate::service::task_registry::{RegistryResult, TaskRegistry};
use crate::sort::sort_by_priority;

pub const CREATED_PHRASE: &str = "Task created successfully.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Create(TaskDraft),
    Complete(TaskId),
    Delete(TaskId),
    List,
    /// Sort by the picker selection; unknown selections keep list order.
    Sort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Created(Task),
    Completed(Task),
    Deleted(Task),
    Listed(Vec<Task>),
}

pub fn completed_phrase(name: &str) -> String {
    format!("Task '{name}' marked as completed.")
}

pub fn deleted_phrase(name: &str) -> String {
    format!("Task '{name}' has been deleted.")
}

/// Runs `command`. Errors are returned before anything is announced.
pub fn dispatch<R: TaskRepository>(
    registry: &mut TaskRegistry<R>,
    announcer: &dyn Announcer,
    command: Command,
) -> RegistryResult<CommandOutcome> {
    match command {
        Command::Create(draft) => {
            let task = registry.create(draft)?;
            announcer.announce(CREATED_PHRASE);
            Ok(CommandOutcome::Created(task))
        }
        Command::Complete(id) => {
            let task = registry.complete(id)?;
            announcer.announce(&completed_phrase(&task.name));
            Ok(CommandOutcome::Completed(task))
        }
        Command::Delete(id) => {
            let task = registry.delete(id)?;
            announcer.announce(&deleted_phrase(&task.name));
            Ok(CommandOutcome::Deleted(task))
        }
        Command::List => Ok(CommandOutcome::Listed(registry.list().to_vec())),
        Command::Sort(selected) => Ok(CommandOutcome::Listed(sort_by_priority(
            registry.list(),
            &selected,
        ))),
    }
}
