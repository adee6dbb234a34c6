//! In-memory task registry with write-through persistence.
//!
//! # Responsibility
//! - Mirror the store's tasks for the running session.
//! - Validate, persist, then apply every mutation.
//!
//! # Invariants
//! - A task is only added to memory after the store accepted the insert.
//! - A flag change the store rejects is rolled back in memory.
//! - Deleted tasks leave memory only after the store delete succeeded.
//! - Memory keeps insertion order; sorting happens on copies.

use crate::model::task::{Task, TaskDraft, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type RegistryResult<T> = Result<T, RegistryError>;

/// Registry shared between the presentation layer and the reminder thread.
pub type SharedRegistry<R> = Arc<Mutex<TaskRegistry<R>>>;

#[derive(Debug)]
pub enum RegistryError {
    /// Required field missing on create; nothing was mutated.
    Validation(TaskValidationError),
    /// No task with this id is in the registry.
    NotFound(TaskId),
    /// The store is unreachable or rejected the write.
    Persistence(RepoError),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::Persistence(err) => write!(f, "task store error: {err}"),
        }
    }
}

impl Error for RegistryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<TaskValidationError> for RegistryError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for RegistryError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Persistence(other),
        }
    }
}

/// Locks a shared registry, recovering the guard if a previous holder panicked.
pub fn lock_registry<R: TaskRepository>(
    shared: &SharedRegistry<R>,
) -> MutexGuard<'_, TaskRegistry<R>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Authoritative in-memory task collection.
pub struct TaskRegistry<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
}

impl<R: TaskRepository> TaskRegistry<R> {
    /// Creates an empty registry over `repo` without touching storage.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            tasks: Vec::new(),
        }
    }

    /// Startup path: initializes the store and loads every persisted task.
    pub fn open(repo: R) -> RegistryResult<Self> {
        repo.initialize()?;
        let mut registry = Self::new(repo);
        registry.load_from_store()?;
        Ok(registry)
    }

    pub fn into_shared(self) -> SharedRegistry<R> {
        Arc::new(Mutex::new(self))
    }

    /// Replaces memory with the store's current contents.
    ///
    /// On failure memory is left as it was.
    pub fn load_from_store(&mut self) -> RegistryResult<usize> {
        self.tasks = self.repo.load_all()?;
        info!(
            "event=registry_load module=registry status=ok count={}",
            self.tasks.len()
        );
        Ok(self.tasks.len())
    }

    /// Validates and persists `draft`, then appends the stored task.
    pub fn create(&mut self, draft: TaskDraft) -> RegistryResult<Task> {
        if let Err(err) = draft.validate() {
            warn!("event=task_create module=registry status=rejected reason={err}");
            return Err(err.into());
        }

        let id = self.repo.insert(&draft)?;
        let task = Task::from_draft(id, draft)?;
        self.tasks.push(task.clone());
        info!(
            "event=task_create module=registry status=ok task_id={} category={} priority={}",
            task.id, task.category, task.priority
        );
        Ok(task)
    }

    /// Marks a task completed and persists it. Completing twice is allowed.
    pub fn complete(&mut self, id: TaskId) -> RegistryResult<Task> {
        self.update_flags(id, "task_complete", Task::mark_completed)
    }

    /// Marks a task reminded and persists it.
    pub fn remind(&mut self, id: TaskId) -> RegistryResult<Task> {
        self.update_flags(id, "task_remind", Task::mark_reminded)
    }

    /// Deletes a task from the store and then from memory.
    pub fn delete(&mut self, id: TaskId) -> RegistryResult<Task> {
        let index = self.index_of(id)?;
        self.repo.delete(id)?;
        let removed = self.tasks.remove(index);
        info!("event=task_delete module=registry status=ok task_id={id}");
        Ok(removed)
    }

    /// Tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    fn index_of(&self, id: TaskId) -> RegistryResult<usize> {
        self.tasks
            .iter()
            .position(|task| task.id == id)
            .ok_or(RegistryError::NotFound(id))
    }

    fn update_flags(
        &mut self,
        id: TaskId,
        event: &str,
        apply: impl FnOnce(&mut Task),
    ) -> RegistryResult<Task> {
        let index = self.index_of(id)?;
        let task = &mut self.tasks[index];
        let previous = (task.completed, task.reminded);
        apply(task);

        if let Err(err) = self.repo.update(task) {
            (task.completed, task.reminded) = previous;
            warn!("event={event} module=registry status=error task_id={id} error={err}");
            return Err(err.into());
        }

        info!("event={event} module=registry status=ok task_id={id}");
        Ok(task.clone())
    }
}
