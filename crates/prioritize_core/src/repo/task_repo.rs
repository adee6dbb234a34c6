//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/delete over the `tasks` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `update` only writes the mutable flag columns.
//! - `update` and `delete` on unknown ids are no-ops, not errors.
//! - A row with an unknown category or a non-boolean flag value is logged
//!   and skipped; the remaining rows still load.

use crate::db::migrations::{apply_migrations, current_user_version, latest_version, table_exists};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::logging::sanitize_message;
use crate::model::task::{Category, Priority, Task, TaskDraft, TaskId, TaskValidationError};
use log::{debug, warn};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    name,
    category,
    priority,
    \"date\",
    \"start\",
    \"end\",
    \"desc\",
    completed,
    reminded
FROM tasks";

const MAX_LOGGED_DETAIL_CHARS: usize = 200;

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for task storage operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Draft failed creation-time validation before reaching SQL.
    Validation(TaskValidationError),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "task store not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Validation(err) => Some(err),
            Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Durable task store.
pub trait TaskRepository {
    /// Ensures the backing table exists. Safe to call on every startup.
    fn initialize(&self) -> RepoResult<()>;
    /// Returns every readable persisted task ordered by id.
    ///
    /// Rows holding values the model cannot represent are skipped.
    fn load_all(&self) -> RepoResult<Vec<Task>>;
    /// Persists a new task and returns its assigned id.
    fn insert(&self, draft: &TaskDraft) -> RepoResult<TaskId>;
    /// Persists the `completed` and `reminded` flags of `task`.
    fn update(&self, task: &Task) -> RepoResult<()>;
    fn delete(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository owning its connection.
pub struct SqliteTaskRepository {
    conn: Connection,
}

impl SqliteTaskRepository {
    /// Wraps a connection without checking its schema.
    ///
    /// Callers must run [`TaskRepository::initialize`] before any other
    /// operation.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Wraps an already-migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration.
    /// - `MissingRequiredTable` when the `tasks` table is absent.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        if !table_exists(&conn, "tasks")? {
            return Err(RepoError::MissingRequiredTable("tasks"));
        }
        Ok(Self { conn })
    }

    /// Opens (creating when missing) the task database at `path`.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a throwaway in-memory task database.
    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Borrows the underlying connection, mainly for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn initialize(&self) -> RepoResult<()> {
        apply_migrations(&self.conn)?;
        Ok(())
    }

    fn load_all(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY id ASC"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        let mut skipped = 0usize;

        while let Some(row) = rows.next()? {
            match parse_task_row(row) {
                Ok(task) => tasks.push(task),
                Err(RepoError::InvalidData(detail)) => {
                    skipped += 1;
                    warn!(
                        "event=task_load module=repo status=malformed detail={}",
                        sanitize_message(&detail, MAX_LOGGED_DETAIL_CHARS)
                    );
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            "event=task_load module=repo status=ok count={} skipped={skipped}",
            tasks.len()
        );
        Ok(tasks)
    }

    fn insert(&self, draft: &TaskDraft) -> RepoResult<TaskId> {
        draft.validate()?;
        let category = draft
            .category
            .ok_or(RepoError::Validation(TaskValidationError::MissingCategory))?;

        self.conn.execute(
            "INSERT INTO tasks (
                name,
                category,
                priority,
                \"date\",
                \"start\",
                \"end\",
                \"desc\",
                completed,
                reminded
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, 0);",
            params![
                draft.name.trim(),
                category.label(),
                draft.priority.label(),
                draft.date.as_str(),
                draft.start.as_str(),
                draft.end.as_str(),
                draft.desc.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update(&self, task: &Task) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET completed = ?1, reminded = ?2 WHERE id = ?3;",
            params![
                bool_to_int(task.completed),
                bool_to_int(task.reminded),
                task.id
            ],
        )?;

        if changed == 0 {
            debug!(
                "event=task_update module=repo status=noop task_id={}",
                task.id
            );
        }
        Ok(())
    }

    fn delete(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1;", [id])?;

        if changed == 0 {
            debug!("event=task_delete module=repo status=noop task_id={id}");
        }
        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id: TaskId = row.get("id")?;

    let category_text: String = row.get("category")?;
    let category = Category::from_label(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in tasks.category (id={id})"
        ))
    })?;

    let priority_text: String = row.get("priority")?;

    Ok(Task {
        id,
        name: row.get("name")?,
        category,
        priority: Priority::from_label(&priority_text),
        date: row.get("date")?,
        start: row.get("start")?,
        end: row.get("end")?,
        desc: row.get("desc")?,
        completed: parse_flag(row, "completed", id)?,
        reminded: parse_flag(row, "reminded", id)?,
    })
}

fn parse_flag(row: &Row<'_>, column: &str, id: TaskId) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid {column} value `{other}` in tasks.{column} (id={id})"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
