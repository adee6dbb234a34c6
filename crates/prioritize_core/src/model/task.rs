//! Task record, draft and classification enums.
//!
//! # Responsibility
//! - Carry the persisted task fields as typed values.
//! - Validate drafts before they reach the store.
//! - Combine `date + end` into the instant the reminder scheduler compares
//!   against.
//!
//! # Invariants
//! - `name` is non-empty after trimming and `category` is present at creation.
//! - `date`, `start` and `end` keep the persisted text verbatim so malformed
//!   rows still load; parsing happens at use sites.
//! - `end` is not validated against `start`.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned task identifier (SQLite rowid).
pub type TaskId = i64;

/// Persisted date format (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Persisted time-of-day format (`HH:MM`, 24-hour).
pub const TIME_FORMAT: &str = "%H:%M";
const DUE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Fixed task category set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tech,
    Development,
    Completion,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Tech, Category::Development, Category::Completion];

    /// Returns the display and storage label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Tech => "Tech",
            Self::Development => "Development",
            Self::Completion => "Completion",
        }
    }

    /// Maps an exact storage label to a category.
    pub fn from_label(value: &str) -> Option<Self> {
        match value {
            "Tech" => Some(Self::Tech),
            "Development" => Some(Self::Development),
            "Completion" => Some(Self::Completion),
            _ => None,
        }
    }

    /// Parses a category label, ignoring surrounding whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Task priority.
///
/// Labels outside the four known values survive a store round trip as
/// `Unrecognized` and sort after every known priority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    #[default]
    NoPriority,
    Low,
    Medium,
    High,
    Unrecognized(String),
}

impl Priority {
    /// Known priorities in the order the original picker lists them.
    pub const KNOWN: [Priority; 4] = [
        Priority::NoPriority,
        Priority::Low,
        Priority::Medium,
        Priority::High,
    ];

    pub fn label(&self) -> &str {
        match self {
            Self::NoPriority => "No Priority",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Unrecognized(label) => label.as_str(),
        }
    }

    /// Maps an exact label to a priority; anything else is `Unrecognized`.
    pub fn from_label(value: &str) -> Self {
        match value {
            "No Priority" => Self::NoPriority,
            "Low" => Self::Low,
            "Medium" => Self::Medium,
            "High" => Self::High,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Sort rank: `High(1) < Medium(2) < Low(3) < No Priority(4) < other(5)`.
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 1,
            Self::Medium => 2,
            Self::Low => 3,
            Self::NoPriority => 4,
            Self::Unrecognized(_) => 5,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Priority {
    fn from(value: String) -> Self {
        Self::from_label(value.as_str())
    }
}

impl From<Priority> for String {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Unrecognized(label) => label,
            known => known.label().to_string(),
        }
    }
}

/// Creation-time validation errors for task drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// No category was selected.
    MissingCategory,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "task name must not be empty"),
            Self::MissingCategory => write!(f, "task category is required"),
        }
    }
}

impl Error for TaskValidationError {}

/// A stored task whose `date` + `end` fields do not form a valid instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueTimeError {
    pub date: String,
    pub end: String,
    source: chrono::ParseError,
}

impl Display for DueTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "cannot combine date `{}` and end time `{}`: {}",
            self.date, self.end, self.source
        )
    }
}

impl Error for DueTimeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.source)
    }
}

/// User input for a task that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    /// `None` when the user has not picked a category.
    pub category: Option<Category>,
    pub priority: Priority,
    pub date: String,
    pub start: String,
    pub end: String,
    pub desc: String,
}

impl TaskDraft {
    /// Creates a draft scheduled on `date` between `start` and `end`.
    ///
    /// Priority defaults to `NoPriority` and the description to empty.
    pub fn scheduled(
        name: impl Into<String>,
        category: Option<Category>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            priority: Priority::default(),
            date: date.format(DATE_FORMAT).to_string(),
            start: start.format(TIME_FORMAT).to_string(),
            end: end.format(TIME_FORMAT).to_string(),
            desc: String::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Checks creation-time invariants.
    ///
    /// # Errors
    /// - `EmptyName` when `name` trims to nothing.
    /// - `MissingCategory` when no category is set.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.name.trim().is_empty() {
            return Err(TaskValidationError::EmptyName);
        }
        if self.category.is_none() {
            return Err(TaskValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub category: Category,
    pub priority: Priority,
    /// `YYYY-MM-DD` as persisted.
    pub date: String,
    /// `HH:MM` as persisted.
    pub start: String,
    /// `HH:MM` as persisted.
    pub end: String,
    pub desc: String,
    pub completed: bool,
    pub reminded: bool,
}

impl Task {
    /// Builds a fresh task from a validated draft and a store-assigned id.
    ///
    /// The name is trimmed; both flags start as `false`.
    pub fn from_draft(id: TaskId, draft: TaskDraft) -> Result<Self, TaskValidationError> {
        draft.validate()?;
        let category = draft.category.ok_or(TaskValidationError::MissingCategory)?;
        Ok(Self {
            id,
            name: draft.name.trim().to_string(),
            category,
            priority: draft.priority,
            date: draft.date,
            start: draft.start,
            end: draft.end,
            desc: draft.desc,
            completed: false,
            reminded: false,
        })
    }

    /// Combines `date` and `end` into the naive local instant the task is due.
    pub fn due_at(&self) -> Result<NaiveDateTime, DueTimeError> {
        let combined = format!("{} {}", self.date.trim(), self.end.trim());
        NaiveDateTime::parse_from_str(&combined, DUE_FORMAT).map_err(|source| DueTimeError {
            date: self.date.clone(),
            end: self.end.clone(),
            source,
        })
    }

    /// Returns whether the reminder for this task should fire at `now`.
    ///
    /// Completed or already-reminded tasks never fire, and their date fields
    /// are not inspected. Otherwise the task fires once `now` is strictly
    /// after `due_at()`.
    pub fn reminder_due(&self, now: NaiveDateTime) -> Result<bool, DueTimeError> {
        if self.completed || self.reminded {
            return Ok(false);
        }
        Ok(now > self.due_at()?)
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    pub fn mark_reminded(&mut self) {
        self.reminded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, Priority, Task, TaskDraft, TaskValidationError};
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    fn draft() -> TaskDraft {
        TaskDraft::scheduled(
            "  write report  ",
            Some(Category::Tech),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        )
    }

    fn at(value: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn scheduled_draft_formats_persisted_text() {
        let draft = draft();
        assert_eq!(draft.date, "2024-01-01");
        assert_eq!(draft.start, "08:00");
        assert_eq!(draft.end, "09:00");
        assert_eq!(draft.priority, Priority::NoPriority);
    }

    #[test]
    fn from_draft_trims_name_and_clears_flags() {
        let task = Task::from_draft(7, draft()).unwrap();
        assert_eq!(task.id, 7);
        assert_eq!(task.name, "write report");
        assert!(!task.completed);
        assert!(!task.reminded);
    }

    #[test]
    fn validate_rejects_blank_name_and_missing_category() {
        let mut blank = draft();
        blank.name = "   ".to_string();
        assert_eq!(blank.validate(), Err(TaskValidationError::EmptyName));

        let mut uncategorized = draft();
        uncategorized.category = None;
        assert_eq!(
            uncategorized.validate(),
            Err(TaskValidationError::MissingCategory)
        );
    }

    #[test]
    fn reminder_due_is_strictly_after_end() {
        let task = Task::from_draft(1, draft()).unwrap();
        assert!(!task.reminder_due(at("2024-01-01 09:00")).unwrap());
        assert!(task.reminder_due(at("2024-01-01 09:01")).unwrap());
    }

    #[test]
    fn reminder_due_skips_completed_even_with_bad_dates() {
        let mut task = Task::from_draft(1, draft()).unwrap();
        task.date = "not-a-date".to_string();
        task.mark_completed();
        assert!(!task.reminder_due(at("2030-01-01 00:00")).unwrap());
    }

    #[test]
    fn due_at_reports_malformed_fields() {
        let mut task = Task::from_draft(1, draft()).unwrap();
        task.end = "25:99".to_string();
        let err = task.due_at().unwrap_err();
        assert_eq!(err.end, "25:99");
        assert!(err.to_string().contains("25:99"));
    }

    #[test]
    fn priority_labels_round_trip_and_rank() {
        for priority in Priority::KNOWN {
            assert_eq!(Priority::from_label(priority.label()), priority);
        }
        let other = Priority::from_label("Urgent");
        assert_eq!(other, Priority::Unrecognized("Urgent".to_string()));
        assert!(!other.is_known());
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::NoPriority.rank() < other.rank());
    }

    #[test]
    fn category_parse_is_case_insensitive() {
        assert_eq!(Category::parse(" development "), Some(Category::Development));
        assert_eq!(Category::parse(""), None);
        assert_eq!(Category::parse("Ops"), None);
    }

    #[test]
    fn category_from_label_requires_exact_storage_label() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label("tech"), None);
        assert_eq!(Category::from_label(" Tech"), None);
    }
}
