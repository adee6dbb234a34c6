//! Priority ordering for task lists.
//!
//! # Invariants
//! - Sorting never mutates the registry; callers receive a new vector.
//! - The sort is stable: equal ranks keep their relative order.
//! - A selection that is not one of the four known priority labels leaves the
//!   order untouched.

use crate::model::task::{Priority, Task};

/// Sort criteria accepted by [`sort_by_priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
}

impl SortKey {
    /// Maps a picker selection to a sort key.
    ///
    /// Any of the priority labels selects priority ordering; everything else
    /// (including the "Sort By" placeholder) yields `None`.
    pub fn parse(selected: &str) -> Option<Self> {
        Priority::KNOWN
            .iter()
            .any(|priority| priority.label() == selected)
            .then_some(Self::Priority)
    }
}

/// Returns `tasks` ordered by priority rank when `selected` is a known
/// priority label, otherwise in their original order.
pub fn sort_by_priority(tasks: &[Task], selected: &str) -> Vec<Task> {
    let mut ordered = tasks.to_vec();
    match SortKey::parse(selected) {
        Some(SortKey::Priority) => ordered.sort_by_key(|task| task.priority.rank()),
        None => {}
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::{sort_by_priority, SortKey};
    use crate::model::task::{Category, Priority, Task};

    fn task(id: i64, priority: Priority) -> Task {
        Task {
            id,
            name: format!("task {id}"),
            category: Category::Tech,
            priority,
            date: "2024-01-01".to_string(),
            start: "08:00".to_string(),
            end: "09:00".to_string(),
            desc: String::new(),
            completed: false,
            reminded: false,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<i64> {
        tasks.iter().map(|task| task.id).collect()
    }

    #[test]
    fn sort_is_stable_by_rank() {
        let tasks = vec![
            task(1, Priority::Medium),
            task(2, Priority::High),
            task(3, Priority::Medium),
            task(4, Priority::Low),
        ];

        assert_eq!(ids(&sort_by_priority(&tasks, "High")), vec![2, 1, 3, 4]);
        // Every known label selects the same ordering.
        assert_eq!(ids(&sort_by_priority(&tasks, "No Priority")), vec![2, 1, 3, 4]);
        assert_eq!(ids(&tasks), vec![1, 2, 3, 4]);
    }

    #[test]
    fn unrecognized_priorities_sort_last() {
        let tasks = vec![
            task(1, Priority::Unrecognized("Urgent".to_string())),
            task(2, Priority::NoPriority),
            task(3, Priority::High),
        ];

        assert_eq!(ids(&sort_by_priority(&tasks, "Low")), vec![3, 2, 1]);
    }

    #[test]
    fn unknown_selection_keeps_order() {
        let tasks = vec![
            task(1, Priority::Low),
            task(2, Priority::High),
            task(3, Priority::Medium),
        ];

        assert_eq!(ids(&sort_by_priority(&tasks, "Sort By")), vec![1, 2, 3]);
        assert_eq!(ids(&sort_by_priority(&tasks, "high")), vec![1, 2, 3]);
        assert_eq!(SortKey::parse(""), None);
    }
}
