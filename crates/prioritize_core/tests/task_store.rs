use chrono::{NaiveDate, NaiveTime};
use prioritize_core::{
    Category, Priority, RepoError, SqliteTaskRepository, TaskDraft, TaskRepository,
    TaskValidationError,
};

fn draft(name: &str) -> TaskDraft {
    TaskDraft::scheduled(
        name,
        Some(Category::Tech),
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
        NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(14, 15, 0).unwrap(),
    )
}

#[test]
fn insert_and_load_roundtrip() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();

    let id = repo
        .insert(
            &draft("  review PR  ")
                .with_priority(Priority::Medium)
                .with_desc("check the migration"),
        )
        .unwrap();

    let tasks = repo.load_all().unwrap();
    assert_eq!(tasks.len(), 1);
    let task = &tasks[0];
    assert_eq!(task.id, id);
    assert_eq!(task.name, "review PR");
    assert_eq!(task.category, Category::Tech);
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.date, "2024-05-06");
    assert_eq!(task.start, "13:00");
    assert_eq!(task.end, "14:15");
    assert_eq!(task.desc, "check the migration");
    assert!(!task.completed);
    assert!(!task.reminded);
}

#[test]
fn insert_rejects_invalid_draft_without_writing() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();
    let mut missing_category = draft("orphan");
    missing_category.category = None;

    let err = repo.insert(&missing_category).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(TaskValidationError::MissingCategory)
    ));
    assert!(repo.load_all().unwrap().is_empty());
}

#[test]
fn update_writes_only_flags() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();
    let id = repo.insert(&draft("flags")).unwrap();

    let mut task = repo.load_all().unwrap().remove(0);
    task.name = "renamed in memory".to_string();
    task.completed = true;
    task.reminded = true;
    repo.update(&task).unwrap();

    let stored = repo.load_all().unwrap().remove(0);
    assert_eq!(stored.id, id);
    assert_eq!(stored.name, "flags");
    assert!(stored.completed);
    assert!(stored.reminded);
}

#[test]
fn update_and_delete_unknown_ids_are_noops() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();
    repo.insert(&draft("keep")).unwrap();
    let mut ghost = repo.load_all().unwrap().remove(0);
    ghost.id = 4242;
    ghost.completed = true;

    repo.update(&ghost).unwrap();
    repo.delete(4242).unwrap();

    let tasks = repo.load_all().unwrap();
    assert_eq!(tasks.len(), 1);
    assert!(!tasks[0].completed);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();
    let first = repo.insert(&draft("first")).unwrap();
    let second = repo.insert(&draft("second")).unwrap();

    repo.delete(second).unwrap();
    let third = repo.insert(&draft("third")).unwrap();

    assert!(second > first);
    assert!(third > second);
}

#[test]
fn load_keeps_unrecognized_priority_labels() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();
    let id = repo.insert(&draft("legacy")).unwrap();
    repo.connection()
        .execute("UPDATE tasks SET priority = 'Urgent' WHERE id = ?1;", [id])
        .unwrap();

    let task = repo.load_all().unwrap().remove(0);
    assert_eq!(task.priority, Priority::Unrecognized("Urgent".to_string()));
}

#[test]
fn load_skips_rows_with_invalid_category_or_flags_and_keeps_the_rest() {
    let repo = SqliteTaskRepository::open_in_memory().unwrap();
    let first = repo.insert(&draft("first")).unwrap();
    let bad_category = repo.insert(&draft("bad category")).unwrap();
    let bad_flag = repo.insert(&draft("bad flag")).unwrap();
    let last = repo.insert(&draft("last")).unwrap();

    repo.connection()
        .execute(
            "UPDATE tasks SET category = 'Ops' WHERE id = ?1;",
            [bad_category],
        )
        .unwrap();
    repo.connection()
        .execute("UPDATE tasks SET reminded = 7 WHERE id = ?1;", [bad_flag])
        .unwrap();

    let ids: Vec<_> = repo.load_all().unwrap().iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![first, last]);

    let stored: i64 = repo
        .connection()
        .query_row("SELECT COUNT(*) FROM tasks;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(stored, 4);
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.sqlite3");

    let id = {
        let repo = SqliteTaskRepository::open(&path).unwrap();
        repo.insert(&draft("durable")).unwrap()
    };

    let reopened = SqliteTaskRepository::open(&path).unwrap();
    let tasks = reopened.load_all().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, id);
}
