use prioritize_core::{Category, Priority, Task};

fn sample() -> Task {
    Task {
        id: 12,
        name: "plan sprint".to_string(),
        category: Category::Completion,
        priority: Priority::NoPriority,
        date: "2024-02-29".to_string(),
        start: "09:00".to_string(),
        end: "10:30".to_string(),
        desc: String::new(),
        completed: false,
        reminded: true,
    }
}

#[test]
fn task_serialization_uses_display_labels() {
    let task = sample();

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["id"], 12);
    assert_eq!(json["category"], "Completion");
    assert_eq!(json["priority"], "No Priority");
    assert_eq!(json["date"], "2024-02-29");
    assert_eq!(json["end"], "10:30");
    assert_eq!(json["reminded"], true);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn unknown_priority_label_deserializes_as_unrecognized() {
    let mut json = serde_json::to_value(sample()).unwrap();
    json["priority"] = serde_json::json!("Someday");

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(
        decoded.priority,
        Priority::Unrecognized("Someday".to_string())
    );
    assert_eq!(decoded.priority.rank(), 5);
}

#[test]
fn due_at_combines_date_and_end() {
    let due = sample().due_at().unwrap();
    assert_eq!(due.to_string(), "2024-02-29 10:30:00");
}
