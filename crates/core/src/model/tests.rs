use super::*;
use crate::ids::{TodoId, TodoIdError};
use crate::timestamps::from_unix_ms;

fn sample(id: i64) -> Todo {
    Todo {
        id: TodoId::try_new(id).unwrap(),
        title: Title::try_new("Write report").unwrap(),
        description: Some("quarterly numbers".to_string()),
        completed: false,
        created_at: from_unix_ms(1_000),
        updated_at: from_unix_ms(1_000),
    }
}

#[test]
fn title_validation() {
    assert_eq!(Title::try_new("").unwrap_err(), TitleError::Empty);
    assert_eq!(Title::try_new(" padded ").unwrap().as_str(), " padded ");
    assert_eq!(Title::try_new("   \t").unwrap().as_str(), "   \t");

    let long = "x".repeat(10_000);
    assert_eq!(Title::try_new(long.clone()).unwrap().as_str(), long);
}

#[test]
fn todo_id_must_be_positive() {
    assert_eq!(TodoId::try_new(0).unwrap_err(), TodoIdError::NotPositive(0));
    assert_eq!(TodoId::try_new(-3).unwrap_err(), TodoIdError::NotPositive(-3));
    assert_eq!(TodoId::try_new(7).unwrap().get(), 7);
}

#[test]
fn patch_keeps_omitted_fields() {
    let mut todo = sample(1);
    TodoPatch::default().completed(true).apply_to(&mut todo);

    assert!(todo.completed);
    assert_eq!(todo.title.as_str(), "Write report");
    assert_eq!(todo.description.as_deref(), Some("quarterly numbers"));
}

#[test]
fn patch_distinguishes_null_from_omitted_description() {
    let mut cleared = sample(1);
    TodoPatch::default().description(None).apply_to(&mut cleared);
    assert_eq!(cleared.description, None);

    let mut kept = sample(1);
    TodoPatch::default()
        .title(Title::try_new("Renamed").unwrap())
        .apply_to(&mut kept);
    assert_eq!(kept.description.as_deref(), Some("quarterly numbers"));
    assert_eq!(kept.title.as_str(), "Renamed");
}

#[test]
fn empty_patch_is_detected() {
    assert!(TodoPatch::default().is_empty());
    assert!(!TodoPatch::default().description(None).is_empty());
}

#[test]
fn todo_wire_shape() {
    let todo = sample(4);
    let value = serde_json::to_value(&todo).unwrap();
    assert_eq!(value["id"], 4);
    assert_eq!(value["title"], "Write report");
    assert_eq!(value["completed"], false);
    assert_eq!(value["created_at"], "1970-01-01T00:00:01Z");

    let back: Todo = serde_json::from_value(value).unwrap();
    assert_eq!(back, todo);
}

#[test]
fn todo_rejects_empty_title_on_the_wire() {
    let raw = serde_json::json!({
        "id": 1,
        "title": "",
        "description": null,
        "completed": false,
        "created_at": "1970-01-01T00:00:01Z",
        "updated_at": "1970-01-01T00:00:01Z"
    });
    assert!(serde_json::from_value::<Todo>(raw).is_err());
}
