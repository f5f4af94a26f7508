#![forbid(unsafe_code)]

use crate::mcp_client::SpawnOptions;
use crate::{ClientError, McpClient};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::path::Path;
use todo_core::ids::TodoId;
use todo_core::{NewTodo, Todo, TodoPatch};

/// The CRUD surface the board talks to.
pub trait TodoService {
    fn list(&mut self) -> Result<Vec<Todo>, ClientError>;
    fn get(&mut self, id: TodoId) -> Result<Todo, ClientError>;
    fn create(&mut self, draft: &NewTodo) -> Result<Todo, ClientError>;
    fn update(&mut self, id: TodoId, patch: &TodoPatch) -> Result<Todo, ClientError>;
    /// `Ok(false)` when the id was already gone.
    fn delete(&mut self, id: TodoId) -> Result<bool, ClientError>;
}

/// [`TodoService`] backed by the MCP tools of a `todo_mcp` process.
pub struct RemoteTodos {
    client: McpClient,
}

#[derive(Deserialize)]
struct TodoList {
    todos: Vec<Todo>,
}

#[derive(Deserialize)]
struct DeleteAck {
    deleted: bool,
}

impl RemoteTodos {
    pub fn new(client: McpClient) -> Self {
        Self { client }
    }

    /// Spawns the server and completes the initialize handshake.
    pub fn connect(server_bin: &Path, options: SpawnOptions<'_>) -> Result<Self, ClientError> {
        let mut client = McpClient::spawn(server_bin, options)?;
        client.initialize()?;
        Ok(Self::new(client))
    }
}

impl TodoService for RemoteTodos {
    fn list(&mut self) -> Result<Vec<Todo>, ClientError> {
        decode_list(self.client.call_tool("list_todos", json!({}))?)
    }

    fn get(&mut self, id: TodoId) -> Result<Todo, ClientError> {
        decode_todo(self.client.call_tool("get_todo", json!({ "id": id }))?)
    }

    fn create(&mut self, draft: &NewTodo) -> Result<Todo, ClientError> {
        decode_todo(self.client.call_tool("create_todo", create_arguments(draft))?)
    }

    fn update(&mut self, id: TodoId, patch: &TodoPatch) -> Result<Todo, ClientError> {
        decode_todo(
            self.client
                .call_tool("update_todo", update_arguments(id, patch))?,
        )
    }

    fn delete(&mut self, id: TodoId) -> Result<bool, ClientError> {
        decode_delete(self.client.call_tool("delete_todo", json!({ "id": id }))?)
    }
}

pub(crate) fn decode_todo(result: Value) -> Result<Todo, ClientError> {
    Ok(serde_json::from_value(result)?)
}

/// `list_todos` answers `{ todos, count }`; only the list is kept.
pub(crate) fn decode_list(result: Value) -> Result<Vec<Todo>, ClientError> {
    Ok(serde_json::from_value::<TodoList>(result)?.todos)
}

pub(crate) fn decode_delete(result: Value) -> Result<bool, ClientError> {
    Ok(serde_json::from_value::<DeleteAck>(result)?.deleted)
}

pub(crate) fn create_arguments(draft: &NewTodo) -> Value {
    let mut args = Map::new();
    args.insert("title".to_string(), json!(draft.title.as_str()));
    if let Some(description) = &draft.description {
        args.insert("description".to_string(), json!(description));
    }
    Value::Object(args)
}

/// Only fields present in the patch are sent; a cleared description is sent as `null`.
pub(crate) fn update_arguments(id: TodoId, patch: &TodoPatch) -> Value {
    let mut args = Map::new();
    args.insert("id".to_string(), json!(id.get()));
    if let Some(title) = &patch.title {
        args.insert("title".to_string(), json!(title.as_str()));
    }
    if let Some(description) = &patch.description {
        args.insert("description".to_string(), json!(description));
    }
    if let Some(completed) = patch.completed {
        args.insert("completed".to_string(), json!(completed));
    }
    Value::Object(args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp_client::unwrap_envelope;
    use todo_core::Title;
    use todo_core::timestamps::to_unix_ms;

    // Text payloads as todo_mcp writes them into `content[0].text`.
    const CREATED: &str = r#"{"success":true,"intent":"create_todo","result":{"id":3,"title":"X","description":"Y","completed":false,"created_at":"2026-01-01T00:00:00.123Z","updated_at":"2026-01-01T00:00:00.123Z"},"error":null}"#;
    const LISTED: &str = r#"{"success":true,"intent":"list_todos","result":{"todos":[{"id":4,"title":"B","description":null,"completed":true,"created_at":"2026-01-01T00:00:01Z","updated_at":"2026-01-01T00:00:02.5Z"},{"id":3,"title":"A","description":"Y","completed":false,"created_at":"2026-01-01T00:00:00.123Z","updated_at":"2026-01-01T00:00:00.123Z"}],"count":2},"error":null}"#;
    const DELETED: &str = r#"{"success":true,"intent":"delete_todo","result":{"id":3,"deleted":false},"error":null}"#;
    const NOT_FOUND: &str = r#"{"success":false,"intent":"error","result":null,"error":{"code":"NOT_FOUND","message":"todo with id 999999 not found"}}"#;

    fn result_of(text: &str) -> Result<Value, ClientError> {
        unwrap_envelope(serde_json::from_str(text).unwrap())
    }

    fn id(raw: i64) -> TodoId {
        TodoId::try_new(raw).unwrap()
    }

    #[test]
    fn create_omits_missing_description() {
        let draft = NewTodo::new(Title::try_new("Buy milk").unwrap());
        assert_eq!(create_arguments(&draft), json!({ "title": "Buy milk" }));

        let draft = draft.with_description("2 liters");
        assert_eq!(
            create_arguments(&draft),
            json!({ "title": "Buy milk", "description": "2 liters" })
        );
    }

    #[test]
    fn update_sends_only_present_fields() {
        let patch = TodoPatch::default().completed(true);
        assert_eq!(
            update_arguments(id(4), &patch),
            json!({ "id": 4, "completed": true })
        );
    }

    #[test]
    fn update_distinguishes_clear_from_keep() {
        let cleared = TodoPatch::default().description(None);
        let args = update_arguments(id(4), &cleared);
        assert_eq!(args, json!({ "id": 4, "description": null }));
        assert!(args.as_object().unwrap().contains_key("description"));

        let kept = TodoPatch::default().title(Title::try_new("New").unwrap());
        let args = update_arguments(id(4), &kept);
        assert!(!args.as_object().unwrap().contains_key("description"));
    }

    #[test]
    fn decodes_a_created_todo() {
        let todo = decode_todo(result_of(CREATED).unwrap()).unwrap();
        assert_eq!(todo.id, id(3));
        assert_eq!(todo.title.as_str(), "X");
        assert_eq!(todo.description.as_deref(), Some("Y"));
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_eq!(to_unix_ms(todo.created_at), 1_767_225_600_123);
    }

    #[test]
    fn decodes_the_list_in_server_order() {
        let todos = decode_list(result_of(LISTED).unwrap()).unwrap();
        let ids = todos.iter().map(|todo| todo.id.get()).collect::<Vec<_>>();
        assert_eq!(ids, [4, 3]);
        assert_eq!(todos[0].description, None);
        assert!(todos[0].completed);
        assert_eq!(to_unix_ms(todos[0].updated_at), 1_767_225_602_500);
    }

    #[test]
    fn decodes_the_delete_ack() {
        assert!(!decode_delete(result_of(DELETED).unwrap()).unwrap());
        assert!(decode_delete(json!({ "id": 3, "deleted": true })).unwrap());
    }

    #[test]
    fn tool_errors_surface_before_decoding() {
        let err = result_of(NOT_FOUND).unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("999999"));
    }

    #[test]
    fn shape_drift_is_a_decode_error() {
        let bare_array = json!([{ "id": 1 }]);
        assert!(matches!(decode_list(bare_array), Err(ClientError::Decode(_))));

        let bad_title = json!({
            "id": 1, "title": "", "description": null, "completed": false,
            "created_at": "2026-01-01T00:00:00Z", "updated_at": "2026-01-01T00:00:00Z"
        });
        assert!(matches!(decode_todo(bad_title), Err(ClientError::Decode(_))));
    }
}
