#![forbid(unsafe_code)]

use crate::*;
use serde_json::Value;
use todo_core::TodoPatch;
use todo_storage::UpdateTodoRequest;

impl McpServer {
    pub(crate) fn tool_update_todo(&mut self, args: Value) -> Value {
        let args_obj = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        if let Err(resp) =
            reject_unknown_keys(args_obj, &["id", "title", "description", "completed"])
        {
            return resp;
        }
        let id = match require_todo_id(args_obj, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let title = match optional_title(args_obj, "title") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let description = match optional_nullable_string(args_obj, "description") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let completed = match args_obj.get("completed") {
            Some(Value::Null) => {
                return ai_error("INVALID_INPUT", "completed must be a boolean");
            }
            _ => match optional_bool(args_obj, "completed") {
                Ok(v) => v,
                Err(resp) => return resp,
            },
        };

        let patch = TodoPatch {
            title,
            description,
            completed,
        };
        let fields_changed = !patch.is_empty();
        match self.store.update_todo(UpdateTodoRequest { id, patch }) {
            Ok(todo) => {
                tracing::debug!(id = %id, fields_changed, "todo updated");
                super::ok_json("update_todo", &todo)
            }
            Err(err) => store_error(err),
        }
    }
}
