#![forbid(unsafe_code)]

use crate::*;
use serde_json::Value;
use todo_core::NewTodo;

impl McpServer {
    pub(crate) fn tool_create_todo(&mut self, args: Value) -> Value {
        let args_obj = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        if let Err(resp) = reject_unknown_keys(args_obj, &["title", "description"]) {
            return resp;
        }
        let title = match require_title(args_obj, "title") {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        let description = match optional_string(args_obj, "description") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store.create_todo(NewTodo { title, description }) {
            Ok(todo) => {
                tracing::debug!(id = %todo.id, "todo created");
                super::ok_json("create_todo", &todo)
            }
            Err(err) => store_error(err),
        }
    }
}
