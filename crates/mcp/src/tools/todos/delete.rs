#![forbid(unsafe_code)]

use crate::*;
use serde_json::{Value, json};
use todo_storage::DeleteTodoRequest;

impl McpServer {
    pub(crate) fn tool_delete_todo(&mut self, args: Value) -> Value {
        let args_obj = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        if let Err(resp) = reject_unknown_keys(args_obj, &["id"]) {
            return resp;
        }
        let id = match require_todo_id(args_obj, "id") {
            Ok(v) => v,
            Err(resp) => return resp,
        };

        match self.store.delete_todo(DeleteTodoRequest { id }) {
            Ok(deleted) => {
                tracing::debug!(id = %id, deleted, "todo delete");
                ai_ok("delete_todo", json!({ "id": id, "deleted": deleted }))
            }
            Err(err) => store_error(err),
        }
    }
}
