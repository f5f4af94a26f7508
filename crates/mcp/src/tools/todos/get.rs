#![forbid(unsafe_code)]

use crate::*;
use serde_json::Value;
use todo_storage::StoreError;

impl McpServer {
    pub(crate) fn tool_get_todo(&mut self, args: Value) -> Value {
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

        match self.store.get_todo(id) {
            Ok(Some(todo)) => super::ok_json("get_todo", &todo),
            Ok(None) => store_error(StoreError::TodoNotFound { id }),
            Err(err) => store_error(err),
        }
    }
}
