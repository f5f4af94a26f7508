#![forbid(unsafe_code)]

use crate::*;
use serde::Serialize;
use serde_json::Value;
use todo_core::Todo;

#[derive(Serialize)]
struct TodoList {
    todos: Vec<Todo>,
    count: usize,
}

impl McpServer {
    pub(crate) fn tool_list_todos(&mut self, args: Value) -> Value {
        let args_obj = match require_object(&args) {
            Ok(v) => v,
            Err(resp) => return resp,
        };
        if let Err(resp) = reject_unknown_keys(args_obj, &[]) {
            return resp;
        }

        let todos = match self.store.list_todos() {
            Ok(v) => v,
            Err(err) => return store_error(err),
        };
        let count = todos.len();
        super::ok_json("list_todos", &TodoList { todos, count })
    }
}
