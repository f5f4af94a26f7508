#![forbid(unsafe_code)]

use crate::McpServer;
use serde_json::Value;

pub(crate) fn dispatch_tool(server: &mut McpServer, name: &str, args: Value) -> Option<Value> {
    let resp = match name {
        "list_todos" => server.tool_list_todos(args),
        "get_todo" => server.tool_get_todo(args),
        "create_todo" => server.tool_create_todo(args),
        "update_todo" => server.tool_update_todo(args),
        "delete_todo" => server.tool_delete_todo(args),
        _ => return None,
    };
    Some(resp)
}
