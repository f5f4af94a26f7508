#![forbid(unsafe_code)]

use serde_json::{Value, json};

fn id_property() -> Value {
    json!({ "type": "integer", "minimum": 1, "description": "Todo id assigned at creation." })
}

pub(crate) fn tool_definitions() -> Vec<Value> {
    vec![
        json!({
            "name": "list_todos",
            "description": "List every todo, most recently created first.",
            "inputSchema": {
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }
        }),
        json!({
            "name": "get_todo",
            "description": "Fetch one todo by id.",
            "inputSchema": {
                "type": "object",
                "properties": { "id": id_property() },
                "required": ["id"],
                "additionalProperties": false
            }
        }),
        json!({
            "name": "create_todo",
            "description": "Create a todo. It starts out not completed.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "title": { "type": "string", "minLength": 1 },
                    "description": { "type": ["string", "null"] }
                },
                "required": ["title"],
                "additionalProperties": false
            }
        }),
        json!({
            "name": "update_todo",
            "description": "Change the supplied fields of a todo. Pass description=null to clear it.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "id": id_property(),
                    "title": { "type": "string", "minLength": 1 },
                    "description": { "type": ["string", "null"] },
                    "completed": { "type": "boolean" }
                },
                "required": ["id"],
                "additionalProperties": false
            }
        }),
        json!({
            "name": "delete_todo",
            "description": "Permanently delete a todo. Unknown ids succeed with deleted=false.",
            "inputSchema": {
                "type": "object",
                "properties": { "id": id_property() },
                "required": ["id"],
                "additionalProperties": false
            }
        }),
    ]
}
