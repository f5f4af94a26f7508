#![forbid(unsafe_code)]

use crate::{
    INVALID_PARAMS, McpServer, METHOD_NOT_FOUND, SERVER_NOT_INITIALIZED, ai_error, is_success,
    json_rpc_error, json_rpc_response, tool_text_content,
};
use serde_json::{Value, json};
use todo_storage::SqliteStore;

impl McpServer {
    pub(crate) fn new(store: SqliteStore) -> Self {
        Self {
            initialized: false,
            store,
        }
    }

    pub(crate) fn handle(&mut self, request: crate::JsonRpcRequest) -> Option<Value> {
        let method = request.method.as_str();
        let expects_response = !request.is_notification();

        if method == "initialize" {
            // Echo the client's protocol version when it declares one.
            let protocol_version = request
                .params
                .as_ref()
                .and_then(|v| v.get("protocolVersion"))
                .and_then(|v| v.as_str())
                .unwrap_or(crate::MCP_VERSION);
            self.initialized = true;
            tracing::info!(protocol_version, "session initialized");

            return Some(json_rpc_response(
                request.id,
                json!({
                    "protocolVersion": protocol_version,
                    "serverInfo": { "name": crate::SERVER_NAME, "version": crate::SERVER_VERSION },
                    "capabilities": { "tools": {} }
                }),
            ));
        }

        // Some clients send the bare `initialized` name.
        if method == "notifications/initialized" || method == "initialized" {
            self.initialized = true;
            return None;
        }

        if !self.initialized {
            if !expects_response {
                return None;
            }
            return Some(json_rpc_error(
                request.id,
                SERVER_NOT_INITIALIZED,
                "Server not initialized",
            ));
        }

        match method {
            "ping" => Some(json_rpc_response(request.id, json!({}))),
            "tools/list" => Some(json_rpc_response(
                request.id,
                json!({ "tools": crate::tools::tool_definitions() }),
            )),
            "tools/call" => {
                let Some(params_obj) = request.params.as_ref().and_then(|v| v.as_object()) else {
                    return Some(json_rpc_error(
                        request.id,
                        INVALID_PARAMS,
                        "params must be an object",
                    ));
                };
                let Some(tool_name) = params_obj.get("name").and_then(|v| v.as_str()) else {
                    return Some(json_rpc_error(
                        request.id,
                        INVALID_PARAMS,
                        "params.name must be a string",
                    ));
                };
                // `"arguments": null` is treated like an empty object.
                let args = match params_obj.get("arguments") {
                    None | Some(Value::Null) => json!({}),
                    Some(v) => v.clone(),
                };

                let body = self.call_tool(tool_name, args);
                Some(json_rpc_response(
                    request.id,
                    json!({
                        "content": [tool_text_content(&body)],
                        "isError": !is_success(&body)
                    }),
                ))
            }
            _ if !expects_response => None,
            _ => Some(json_rpc_error(
                request.id,
                METHOD_NOT_FOUND,
                &format!("Method not found: {method}"),
            )),
        }
    }

    pub(crate) fn call_tool(&mut self, name: &str, args: Value) -> Value {
        let name = name.trim();
        tracing::debug!(tool = name, "tool call");
        crate::tools::dispatch_tool(self, name, args)
            .unwrap_or_else(|| ai_error("UNKNOWN_TOOL", &format!("Unknown tool: {name}")))
    }
}
