#![forbid(unsafe_code)]

use crate::ClientError;
use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

/// Options forwarded to the spawned server.
#[derive(Clone, Debug, Default)]
pub struct SpawnOptions<'a> {
    pub storage_dir: Option<&'a Path>,
    pub log: Option<&'a str>,
}

/// JSON-RPC client for a `todo_mcp` child process using newline framing.
pub struct McpClient {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    next_id: i64,
}

impl McpClient {
    pub fn spawn(server_bin: &Path, options: SpawnOptions<'_>) -> Result<Self, ClientError> {
        let mut command = Command::new(server_bin);
        if let Some(dir) = options.storage_dir {
            command.arg("--storage-dir").arg(dir);
        }
        if let Some(log) = options.log {
            command.arg("--log").arg(log);
        }

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(|source| ClientError::Spawn {
                bin: server_bin.to_path_buf(),
                source,
            })?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| ClientError::Protocol("server stdin unavailable".to_string()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| ClientError::Protocol("server stdout unavailable".to_string()))?;
        tracing::debug!(bin = %server_bin.display(), pid = child.id(), "server spawned");

        Ok(Self {
            child,
            stdin,
            stdout: BufReader::new(stdout),
            next_id: 1,
        })
    }

    fn send(&mut self, req: &Value) -> Result<(), ClientError> {
        writeln!(self.stdin, "{req}")?;
        self.stdin.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<Value, ClientError> {
        let mut line = String::new();
        if self.stdout.read_line(&mut line)? == 0 {
            return Err(ClientError::Protocol(
                "server closed the connection".to_string(),
            ));
        }
        if line.trim().is_empty() {
            return Err(ClientError::Protocol("empty response line".to_string()));
        }
        Ok(serde_json::from_str(&line)?)
    }

    fn request(&mut self, method: &str, params: Value) -> Result<Value, ClientError> {
        let id = self.next_id;
        self.next_id += 1;
        self.send(&json!({ "jsonrpc": "2.0", "id": id, "method": method, "params": params }))?;
        let resp = self.recv()?;

        if resp.get("id").and_then(Value::as_i64) != Some(id) {
            return Err(ClientError::Protocol(format!(
                "{method}: response id does not match request {id}"
            )));
        }
        if let Some(error) = resp.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("json-rpc error");
            return Err(ClientError::Protocol(format!("{method}: {message}")));
        }
        resp.get("result")
            .cloned()
            .ok_or_else(|| ClientError::Protocol(format!("{method}: response has no result")))
    }

    pub fn initialize(&mut self) -> Result<(), ClientError> {
        let result = self.request(
            "initialize",
            json!({
                "protocolVersion": crate::MCP_PROTOCOL_VERSION,
                "capabilities": {},
                "clientInfo": { "name": "todo", "version": env!("CARGO_PKG_VERSION") }
            }),
        )?;
        tracing::debug!(server = %result["serverInfo"], "server initialized");
        self.send(&json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        }))
    }

    /// Calls a tool and unwraps the response envelope to its `result`.
    pub fn call_tool(&mut self, name: &str, arguments: Value) -> Result<Value, ClientError> {
        let result = self.request("tools/call", json!({ "name": name, "arguments": arguments }))?;
        let text = result
            .get("content")
            .and_then(|v| v.get(0))
            .and_then(|v| v.get("text"))
            .and_then(Value::as_str)
            .ok_or_else(|| {
                ClientError::Protocol(format!("{name}: missing result.content[0].text"))
            })?;
        unwrap_envelope(serde_json::from_str(text)?)
    }
}

impl Drop for McpClient {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub(crate) fn unwrap_envelope(envelope: Value) -> Result<Value, ClientError> {
    match envelope.get("success").and_then(Value::as_bool) {
        Some(true) => Ok(envelope.get("result").cloned().unwrap_or(Value::Null)),
        Some(false) => {
            let error = envelope.get("error");
            let field = |key: &str, fallback: &str| {
                error
                    .and_then(|e| e.get(key))
                    .and_then(Value::as_str)
                    .unwrap_or(fallback)
                    .to_string()
            };
            Err(ClientError::Tool {
                code: field("code", "UNKNOWN"),
                message: field("message", "tool error"),
            })
        }
        None => Err(ClientError::Protocol(
            "tool response is not an envelope".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_yields_result() {
        let value = unwrap_envelope(json!({
            "success": true, "intent": "get_todo", "result": { "id": 1 }, "error": null
        }))
        .unwrap();
        assert_eq!(value, json!({ "id": 1 }));
    }

    #[test]
    fn envelope_failure_yields_tool_error() {
        let err = unwrap_envelope(json!({
            "success": false,
            "intent": "error",
            "result": null,
            "error": { "code": "NOT_FOUND", "message": "todo with id 9 not found" }
        }))
        .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "todo with id 9 not found (NOT_FOUND)");
    }

    #[test]
    fn non_envelope_is_a_protocol_error() {
        let err = unwrap_envelope(json!({ "id": 1 })).unwrap_err();
        assert!(matches!(err, ClientError::Protocol(_)));
    }

    #[test]
    fn spawn_failure_names_the_binary() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("no_such_server");
        let err = match McpClient::spawn(&missing, SpawnOptions::default()) {
            Ok(_) => panic!("spawn of a missing binary succeeded"),
            Err(err) => err,
        };
        assert!(matches!(err, ClientError::Spawn { .. }));
        assert!(err.to_string().contains("no_such_server"));
    }
}
