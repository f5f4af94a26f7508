#![forbid(unsafe_code)]
#![allow(dead_code)]

use serde_json::{Value, json};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use tempfile::TempDir;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Framing {
    NewlineJson,
    ContentLength,
}

/// A spawned `todo_mcp` process talking over piped stdio.
pub(crate) struct Server {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    framing: Framing,
    // Dropped after the child so the database is not removed under a live process.
    storage: Option<TempDir>,
}

impl Server {
    pub(crate) fn start() -> Self {
        Self::start_with(Framing::NewlineJson)
    }

    pub(crate) fn start_with(framing: Framing) -> Self {
        let storage = tempfile::tempdir().expect("create storage dir");
        let mut server = Self::spawn(storage.path(), framing);
        server.storage = Some(storage);
        server
    }

    /// Spawns against an existing directory that outlives the process.
    pub(crate) fn start_in(storage_dir: &Path) -> Self {
        Self::spawn(storage_dir, Framing::NewlineJson)
    }

    pub(crate) fn start_initialized() -> Self {
        let mut server = Self::start();
        server.initialize();
        server
    }

    fn spawn(storage_dir: &Path, framing: Framing) -> Self {
        let mut child = Command::new(env!("CARGO_BIN_EXE_todo_mcp"))
            .arg("--storage-dir")
            .arg(storage_dir)
            .arg("--log")
            .arg("warn")
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("spawn todo_mcp");

        let stdin = child.stdin.take().expect("stdin");
        let stdout = BufReader::new(child.stdout.take().expect("stdout"));

        Self {
            child,
            stdin,
            stdout,
            framing,
            storage: None,
        }
    }

    pub(crate) fn send_raw(&mut self, raw: &str) {
        self.stdin.write_all(raw.as_bytes()).expect("write raw");
        self.stdin.flush().expect("flush raw");
    }

    pub(crate) fn send(&mut self, req: Value) {
        let body = serde_json::to_vec(&req).expect("serialize request");
        match self.framing {
            Framing::NewlineJson => {
                self.stdin.write_all(&body).expect("write request");
                self.stdin.write_all(b"\n").expect("write newline");
            }
            Framing::ContentLength => {
                write!(self.stdin, "Content-Length: {}\r\n\r\n", body.len())
                    .expect("write header");
                self.stdin.write_all(&body).expect("write body");
            }
        }
        self.stdin.flush().expect("flush request");
    }

    pub(crate) fn recv(&mut self) -> Value {
        match self.framing {
            Framing::NewlineJson => {
                let mut line = String::new();
                self.stdout.read_line(&mut line).expect("read response");
                assert!(!line.trim().is_empty(), "empty response line");
                serde_json::from_str(&line).expect("parse response json")
            }
            Framing::ContentLength => {
                let mut content_length = None;
                loop {
                    let mut line = String::new();
                    let read = self.stdout.read_line(&mut line).expect("read header line");
                    assert!(read > 0, "unexpected EOF reading response headers");
                    let trimmed = line.trim_end();
                    if trimmed.is_empty() {
                        break;
                    }
                    if let Some((key, value)) = trimmed.split_once(':')
                        && key.trim().eq_ignore_ascii_case("content-length")
                    {
                        content_length = Some(value.trim().parse::<usize>().expect("length"));
                    }
                }
                let len = content_length.expect("missing Content-Length in response");
                let mut body = vec![0u8; len];
                self.stdout.read_exact(&mut body).expect("read response body");
                serde_json::from_slice(&body).expect("parse response json")
            }
        }
    }

    pub(crate) fn request(&mut self, req: Value) -> Value {
        self.send(req);
        self.recv()
    }

    pub(crate) fn initialize(&mut self) {
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": { "protocolVersion": "2024-11-05", "capabilities": {}, "clientInfo": { "name": "test", "version": "0" } }
        }));
        assert!(resp.get("result").is_some(), "initialize failed: {resp}");
        self.send(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
            "params": {}
        }));
    }

    /// Calls a tool and returns the decoded envelope from the text content.
    pub(crate) fn call(&mut self, name: &str, arguments: Value) -> Value {
        let resp = self.request(json!({
            "jsonrpc": "2.0",
            "id": 100,
            "method": "tools/call",
            "params": { "name": name, "arguments": arguments }
        }));
        let result = resp.get("result").unwrap_or_else(|| panic!("tools/call failed: {resp}"));
        let text = result["content"][0]["text"].as_str().expect("text content");
        let envelope: Value = serde_json::from_str(text).expect("envelope json");
        assert_eq!(
            result["isError"].as_bool(),
            Some(envelope["success"] != true),
            "isError must mirror the envelope"
        );
        envelope
    }

    /// Calls a tool that must succeed and returns its `result`.
    pub(crate) fn call_ok(&mut self, name: &str, arguments: Value) -> Value {
        let envelope = self.call(name, arguments);
        assert_eq!(envelope["success"], true, "{name} failed: {envelope}");
        envelope["result"].clone()
    }

    /// Calls a tool that must fail and returns its `error` object.
    pub(crate) fn call_err(&mut self, name: &str, arguments: Value) -> Value {
        let envelope = self.call(name, arguments);
        assert_eq!(envelope["success"], false, "{name} unexpectedly succeeded: {envelope}");
        envelope["error"].clone()
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
