#![forbid(unsafe_code)]

pub mod bin_detect;
pub mod board;
pub mod error;
pub mod mcp_client;
pub mod render;
pub mod service;

pub use board::{BoardStats, TodoBoard};
pub use error::ClientError;
pub use mcp_client::McpClient;
pub use service::{RemoteTodos, TodoService};

pub const MCP_PROTOCOL_VERSION: &str = "2024-11-05";
