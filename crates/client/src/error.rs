#![forbid(unsafe_code)]

use std::path::PathBuf;
use todo_core::ids::TodoId;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to spawn {}: {source}", bin.display())]
    Spawn {
        bin: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("transport i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("protocol: {0}")]
    Protocol(String),
    #[error("{message} ({code})")]
    Tool { code: String, message: String },
    #[error("todo with id {id} is not on the board")]
    UnknownTodo { id: TodoId },
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ClientError {
    /// Server-side `NOT_FOUND` or an id the local board does not know.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Tool { code, .. } => code == "NOT_FOUND",
            Self::UnknownTodo { .. } => true,
            _ => false,
        }
    }
}
