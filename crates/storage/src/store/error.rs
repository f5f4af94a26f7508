#![forbid(unsafe_code)]

use todo_core::ids::TodoId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("todo with id {id} not found")]
    TodoNotFound { id: TodoId },
}

impl StoreError {
    /// Stable machine-readable code, surfaced to clients next to the message.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::Sql(_) => "SQL",
            Self::InvalidInput(message) if message.starts_with("RESET_REQUIRED") => {
                "RESET_REQUIRED"
            }
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::TodoNotFound { .. } => "NOT_FOUND",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::TodoNotFound { .. })
    }
}
