#![forbid(unsafe_code)]

use super::Title;
use crate::ids::TodoId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: Title,
    pub description: Option<String>,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create input. `completed`, the id and both timestamps are assigned by the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTodo {
    pub title: Title,
    pub description: Option<String>,
}

impl NewTodo {
    pub fn new(title: Title) -> Self {
        Self {
            title,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
