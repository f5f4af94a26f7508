#![forbid(unsafe_code)]

pub mod model;
pub mod timestamps;

pub use model::*;

pub mod ids {
    use serde::{Deserialize, Serialize};

    /// Storage-assigned identity of a todo. Always positive.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(try_from = "i64", into = "i64")]
    pub struct TodoId(i64);

    impl TodoId {
        pub fn get(self) -> i64 {
            self.0
        }

        pub fn try_new(value: i64) -> Result<Self, TodoIdError> {
            if value <= 0 {
                return Err(TodoIdError::NotPositive(value));
            }
            Ok(Self(value))
        }
    }

    impl TryFrom<i64> for TodoId {
        type Error = TodoIdError;

        fn try_from(value: i64) -> Result<Self, Self::Error> {
            Self::try_new(value)
        }
    }

    impl From<TodoId> for i64 {
        fn from(value: TodoId) -> Self {
            value.0
        }
    }

    impl std::fmt::Display for TodoId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
    pub enum TodoIdError {
        #[error("todo id must be a positive integer (got {0})")]
        NotPositive(i64),
    }
}
