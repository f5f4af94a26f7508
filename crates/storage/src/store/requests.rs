#![forbid(unsafe_code)]

use todo_core::TodoPatch;
use todo_core::ids::TodoId;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    pub patch: TodoPatch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeleteTodoRequest {
    pub id: TodoId,
}
