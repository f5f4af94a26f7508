#![forbid(unsafe_code)]

use crate::{ClientError, TodoService};
use todo_core::ids::TodoId;
use todo_core::{NewTodo, Todo, TodoPatch};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

/// Local view of the server's todo list.
///
/// Every mutating call talks to the service first and only touches local state once the
/// service has answered successfully. On failure the list is left exactly as it was and
/// the error is kept in [`TodoBoard::last_error`] for display.
#[derive(Clone, Debug, Default)]
pub struct TodoBoard {
    todos: Vec<Todo>,
    last_error: Option<String>,
}

impl TodoBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn load<S: TodoService + ?Sized>(&mut self, service: &mut S) -> Result<(), ClientError> {
        let todos = self.record("load", service.list())?;
        self.apply_loaded(todos);
        Ok(())
    }

    pub fn reload<S: TodoService + ?Sized>(&mut self, service: &mut S) -> Result<(), ClientError> {
        self.load(service)
    }

    pub fn create<S: TodoService + ?Sized>(
        &mut self,
        service: &mut S,
        draft: &NewTodo,
    ) -> Result<Todo, ClientError> {
        let todo = self.record("create", service.create(draft))?;
        self.apply_created(todo.clone());
        Ok(todo)
    }

    pub fn update<S: TodoService + ?Sized>(
        &mut self,
        service: &mut S,
        id: TodoId,
        patch: &TodoPatch,
    ) -> Result<Todo, ClientError> {
        let todo = self.record("update", service.update(id, patch))?;
        self.apply_updated(todo.clone());
        Ok(todo)
    }

    /// Flips `completed` for a todo already on the board.
    pub fn toggle<S: TodoService + ?Sized>(
        &mut self,
        service: &mut S,
        id: TodoId,
    ) -> Result<Todo, ClientError> {
        let Some(current) = self.get(id) else {
            return self.record("toggle", Err(ClientError::UnknownTodo { id }));
        };
        let patch = TodoPatch::default().completed(!current.completed);
        self.update(service, id, &patch)
    }

    pub fn delete<S: TodoService + ?Sized>(
        &mut self,
        service: &mut S,
        id: TodoId,
    ) -> Result<bool, ClientError> {
        let deleted = self.record("delete", service.delete(id))?;
        self.apply_deleted(id);
        Ok(deleted)
    }

    pub fn stats(&self) -> BoardStats {
        let completed = self.completed().count();
        BoardStats {
            total: self.todos.len(),
            pending: self.todos.len() - completed,
            completed,
        }
    }

    pub fn pending(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|todo| !todo.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter().filter(|todo| todo.completed)
    }

    pub fn apply_loaded(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    pub fn apply_created(&mut self, todo: Todo) {
        self.todos.push(todo);
    }

    /// Replaces the record in place. Returns `false` when the id is not on the board.
    pub fn apply_updated(&mut self, todo: Todo) -> bool {
        match self.todos.iter_mut().find(|slot| slot.id == todo.id) {
            Some(slot) => {
                *slot = todo;
                true
            }
            None => false,
        }
    }

    pub fn apply_deleted(&mut self, id: TodoId) {
        self.todos.retain(|todo| todo.id != id);
    }

    fn record<T>(
        &mut self,
        operation: &str,
        result: Result<T, ClientError>,
    ) -> Result<T, ClientError> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(err) => {
                tracing::warn!(operation, error = %err, "todo operation failed");
                self.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }
}
