#![forbid(unsafe_code)]

mod error;
mod requests;
mod schema;

pub use error::StoreError;
pub use requests::*;

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::time::Duration;
use todo_core::ids::TodoId;
use todo_core::timestamps::{advance_ms, from_unix_ms, now_ms, to_unix_ms};
use todo_core::{NewTodo, Title, Todo};

pub const DB_FILE_NAME: &str = "todos.db";

const TODO_COLUMNS: &str = "id, title, description, completed, created_at_ms, updated_at_ms";

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let storage_dir = storage_dir.as_ref();
        std::fs::create_dir_all(storage_dir)?;

        let db_path = storage_dir.join(DB_FILE_NAME);
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_secs(5))?;

        schema::preflight_gate(&conn)?;
        schema::install_schema(&conn)?;
        tracing::debug!(path = %db_path.display(), "todo store opened");

        Ok(Self { conn })
    }

    /// All todos, newest first. Rows created in the same millisecond fall back to id order.
    pub fn list_todos(&self) -> Result<Vec<Todo>, StoreError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at_ms DESC, id DESC"
        ))?;

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(TodoRow::read(row)?.into_todo()?);
        }
        Ok(out)
    }

    pub fn get_todo(&self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        select_todo(&self.conn, id)
    }

    /// An empty description is stored as null.
    pub fn create_todo(&mut self, request: NewTodo) -> Result<Todo, StoreError> {
        let NewTodo { title, description } = request;
        let description = description.filter(|text| !text.is_empty());
        let now_ms = now_ms();

        self.conn.execute(
            "INSERT INTO todos(title, description, completed, created_at_ms, updated_at_ms) \
             VALUES (?1, ?2, 0, ?3, ?3)",
            params![title.as_str(), description, now_ms],
        )?;
        let id = TodoId::try_new(self.conn.last_insert_rowid())
            .map_err(|_| StoreError::InvalidInput("storage assigned a non-positive id"))?;

        Ok(Todo {
            id,
            title,
            description,
            completed: false,
            created_at: from_unix_ms(now_ms),
            updated_at: from_unix_ms(now_ms),
        })
    }

    /// Merges the supplied fields and always advances `updated_at`. Last write wins.
    pub fn update_todo(&mut self, request: UpdateTodoRequest) -> Result<Todo, StoreError> {
        let UpdateTodoRequest { id, patch } = request;

        let tx = self.conn.transaction()?;
        let Some(current) = select_todo(&tx, id)? else {
            return Err(StoreError::TodoNotFound { id });
        };

        let mut next = current.clone();
        patch.apply_to(&mut next);
        let updated_at_ms = advance_ms(to_unix_ms(current.updated_at), now_ms());
        next.updated_at = from_unix_ms(updated_at_ms);

        tx.execute(
            "UPDATE todos SET title=?2, description=?3, completed=?4, updated_at_ms=?5 WHERE id=?1",
            params![
                id.get(),
                next.title.as_str(),
                next.description,
                next.completed,
                updated_at_ms,
            ],
        )?;

        tx.commit()?;
        Ok(next)
    }

    /// Returns whether a row was removed. Unknown ids are not an error.
    pub fn delete_todo(&mut self, request: DeleteTodoRequest) -> Result<bool, StoreError> {
        let deleted = self
            .conn
            .execute("DELETE FROM todos WHERE id=?1", params![request.id.get()])?;
        Ok(deleted > 0)
    }
}

struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl TodoRow {
    fn read(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            completed: row.get(3)?,
            created_at_ms: row.get(4)?,
            updated_at_ms: row.get(5)?,
        })
    }

    fn into_todo(self) -> Result<Todo, StoreError> {
        let id = TodoId::try_new(self.id).map_err(|_| StoreError::InvalidInput("invalid todo row"))?;
        let title =
            Title::try_new(self.title).map_err(|_| StoreError::InvalidInput("invalid todo row"))?;
        Ok(Todo {
            id,
            title,
            description: self.description,
            completed: self.completed,
            created_at: from_unix_ms(self.created_at_ms),
            updated_at: from_unix_ms(self.updated_at_ms),
        })
    }
}

fn select_todo(conn: &Connection, id: TodoId) -> Result<Option<Todo>, StoreError> {
    let row = conn
        .query_row(
            &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id=?1"),
            params![id.get()],
            TodoRow::read,
        )
        .optional()?;

    row.map(TodoRow::into_todo).transpose()
}
