#![forbid(unsafe_code)]

use crate::BoardStats;
use time::format_description::well_known::Rfc3339;
use todo_core::Todo;

pub fn todo_line(todo: &Todo) -> String {
    let mark = if todo.completed { 'x' } else { ' ' };
    match todo.description.as_deref() {
        Some(description) if !description.is_empty() => {
            format!("[{mark}] #{} {}: {description}", todo.id, todo.title)
        }
        _ => format!("[{mark}] #{} {}", todo.id, todo.title),
    }
}

pub fn todo_detail(todo: &Todo) -> String {
    let stamp = |at: time::OffsetDateTime| at.format(&Rfc3339).unwrap_or_else(|_| at.to_string());
    format!(
        "id:          {}\ntitle:       {}\ndescription: {}\ncompleted:   {}\ncreated:     {}\nupdated:     {}",
        todo.id,
        todo.title,
        todo.description.as_deref().unwrap_or("-"),
        if todo.completed { "yes" } else { "no" },
        stamp(todo.created_at),
        stamp(todo.updated_at),
    )
}

pub fn stats_line(stats: &BoardStats) -> String {
    format!(
        "{} total, {} pending, {} completed",
        stats.total, stats.pending, stats.completed
    )
}
