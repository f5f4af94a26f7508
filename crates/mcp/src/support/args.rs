#![forbid(unsafe_code)]

use super::ai::ai_error;
use serde_json::{Map, Value};
use todo_core::Title;
use todo_core::ids::TodoId;

pub(crate) type Args = Map<String, Value>;

fn invalid(message: &str) -> Value {
    ai_error("INVALID_INPUT", message)
}

pub(crate) fn require_object(args: &Value) -> Result<&Args, Value> {
    args.as_object()
        .ok_or_else(|| invalid("arguments must be an object"))
}

pub(crate) fn require_todo_id(args: &Args, key: &str) -> Result<TodoId, Value> {
    let raw = match args.get(key) {
        None | Some(Value::Null) => return Err(invalid(&format!("{key} is required"))),
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| invalid(&format!("{key} must be an integer")))?,
        Some(_) => return Err(invalid(&format!("{key} must be an integer"))),
    };
    TodoId::try_new(raw).map_err(|err| invalid(&format!("{key}: {err}")))
}

pub(crate) fn require_title(args: &Args, key: &str) -> Result<Title, Value> {
    match optional_title(args, key)? {
        Some(title) => Ok(title),
        None => Err(invalid(&format!("{key} is required"))),
    }
}

/// Absent means "keep"; an explicit null title is rejected because titles are never null.
pub(crate) fn optional_title(args: &Args, key: &str) -> Result<Option<Title>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::String(v) => Title::try_new(v.as_str())
            .map(Some)
            .map_err(|err| invalid(&format!("{key}: {err}"))),
        Value::Null => Err(invalid(&format!("{key} cannot be null"))),
        _ => Err(invalid(&format!("{key} must be a string"))),
    }
}

pub(crate) fn optional_string(args: &Args, key: &str) -> Result<Option<String>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::String(v) => Ok(Some(v.to_string())),
        _ => Err(invalid(&format!("{key} must be a string"))),
    }
}

/// `None` = key absent, `Some(None)` = explicit null, `Some(Some(_))` = value.
pub(crate) fn optional_nullable_string(
    args: &Args,
    key: &str,
) -> Result<Option<Option<String>>, Value> {
    if !args.contains_key(key) {
        return Ok(None);
    }
    match args.get(key) {
        Some(Value::Null) => Ok(Some(None)),
        Some(Value::String(v)) => Ok(Some(Some(v.to_string()))),
        Some(_) => Err(invalid(&format!("{key} must be a string or null"))),
        None => Ok(None),
    }
}

pub(crate) fn optional_bool(args: &Args, key: &str) -> Result<Option<bool>, Value> {
    let Some(value) = args.get(key) else {
        return Ok(None);
    };
    match value {
        Value::Null => Ok(None),
        Value::Bool(v) => Ok(Some(*v)),
        _ => Err(invalid(&format!("{key} must be a boolean"))),
    }
}

/// Rejects keys outside `allowed` so typos do not silently turn into no-op updates.
pub(crate) fn reject_unknown_keys(args: &Args, allowed: &[&str]) -> Result<(), Value> {
    let mut unknown = args
        .keys()
        .filter(|key| !allowed.contains(&key.as_str()))
        .map(String::as_str)
        .collect::<Vec<_>>();
    if unknown.is_empty() {
        return Ok(());
    }
    unknown.sort_unstable();
    Err(invalid(&format!(
        "unknown argument(s): {}; allowed: {}",
        unknown.join(", "),
        allowed.join(", ")
    )))
}
