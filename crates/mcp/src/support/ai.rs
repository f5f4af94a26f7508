#![forbid(unsafe_code)]

use serde_json::{Value, json};
use todo_storage::StoreError;

pub(crate) fn ai_ok(intent: &str, result: Value) -> Value {
    json!({
        "success": true,
        "intent": intent,
        "result": result,
        "error": null
    })
}

pub(crate) fn ai_error(code: &str, message: &str) -> Value {
    json!({
        "success": false,
        "intent": "error",
        "result": null,
        "error": {
            "code": code,
            "message": message.trim()
        }
    })
}

/// Not-found keeps its own code; every other storage failure is a generic store fault.
pub(crate) fn store_error(err: StoreError) -> Value {
    if err.is_not_found() {
        return ai_error("NOT_FOUND", &err.to_string());
    }
    tracing::warn!(code = err.code(), error = %err, "store operation failed");
    ai_error("STORE_ERROR", &format_store_error(&err))
}

pub(crate) fn format_store_error(err: &StoreError) -> String {
    match err {
        StoreError::Io(e) => format!("IO: {e}"),
        StoreError::Sql(e) => format!("SQL: {e}"),
        StoreError::InvalidInput(msg) => format!("Invalid input: {msg}"),
        StoreError::TodoNotFound { id } => format!("todo with id {id} not found"),
    }
}

pub(crate) fn is_success(payload: &Value) -> bool {
    payload
        .get("success")
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}
