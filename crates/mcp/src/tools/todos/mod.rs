#![forbid(unsafe_code)]

mod create;
mod delete;
mod get;
mod list;
mod update;

use crate::{ai_error, ai_ok};
use serde::Serialize;
use serde_json::Value;

/// Wraps a serializable result in the success envelope.
fn ok_json<T: Serialize>(intent: &str, result: &T) -> Value {
    match serde_json::to_value(result) {
        Ok(value) => ai_ok(intent, value),
        Err(err) => ai_error("STORE_ERROR", &format!("failed to encode {intent} result: {err}")),
    }
}
