//! Output formatting utilities.

use serde::Serialize;

/// Formats a value as pretty-printed JSON.
pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
