pub mod controller;
pub mod fs_append;
pub mod fs_delete;
pub mod fs_list;
pub mod fs_read;
pub mod fs_write;

use crate::errors::AppError;
use serde_json::Value;

/// A string param that must be present and not blank.
pub fn required_str<'a>(params: &'a Value, key: &str, missing: &str) -> Result<&'a str, AppError> {
    match params.get(key).and_then(|v| v.as_str()) {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::invalid(missing)),
    }
}

/// A string param that may be absent; blank counts as absent.
pub fn optional_str<'a>(params: &'a Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str()).filter(|s| !s.trim().is_empty())
}

pub const FILEPATH_REQUIRED: &str = "Filepath is required";
pub const CONTENT_REQUIRED: &str = "Content cannot be empty";
