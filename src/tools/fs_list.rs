use crate::{errors::AppError, mcp::registry::Tool, security::ProjectRoot, tools::optional_str};
use async_trait::async_trait;
use ignore::WalkBuilder;
use serde_json::json;
use std::{path::Path, path::PathBuf, sync::Arc};

/// Listing target when no directory is given.
pub const DEFAULT_DIR: &str = "api";

pub struct FsListTool { root: Arc<ProjectRoot> }

impl FsListTool { pub fn new(root: Arc<ProjectRoot>) -> Self { Self { root } } }

#[async_trait]
impl Tool for FsListTool {
    fn name(&self) -> &'static str { "list_files" }
    fn description(&self) -> &'static str { "Recursively list files in a directory (defaults to the api folder)" }
    fn input_schema(&self) -> serde_json::Value {
        json!({"type":"object","properties": {"directory": {"type":"string"}}})
    }
    async fn call(&self, params: serde_json::Value) -> Result<String, AppError> {
        let target = match optional_str(&params, "directory") {
            Some(dir) => self.root.resolve(dir)?,
            None => self.root.resolve(DEFAULT_DIR)?,
        };
        if !target.exists() {
            return Err(AppError::DirectoryNotFound(target));
        }
        let files = walk_files(&target)?;
        if files.is_empty() {
            return Ok(format!("No files found in {}", target.display()));
        }
        let listing: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
        Ok(format!("Files in {}:\n{}", target.display(), listing.join("\n")))
    }
}

// hidden files included, ignore files not honored; a file target has no entries
fn walk_files(dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    if !dir.is_dir() {
        return Ok(files);
    }
    for entry in WalkBuilder::new(dir).standard_filters(false).build() {
        let entry = entry.map_err(|e| AppError::Internal(e.to_string()))?;
        if entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}
