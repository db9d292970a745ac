use crate::{
    errors::AppError,
    mcp::registry::Tool,
    security::ProjectRoot,
    tools::{required_str, FILEPATH_REQUIRED},
};
use async_trait::async_trait;
use serde_json::json;
use std::{fs, sync::Arc};

pub struct FsDeleteTool { root: Arc<ProjectRoot> }

impl FsDeleteTool { pub fn new(root: Arc<ProjectRoot>) -> Self { Self { root } } }

#[async_trait]
impl Tool for FsDeleteTool {
    fn name(&self) -> &'static str { "delete_file" }
    fn description(&self) -> &'static str { "Delete a single file under the project root" }
    fn input_schema(&self) -> serde_json::Value {
        json!({"type":"object","required":["filepath"],"properties": {"filepath": {"type":"string"}}})
    }
    async fn call(&self, params: serde_json::Value) -> Result<String, AppError> {
        let filepath = required_str(&params, "filepath", FILEPATH_REQUIRED)?;
        let full = self.root.resolve(filepath)?;
        if !full.exists() {
            return Err(AppError::FileNotFound(full));
        }
        // directories are refused by remove_file
        fs::remove_file(&full)?;
        tracing::info!(path = %full.display(), "file deleted");
        Ok(format!("Successfully deleted {}", full.display()))
    }
}
