use crate::{
    errors::AppError,
    mcp::registry::Tool,
    security::ProjectRoot,
    tools::{required_str, CONTENT_REQUIRED, FILEPATH_REQUIRED},
};
use async_trait::async_trait;
use serde_json::json;
use std::{fs, sync::Arc};

pub struct FsWriteTool {
    root: Arc<ProjectRoot>,
}
impl FsWriteTool {
    pub fn new(root: Arc<ProjectRoot>) -> Self {
        Self { root }
    }
}

#[async_trait]
impl Tool for FsWriteTool {
    fn name(&self) -> &'static str { "write_file" }
    fn description(&self) -> &'static str { "Create or overwrite a text file under the project root" }
    fn input_schema(&self) -> serde_json::Value {
        json!({"type":"object","required":["filepath","content"],"properties": {"filepath": {"type":"string"},"content":{"type":"string"}}})
    }
    async fn call(&self, params: serde_json::Value) -> Result<String, AppError> {
        let filepath = required_str(&params, "filepath", FILEPATH_REQUIRED)?;
        let content = required_str(&params, "content", CONTENT_REQUIRED)?;
        let full = self.root.resolve(filepath)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, content)?;
        tracing::debug!(path = %full.display(), bytes = content.len(), "file written");
        Ok(format!("Successfully wrote to {}", full.display()))
    }
}
