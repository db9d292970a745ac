use crate::{
    errors::AppError,
    mcp::registry::Tool,
    security::ProjectRoot,
    tools::{required_str, FILEPATH_REQUIRED},
};
use async_trait::async_trait;
use serde_json::json;
use std::{fs, sync::Arc};

pub struct FsReadTool { root: Arc<ProjectRoot> }

impl FsReadTool { pub fn new(root: Arc<ProjectRoot>) -> Self { Self { root } } }

#[async_trait]
impl Tool for FsReadTool {
    fn name(&self) -> &'static str { "read_file" }
    fn description(&self) -> &'static str { "Read a UTF-8 text file under the project root" }
    fn input_schema(&self) -> serde_json::Value {
        json!({"type":"object","required":["filepath"],"properties": {"filepath": {"type":"string"}}})
    }
    async fn call(&self, params: serde_json::Value) -> Result<String, AppError> {
        let filepath = required_str(&params, "filepath", FILEPATH_REQUIRED)?;
        let full = self.root.resolve(filepath)?;
        if !full.exists() {
            return Err(AppError::FileNotFound(full));
        }
        let content = fs::read_to_string(&full).map_err(AppError::ReadFile)?;
        Ok(format!("File content of {}:\n\n{}", full.display(), content))
    }
}
