use crate::{
    errors::AppError,
    mcp::registry::Tool,
    security::ProjectRoot,
    tools::{required_str, CONTENT_REQUIRED, FILEPATH_REQUIRED},
};
use async_trait::async_trait;
use serde_json::json;
use std::{fs, sync::Arc};

pub struct FsAppendTool { root: Arc<ProjectRoot> }

impl FsAppendTool { pub fn new(root: Arc<ProjectRoot>) -> Self { Self { root } } }

#[async_trait]
impl Tool for FsAppendTool {
    fn name(&self) -> &'static str { "append_to_file" }
    fn description(&self) -> &'static str { "Append text on a new line, creating the file if needed" }
    fn input_schema(&self) -> serde_json::Value {
        json!({"type":"object","required":["filepath","content"],"properties": {"filepath": {"type":"string"},"content":{"type":"string"}}})
    }
    async fn call(&self, params: serde_json::Value) -> Result<String, AppError> {
        let filepath = required_str(&params, "filepath", FILEPATH_REQUIRED)?;
        let content = required_str(&params, "content", CONTENT_REQUIRED)?;
        let full = self.root.resolve(filepath)?;
        let mut text = if full.exists() { fs::read_to_string(&full)? } else { String::new() };
        if !text.is_empty() {
            text.push('\n');
        }
        text.push_str(content);
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, text)?;
        Ok(format!("Successfully appended to {}", full.display()))
    }
}
