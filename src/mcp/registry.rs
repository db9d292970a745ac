use crate::{errors::AppResult, mcp::types::ToolInfo, security::ProjectRoot};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynTool = Arc<dyn Tool + Send + Sync + 'static>;

#[derive(Clone)]
pub struct ToolRegistry {
    tools: Vec<(String, DynTool)>,
}

impl ToolRegistry {
    pub fn new(root: Arc<ProjectRoot>) -> Self {
        use crate::tools::{
            controller::CreateControllerTool, fs_append::FsAppendTool, fs_delete::FsDeleteTool, fs_list::FsListTool,
            fs_read::FsReadTool, fs_write::FsWriteTool,
        };
        let all: Vec<DynTool> = vec![
            Arc::new(FsReadTool::new(root.clone())),
            Arc::new(FsWriteTool::new(root.clone())),
            Arc::new(FsListTool::new(root.clone())),
            Arc::new(FsAppendTool::new(root.clone())),
            Arc::new(FsDeleteTool::new(root.clone())),
            Arc::new(CreateControllerTool::new(root)),
        ];
        let mut tools: Vec<(String, DynTool)> = all.into_iter().map(|t| (t.name().to_string(), t)).collect();
        tools.sort_by(|a, b| a.0.cmp(&b.0));
        Self { tools }
    }

    pub fn get(&self, name: &str) -> Option<DynTool> { self.tools.iter().find(|(n, _)| n == name).map(|(_, t)| t.clone()) }
    pub fn list_names(&self) -> Vec<String> { self.tools.iter().map(|(n, _)| n.clone()).collect() }

    pub fn describe(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|(n, t)| ToolInfo { name: n.clone(), description: t.description().to_string(), input_schema: t.input_schema() })
            .collect()
    }
}

#[async_trait]
pub trait Tool {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
    /// Returns the success text shown to the caller.
    async fn call(&self, params: serde_json::Value) -> AppResult<String>;
}
