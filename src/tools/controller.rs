use crate::{
    errors::AppError,
    mcp::registry::Tool,
    security::ProjectRoot,
    tools::{optional_str, required_str},
};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::{fs, sync::Arc};

pub const CONTROLLERS_DIR: &str = "api/controllers";
pub const LOGICS_DIR: &str = "api/api_logics";
const NAME_REQUIRED: &str = "Controller name is required";

pub struct CreateControllerTool { root: Arc<ProjectRoot> }

impl CreateControllerTool { pub fn new(root: Arc<ProjectRoot>) -> Self { Self { root } } }

fn controller_source(name: &str, functions: Option<&str>) -> String {
    format!(
        "<?php\n\nclass {name} extends BaseController {{\n\n    public function __construct() {{\n        parent::__construct();\n    }}\n\n    {}\n}}\n",
        functions.unwrap_or("// Add your methods here")
    )
}

fn summary_text(name: &str, functions: Option<&str>, generated: &str) -> String {
    format!(
        "API Logic Summary for controller: {name}\nGenerated on {generated} UTC\n\nController: {name}\nLocation: {CONTROLLERS_DIR}/{name}.php\nFunctions: {}\n",
        functions.unwrap_or("None specified yet")
    )
}

#[async_trait]
impl Tool for CreateControllerTool {
    fn name(&self) -> &'static str { "create_controller" }
    fn description(&self) -> &'static str {
        "Scaffold api/controllers/<Name>.php extending BaseController and record a summary in api/api_logics"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({"type":"object","required":["controller_name"],"properties": {"controller_name": {"type":"string"},"functions":{"type":"string"}}})
    }
    async fn call(&self, params: serde_json::Value) -> Result<String, AppError> {
        let name = required_str(&params, "controller_name", NAME_REQUIRED)?;
        let functions = optional_str(&params, "functions");

        // both targets go through the resolver, so a name like ../../x cannot leave the root
        let controller = self.root.resolve(&format!("{CONTROLLERS_DIR}/{name}.php"))?;
        let summary = self.root.resolve(&format!("{LOGICS_DIR}/{name}_summary.txt"))?;

        for parent in [controller.parent(), summary.parent()].into_iter().flatten() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&controller, controller_source(name, functions))?;

        let generated = Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string();
        fs::write(&summary, summary_text(name, functions, &generated))?;

        tracing::info!(controller = name, path = %controller.display(), "controller scaffolded");
        Ok(format!("Created {}\nCreated {}", controller.display(), summary.display()))
    }
}
