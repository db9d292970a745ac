use anyhow::Context;
use clap::Parser;
use php_api_mcp::{config::Config, logging, mcp::registry::ToolRegistry, security::ProjectRoot, server};
use std::{path::PathBuf, sync::Arc};
use tracing::info;

/// File tools for a PHP API project, served as JSON-RPC over stdio.
#[derive(Parser)]
#[command(name = "php-api-mcp", version)]
struct Args {
    /// TOML or JSON config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Project root; overrides PROJECT_ROOT and the config file
    #[arg(long)]
    root: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init();
    let args = Args::parse();

    let mut cfg = Config::resolve(args.config.as_deref()).context("loading config")?;
    if let Some(root) = args.root {
        cfg.root.project_root = root;
    }
    cfg.validate().context("validating config")?;
    cfg.prepare_layout().context("preparing project layout")?;

    let root = Arc::new(ProjectRoot::new(&cfg.root.project_root).context("canonicalizing project root")?);
    let registry = ToolRegistry::new(root.clone());

    info!(root = %root.path().display(), tools = ?registry.list_names(), "php-api-mcp ready on stdio");

    server::serve(server::AppState::new(&cfg, registry)).await
}
