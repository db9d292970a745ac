use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROJECT_ROOT: &str = "/var/www/php_server_mcp";
pub const ROOT_ENV: &str = "PROJECT_ROOT";

/// Folders under the project root that must exist before serving.
pub const REQUIRED_DIRS: [&str; 3] = ["api", "api/helpers", "api/api_logics"];

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub root: Root,
    #[serde(default)]
    pub server: Server,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Root {
    #[serde(default = "default_project_root")]
    pub project_root: PathBuf,
}
impl Default for Root {
    fn default() -> Self { Self { project_root: default_project_root() } }
}
fn default_project_root() -> PathBuf { PathBuf::from(DEFAULT_PROJECT_ROOT) }

#[derive(Debug, Deserialize, Clone)]
pub struct Server {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_protocol_version")]
    pub protocol_version: String,
}
impl Default for Server {
    fn default() -> Self { Self { name: default_name(), protocol_version: default_protocol_version() } }
}
fn default_name() -> String { "php_api_mcp".to_string() }
fn default_protocol_version() -> String { "2024-11-05".to_string() }

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)?;
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            Ok(serde_json::from_str(&raw)?)
        } else {
            Ok(toml::from_str(&raw)?)
        }
    }

    /// Defaults, then the optional file, then `PROJECT_ROOT`.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut cfg = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };
        if let Some(root) = std::env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
            cfg.root.project_root = PathBuf::from(root);
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.root.project_root.is_absolute() {
            anyhow::bail!("project_root must be absolute: {}", self.root.project_root.display());
        }
        if self.server.name.trim().is_empty() { anyhow::bail!("server name must not be empty"); }
        Ok(())
    }

    /// Creates the api folder layout, and the root itself when missing.
    pub fn prepare_layout(&self) -> anyhow::Result<()> {
        let root = &self.root.project_root;
        if root.exists() && !root.is_dir() {
            anyhow::bail!("project_root is not a directory: {}", root.display());
        }
        for dir in REQUIRED_DIRS {
            fs::create_dir_all(root.join(dir))?;
        }
        Ok(())
    }
}
