use crate::security::EscapesRoot;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),
    #[error(transparent)]
    PathOutsideRoot(#[from] EscapesRoot),
    #[error("File {} does not exist", .0.display())]
    FileNotFound(PathBuf),
    #[error("Directory {} does not exist", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("reading file: {0}")]
    ReadFile(#[source] std::io::Error),
    #[error("unknown tool: {0}")]
    UnknownTool(String),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "InvalidArgument",
            AppError::PathOutsideRoot(_) => "PathOutsideRoot",
            AppError::FileNotFound(_) | AppError::DirectoryNotFound(_) => "NotFound",
            AppError::UnknownTool(_) => "UnknownTool",
            AppError::Io(_) | AppError::ReadFile(_) => "Io",
            AppError::Internal(_) => "Internal",
        }
    }

    /// JSON-RPC code used when the error surfaces as a protocol error rather than a tool result.
    pub fn rpc_code(&self) -> i32 {
        match self {
            AppError::InvalidArgument(_) | AppError::UnknownTool(_) => rpc::INVALID_PARAMS,
            _ => rpc::INTERNAL_ERROR,
        }
    }

    /// Text returned in-band as a failed tool result.
    pub fn user_text(&self) -> String {
        match self {
            AppError::ReadFile(e) => format!("Error reading file: {e}"),
            other => format!("Error: {other}"),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self { AppError::InvalidArgument(msg.into()) }
}

pub type AppResult<T> = Result<T, AppError>;

pub mod rpc {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}
