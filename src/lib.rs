//! Line-delimited JSON-RPC server exposing project-root-confined file tools.
//!
//! Every tool path goes through [`security::ProjectRoot::resolve`] before any
//! file-system call. See `php-api-mcp --help` for startup options.

pub mod client;
pub mod config;
pub mod errors;
pub mod logging;
pub mod mcp;
pub mod security;
pub mod server;
pub mod tools;

#[cfg(test)]
mod tests;
