use crate::mcp::types::JsonRpcRequest;
use anyhow::Context;
use serde_json::json;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};

/// A spawned server process spoken to over its stdin/stdout.
pub struct StdioClient {
    child: Child,
    stdin: Option<ChildStdin>,
    stdout: Lines<BufReader<ChildStdout>>,
}

impl StdioClient {
    pub fn spawn(program: &str, args: &[String]) -> anyhow::Result<Self> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("spawning {program}"))?;
        let stdin = child.stdin.take().context("child stdin not piped")?;
        let stdout = child.stdout.take().context("child stdout not piped")?;
        Ok(Self { child, stdin: Some(stdin), stdout: BufReader::new(stdout).lines() })
    }

    /// Writes one request line and returns the next reply line.
    pub async fn request(&mut self, req: &JsonRpcRequest) -> anyhow::Result<String> {
        let stdin = self.stdin.as_mut().context("stdin already closed")?;
        let mut line = serde_json::to_vec(req)?;
        line.push(b'\n');
        stdin.write_all(&line).await?;
        stdin.flush().await?;
        let reply = self.stdout.next_line().await?.context("server closed stdout")?;
        Ok(reply.trim().to_string())
    }

    pub async fn shutdown(mut self) -> anyhow::Result<()> {
        drop(self.stdin.take());
        if let Err(e) = self.child.kill().await {
            tracing::debug!(error = %e, "server already exited");
        }
        Ok(())
    }
}

/// `initialize` then `tools/list`; returns both raw reply lines in order.
pub async fn handshake(client: &mut StdioClient) -> anyhow::Result<Vec<String>> {
    let init = JsonRpcRequest::new(1, "initialize", json!({"capabilities": {}}));
    let list = JsonRpcRequest::new(2, "tools/list", serde_json::Value::Null);
    let mut replies = Vec::with_capacity(2);
    for req in [init, list] {
        tracing::info!(method = %req.method, "sending");
        replies.push(client.request(&req).await?);
    }
    Ok(replies)
}
