use crate::{
    config::Config,
    errors::{rpc, AppError},
    mcp::{
        registry::ToolRegistry,
        types::{
            CallParams, CallToolResult, Capabilities, InitializeResult, JsonRpcRequest, JsonRpcResponse, ServerInfo,
            ToolsCapability, JSONRPC_VERSION,
        },
    },
};
use serde_json::{json, Value};
use std::time::Instant;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Clone)]
pub struct AppState {
    pub name: String,
    pub protocol_version: String,
    pub registry: ToolRegistry,
}

impl AppState {
    pub fn new(cfg: &Config, registry: ToolRegistry) -> Self {
        Self { name: cfg.server.name.clone(), protocol_version: cfg.server.protocol_version.clone(), registry }
    }
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_io(&state, stdin, stdout).await
}

/// Reads one JSON-RPC message per line until EOF, writing one reply line per request.
pub async fn serve_io<R, W>(state: &AppState, mut reader: R, mut writer: W) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        // invalid UTF-8 becomes U+FFFD and then fails JSON parsing
        let line = String::from_utf8_lossy(&buf);
        if line.trim().is_empty() {
            continue;
        }
        if let Some(resp) = handle_line(state, &line).await {
            let mut out = serde_json::to_vec(&resp)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }
    }
    tracing::info!("stdin closed, shutting down");
    Ok(())
}

/// Returns `None` for notifications.
pub async fn handle_line(state: &AppState, line: &str) -> Option<JsonRpcResponse> {
    let started = Instant::now();
    let request_id = uuid::Uuid::new_v4().to_string();

    let raw: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            audit_end(&request_id, "", None, "error", "ParseError", started.elapsed().as_millis() as u64);
            return Some(JsonRpcResponse::error(None, rpc::PARSE_ERROR, format!("Parse error: {e}")));
        }
    };
    let raw_id = raw.get("id").cloned();
    let req: JsonRpcRequest = match serde_json::from_value(raw) {
        Ok(r) => r,
        Err(e) => {
            audit_end(&request_id, "", None, "error", "InvalidRequest", started.elapsed().as_millis() as u64);
            return Some(JsonRpcResponse::error(raw_id, rpc::INVALID_REQUEST, format!("Invalid Request: {e}")));
        }
    };
    if req.jsonrpc != JSONRPC_VERSION {
        audit_end(&request_id, &req.method, None, "error", "InvalidRequest", started.elapsed().as_millis() as u64);
        return Some(JsonRpcResponse::error(req.id, rpc::INVALID_REQUEST, "Invalid Request: jsonrpc must be \"2.0\""));
    }
    if req.is_notification() {
        tracing::debug!(method = %req.method, "notification");
        return None;
    }

    let id = req.id;
    let resp = match req.method.as_str() {
        "initialize" => JsonRpcResponse::success(id, initialize(state)),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": state.registry.describe() })),
        "tools/call" => {
            let (resp, tool, decision, code) = call(state, id, req.params).await;
            audit_end(&request_id, "tools/call", tool.as_deref(), decision, code, started.elapsed().as_millis() as u64);
            return Some(resp);
        }
        other => {
            audit_end(&request_id, other, None, "error", "MethodNotFound", started.elapsed().as_millis() as u64);
            return Some(JsonRpcResponse::error(id, rpc::METHOD_NOT_FOUND, format!("Method not found: {other}")));
        }
    };
    audit_end(&request_id, &req.method, None, "ok", "OK", started.elapsed().as_millis() as u64);
    Some(resp)
}

fn initialize(state: &AppState) -> Value {
    let result = InitializeResult {
        protocol_version: state.protocol_version.clone(),
        capabilities: Capabilities { tools: ToolsCapability { list_changed: false } },
        server_info: ServerInfo { name: state.name.clone(), version: env!("CARGO_PKG_VERSION").to_string() },
    };
    serde_json::to_value(result).unwrap_or(Value::Null)
}

async fn call(state: &AppState, id: Option<Value>, params: Value) -> (JsonRpcResponse, Option<String>, &'static str, &'static str) {
    let params: CallParams = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => {
            let resp = JsonRpcResponse::error(id, rpc::INVALID_PARAMS, format!("Invalid params: {e}"));
            return (resp, None, "error", "InvalidParams");
        }
    };
    let Some(tool) = state.registry.get(&params.name) else {
        let e = AppError::UnknownTool(params.name.clone());
        return (JsonRpcResponse::error(id, e.rpc_code(), e.to_string()), Some(params.name), "deny", e.code());
    };
    let (result, decision, code) = match tool.call(params.arguments).await {
        Ok(text) => (CallToolResult::text(text), "ok", "OK"),
        Err(e) => {
            if matches!(e, AppError::Io(_) | AppError::ReadFile(_) | AppError::Internal(_)) {
                tracing::error!(tool = %params.name, error = %e, "tool failed");
            }
            let decision = if matches!(e, AppError::PathOutsideRoot(_)) { "deny" } else { "error" };
            (CallToolResult::failure(e.user_text()), decision, e.code())
        }
    };
    let value = serde_json::to_value(result).unwrap_or(Value::Null);
    (JsonRpcResponse::success(id, value), Some(params.name), decision, code)
}

fn audit_end(request_id: &str, method: &str, tool: Option<&str>, decision: &str, code: &str, duration_ms: u64) {
    tracing::info!(
        request_id = request_id,
        method = method,
        tool = tool,
        decision = decision,
        code = code,
        duration_ms = duration_ms,
        "audit"
    );
}
