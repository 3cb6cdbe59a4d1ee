//! Line-delimited JSON-RPC protocol loop.
//!
//! Every transport feeds its byte stream through [`serve_lines`]: one JSON-RPC
//! message per line in, at most one JSON-RPC response per line out. A message
//! that cannot be decoded produces an error response and the loop carries on;
//! only the end of the input stream stops it.

use rmcp::model::{CallToolRequestParam, JsonObject};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument, warn};

use super::TransportResult;
use crate::core::McpServer;
use crate::core::server::INSTRUCTIONS;

/// Protocol version answered when the client does not request one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    /// `null` when the request id could not be determined.
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }

    /// Parse error.
    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::error(Value::Null, -32700, msg)
    }

    /// Invalid request error.
    pub fn invalid_request(id: Value, msg: impl Into<String>) -> Self {
        Self::error(id, -32600, msg)
    }

    /// Method not found error.
    pub fn method_not_found(id: Value, method: &str) -> Self {
        Self::error(id, -32601, format!("Method not found: {}", method))
    }

    /// Invalid params error.
    pub fn invalid_params(id: Value, msg: impl Into<String>) -> Self {
        Self::error(id, -32602, msg)
    }

    /// Internal error.
    pub fn internal_error(id: Value, msg: impl Into<String>) -> Self {
        Self::error(id, -32603, msg)
    }
}

/// Longest accepted message, in bytes, not counting the line terminator.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Serve newline-delimited JSON-RPC messages until `reader` is exhausted.
///
/// Messages are handled strictly one after another, so each response is
/// written before the next line is read. Lines are read as raw bytes; invalid
/// UTF-8 is a parse error like any other undecodable line.
pub async fn serve_lines<R, W>(
    server: &McpServer,
    mut reader: R,
    mut writer: W,
) -> TransportResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(MAX_LINE_BYTES as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            break;
        }

        let response = if buf.len() > MAX_LINE_BYTES && buf.last() != Some(&b'\n') {
            skip_line(&mut reader).await?;
            warn!("Discarding message longer than {} bytes", MAX_LINE_BYTES);
            Some(JsonRpcResponse::invalid_request(
                Value::Null,
                format!("Invalid Request: message exceeds {} bytes", MAX_LINE_BYTES),
            ))
        } else {
            let line = buf.trim_ascii();
            if line.is_empty() {
                continue;
            }
            handle_message(server, line).await
        };

        if let Some(response) = response {
            let mut payload = serde_json::to_vec(&response)?;
            payload.push(b'\n');
            writer.write_all(&payload).await?;
            writer.flush().await?;
        }
    }

    debug!("Input stream closed");
    Ok(())
}

/// Drop everything up to and including the next newline.
async fn skip_line<R>(reader: &mut R) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        let (found, used) = {
            let available = reader.fill_buf().await?;
            if available.is_empty() {
                return Ok(());
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(i) => (true, i + 1),
                None => (false, available.len()),
            }
        };
        reader.consume(used);
        if found {
            return Ok(());
        }
    }
}

/// Decode one line and produce its response, if it needs one.
///
/// Notifications (messages without an `id`) are handled but never answered.
pub async fn handle_message(server: &McpServer, line: &[u8]) -> Option<JsonRpcResponse> {
    let value: Value = match serde_json::from_slice(line) {
        Ok(value) => value,
        Err(e) => {
            warn!("Discarding unparseable message: {}", e);
            return Some(JsonRpcResponse::parse_error(format!("Parse error: {}", e)));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: JsonRpcRequest = match serde_json::from_value(value) {
        Ok(request) => request,
        Err(e) => {
            warn!("Discarding invalid request: {}", e);
            return Some(JsonRpcResponse::invalid_request(
                id,
                format!("Invalid Request: {}", e),
            ));
        }
    };

    if request.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::invalid_request(
            id,
            "Invalid Request: jsonrpc must be \"2.0\"",
        ));
    }

    match request.id.clone() {
        Some(id) => Some(process_request(server, id, request).await),
        None => {
            handle_notification(&request);
            None
        }
    }
}

/// Process a JSON-RPC request and return the response.
#[instrument(skip_all, fields(method = %request.method))]
async fn process_request(
    server: &McpServer,
    id: Value,
    request: JsonRpcRequest,
) -> JsonRpcResponse {
    debug!("Received JSON-RPC request");

    match request.method.as_str() {
        "initialize" => handle_initialize(server, id, request.params),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => handle_tools_list(server, id),
        "tools/call" => handle_tools_call(server, id, request.params).await,
        method => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::method_not_found(id, method)
        }
    }
}

/// Handle initialize request.
fn handle_initialize(server: &McpServer, id: Value, params: Option<Value>) -> JsonRpcResponse {
    info!("Processing initialize request");

    let protocol_version = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_PROTOCOL_VERSION)
        .to_string();

    let result = json!({
        "protocolVersion": protocol_version,
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": server.name(),
            "version": server.version()
        },
        "instructions": INSTRUCTIONS
    });

    JsonRpcResponse::success(id, result)
}

/// Handle tools/list request.
fn handle_tools_list(server: &McpServer, id: Value) -> JsonRpcResponse {
    info!("Processing tools/list request");

    match serde_json::to_value(server.list_tools()) {
        Ok(tools) => JsonRpcResponse::success(id, json!({ "tools": tools })),
        Err(e) => JsonRpcResponse::internal_error(id, e.to_string()),
    }
}

/// Handle tools/call request.
async fn handle_tools_call(
    server: &McpServer,
    id: Value,
    params: Option<Value>,
) -> JsonRpcResponse {
    let params = match params {
        Some(p) => p,
        None => return JsonRpcResponse::invalid_params(id, "Missing params"),
    };

    let params: CallToolRequestParam = match serde_json::from_value(params) {
        Ok(p) => p,
        Err(e) => return JsonRpcResponse::invalid_params(id, format!("Invalid params: {}", e)),
    };

    info!("Processing tools/call request: {}", params.name);
    let arguments = params.arguments.unwrap_or_else(JsonObject::new);
    let result = server.call_tool(&params.name, arguments).await;

    match serde_json::to_value(result) {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) => JsonRpcResponse::internal_error(id, e.to_string()),
    }
}

/// Handle notifications (no response needed).
fn handle_notification(request: &JsonRpcRequest) {
    match request.method.as_str() {
        "notifications/initialized" => info!("Client sent initialized notification"),
        "notifications/cancelled" => debug!("Client cancelled a request"),
        method => debug!("Received notification: {}", method),
    }
}
