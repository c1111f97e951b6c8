//! JSON-RPC request handling

use crate::config::ServerConfig;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tensio_core::{codes, TensioError};
use tensio_plugin::{ToolContext, ToolRegistry};
use tracing::{debug, info, warn};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
const SERVER_NAME: &str = "tensio";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpResponse {
    pub fn error(id: Option<JsonValue>, error: McpError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into(), data: None }
    }

    pub fn parse_error(details: impl std::fmt::Display) -> Self {
        Self::new(PARSE_ERROR, format!("Parse error: {}", details))
    }
}

impl From<TensioError> for McpError {
    fn from(err: TensioError) -> Self {
        let code = if err.code == codes::INTERNAL { INTERNAL_ERROR } else { INVALID_PARAMS };
        Self {
            code,
            message: err.to_string(),
            data: serde_json::to_value(&err).ok(),
        }
    }
}

/// Stateless request handler over the tool registry
pub struct Server {
    registry: ToolRegistry,
    settings: JsonValue,
}

impl Server {
    pub fn new(config: &ServerConfig) -> Self {
        let registry = tensio_stats::load_stats_tools(ToolRegistry::new());
        let registry = tensio_insights::load_insight_tools(registry);
        info!(tools = registry.len(), "tool registry loaded");
        Self {
            registry,
            settings: config.tool_settings(),
        }
    }

    /// Response for one request; `None` for notifications
    pub fn handle(&self, request: &McpRequest) -> Option<McpResponse> {
        debug!(method = %request.method, "processing");
        let response = self.handle_request(request);

        // Notifications (no id) get no response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(response)
    }

    fn handle_request(&self, request: &McpRequest) -> McpResponse {
        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError::new(METHOD_NOT_FOUND, format!("Method not found: {}", request.method))),
        };

        match result {
            Ok(r) => McpResponse {
                jsonrpc: "2.0".to_string(),
                id: request.id.clone(),
                result: Some(r),
                error: None,
            },
            Err(e) => McpResponse::error(request.id.clone(), e),
        }
    }

    fn handle_tools_list(&self) -> JsonValue {
        let mut tools = self.registry.tool_schemas();
        tools.push(json!({
            "name": "help",
            "description": "Documentation for a tool, or an overview of all tools by category.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "description": "Tool name. Omit for general help." }
                }
            }
        }));
        tools.push(json!({
            "name": "list_tools",
            "description": "List available tools, optionally filtered by category (e.g. 'stats', 'insights/correlation').",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "category": { "type": "string", "description": "Category or category prefix" }
                }
            }
        }));
        json!({ "tools": tools })
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params
            .as_ref()
            .ok_or_else(|| McpError::new(INVALID_PARAMS, "Missing params"))?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::new(INVALID_PARAMS, "Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        let output = match name {
            "help" => self.registry.help(args.get("name").and_then(|v| v.as_str()))?,
            "list_tools" => self.registry.list_tools(args.get("category").and_then(|v| v.as_str())),
            _ => {
                let ctx = ToolContext::new(Utc::now()).with_settings(self.settings.clone());
                self.registry.call_tool(name, &args, &ctx).map_err(|e| {
                    warn!(tool = name, code = %e.code, "tool call failed");
                    e
                })?
            }
        };

        let text = serde_json::to_string_pretty(&output)
            .map_err(|e| McpError::from(TensioError::internal(e.to_string())))?;

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "structuredContent": { "result": output },
            "isError": false
        }))
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params
        .as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params
        .as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": "Blood-pressure statistics and health insights"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Tensio analyses blood-pressure readings alongside exercise, diet and medication logs. \
                         Use 'help' for tool documentation. Timestamps are RFC 3339; days are UTC calendar days. \
                         Predictive insights are heuristic estimates, not medical advice."
    }))
}
