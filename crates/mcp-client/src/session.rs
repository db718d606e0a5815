//! MCP session layer.
//!
//! [`McpSession`] is the contract this crate needs from a live server
//! connection: list the advertised tools, call one, hang up. The wire
//! protocol behind it is not ours: [`RmcpSession`] implements the contract
//! on top of the `rmcp` SDK, and tests swap in mock sessions through
//! [`SessionFactory`].

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::CallToolRequestParam;
use rmcp::service::{Peer, RoleClient, RunningService};
use rmcp::transport::streamable_http_client::{
    StreamableHttpClientTransport, StreamableHttpClientTransportConfig,
};
use rmcp::transport::{ConfigureCommandExt, TokioChildProcess};
use rmcp::ServiceExt;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::process::Command;
use tokio::sync::Mutex;

use crate::error::McpError;
use crate::transport::TransportDescriptor;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Wire-adjacent types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A single tool definition advertised by an MCP server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct McpToolDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_schema")]
    pub input_schema: Value,
}

pub(crate) fn default_schema() -> Value {
    serde_json::json!({ "type": "object", "properties": {} })
}

/// One unit of a tool call's response payload.
///
/// Servers reply with a sequence of typed content items; everything that is
/// not a text item is carried as its raw JSON value.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentBlock {
    Text(String),
    Generic(Value),
}

impl ContentBlock {
    /// Classify one wire content item by its `type` tag.
    pub fn from_value(value: Value) -> Self {
        if value.get("type").and_then(Value::as_str) == Some("text") {
            if let Some(text) = value.get("text").and_then(Value::as_str) {
                return Self::Text(text.to_owned());
            }
        }
        Self::Generic(value)
    }

    /// Render the block as plain text.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Generic(value) => value.to_string(),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Session contract
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// A live connection to one MCP server.
#[async_trait]
pub trait McpSession: Send + Sync {
    /// Discover the tools the server advertises.
    async fn list_tools(&self) -> Result<Vec<McpToolDef>, McpError>;

    /// Call a tool by its server-local name.
    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Vec<ContentBlock>, McpError>;

    /// Close the connection. Idempotent: closing twice is a no-op.
    async fn disconnect(&self) -> Result<(), McpError>;
}

/// Opens sessions from transport descriptors.
///
/// The manager only ever talks to this trait, so tests can inject mock
/// sessions without any network or child processes.
#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn connect(
        &self,
        server_name: &str,
        transport: &TransportDescriptor,
    ) -> Result<Arc<dyn McpSession>, McpError>;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// rmcp-backed implementation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Production [`SessionFactory`] backed by the `rmcp` SDK.
pub struct RmcpSessionFactory;

#[async_trait]
impl SessionFactory for RmcpSessionFactory {
    async fn connect(
        &self,
        server_name: &str,
        transport: &TransportDescriptor,
    ) -> Result<Arc<dyn McpSession>, McpError> {
        let service = match transport {
            TransportDescriptor::Stdio { command, args, env } => {
                let cmd = Command::new(command).configure(|cmd| {
                    cmd.args(args);
                    for (key, value) in env {
                        cmd.env(key, value);
                    }
                });
                let transport = TokioChildProcess::new(cmd)
                    .map_err(|e| McpError::Connect(format!("spawning '{command}': {e}")))?;
                ().serve(transport)
                    .await
                    .map_err(|e| McpError::Connect(e.to_string()))?
            }
            TransportDescriptor::Http { url, headers } => {
                let client = http_client(headers)?;
                let transport = StreamableHttpClientTransport::with_client(
                    client,
                    StreamableHttpClientTransportConfig::with_uri(url.clone()),
                );
                ().serve(transport)
                    .await
                    .map_err(|e| McpError::Connect(e.to_string()))?
            }
        };

        tracing::debug!(server = %server_name, "MCP session established");
        Ok(Arc::new(RmcpSession::new(service)))
    }
}

/// Build a reqwest client that sends the configured headers on every
/// request (bearer tokens and the like).
fn http_client(headers: &HashMap<String, String>) -> Result<reqwest::Client, McpError> {
    let mut header_map = reqwest::header::HeaderMap::new();
    for (key, value) in headers {
        let name = reqwest::header::HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| McpError::Config(format!("invalid header name '{key}': {e}")))?;
        let value = reqwest::header::HeaderValue::from_str(value)
            .map_err(|e| McpError::Config(format!("invalid value for header '{key}': {e}")))?;
        header_map.insert(name, value);
    }
    reqwest::Client::builder()
        .default_headers(header_map)
        .build()
        .map_err(|e| McpError::Connect(e.to_string()))
}

/// [`McpSession`] over a running `rmcp` client service.
///
/// The peer handle is cheap to clone and supports concurrent requests, so
/// tool calls never contend on a lock; the service handle itself is kept
/// only so `disconnect` can cancel it once.
pub struct RmcpSession {
    peer: Peer<RoleClient>,
    service: Mutex<Option<RunningService<RoleClient, ()>>>,
}

impl RmcpSession {
    fn new(service: RunningService<RoleClient, ()>) -> Self {
        Self {
            peer: service.peer().clone(),
            service: Mutex::new(Some(service)),
        }
    }
}

/// The slice of a `tools/call` result this crate consumes.
#[derive(Debug, Deserialize)]
struct RawCallResult {
    #[serde(default)]
    content: Vec<Value>,
    #[serde(default, rename = "isError")]
    is_error: Option<bool>,
}

#[async_trait]
impl McpSession for RmcpSession {
    async fn list_tools(&self) -> Result<Vec<McpToolDef>, McpError> {
        let tools = self
            .peer
            .list_all_tools()
            .await
            .map_err(|e| McpError::Discovery(e.to_string()))?;

        Ok(tools
            .into_iter()
            .map(|tool| McpToolDef {
                name: tool.name.to_string(),
                description: tool
                    .description
                    .as_deref()
                    .unwrap_or_default()
                    .to_string(),
                input_schema: Value::Object((*tool.input_schema).clone()),
            })
            .collect())
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Result<Vec<ContentBlock>, McpError> {
        let arguments = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(McpError::Call(format!(
                    "arguments must be a JSON object, got: {other}"
                )))
            }
        };

        let result = self
            .peer
            .call_tool(CallToolRequestParam {
                name: name.to_owned().into(),
                arguments,
            })
            .await
            .map_err(|e| McpError::Call(e.to_string()))?;

        // Go through serde_json so only the wire shape of the result is
        // relied on, not the SDK's own content types.
        let raw: RawCallResult = serde_json::to_value(&result)
            .and_then(serde_json::from_value)
            .map_err(|e| McpError::Call(format!("unparsable tools/call result: {e}")))?;

        let blocks: Vec<ContentBlock> = raw.content.into_iter().map(ContentBlock::from_value).collect();

        // Servers report tool-level failures in-band via `isError`; surface
        // them as call errors carrying the reported text.
        if raw.is_error.unwrap_or(false) {
            let detail = blocks
                .iter()
                .map(ContentBlock::render)
                .collect::<Vec<_>>()
                .join("\n");
            return Err(McpError::Call(if detail.is_empty() {
                "tool reported an error".into()
            } else {
                detail
            }));
        }

        Ok(blocks)
    }

    async fn disconnect(&self) -> Result<(), McpError> {
        let service = self.service.lock().await.take();
        match service {
            Some(service) => service
                .cancel()
                .await
                .map(|_| ())
                .map_err(|e| McpError::Shutdown(e.to_string())),
            None => Ok(()),
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Tests
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_block_is_discriminated_by_type_tag() {
        let block = ContentBlock::from_value(serde_json::json!({
            "type": "text",
            "text": "hello"
        }));
        assert_eq!(block, ContentBlock::Text("hello".into()));
        assert_eq!(block.render(), "hello");
    }

    #[test]
    fn non_text_block_falls_back_to_generic() {
        let value = serde_json::json!({ "type": "image", "data": "aGk=", "mimeType": "image/png" });
        let block = ContentBlock::from_value(value.clone());
        assert_eq!(block, ContentBlock::Generic(value));
        assert!(block.render().contains("image/png"));
    }

    #[test]
    fn text_block_without_text_field_is_generic() {
        let value = serde_json::json!({ "type": "text" });
        assert!(matches!(
            ContentBlock::from_value(value),
            ContentBlock::Generic(_)
        ));
    }

    #[test]
    fn tool_def_defaults_apply() {
        let def: McpToolDef = serde_json::from_str(r#"{ "name": "ping" }"#).unwrap();
        assert_eq!(def.name, "ping");
        assert_eq!(def.description, "");
        assert_eq!(def.input_schema, default_schema());
    }

    #[test]
    fn tool_def_parses_camel_case_schema() {
        let raw = r#"{
            "name": "read_file",
            "description": "Read a file",
            "inputSchema": {
                "type": "object",
                "properties": { "path": { "type": "string" } }
            }
        }"#;
        let def: McpToolDef = serde_json::from_str(raw).unwrap();
        assert_eq!(def.description, "Read a file");
        assert!(def.input_schema["properties"].get("path").is_some());
    }
}
