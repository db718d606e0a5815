//! MCP tool adapter — wraps one remote tool as a Wren [`Tool`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use wren_domain::{Result, Tool};

use crate::session::{default_schema, ContentBlock, McpSession, McpToolDef};

/// Adapts a single MCP server tool to the [`Tool`] interface.
///
/// The public name is namespaced as `mcp__{server}__{tool}` so it cannot
/// collide with built-in tools or with tools from other servers. All
/// adapters discovered on one server share that server's session.
pub struct McpToolAdapter {
    server_name: String,
    tool_name: String,
    name: String,
    description: String,
    parameters: Value,
    session: Arc<dyn McpSession>,
}

impl McpToolAdapter {
    pub fn new(server_name: &str, def: McpToolDef, session: Arc<dyn McpSession>) -> Self {
        let name = format!("mcp__{server_name}__{}", def.name);
        let description = if def.description.is_empty() {
            format!("MCP tool {} from server {server_name}", def.name)
        } else {
            def.description
        };
        let parameters = if def.input_schema.is_null() {
            default_schema()
        } else {
            def.input_schema
        };

        Self {
            server_name: server_name.to_owned(),
            tool_name: def.name,
            name,
            description,
            parameters,
            session,
        }
    }

    /// The server this tool came from.
    pub fn server_name(&self) -> &str {
        &self.server_name
    }

    /// The tool's original (server-local) name.
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }
}

#[async_trait]
impl Tool for McpToolAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters(&self) -> Value {
        self.parameters.clone()
    }

    /// Forward the call to the MCP server.
    ///
    /// Always resolves to `Ok`: remote failures become a descriptive error
    /// string, since the orchestrator consuming tool output expects text,
    /// not an error to handle.
    async fn execute(&self, arguments: Value) -> Result<String> {
        match self.session.call_tool(&self.tool_name, arguments).await {
            Ok(blocks) => {
                let parts: Vec<String> = blocks.iter().map(ContentBlock::render).collect();
                if parts.iter().all(String::is_empty) {
                    Ok("(empty result)".into())
                } else {
                    Ok(parts.join("\n"))
                }
            }
            Err(e) => {
                tracing::warn!(tool = %self.name, error = %e, "MCP tool execution failed");
                Ok(format!(
                    "Error calling tool '{}' on server '{}': {e}",
                    self.tool_name, self.server_name
                ))
            }
        }
    }
}
