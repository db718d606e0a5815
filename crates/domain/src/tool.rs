//! The `Tool` trait — the single calling interface the agent runtime sees.
//!
//! Both built-in tools (`wren-tools`) and MCP tool adapters
//! (`wren-mcp-client`) implement this trait; the registry stores them as
//! `Arc<dyn Tool>` and never inspects the concrete type.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Tool definition exposed to the LLM / orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema for the tool's parameters.
    pub parameters: Value,
}

/// A callable tool.
///
/// `execute` takes the arguments as one JSON object and returns plain text;
/// the agent loop feeds that text straight back into the conversation, so
/// implementations should produce something a model can read.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique tool name. Stable across calls.
    fn name(&self) -> &str;

    /// Human-readable description. Must not be empty.
    fn description(&self) -> &str;

    /// JSON Schema describing the accepted arguments (always object-typed).
    fn parameters(&self) -> Value;

    /// Run the tool with the given arguments.
    async fn execute(&self, arguments: Value) -> Result<String>;

    /// The definition handed to the orchestrator.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_owned(),
            description: self.description().to_owned(),
            parameters: self.parameters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Greeter;

    #[async_trait]
    impl Tool for Greeter {
        fn name(&self) -> &str {
            "greet"
        }

        fn description(&self) -> &str {
            "Say hello"
        }

        fn parameters(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            })
        }

        async fn execute(&self, arguments: Value) -> Result<String> {
            let name = arguments
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or("world");
            Ok(format!("Hello, {name}!"))
        }
    }

    #[test]
    fn definition_mirrors_accessors() {
        let def = Greeter.definition();
        assert_eq!(def.name, "greet");
        assert_eq!(def.description, "Say hello");
        assert_eq!(def.parameters["type"], "object");
        assert!(def.parameters["properties"].get("name").is_some());
    }

    #[tokio::test]
    async fn execute_returns_text() {
        let out = Greeter
            .execute(serde_json::json!({ "name": "Alice" }))
            .await
            .unwrap();
        assert_eq!(out, "Hello, Alice!");
    }
}
