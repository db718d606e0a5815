//! Tool registry — stores tools by name and dispatches calls.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use wren_domain::{Error, Result, Tool, ToolDefinition};

/// Name-keyed collection of tools.
///
/// Keys come from `Tool::name`, so MCP adapters (whose names are namespaced
/// per server) can never collide with built-ins or with each other. Kept in
/// a `BTreeMap` so `definitions()` is deterministic.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name replaces the previous one.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_owned();
        if self.tools.insert(name.clone(), tool).is_some() {
            tracing::warn!(tool = %name, "tool registered twice, replacing previous entry");
        }
    }

    /// Register every tool from an iterator.
    pub fn extend<I>(&mut self, tools: I)
    where
        I: IntoIterator<Item = Arc<dyn Tool>>,
    {
        for tool in tools {
            self.register(tool);
        }
    }

    pub fn has(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Definitions for every registered tool, in name order.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Dispatch a call to the named tool.
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<String> {
        let tool = self
            .get(name)
            .ok_or_else(|| Error::ToolNotFound(name.to_owned()))?;
        tool.execute(arguments).await
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct Upper;

    #[async_trait]
    impl Tool for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn description(&self) -> &str {
            "Uppercase the input text"
        }

        fn parameters(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": { "text": { "type": "string" } },
                "required": ["text"]
            })
        }

        async fn execute(&self, arguments: Value) -> Result<String> {
            let text = arguments
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default();
            Ok(text.to_uppercase())
        }
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Arc::new(Upper));
        assert!(registry.has("upper"));
        assert!(!registry.has("lower"));
        assert_eq!(registry.len(), 1);

        let defs = registry.definitions();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "upper");
        assert_eq!(defs[0].parameters["type"], "object");
    }

    #[tokio::test]
    async fn execute_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Upper));

        let out = registry
            .execute("upper", serde_json::json!({ "text": "hi" }))
            .await
            .unwrap();
        assert_eq!(out, "HI");
    }

    #[tokio::test]
    async fn execute_unknown_tool_errors() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("missing", serde_json::json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(name) if name == "missing"));
    }

    #[test]
    fn duplicate_registration_replaces() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(Upper));
        registry.register(Arc::new(Upper));
        assert_eq!(registry.len(), 1);
    }
}
