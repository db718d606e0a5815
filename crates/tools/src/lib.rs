//! Built-in tools and the tool registry for Wren.
//!
//! The registry is the single dispatch point the agent runtime talks to:
//! it holds every tool — built-ins from this crate and MCP adapters from
//! `wren-mcp-client` — behind the `Tool` trait and routes calls by name.

pub mod datetime;
pub mod registry;

pub use datetime::DateTimeTool;
pub use registry::ToolRegistry;
