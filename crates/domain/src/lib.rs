//! `wren-domain` — shared types for the Wren workspace.
//!
//! Holds the pieces every other crate needs: the configuration tree, the
//! workspace-wide error type, and the `Tool` trait that both built-in tools
//! and MCP tool adapters implement.

pub mod config;
pub mod error;
pub mod tool;

pub use error::{Error, Result};
pub use tool::{Tool, ToolDefinition};
