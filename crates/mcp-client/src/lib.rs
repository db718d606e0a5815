//! `wren-mcp-client` — MCP (Model Context Protocol) tool integration.
//!
//! This crate connects Wren to external MCP tool servers and exposes every
//! tool they advertise through the same [`wren_domain::Tool`] interface as
//! built-in tools:
//!
//! - [`transport`] turns a server's declarative config into a concrete
//!   transport descriptor (HTTP endpoint or spawned child process).
//! - [`session`] defines the session contract (`connect` / `list_tools` /
//!   `call_tool` / `disconnect`) and implements it on top of the `rmcp` SDK,
//!   which owns the wire protocol.
//! - [`adapter`] wraps one remote tool as a `Tool` with a namespaced name
//!   and a normalized plain-text result.
//! - [`manager`] owns the per-server connections: it connects to every
//!   enabled server at startup, discovers tools, and tears everything down
//!   on stop. One unreachable server never takes the others down with it.
//!
//! # Usage
//!
//! ```rust,ignore
//! use wren_mcp_client::McpManager;
//!
//! let manager = McpManager::new(config.mcp.clone());
//! for tool in manager.start().await {
//!     registry.register(tool);
//! }
//! // ... dispatch calls through the registry ...
//! manager.stop().await;
//! ```

pub mod adapter;
pub mod error;
pub mod manager;
pub mod session;
pub mod transport;

// Re-exports for convenience.
pub use adapter::McpToolAdapter;
pub use error::McpError;
pub use manager::McpManager;
pub use session::{ContentBlock, McpSession, McpToolDef, SessionFactory};
pub use transport::{build_transport, TransportDescriptor};
