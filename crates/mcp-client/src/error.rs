//! Error taxonomy for MCP operations.

/// Errors specific to MCP operations.
///
/// Only `Config` ever reaches callers of the public API directly (from
/// [`crate::transport::build_transport`]); the manager and adapter swallow
/// the rest per server or per call.
#[derive(Debug, thiserror::Error)]
pub enum McpError {
    /// Invalid or incomplete server configuration.
    #[error("invalid MCP server config: {0}")]
    Config(String),

    /// The server is unreachable or the session failed to open.
    #[error("connection failed: {0}")]
    Connect(String),

    /// Tool discovery failed after the session opened.
    #[error("tool discovery failed: {0}")]
    Discovery(String),

    /// A remote tool call failed.
    #[error("tool call failed: {0}")]
    Call(String),

    /// Closing a session failed.
    #[error("shutdown failed: {0}")]
    Shutdown(String),
}

impl From<McpError> for wren_domain::Error {
    fn from(e: McpError) -> Self {
        wren_domain::Error::Other(e.to_string())
    }
}
