//! MCP (Model Context Protocol) configuration types.
//!
//! These are lightweight config structs used to deserialize the `[mcp]`
//! section of the config file. The actual client logic lives in the
//! `wren-mcp-client` crate.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Transport value for servers reached over HTTP.
pub const TRANSPORT_HTTP: &str = "http";
/// Transport value for servers spawned as a child process.
pub const TRANSPORT_STDIO: &str = "stdio";

/// Top-level MCP configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct McpConfig {
    /// Server definitions, keyed by server name. The key doubles as the
    /// namespace in tool naming (`mcp__{server}__{tool}`), so it must be
    /// unique — which the map guarantees.
    #[serde(default)]
    pub servers: BTreeMap<String, McpServerConfig>,
}

/// Configuration for a single MCP server connection.
///
/// Only the field group matching `type` is used: `url` + `headers` for
/// `"http"`, `command` + `args` + `env` for `"stdio"`. The other group
/// keeps its empty default and is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpServerConfig {
    /// Disabled servers are skipped entirely at startup.
    #[serde(default = "d_enabled")]
    pub enabled: bool,

    /// Transport type: `"http"` or `"stdio"`.
    ///
    /// Deliberately a free string rather than an enum so that an
    /// unrecognized value survives parsing and is rejected with a proper
    /// error when the transport is built.
    #[serde(default = "d_transport", rename = "type")]
    pub transport: String,

    /// Server URL (http transport).
    #[serde(default)]
    pub url: String,

    /// Extra request headers, e.g. for bearer tokens (http transport).
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// The command to spawn, e.g. `"npx"` (stdio transport).
    #[serde(default)]
    pub command: String,

    /// Arguments to pass to the command (stdio transport).
    #[serde(default)]
    pub args: Vec<String>,

    /// Environment variables to set on the spawned process (stdio transport).
    #[serde(default)]
    pub env: HashMap<String, String>,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            enabled: d_enabled(),
            transport: d_transport(),
            url: String::new(),
            headers: HashMap::new(),
            command: String::new(),
            args: Vec::new(),
            env: HashMap::new(),
        }
    }
}

fn d_enabled() -> bool {
    true
}

fn d_transport() -> String {
    TRANSPORT_HTTP.into()
}
