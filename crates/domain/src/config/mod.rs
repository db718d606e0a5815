mod mcp;

pub use mcp::*;

use serde::{Deserialize, Serialize};
use std::fmt;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub mcp: McpConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// This only checks the static shape. Whether a configured server is
    /// actually reachable is decided at connect time, where failures are
    /// tolerated per server.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (name, server) in &self.mcp.servers {
            if !server.enabled {
                continue;
            }
            match server.transport.as_str() {
                TRANSPORT_HTTP => {
                    if server.url.is_empty() {
                        errors.push(ConfigError {
                            severity: ConfigSeverity::Error,
                            field: format!("mcp.servers.{name}.url"),
                            message: "http transport requires a 'url'".into(),
                        });
                    }
                }
                TRANSPORT_STDIO => {
                    if server.command.is_empty() {
                        errors.push(ConfigError {
                            severity: ConfigSeverity::Error,
                            field: format!("mcp.servers.{name}.command"),
                            message: "stdio transport requires a 'command'".into(),
                        });
                    }
                }
                other => {
                    errors.push(ConfigError {
                        severity: ConfigSeverity::Error,
                        field: format!("mcp.servers.{name}.type"),
                        message: format!(
                            "unsupported transport type '{other}' (expected '{TRANSPORT_HTTP}' or '{TRANSPORT_STDIO}')"
                        ),
                    });
                }
            }
        }

        errors
    }
}
