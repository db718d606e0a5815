//! Transport selection — turns a server's declarative config into a
//! concrete transport descriptor, or fails fast when the config is
//! structurally invalid.

use std::collections::HashMap;

use wren_domain::config::{McpServerConfig, TRANSPORT_HTTP, TRANSPORT_STDIO};

use crate::error::McpError;

/// A fully resolved way to reach an MCP server.
///
/// Each variant carries exactly the fields its transport needs; containers
/// are always concrete (possibly empty), so downstream code never has to
/// null-check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportDescriptor {
    /// Streamable-HTTP endpoint.
    Http {
        url: String,
        headers: HashMap<String, String>,
    },
    /// Child process speaking MCP over stdin/stdout.
    Stdio {
        command: String,
        args: Vec<String>,
        env: HashMap<String, String>,
    },
}

/// Build the transport descriptor for one configured server.
///
/// Pure validation and construction; no side effects. `name` is only used
/// in error messages.
pub fn build_transport(
    name: &str,
    config: &McpServerConfig,
) -> Result<TransportDescriptor, McpError> {
    match config.transport.as_str() {
        TRANSPORT_HTTP => {
            if config.url.is_empty() {
                return Err(McpError::Config(format!(
                    "MCP server '{name}': http transport requires a 'url'"
                )));
            }
            Ok(TransportDescriptor::Http {
                url: config.url.clone(),
                headers: config.headers.clone(),
            })
        }
        TRANSPORT_STDIO => {
            if config.command.is_empty() {
                return Err(McpError::Config(format!(
                    "MCP server '{name}': stdio transport requires a 'command'"
                )));
            }
            Ok(TransportDescriptor::Stdio {
                command: config.command.clone(),
                args: config.args.clone(),
                env: config.env.clone(),
            })
        }
        other => Err(McpError::Config(format!(
            "MCP server '{name}': unsupported transport type '{other}' \
             (expected '{TRANSPORT_HTTP}' or '{TRANSPORT_STDIO}')"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_config(url: &str) -> McpServerConfig {
        McpServerConfig {
            url: url.into(),
            ..Default::default()
        }
    }

    fn stdio_config(command: &str) -> McpServerConfig {
        McpServerConfig {
            transport: TRANSPORT_STDIO.into(),
            command: command.into(),
            ..Default::default()
        }
    }

    #[test]
    fn http_descriptor_carries_url_and_headers() {
        let mut config = http_config("http://localhost:8000/mcp");
        config.headers.insert("X-Key".into(), "val".into());

        let descriptor = build_transport("test", &config).unwrap();
        match descriptor {
            TransportDescriptor::Http { url, headers } => {
                assert_eq!(url, "http://localhost:8000/mcp");
                assert_eq!(headers["X-Key"], "val");
            }
            other => panic!("expected http descriptor, got {other:?}"),
        }
    }

    #[test]
    fn http_headers_default_empty() {
        let descriptor = build_transport("test", &http_config("http://x/mcp")).unwrap();
        match descriptor {
            TransportDescriptor::Http { headers, .. } => assert!(headers.is_empty()),
            other => panic!("expected http descriptor, got {other:?}"),
        }
    }

    #[test]
    fn stdio_descriptor_carries_command_args_env() {
        let mut config = stdio_config("python");
        config.args = vec!["server.py".into(), "--verbose".into()];
        config.env.insert("API_KEY".into(), "secret".into());

        let descriptor = build_transport("test", &config).unwrap();
        match descriptor {
            TransportDescriptor::Stdio { command, args, env } => {
                assert_eq!(command, "python");
                assert_eq!(args, vec!["server.py", "--verbose"]);
                assert_eq!(env["API_KEY"], "secret");
            }
            other => panic!("expected stdio descriptor, got {other:?}"),
        }
    }

    #[test]
    fn stdio_args_and_env_default_empty() {
        let descriptor = build_transport("test", &stdio_config("node")).unwrap();
        match descriptor {
            TransportDescriptor::Stdio { args, env, .. } => {
                assert!(args.is_empty());
                assert!(env.is_empty());
            }
            other => panic!("expected stdio descriptor, got {other:?}"),
        }
    }

    #[test]
    fn http_without_url_fails() {
        let err = build_transport("test", &http_config("")).unwrap_err();
        assert!(matches!(err, McpError::Config(_)));
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn stdio_without_command_fails() {
        let err = build_transport("test", &stdio_config("")).unwrap_err();
        assert!(matches!(err, McpError::Config(_)));
        assert!(err.to_string().contains("command"));
    }

    #[test]
    fn unknown_transport_fails() {
        let config = McpServerConfig {
            transport: "websocket".into(),
            ..Default::default()
        };
        let err = build_transport("test", &config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("unsupported"));
        assert!(message.contains("websocket"));
    }
}
