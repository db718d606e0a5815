//! `wren` — command-line entry point.
//!
//! Assembles the tool registry (built-ins plus tools discovered from the
//! configured MCP servers) and exposes a few commands for inspecting and
//! exercising it.

use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wren_domain::config::{Config, ConfigSeverity};
use wren_mcp_client::McpManager;
use wren_tools::{DateTimeTool, ToolRegistry};

#[derive(Debug, Parser)]
#[command(name = "wren", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every available tool (built-ins and MCP servers).
    Tools,
    /// Call a tool by name and print its result.
    Call {
        /// Tool name, e.g. `datetime` or `mcp__files__read_file`.
        name: String,
        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Parse the config file and report any issues.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let (config, config_path) = load_config()?;

    match cli.command {
        Command::Tools => cmd_tools(config).await,
        Command::Call { name, args } => cmd_call(config, &name, &args).await,
        Command::Config(ConfigCommand::Validate) => cmd_validate(&config, &config_path),
        Command::Config(ConfigCommand::Show) => cmd_show(&config),
    }
}

/// Compact stderr-only tracing, so diagnostic output never pollutes stdout.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Load the config from `$WREN_CONFIG` (default `config.toml`), falling
/// back to defaults when the file does not exist.
fn load_config() -> anyhow::Result<(Config, String)> {
    let config_path = std::env::var("WREN_CONFIG").unwrap_or_else(|_| "config.toml".into());

    let config = if std::path::Path::new(&config_path).exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("reading {config_path}"))?;
        toml::from_str(&raw).with_context(|| format!("parsing {config_path}"))?
    } else {
        Config::default()
    };

    Ok((config, config_path))
}

/// Register built-ins and everything the MCP manager discovered.
async fn build_registry(config: Config) -> (ToolRegistry, McpManager) {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(DateTimeTool));

    let manager = McpManager::new(config.mcp);
    for adapter in manager.start().await {
        registry.register(adapter);
    }

    (registry, manager)
}

async fn cmd_tools(config: Config) -> anyhow::Result<()> {
    let (registry, manager) = build_registry(config).await;

    for def in registry.definitions() {
        println!("{:<40} {}", def.name, def.description);
    }

    manager.stop().await;
    Ok(())
}

async fn cmd_call(config: Config, name: &str, args: &str) -> anyhow::Result<()> {
    let arguments: serde_json::Value =
        serde_json::from_str(args).context("parsing --args as JSON")?;
    anyhow::ensure!(arguments.is_object(), "--args must be a JSON object");

    let (registry, manager) = build_registry(config).await;
    let result = registry.execute(name, arguments).await;
    manager.stop().await;

    println!("{}", result?);
    Ok(())
}

fn cmd_validate(config: &Config, config_path: &str) -> anyhow::Result<()> {
    let issues = config.validate();
    if issues.is_empty() {
        println!("{config_path}: OK");
        return Ok(());
    }

    for issue in &issues {
        println!("{issue}");
    }
    if issues
        .iter()
        .any(|i| i.severity == ConfigSeverity::Error)
    {
        std::process::exit(1);
    }
    Ok(())
}

fn cmd_show(config: &Config) -> anyhow::Result<()> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
