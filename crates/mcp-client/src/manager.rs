//! MCP manager — owns all MCP server connections and orchestrates tool
//! discovery and teardown.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures_util::StreamExt;
use parking_lot::RwLock;

use wren_domain::config::{McpConfig, McpServerConfig};

use crate::adapter::McpToolAdapter;
use crate::session::{McpSession, RmcpSessionFactory, SessionFactory};
use crate::transport::build_transport;

/// How many servers are connected and discovered at the same time.
const MAX_CONCURRENT_CONNECTS: usize = 4;

#[derive(Default)]
struct ManagerState {
    started: bool,
    /// server name -> live session (shared with that server's adapters).
    sessions: BTreeMap<String, Arc<dyn McpSession>>,
    /// Adapters from the most recent start, in server order.
    tools: Vec<Arc<McpToolAdapter>>,
}

/// Manages connections to one or more MCP servers.
///
/// [`start`](Self::start) connects to every *enabled* server in the config,
/// discovers their tools, and returns one [`McpToolAdapter`] per tool.
/// Servers that fail to connect or discover are logged and skipped; they
/// never abort startup of the others. [`stop`](Self::stop) tears down all
/// connections best-effort.
pub struct McpManager {
    config: McpConfig,
    factory: Arc<dyn SessionFactory>,
    /// Serializes start/stop so concurrent callers cannot race to open
    /// duplicate connections.
    start_lock: tokio::sync::Mutex<()>,
    /// Published atomically: readers never observe a half-built tool list.
    state: RwLock<ManagerState>,
}

impl McpManager {
    /// Create a manager that connects through the `rmcp` SDK.
    pub fn new(config: McpConfig) -> Self {
        Self::with_factory(config, Arc::new(RmcpSessionFactory))
    }

    /// Create a manager with a custom session factory.
    pub fn with_factory(config: McpConfig, factory: Arc<dyn SessionFactory>) -> Self {
        Self {
            config,
            factory,
            start_lock: tokio::sync::Mutex::new(()),
            state: RwLock::new(ManagerState::default()),
        }
    }

    // -- public API ---------------------------------------------------------

    /// Connect to all enabled servers and return the discovered tools.
    ///
    /// Idempotent: once started, returns the cached adapter list without
    /// reconnecting. Never fails; a server with a broken config or a dead
    /// endpoint just contributes zero tools.
    pub async fn start(&self) -> Vec<Arc<McpToolAdapter>> {
        let _guard = self.start_lock.lock().await;

        if self.state.read().started {
            return self.state.read().tools.clone();
        }

        let enabled: Vec<(&String, &McpServerConfig)> = self
            .config
            .servers
            .iter()
            .filter(|(name, server)| {
                if !server.enabled {
                    tracing::info!(server = %name, "MCP server is disabled, skipping");
                }
                server.enabled
            })
            .collect();

        // Connect and discover per server, a few at a time; `buffered` keeps
        // the results in config order.
        let results: Vec<(String, Option<(Arc<dyn McpSession>, Vec<Arc<McpToolAdapter>>)>)> =
            futures_util::stream::iter(enabled)
                .map(|(name, server)| async move {
                    (name.clone(), self.start_server(name, server).await)
                })
                .buffered(MAX_CONCURRENT_CONNECTS)
                .collect()
                .await;

        let mut sessions = BTreeMap::new();
        let mut tools = Vec::new();
        for (name, outcome) in results {
            if let Some((session, adapters)) = outcome {
                sessions.insert(name, session);
                tools.extend(adapters);
            }
        }

        let mut state = self.state.write();
        state.sessions = sessions;
        state.tools = tools.clone();
        state.started = true;
        drop(state);

        tools
    }

    /// Disconnect all sessions and reset to the initial state.
    ///
    /// Close failures are logged; the session map and tool list are cleared
    /// regardless.
    pub async fn stop(&self) {
        let _guard = self.start_lock.lock().await;

        let sessions: Vec<(String, Arc<dyn McpSession>)> = {
            let state = self.state.read();
            state
                .sessions
                .iter()
                .map(|(name, session)| (name.clone(), session.clone()))
                .collect()
        };

        let closes = sessions.iter().map(|(name, session)| async move {
            if let Err(e) = session.disconnect().await {
                tracing::debug!(server = %name, error = %e, "error closing MCP session");
            }
        });
        futures_util::future::join_all(closes).await;

        let mut state = self.state.write();
        state.sessions.clear();
        state.tools.clear();
        state.started = false;
    }

    /// The adapters discovered by the last `start` (empty before any start).
    pub fn get_tools(&self) -> Vec<Arc<McpToolAdapter>> {
        self.state.read().tools.clone()
    }

    pub fn is_started(&self) -> bool {
        self.state.read().started
    }

    /// Number of currently connected servers.
    pub fn server_count(&self) -> usize {
        self.state.read().sessions.len()
    }

    /// Total number of discovered tools.
    pub fn tool_count(&self) -> usize {
        self.state.read().tools.len()
    }

    // -- internals ----------------------------------------------------------

    /// Connect one server and wrap its tools. Returns `None` on any failure
    /// so the caller can simply skip the server.
    async fn start_server(
        &self,
        name: &str,
        server: &McpServerConfig,
    ) -> Option<(Arc<dyn McpSession>, Vec<Arc<McpToolAdapter>>)> {
        let transport = match build_transport(name, server) {
            Ok(transport) => transport,
            Err(e) => {
                tracing::warn!(server = %name, error = %e, "invalid MCP server config, skipping");
                return None;
            }
        };

        let session = match self.factory.connect(name, &transport).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(server = %name, error = %e, "MCP server failed to connect");
                return None;
            }
        };

        let defs = match session.list_tools().await {
            Ok(defs) => defs,
            Err(e) => {
                tracing::warn!(server = %name, error = %e, "MCP tool discovery failed");
                // Don't leak a connected-but-useless session.
                if let Err(e) = session.disconnect().await {
                    tracing::debug!(server = %name, error = %e, "error closing MCP session");
                }
                return None;
            }
        };

        tracing::info!(server = %name, tool_count = defs.len(), "MCP server connected");

        let adapters = defs
            .into_iter()
            .map(|def| Arc::new(McpToolAdapter::new(name, def, session.clone())))
            .collect();

        Some((session, adapters))
    }
}
