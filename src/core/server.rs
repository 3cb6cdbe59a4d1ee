//! MCP Server implementation and lifecycle management.
//!
//! `McpServer` is the process-wide state: configuration plus the read-only
//! tool registry. It is built once at startup and shared by reference (or a
//! cheap clone) with every transport connection.

use std::sync::Arc;

use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use super::config::Config;
use super::error::Result;
use crate::domains::tools::{
    ToolOutcome, ToolRegistry, build_tool_registry, definitions::HttpFetcher,
};

/// Instructions sent to clients during initialization.
pub const INSTRUCTIONS: &str =
    "Weather MCP server. Use get_current_weather with a latitude and longitude to \
     retrieve the current conditions reported by Open-Meteo.";

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, read-only after startup.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// Tools are wired to a real HTTP fetcher against the configured provider.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = Arc::new(HttpFetcher::new()?);
        let registry = build_tool_registry(&config, fetcher)?;
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already built registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(registry),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.to_tools()
    }

    /// Call a tool by name.
    ///
    /// Unknown tools and arguments that do not match the tool's schema are
    /// reported as failed tool results; the handler is only reached with
    /// validated arguments.
    pub async fn call_tool(&self, name: &str, arguments: JsonObject) -> CallToolResult {
        self.invoke(name, arguments).await.into()
    }

    async fn invoke(&self, name: &str, arguments: JsonObject) -> ToolOutcome {
        let tool = match self.registry.resolve(name) {
            Ok(tool) => tool,
            Err(e) => {
                warn!("{}", e);
                return ToolOutcome::failure(e.to_string());
            }
        };

        if let Err(e) = tool.descriptor().validate(&arguments) {
            warn!("Rejected call to {}: {}", name, e);
            return ToolOutcome::failure(e.to_string());
        }

        info!("Invoking tool: {}", name);
        tool.execute(arguments).await
    }
}
