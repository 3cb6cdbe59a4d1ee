//! Tool Registry - central registration and lookup for all tools.
//!
//! This module provides:
//! - Registration of tool handlers (unique by name)
//! - Lookup of a handler by name for dispatch
//! - Tool metadata for discovery

use std::sync::Arc;

use rmcp::model::Tool;
use tracing::{debug, warn};

use super::{ToolDescriptor, ToolError, ToolHandler};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - holds every tool the server advertises.
///
/// Tools are registered once at startup. After that the registry is only read,
/// so it can be shared behind an `Arc` without locking.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create an empty tool registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool.
    ///
    /// Fails with [`ToolError::Duplicate`] if a tool with the same name is
    /// already registered; the registry is left unchanged in that case.
    pub fn register(&mut self, tool: Arc<dyn ToolHandler>) -> Result<(), ToolError> {
        let name = tool.descriptor().name();
        if self.tools.iter().any(|t| t.descriptor().name() == name) {
            warn!("Refusing to register duplicate tool: {}", name);
            return Err(ToolError::duplicate(name));
        }

        debug!("Registered tool: {}", name);
        self.tools.push(tool);
        Ok(())
    }

    /// Iterate over all registered descriptors, in registration order.
    pub fn list(&self) -> impl Iterator<Item = &ToolDescriptor> + Clone + '_ {
        self.tools.iter().map(|t| t.descriptor())
    }

    /// Find the tool registered under `name`.
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn ToolHandler>, ToolError> {
        self.tools
            .iter()
            .find(|t| t.descriptor().name() == name)
            .ok_or_else(|| ToolError::not_found(name))
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.list().map(ToolDescriptor::name).collect()
    }

    /// Get all tools as Tool models (metadata) for discovery.
    pub fn to_tools(&self) -> Vec<Tool> {
        self.list().map(ToolDescriptor::to_tool).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolOutcome;
    use rmcp::model::JsonObject;
    use schemars::JsonSchema;
    use serde::Deserialize;
    use serde_json::Value;
    use tokio_test::{assert_err, assert_ok};

    #[allow(dead_code)]
    #[derive(Deserialize, JsonSchema)]
    struct EchoParams {
        text: String,
    }

    struct EchoTool {
        descriptor: ToolDescriptor,
    }

    impl EchoTool {
        fn named(name: &str, description: &str) -> Arc<dyn ToolHandler> {
            Arc::new(Self {
                descriptor: ToolDescriptor::for_params::<EchoParams>(name, description),
            })
        }
    }

    #[async_trait::async_trait]
    impl ToolHandler for EchoTool {
        fn descriptor(&self) -> &ToolDescriptor {
            &self.descriptor
        }

        async fn execute(&self, arguments: JsonObject) -> ToolOutcome {
            ToolOutcome::Success(Value::Object(arguments))
        }
    }

    #[test]
    fn test_register_and_resolve() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_ok!(registry.register(EchoTool::named("echo", "Echo text")));
        assert_ok!(registry.register(EchoTool::named("shout", "Shout text")));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.tool_names(), vec!["echo", "shout"]);

        let tool = assert_ok!(registry.resolve("shout"));
        assert_eq!(tool.descriptor().description(), "Shout text");
    }

    #[test]
    fn test_duplicate_registration_keeps_original() {
        let mut registry = ToolRegistry::new();
        assert_ok!(registry.register(EchoTool::named("echo", "first")));

        let err = assert_err!(registry.register(EchoTool::named("echo", "second")));
        assert_eq!(err, ToolError::duplicate("echo"));

        assert_eq!(registry.len(), 1);
        let tool = assert_ok!(registry.resolve("echo"));
        assert_eq!(tool.descriptor().description(), "first");
    }

    #[test]
    fn test_resolve_unknown() {
        let registry = ToolRegistry::new();
        let err = match registry.resolve("missing") {
            Ok(_) => panic!("expected unknown tool"),
            Err(err) => err,
        };
        assert_eq!(err, ToolError::not_found("missing"));
        assert_eq!(err.to_string(), "Unknown tool: missing");
    }

    #[test]
    fn test_list_is_restartable() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool::named("echo", "Echo text")).unwrap();

        let listing = registry.list();
        let first: Vec<_> = listing.clone().map(|d| d.name().to_string()).collect();
        let second: Vec<_> = listing.map(|d| d.name().to_string()).collect();
        assert_eq!(first, second);
        assert_eq!(registry.to_tools().len(), 1);
    }
}
