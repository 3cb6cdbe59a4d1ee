//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations
//! - `descriptor.rs` - Tool metadata and argument validation
//! - `handlers.rs` - The `ToolHandler` trait and invocation outcome
//! - `registry.rs` - Central tool registry used for discovery and dispatch
//! - `router.rs` - Builds the registry with every shipped tool
//! - `error.rs` - Tool-specific error types

pub mod definitions;
mod descriptor;
mod error;
mod handlers;
mod registry;
pub mod router;

pub use descriptor::{ParamSpec, ParamType, ToolDescriptor};
pub use error::ToolError;
pub use handlers::{ToolHandler, ToolOutcome};
pub use registry::ToolRegistry;
pub use router::build_tool_registry;
