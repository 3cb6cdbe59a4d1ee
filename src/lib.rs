//! Weather MCP Server Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing a single
//! tool, `get_current_weather`, backed by the Open-Meteo forecast API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, server state and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool registry, descriptors and the weather tool
//!
//! # Example
//!
//! ```rust,no_run
//! use weather_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
