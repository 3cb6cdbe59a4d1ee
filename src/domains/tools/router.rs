//! Tool Router - builds the registry of shipped tools.
//!
//! Each tool knows how to describe itself; this module only decides which
//! tools are registered and wires in their dependencies.

use std::sync::Arc;

use crate::core::config::Config;

use super::definitions::{CurrentWeatherTool, WeatherFetcher};
use super::{ToolError, ToolRegistry};

/// Build the tool registry with all shipped tools.
pub fn build_tool_registry(
    config: &Config,
    fetcher: Arc<dyn WeatherFetcher>,
) -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CurrentWeatherTool::new(
        config.upstream.api_base.clone(),
        fetcher,
    )))?;
    Ok(registry)
}
