//! Tool handlers module.
//!
//! Every registered tool implements [`ToolHandler`]. A handler owns its
//! descriptor and turns already validated arguments into a [`ToolOutcome`].

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde_json::Value;

use super::ToolDescriptor;

/// Result of a single tool invocation.
///
/// A tool either produces a structured payload or a human-readable failure
/// message. Failures are part of the tool's contract and are reported to the
/// caller as a tool result, never as a protocol error.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(String),
}

impl ToolOutcome {
    /// Create a failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

impl From<ToolOutcome> for CallToolResult {
    fn from(outcome: ToolOutcome) -> Self {
        match outcome {
            // Carries the document both as structured content and as its JSON text
            ToolOutcome::Success(payload) => CallToolResult::structured(payload),
            ToolOutcome::Failure(message) => CallToolResult::error(vec![Content::text(message)]),
        }
    }
}

/// Trait implemented by every tool the server can execute.
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync {
    /// Metadata advertised for this tool.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Execute the tool with arguments that already match the descriptor.
    async fn execute(&self, arguments: JsonObject) -> ToolOutcome;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::json;

    #[test]
    fn test_success_becomes_structured_result() {
        let result: CallToolResult = ToolOutcome::Success(json!({"current": {"rain": 0.0}})).into();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content,
            Some(json!({"current": {"rain": 0.0}}))
        );
    }

    #[test]
    fn test_failure_becomes_error_text() {
        let result: CallToolResult = ToolOutcome::failure("nope").into();
        assert_eq!(result.is_error, Some(true));
        assert!(result.structured_content.is_none());
        match &result.content[0].raw {
            RawContent::Text(text) => assert_eq!(text.text, "nope"),
            other => panic!("unexpected content: {:?}", other),
        }
    }
}
