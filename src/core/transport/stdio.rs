//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default and recommended mode.
//! Requests arrive one per line on stdin; responses are written one per line
//! to stdout. Logs go to stderr so they never interleave with responses.

use tokio::io::BufReader;
use tracing::info;

use super::TransportResult;
use super::protocol::serve_lines;
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Run the STDIO transport until stdin closes or Ctrl-C is received.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();

        tokio::select! {
            result = serve_lines(&server, reader, writer) => result?,
            _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
        }

        info!("STDIO transport finished");
        Ok(())
    }
}
