//! Server Initialization
//!
//! Loads configuration, sets up logging, registers the fal.ai tools and
//! runs the selected transport until it ends or the user interrupts it.
//!
//! # Transport Modes
//!
//! - **Stdio** (default): MCP over stdin/stdout
//! - **Sse**: HTTP server with Server-Sent Events on `host:port`
//!
//! Transport mode can be set via:
//! - Command line: `--transport sse`
//! - Config file: `server.transport = "sse"`
//! - Environment variable: `FAL_MCP__SERVER__TRANSPORT=sse`

use std::path::Path;
use std::sync::Arc;

use fal_mcp_domain::error::{Error, Result};
use fal_mcp_domain::ports::FalApi;
use fal_mcp_infrastructure::config::{AppConfig, ConfigLoader, ServerOverrides, TransportMode};
use fal_mcp_infrastructure::fal::FalClient;
use tracing::{error, info, warn};

use crate::McpServer;
use crate::McpServerBuilder;
use crate::handlers::{PollSettings, register_fal_tools};
use crate::tools::ToolRegistry;
use crate::transport::{SseTransport, TransportConfig, serve_stdio};

/// Run the fal.ai MCP server
///
/// Loads configuration (optional file plus command-line overrides),
/// initializes logging and serves until the transport ends.
pub async fn run(config_path: Option<&Path>, overrides: ServerOverrides) -> Result<()> {
    let config = load_config(config_path, overrides)?;
    fal_mcp_infrastructure::logging::init_logging(&config.logging)?;
    run_with_config(config).await
}

/// Run the server with an already loaded configuration
pub async fn run_with_config(config: AppConfig) -> Result<()> {
    info!(
        transport = %config.server.transport,
        host = %config.server.host,
        port = config.server.port,
        "Starting fal.ai MCP server"
    );

    if !config.fal.has_api_key() {
        warn!("FAL_KEY environment variable not set; tools that call fal.ai will fail");
    }

    let poll = PollSettings::from_config(&config.fal);
    let api: Arc<dyn FalApi> = Arc::new(FalClient::new(config.fal)?);
    let server = create_mcp_server(&api, poll)?;
    info!(
        tools = server.dispatcher().registry().len(),
        "MCP server initialized successfully"
    );

    start_transport(server, TransportConfig::from_server_config(&config.server)).await
}

/// Load configuration from optional path
fn load_config(config_path: Option<&Path>, overrides: ServerOverrides) -> Result<AppConfig> {
    let loader = match config_path {
        Some(path) => ConfigLoader::new().with_config_path(path),
        None => ConfigLoader::new(),
    };
    loader.with_overrides(overrides).load()
}

/// Register every tool group and build the server
pub fn create_mcp_server(api: &Arc<dyn FalApi>, poll: PollSettings) -> Result<McpServer> {
    let mut registry = ToolRegistry::new();
    register_fal_tools(&mut registry, api, poll)?;

    McpServerBuilder::new()
        .with_registry(registry)
        .build()
        .map_err(|e| Error::configuration_with_source("Failed to build MCP server", e))
}

/// Start the appropriate transport based on configuration
pub async fn start_transport(server: McpServer, transport: TransportConfig) -> Result<()> {
    match transport.mode {
        TransportMode::Stdio => {
            info!("Starting stdio transport");
            run_stdio_transport(server, transport.max_message_bytes).await
        }
        TransportMode::Sse => {
            info!(host = %transport.host, port = transport.port, "Starting SSE transport");
            SseTransport::new(transport, Arc::new(server)).start().await
        }
    }
}

/// Run the server with stdio transport
///
/// End of input and Ctrl-C are clean shutdowns. Any non-fatal failure ends
/// the single channel; it is logged and also treated as a clean exit.
async fn run_stdio_transport(server: McpServer, max_frame_bytes: u64) -> Result<()> {
    tokio::select! {
        result = serve_stdio(&server, max_frame_bytes) => match result {
            Err(e) if !e.is_fatal() => {
                error!(error = %e, "Stdio transport terminated");
                Ok(())
            }
            other => other,
        },
        () = ctrl_c() => {
            info!("Server stopped by user");
            Ok(())
        }
    }
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Cannot listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}
