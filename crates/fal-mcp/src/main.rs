//! fal.ai MCP Server - Entry Point
//!
//! ## Transports
//!
//! | Mode | Command | Description |
//! |------|---------|-------------|
//! | **Stdio** | `fal-mcp` | JSON-RPC over stdin/stdout (default) |
//! | **SSE** | `fal-mcp --transport sse --port 8080` | HTTP with Server-Sent Events |
//!
//! Exit status is 0 on clean shutdown (end of input, Ctrl-C) and 1 when the
//! server cannot start.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use fal_mcp_infrastructure::config::{ServerOverrides, TransportMode};
use fal_mcp_server::run;

/// Command line interface for the fal.ai MCP server
#[derive(Parser, Debug)]
#[command(name = "fal-mcp")]
#[command(about = "fal.ai MCP Server - Generative media models as MCP tools")]
#[command(version)]
pub struct Cli {
    /// Transport to serve on
    #[arg(long, value_enum)]
    pub transport: Option<TransportMode>,

    /// Bind address for the SSE transport
    #[arg(long)]
    pub host: Option<String>,

    /// Port for the SSE transport
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> ServerOverrides {
        ServerOverrides {
            transport: self.transport,
            host: self.host.clone(),
            port: self.port,
        }
    }
}

fn main() -> ExitCode {
    // A missing .env is the normal case
    let _ = dotenvy::dotenv();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error starting server: {e}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = runtime.block_on(run(cli.config.as_deref(), cli.overrides()));
    // Blocking stdin reads never finish on their own
    runtime.shutdown_timeout(Duration::from_millis(100));

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error starting server: {e}");
            ExitCode::FAILURE
        }
    }
}
