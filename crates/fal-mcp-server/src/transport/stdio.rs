//! Stdio Transport
//!
//! Newline-delimited JSON-RPC over stdin/stdout. Strictly sequential: one
//! frame is read, handled and answered before the next is read, so
//! responses leave in request order.
//!
//! A malformed frame is answered with a protocol error when its request id
//! can be recovered. When it cannot, line framing gives no way to tell the
//! client which request failed, so the channel is terminated with a
//! transport error. So is a frame longer than the message size limit.

use fal_mcp_domain::error::{Error, Result};
use fal_mcp_infrastructure::error_ext::ErrorContext;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tracing::{debug, info, warn};

use crate::McpServer;
use crate::transport::types::{McpRequest, McpResponse};

/// Serve the server over the process's stdin and stdout
pub async fn serve_stdio(server: &McpServer, max_frame_bytes: u64) -> Result<()> {
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    serve_io(server, stdin, stdout, max_frame_bytes).await
}

/// Serve the server over an arbitrary line-oriented reader and writer
///
/// `max_frame_bytes` bounds one frame, excluding its newline. Returns
/// `Ok(())` at end of input.
///
/// # Errors
///
/// [`Error::Transport`] when reading or writing fails, when a frame is not
/// UTF-8 or exceeds `max_frame_bytes`, or when a malformed frame carries no
/// recoverable request id.
pub async fn serve_io<R, W>(
    server: &McpServer,
    mut reader: R,
    mut writer: W,
    max_frame_bytes: u64,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = (&mut reader)
            .take(max_frame_bytes.saturating_add(1))
            .read_until(b'\n', &mut buf)
            .await
            .transport_context("Failed to read frame")?;
        if read == 0 {
            info!("Input closed, stopping stdio transport");
            return Ok(());
        }

        let body = buf.strip_suffix(b"\n").unwrap_or(buf.as_slice());
        if body.len() as u64 > max_frame_bytes {
            return Err(Error::transport(format!("Frame exceeds {max_frame_bytes} bytes")));
        }

        let frame = std::str::from_utf8(body)
            .transport_context("Frame is not valid UTF-8")?
            .trim();
        if frame.is_empty() {
            continue;
        }

        let response = match McpRequest::decode(frame) {
            Ok(request) => {
                debug!(method = %request.method, "Frame received");
                server.handle_message(request).await
            }
            Err(error) if error.id.is_some() => {
                warn!(code = error.code, error = %error.message, "Malformed frame");
                Some(error.to_response())
            }
            Err(error) => {
                return Err(Error::transport(format!(
                    "Malformed frame without a request id: {}",
                    error.message
                )));
            }
        };

        if let Some(response) = response {
            write_frame(&mut writer, &response).await?;
        }
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, response: &McpResponse) -> Result<()> {
    let mut frame = response.to_frame()?;
    frame.push('\n');
    writer
        .write_all(frame.as_bytes())
        .await
        .transport_context("Failed to write frame")?;
    writer
        .flush()
        .await
        .transport_context("Failed to flush output")
}
