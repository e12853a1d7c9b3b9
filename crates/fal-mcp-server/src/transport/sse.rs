//! SSE Transport for MCP
//!
//! MCP over HTTP with Server-Sent Events, served by Rocket.
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /sse` | Opens a session; the first event (`endpoint`) names the POST URL |
//! | `POST /messages?session_id=<id>` | Submits one JSON-RPC message; answered on the stream |
//!
//! Every message is dispatched on its own task, so one session can have
//! many requests in flight and responses may arrive out of order (they are
//! correlated by id). A session ends when its stream is dropped, after a
//! protocol error without a recoverable id, or after sitting idle; ending
//! it cancels whatever it still has in flight. Streams carry a periodic
//! keep-alive comment so a vanished client is noticed within a heartbeat
//! or two rather than at the next response.
//!
//! # Example
//!
//! ```text
//! GET /sse HTTP/1.1
//!
//! event: endpoint
//! data: /messages?session_id=4f0c...
//!
//! POST /messages?session_id=4f0c... HTTP/1.1
//! Content-Type: application/json
//!
//! {"jsonrpc": "2.0", "method": "tools/list", "id": 1}
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use fal_mcp_domain::error::{Error, Result};
use rocket::config::LogLevel;
use rocket::data::{Limits, ToByteUnit};
use rocket::error::ErrorKind;
use rocket::response::stream::{Event, EventStream};
use rocket::serde::json::Json;
use rocket::{Build, Responder, Rocket, Shutdown, State, get, post, routes};
use tracing::{debug, info, warn};

use super::config::TransportConfig;
use super::types::{McpRequest, McpResponse};
use crate::McpServer;
use crate::constants::{MESSAGES_PATH, SSE_ENDPOINT_EVENT, SSE_MESSAGE_EVENT};
use crate::session::{Session, SessionGuard, SessionManager};

/// Shared state for the SSE transport
#[derive(Debug, Clone)]
pub struct SseState {
    /// MCP server handling messages
    pub server: Arc<McpServer>,
    /// Open sessions
    pub sessions: Arc<SessionManager>,
    /// Idle time after which a session is torn down
    pub idle_timeout: Duration,
    /// Interval between keep-alive comments
    pub heartbeat: Duration,
}

/// SSE transport server
#[derive(Debug)]
pub struct SseTransport {
    config: TransportConfig,
    state: SseState,
}

impl SseTransport {
    /// Create a new SSE transport
    pub fn new(config: TransportConfig, server: Arc<McpServer>) -> Self {
        let state = SseState {
            server,
            sessions: Arc::new(SessionManager::new(config.session_queue_capacity)),
            idle_timeout: config.idle_timeout,
            heartbeat: config.heartbeat,
        };
        Self { config, state }
    }

    /// Session registry, shared with the routes
    pub fn sessions(&self) -> Arc<SessionManager> {
        Arc::clone(&self.state.sessions)
    }

    /// Build the Rocket application
    ///
    /// Rocket's own logging is switched off; tracing is the only log stream.
    pub fn rocket(&self) -> Rocket<Build> {
        let limits = Limits::default().limit("string", self.config.max_message_bytes.bytes());
        let figment = rocket::Config::figment()
            .merge(("address", self.config.host.clone()))
            .merge(("port", self.config.port))
            .merge(("log_level", LogLevel::Off))
            .merge(("cli_colors", false))
            .merge(("limits", limits));

        rocket::custom(figment)
            .manage(self.state.clone())
            .mount("/", routes![open_stream, post_message])
    }

    /// Start the SSE transport and serve until shutdown (Ctrl-C)
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] when the address is invalid or cannot be
    /// bound; [`Error::Transport`] for any other launch failure.
    pub async fn start(self) -> Result<()> {
        let addr = self.config.socket_addr()?;
        info!(%addr, "SSE transport listening");

        let sessions = self.sessions();
        let outcome = self.rocket().launch().await;
        sessions.close_all();

        match outcome {
            Ok(_) => {
                info!("SSE transport stopped");
                Ok(())
            }
            Err(e) => Err(launch_error(addr, &e)),
        }
    }
}

fn launch_error(addr: SocketAddr, error: &rocket::Error) -> Error {
    match error.kind() {
        ErrorKind::Bind(e) => Error::configuration(format!("Failed to bind {addr}: {e}")),
        _ => Error::transport(format!("SSE transport failed: {error}")),
    }
}

/// Reply to a posted message
#[derive(Debug, Responder)]
pub enum PostReply {
    /// Message accepted; the answer arrives on the stream
    #[response(status = 202)]
    Accepted(&'static str),
    /// No open session with that id
    #[response(status = 404)]
    UnknownSession(&'static str),
    /// Malformed frame without a recoverable id; the session is closed
    #[response(status = 400)]
    Malformed(Json<McpResponse>),
}

/// Open an event stream for a new session
#[get("/sse")]
fn open_stream(state: &State<SseState>, mut shutdown: Shutdown) -> EventStream![] {
    let (session, mut outbound) = state.sessions.open();
    let guard = SessionGuard::new(Arc::clone(&state.sessions), session.id());
    let cancelled = session.cancellation_token().clone();
    let idle_timeout = state.idle_timeout;
    let heartbeat = state.heartbeat;
    let endpoint = format!("{MESSAGES_PATH}?session_id={}", session.id());
    info!(session_id = %session.id(), "SSE session opened");

    let stream = EventStream! {
        let _guard = guard;
        yield Event::data(endpoint).event(SSE_ENDPOINT_EVENT);

        loop {
            // Busy sessions never idle out; otherwise wait only what is left
            let wait = if session.in_flight() > 0 {
                idle_timeout
            } else {
                idle_timeout.saturating_sub(session.idle_for())
            };
            let next = tokio::select! {
                message = tokio::time::timeout(wait, outbound.recv()) => message,
                () = cancelled.cancelled() => break,
                _ = &mut shutdown => break,
            };

            match next {
                Ok(Some(message)) => yield Event::data(message).event(SSE_MESSAGE_EVENT),
                Ok(None) => break,
                Err(_) if session.in_flight() > 0 || session.idle_for() < idle_timeout => continue,
                Err(_) => {
                    info!(session_id = %session.id(), "SSE session idle, closing");
                    break;
                }
            }
        }

        debug!(session_id = %session.id(), "SSE stream ended");
    };
    stream.heartbeat(heartbeat)
}

/// Accept one JSON-RPC message for a session
#[post("/messages?<session_id>", data = "<body>")]
fn post_message(state: &State<SseState>, session_id: &str, body: String) -> PostReply {
    let Some(session) = state.sessions.get(session_id) else {
        debug!(session_id, "Message for unknown session");
        return PostReply::UnknownSession("Unknown session");
    };
    session.touch();

    match McpRequest::decode(&body) {
        Ok(request) => {
            dispatch(Arc::clone(&state.server), session, request);
            PostReply::Accepted("Accepted")
        }
        Err(error) if error.id.is_some() => {
            warn!(session_id, code = error.code, error = %error.message, "Malformed message");
            let response = error.to_response();
            tokio::spawn(async move { deliver(&session, &response).await });
            PostReply::Accepted("Accepted")
        }
        Err(error) => {
            warn!(session_id, error = %error.message, "Malformed message without id, closing session");
            state.sessions.close(session_id);
            PostReply::Malformed(Json(error.to_response()))
        }
    }
}

/// Handle a request on its own task, abandoning it if the session closes
fn dispatch(server: Arc<McpServer>, session: Arc<Session>, request: McpRequest) {
    let in_flight = session.begin_request();
    let cancelled = session.cancellation_token().clone();

    tokio::spawn(async move {
        let _in_flight = in_flight;
        let method = request.method.clone();
        let work = async {
            if let Some(response) = server.handle_message(request).await {
                deliver(&session, &response).await;
            }
        };

        tokio::select! {
            () = cancelled.cancelled() => {
                debug!(session_id = %session.id(), method = %method, "Request cancelled with its session");
            }
            () = work => {}
        }
    });
}

async fn deliver(session: &Session, response: &McpResponse) {
    match response.to_frame() {
        Ok(frame) => {
            if !session.send(frame).await {
                debug!(session_id = %session.id(), "Session gone, response dropped");
            }
        }
        Err(e) => warn!(error = %e, "Failed to serialize response"),
    }
}
