//! Session Management
//!
//! One [`Session`] per open SSE stream. A session owns the bounded outbound
//! queue feeding its stream, a liveness flag, an in-flight request counter
//! and a cancellation token that aborts its in-flight work on teardown.
//! Sessions never share anything but the server itself.

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

/// State of a single client session
#[derive(Debug)]
pub struct Session {
    id: String,
    outbound: mpsc::Sender<String>,
    alive: AtomicBool,
    created_at: Instant,
    /// Milliseconds after `created_at` of the last activity
    last_activity_ms: AtomicU64,
    in_flight: AtomicUsize,
    cancel: CancellationToken,
}

impl Session {
    fn new(outbound: mpsc::Sender<String>) -> Self {
        Self {
            id: Uuid::new_v4().simple().to_string(),
            outbound,
            alive: AtomicBool::new(true),
            created_at: Instant::now(),
            last_activity_ms: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Unique session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the session is still open
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Record client activity
    pub fn touch(&self) {
        let elapsed = u64::try_from(self.created_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        self.last_activity_ms.store(elapsed, Ordering::Relaxed);
    }

    /// Time since the last recorded activity
    pub fn idle_for(&self) -> Duration {
        let last = Duration::from_millis(self.last_activity_ms.load(Ordering::Relaxed));
        self.created_at.elapsed().saturating_sub(last)
    }

    /// Number of requests currently being handled
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Count a request as in flight until the returned guard drops
    pub fn begin_request(self: &Arc<Self>) -> InFlightGuard {
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        InFlightGuard {
            session: Arc::clone(self),
        }
    }

    /// Token cancelled when the session is torn down
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Queue a serialized message for the stream
    ///
    /// Returns `false` if the session is closed or its stream is gone.
    pub async fn send(&self, message: String) -> bool {
        if !self.is_alive() {
            return false;
        }
        let delivered = self.outbound.send(message).await.is_ok();
        if delivered {
            self.touch();
        }
        delivered
    }

    fn shutdown(&self) {
        self.alive.store(false, Ordering::Release);
        self.cancel.cancel();
    }
}

/// Keeps a request counted in [`Session::in_flight`]
#[derive(Debug)]
pub struct InFlightGuard {
    session: Arc<Session>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.session.in_flight.fetch_sub(1, Ordering::AcqRel);
        self.session.touch();
    }
}

/// Session manager for tracking client connections
#[derive(Debug)]
pub struct SessionManager {
    sessions: DashMap<String, Arc<Session>>,
    queue_capacity: usize,
}

impl SessionManager {
    /// Create a session manager whose sessions buffer up to `queue_capacity`
    /// outbound messages
    pub fn new(queue_capacity: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            queue_capacity: queue_capacity.max(1),
        }
    }

    /// Open a session, returning it and the receiving end of its queue
    pub fn open(&self) -> (Arc<Session>, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(self.queue_capacity);
        let session = Arc::new(Session::new(tx));
        self.sessions
            .insert(session.id().to_string(), Arc::clone(&session));
        debug!(session_id = %session.id(), "Session opened");
        (session, rx)
    }

    /// Get a live session
    pub fn get(&self, session_id: &str) -> Option<Arc<Session>> {
        self.sessions
            .get(session_id)
            .map(|entry| Arc::clone(entry.value()))
            .filter(|session| session.is_alive())
    }

    /// Tear a session down, cancelling its in-flight work
    ///
    /// Returns `false` if no such session existed.
    pub fn close(&self, session_id: &str) -> bool {
        match self.sessions.remove(session_id) {
            Some((_, session)) => {
                session.shutdown();
                debug!(session_id, in_flight = session.in_flight(), "Session closed");
                true
            }
            None => false,
        }
    }

    /// Tear every session down
    pub fn close_all(&self) {
        let ids: Vec<String> = self.sessions.iter().map(|e| e.key().clone()).collect();
        for id in ids {
            self.close(&id);
        }
    }

    /// Get the number of open sessions
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

/// Closes its session when dropped
///
/// Owned by the SSE stream, so a client disconnect (the stream being
/// dropped) releases the session.
#[derive(Debug)]
pub struct SessionGuard {
    manager: Arc<SessionManager>,
    session_id: String,
}

impl SessionGuard {
    /// Guard `session_id` within `manager`
    pub fn new(manager: Arc<SessionManager>, session_id: impl Into<String>) -> Self {
        Self {
            manager,
            session_id: session_id.into(),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.manager.close(&self.session_id);
    }
}
