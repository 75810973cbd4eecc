use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::application::{
    ports::{FrameTransport, InboundMessage},
    services::FramePipeline,
};
use crate::domain::errors::{FrameError, SessionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Accepting,
    Active,
    Closed,
}

#[derive(Debug)]
pub enum CloseReason {
    /// The client closed the connection or the stream ended.
    PeerClosed,
    /// The handler tore the session down.
    Fatal(SessionError),
}

/// State of one connection. Nothing here feeds back into frame processing.
#[derive(Debug)]
pub struct ConnectionSession {
    id: u64,
    phase: SessionPhase,
    frames_received: u64,
    frames_sent: u64,
    frames_skipped: u64,
}

impl ConnectionSession {
    fn accept(id: u64) -> Self {
        Self { id, phase: SessionPhase::Accepting, frames_received: 0, frames_sent: 0, frames_skipped: 0 }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    fn activate(&mut self) {
        debug_assert_eq!(self.phase, SessionPhase::Accepting);
        self.phase = SessionPhase::Active;
    }

    fn close(&mut self) {
        self.phase = SessionPhase::Closed;
    }
}

/// Summary returned once a session reaches `Closed`.
#[derive(Debug)]
pub struct SessionReport {
    pub id: u64,
    pub phase: SessionPhase,
    pub frames_received: u64,
    pub frames_sent: u64,
    pub frames_skipped: u64,
    pub close_reason: CloseReason,
}

/// Drives a connection through `Accepting → Active → Closed`.
///
/// Frames on one connection are handled strictly one after another: the next
/// message is only read once the previous result has been sent.
pub struct ConnectionHandler {
    pipeline: Arc<FramePipeline>,
    next_id: AtomicU64,
}

impl ConnectionHandler {
    pub fn new(pipeline: Arc<FramePipeline>) -> Self {
        Self { pipeline, next_id: AtomicU64::new(1) }
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }

    pub async fn run<T: FrameTransport>(&self, transport: &mut T) -> SessionReport {
        let mut session = ConnectionSession::accept(self.next_id.fetch_add(1, Ordering::Relaxed));
        let span = info_span!("session", id = session.id());

        async move {
            session.activate();
            info!("client connected");

            let close_reason = self.serve(&mut session, transport).await;

            session.close();
            transport.close().await;

            match &close_reason {
                CloseReason::PeerClosed => info!(
                    received = session.frames_received,
                    sent = session.frames_sent,
                    skipped = session.frames_skipped,
                    "client disconnected"
                ),
                CloseReason::Fatal(e) => error!(
                    received = session.frames_received,
                    sent = session.frames_sent,
                    skipped = session.frames_skipped,
                    "session closed: {}",
                    e
                ),
            }

            SessionReport {
                id: session.id,
                phase: session.phase,
                frames_received: session.frames_received,
                frames_sent: session.frames_sent,
                frames_skipped: session.frames_skipped,
                close_reason,
            }
        }
        .instrument(span)
        .await
    }

    async fn serve<T: FrameTransport>(&self, session: &mut ConnectionSession, transport: &mut T) -> CloseReason {
        loop {
            let message = match transport.recv().await {
                Ok(Some(m)) => m,
                Ok(None) => return CloseReason::PeerClosed,
                Err(e) => return CloseReason::Fatal(e.into()),
            };
            session.frames_received += 1;

            let outcome = match message {
                InboundMessage::Text(payload) => self.process(payload).await,
                InboundMessage::Binary(data) => Ok(Err(FrameError::NotText { len: data.len() })),
            };

            match outcome {
                Ok(Ok(record)) => {
                    if let Err(e) = transport.send(record).await {
                        return CloseReason::Fatal(e.into());
                    }
                    session.frames_sent += 1;
                }
                Ok(Err(e)) if e.is_recoverable() => {
                    warn!("skipping frame {}: {}", session.frames_received, e);
                    session.frames_skipped += 1;
                }
                Ok(Err(e)) => return CloseReason::Fatal(SessionError::Frame(e)),
                Err(e) => return CloseReason::Fatal(e),
            }
        }
    }

    /// Runs the pipeline on the blocking pool and waits for it, so the frame
    /// always completes before the loop reads again.
    async fn process(&self, payload: String) -> Result<Result<String, FrameError>, SessionError> {
        let pipeline = self.pipeline.clone();
        let result = tokio::task::spawn_blocking(move || pipeline.process(&payload))
            .await
            .map_err(|e| SessionError::Worker(e.to_string()))?;
        if result.is_ok() {
            debug!("frame processed");
        }
        Ok(result)
    }
}
