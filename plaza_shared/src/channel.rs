//! Outbound intent boundary.
//!
//! The connection lifecycle (connect, reconnect, framing) lives outside
//! this workspace; the core only needs somewhere to hand intents. Sends
//! are best-effort: a closed channel drops the intent, and the next input
//! transition re-derives it from current state.

use tokio::sync::mpsc;
use tracing::debug;

use crate::proto::ClientIntent;

/// Where outbound intents go.
pub trait IntentSink: Send {
    /// Hands an intent to the connection layer.
    ///
    /// Returns `false` if the channel is down; the intent is dropped, not
    /// queued or retried.
    fn try_send(&mut self, intent: ClientIntent) -> bool;
}

/// Sink over an unbounded tokio channel.
pub struct MpscSink {
    tx: mpsc::UnboundedSender<ClientIntent>,
}

impl MpscSink {
    pub fn new(tx: mpsc::UnboundedSender<ClientIntent>) -> Self {
        Self { tx }
    }
}

impl IntentSink for MpscSink {
    fn try_send(&mut self, intent: ClientIntent) -> bool {
        match self.tx.send(intent) {
            Ok(()) => true,
            Err(_) => {
                debug!("intent dropped, channel closed");
                false
            }
        }
    }
}

/// Buffering sink useful for headless tests.
#[derive(Default)]
pub struct MemorySink {
    pub sent: Vec<ClientIntent>,
}

impl IntentSink for MemorySink {
    fn try_send(&mut self, intent: ClientIntent) -> bool {
        self.sent.push(intent);
        true
    }
}
