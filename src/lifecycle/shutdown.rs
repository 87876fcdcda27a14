//! Shutdown coordination.
//!
//! # Data Flow
//! ```text
//! signals::trigger_on_signal ──trigger()──▶ broadcast ──▶ HttpServer::run
//!                                                         (stop accepting,
//!                                                          drain in-flight
//!                                                          dispatches)
//! ```
//!
//! `main` creates one `Shutdown`, hands a receiver to the server task, then
//! awaits the signal. Tests trigger it directly to stop ephemeral servers.

use tokio::sync::broadcast;

/// One-shot broadcast that tells every subscriber to wind down.
///
/// Subscribe before triggering: a receiver created afterwards never sees
/// the signal.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Notify all current subscribers. Safe to call with none listening.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }

    /// Number of subscribers still listening.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
