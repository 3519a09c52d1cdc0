//! Graceful shutdown coordination.

use tokio::sync::watch;

/// Coordinator for graceful shutdown.
///
/// Built on a watch channel so handles created after the trigger still
/// observe the shutdown immediately.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Create a handle that resolves once shutdown is triggered.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber's view of the shutdown signal.
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    rx: watch::Receiver<bool>,
}

impl ShutdownHandle {
    /// Wait until shutdown is triggered.
    ///
    /// Also resolves if the coordinator is dropped, so tasks never outlive
    /// the process owner.
    pub async fn triggered(mut self) {
        let _ = self.rx.wait_for(|triggered| *triggered).await;
    }
}
