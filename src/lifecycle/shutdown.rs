//! Drain coordination for the forwarder.
//!
//! Stopping happens in two phases: the listener stops accepting, then
//! exchanges already in flight finish relaying their upstream bodies.
//! The trigger is latched, so a [`Drain`] taken after it fired still
//! resolves at once.

use tokio::sync::watch;

/// Owner side of shutdown. Fired on SIGINT/SIGTERM, or when a test drops its forwarder.
#[derive(Debug, Clone)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Listener side, handed to `HttpServer::run`.
#[derive(Debug, Clone)]
pub struct Drain {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// A handle that resolves when draining should start.
    pub fn drain(&self) -> Drain {
        Drain {
            rx: self.tx.subscribe(),
        }
    }

    /// Start draining. Repeated calls are no-ops.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Drain {
    /// Wait for the trigger. Also returns once every [`Shutdown`] handle is
    /// gone, since nothing could fire it any more.
    pub async fn wait(mut self) {
        let _ = self.rx.wait_for(|fired| *fired).await;
    }
}
