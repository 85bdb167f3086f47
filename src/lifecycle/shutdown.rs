//! Shutdown coordination.
//!
//! One flag, many observers. The HTTP server and the process collector each
//! hold a `ShutdownSignal`; a signal taken after the trigger still resolves,
//! so late subscribers never miss the shutdown.

use tokio::sync::watch;

/// Owner side: flips the flag.
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Ask every observer to stop. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Observers still holding a signal.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Observer side, cheap to clone into each task.
#[derive(Clone, Debug)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve once shutdown is triggered, or once the `Shutdown` owner is
    /// dropped (nobody is left to keep the service running).
    pub async fn recv(&mut self) {
        let _ = self.rx.wait_for(|&stopped| stopped).await;
    }
}
