/// Interrupt handling
///
/// Ctrl+C sets the shutdown flag and wakes the driver. The driver drops the
/// in-flight wallet (nothing of it is persisted yet), skips finalization and
/// exits. A second Ctrl+C exits immediately.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

#[derive(Clone, Default)]
pub struct ShutdownSignal {
    requested: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
        // notify_one stores a permit when nobody is waiting yet
        self.notify.notify_one();
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown has been requested
    pub async fn wait(&self) {
        while !self.is_requested() {
            self.notify.notified().await;
        }
    }
}

/// Install the Ctrl+C handler that drives `signal`
pub fn install_shutdown_handler(signal: ShutdownSignal) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        if signal.is_requested() {
            eprintln!("\n[SIGNAL] Second Ctrl+C, exiting immediately");
            crate::logger::flush();
            std::process::exit(130);
        }
        eprintln!("\n[SIGNAL] Received Ctrl+C, stopping after the current step...");
        signal.request();
    })
}
