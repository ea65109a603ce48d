// ── Operator notifications ──
//
// Short, transient messages about mutation outcomes. The CLI prints them
// to stderr; library consumers that have no surface use `TracingNotifier`.

use tracing::{info, warn};

/// Receives the outcome of every mutation and reload.
pub trait Notifier: Send + Sync {
    /// A mutation succeeded. `message` is the appliance's status text.
    fn notify(&self, message: &str);

    /// A mutation or reload failed.
    fn error(&self, message: &str);
}

/// Routes notifications into the tracing pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        info!(target: "meowtail::notify", "{message}");
    }

    fn error(&self, message: &str) {
        warn!(target: "meowtail::notify", "{message}");
    }
}
