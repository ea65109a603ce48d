// ── Mutation sequencing ──
//
// Every write goes out as one single-purpose request. On success the
// owning resource is re-fetched and replaced wholesale; the mutation's own
// response body is only read for its status text. On failure nothing is
// reloaded and in-memory state stays as it was.
//
// There is no queue: overlapping mutations race and the last reload to
// land wins.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use tracing::{debug, warn};

use meowtail_api::ActionResponse;

use crate::error::CoreError;
use crate::notify::Notifier;

/// Result of an accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationOutcome {
    /// Status text from the appliance, `"ok"` when it sent none.
    pub status: String,
    /// Whether the follow-up reload landed. `false` means the displayed
    /// state may be stale even though the write was accepted.
    pub reloaded: bool,
}

/// Issue `request`, then `reload` on success.
///
/// `action` names the mutation for failure messages ("set gateway").
pub async fn converge<Req, Reload, ReloadFut>(
    notifier: &dyn Notifier,
    action: &str,
    request: Req,
    reload: Reload,
) -> Result<MutationOutcome, CoreError>
where
    Req: Future<Output = Result<ActionResponse, meowtail_api::Error>>,
    Reload: FnOnce() -> ReloadFut,
    ReloadFut: Future<Output = Result<(), CoreError>>,
{
    let response = match request.await {
        Ok(response) => response,
        Err(e) => {
            let err = CoreError::from(e);
            warn!(action, error = %err, "mutation failed");
            notifier.error(&format!("Failed to {action}: {}", err.short_message()));
            return Err(err);
        }
    };

    let status = response.status_or_ok().to_owned();
    debug!(action, status = %status, "mutation accepted");
    notifier.notify(&status);

    let reloaded = match reload().await {
        Ok(()) => true,
        Err(e) => {
            warn!(action, error = %e, "reload after mutation failed");
            notifier.error(&format!(
                "Failed to reload configuration: {}",
                e.short_message()
            ));
            false
        }
    };

    Ok(MutationOutcome { status, reloaded })
}

/// Lock a view-model mutex. A poisoned form is still usable: every write
/// to it is a whole-field assignment.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
