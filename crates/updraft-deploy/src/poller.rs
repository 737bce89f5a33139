//! Polling for asynchronous platform operations
//!
//! Two modes: full wait blocks until the operation reaches a terminal state;
//! partial wait returns once the first rollout milestone is confirmed
//! healthy, leaving the remainder to proceed on the platform. Partial-wait
//! success is final for this call; later background failures are the
//! platform's to report.

use crate::actor::PlatformActor;
use crate::error::Result;
use crate::reporter::Reporter;
use tracing::info;

/// How long to wait on an asynchronous platform operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Block until the operation succeeds or fails
    Full,
    /// Return after the first rollout milestone
    Partial,
}

impl PollMode {
    /// Partial wait applies only when the caller asked not to wait *and*
    /// more than one instance rolls at a time; otherwise waiting for the
    /// first milestone would be waiting for the whole rollout anyway.
    pub fn for_deployment(no_wait: bool, max_in_flight: u32) -> Self {
        if no_wait && max_in_flight > 1 {
            PollMode::Partial
        } else {
            PollMode::Full
        }
    }

    pub fn is_partial(self) -> bool {
        matches!(self, PollMode::Partial)
    }
}

/// Poll a deployment rollout; on partial-wait success, tell the operator
/// the rest continues in the background.
pub(crate) async fn poll_deployment(
    actor: &dyn PlatformActor,
    reporter: &Reporter,
    deployment_guid: &str,
    mode: PollMode,
) -> Result<()> {
    let (warnings, result) = actor
        .poll_start_for_deployment(deployment_guid, mode.is_partial())
        .await;
    reporter.warn_batch(&warnings);
    result?;

    if mode.is_partial() {
        reporter.text("First instance restaged correctly, restaging remaining in the background");
    }
    info!(deployment_guid = %deployment_guid, mode = ?mode, "deployment poll finished");
    Ok(())
}

/// Poll an application start to completion (the direct lifecycle path never
/// uses partial wait).
pub(crate) async fn poll_application(
    actor: &dyn PlatformActor,
    reporter: &Reporter,
    app_guid: &str,
) -> Result<()> {
    let (warnings, result) = actor.poll_start(app_guid).await;
    reporter.warn_batch(&warnings);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_wait_needs_no_wait_and_parallel_rollout() {
        assert_eq!(PollMode::for_deployment(true, 5), PollMode::Partial);
        assert_eq!(PollMode::for_deployment(true, 2), PollMode::Partial);
        assert_eq!(PollMode::for_deployment(true, 1), PollMode::Full);
        assert_eq!(PollMode::for_deployment(false, 5), PollMode::Full);
        assert_eq!(PollMode::for_deployment(false, 1), PollMode::Full);
    }
}
