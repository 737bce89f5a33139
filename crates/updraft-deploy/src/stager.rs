//! Stage executor
//!
//! Drives the platform to turn a package into a droplet while a second task
//! drains the live log feed. The two progress independently; the only
//! ordering imposed is drain-before-terminate: the terminal staging value is
//! acted on only after the log feed has been cancelled and fully flushed.

use crate::actor::PlatformActor;
use crate::error::{DeployError, Result};
use crate::logs;
use crate::reporter::Reporter;
use tracing::{debug, instrument};
use updraft_types::Droplet;

/// Stage `package_guid` and return the droplet it produced.
///
/// Fatal outcomes: the log subscription failing to open, or the stage
/// executor's terminal error. Both cancel the log feed before returning,
/// after flushing every warning received so far.
#[instrument(skip(actor, reporter), fields(package_guid = %package_guid, app_name = %app_name))]
pub(crate) async fn stage(
    actor: &dyn PlatformActor,
    reporter: &Reporter,
    package_guid: &str,
    app_name: &str,
    space_guid: &str,
) -> Result<Droplet> {
    let (warnings, opened) = actor.open_log_stream(app_name, space_guid).await;
    reporter.warn_batch(&warnings);
    let (log_stream, log_handle) = opened?;

    let mut staging = actor.stage_package(package_guid, app_name, space_guid);
    let drain = logs::spawn_drain(log_stream, reporter.clone());

    let mut droplet: Option<Droplet> = None;
    let mut outcome: Result<()> = Ok(());
    let mut droplets_open = true;
    let mut warnings_open = true;
    let mut errors_open = true;

    while droplets_open || warnings_open || errors_open {
        tokio::select! {
            received = staging.droplets.recv(), if droplets_open => match received {
                Some(received) => droplet = Some(received),
                None => droplets_open = false,
            },
            batch = staging.warnings.recv(), if warnings_open => match batch {
                Some(batch) => reporter.warn_batch(&batch),
                None => warnings_open = false,
            },
            // A terminal error does not end the loop: batches already
            // buffered on the warnings channel must still be flushed, so
            // keep draining until every feed closes.
            error = staging.errors.recv(), if errors_open => match error {
                Some(error) => {
                    outcome = Err(error);
                    errors_open = false;
                }
                None => errors_open = false,
            },
        }
    }

    // Drain-before-terminate barrier: stop the feed, then wait for every
    // buffered log line to reach the operator before surfacing the result.
    log_handle.cancel();
    if drain.await.is_err() {
        debug!("log drain task panicked while shutting down");
    }

    outcome?;
    let droplet = droplet.ok_or(DeployError::StagingIncomplete)?;
    debug!(droplet_guid = %droplet.guid, "staging produced a droplet");
    Ok(droplet)
}
