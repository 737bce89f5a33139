//! Platform collaborator contract
//!
//! Everything the orchestrator needs from the control plane sits behind
//! [`PlatformActor`]. Auth, transport retries and the wire format are the
//! implementation's concern; this crate only sees results and warnings.
//! Every operation returns its warnings batch alongside the primary result
//! so callers can flush diagnostics before acting on an error.

use crate::error::{DeployError, Result};
use crate::logs::LogStreamHandle;
use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedReceiver;
use updraft_types::{
    DeploymentRequest, DetailedAppSummary, Droplet, LogMessage, User, Warnings,
};

/// Live log feed for an application.
///
/// Both channels are unbounded and independently progressing; `messages` is
/// infinite until cancelled or the source closes it, `errors` carries
/// transient tailing errors that must not abort the operation.
pub struct LogStream {
    pub messages: UnboundedReceiver<LogMessage>,
    pub errors: UnboundedReceiver<DeployError>,
}

/// Feeds produced by one staging call.
///
/// All three are single-shot productions: exactly one of `droplets` or
/// `errors` yields a terminal value, `warnings` may yield any number of
/// batches before it, and every channel closes afterwards.
pub struct StagingStreams {
    pub droplets: UnboundedReceiver<Droplet>,
    pub warnings: UnboundedReceiver<Warnings>,
    pub errors: UnboundedReceiver<DeployError>,
}

/// Control-plane operations consumed by the deployment orchestrator.
///
/// Implementations must honor [`LogStreamHandle`] cancellation by closing
/// both log channels, and must never block a feed on its consumer.
#[async_trait]
pub trait PlatformActor: Send + Sync {
    /// The user the CLI is authenticated as, for operator-facing text
    async fn get_current_user(&self) -> Result<User>;

    /// Open the live log feed for an application.
    ///
    /// Fails only if the initial subscription itself errors (for example an
    /// application lookup failure); that failure is fatal to the caller.
    async fn open_log_stream(
        &self,
        app_name: &str,
        space_guid: &str,
    ) -> (Warnings, Result<(LogStream, LogStreamHandle)>);

    /// Drive the platform to stage a package into a droplet
    fn stage_package(
        &self,
        package_guid: &str,
        app_name: &str,
        space_guid: &str,
    ) -> StagingStreams;

    async fn stop_application(&self, app_guid: &str) -> (Warnings, Result<()>);

    async fn start_application(&self, app_guid: &str) -> (Warnings, Result<()>);

    async fn set_application_droplet(
        &self,
        app_guid: &str,
        droplet_guid: &str,
    ) -> (Warnings, Result<()>);

    /// Create a deployment resource; returns the deployment guid
    async fn create_deployment(&self, request: &DeploymentRequest) -> (Warnings, Result<String>);

    /// Block until an application start reaches a terminal state
    async fn poll_start(&self, app_guid: &str) -> (Warnings, Result<()>);

    /// Block until a deployment completes, or, when `partial` is set, until
    /// its first rollout milestone is confirmed healthy
    async fn poll_start_for_deployment(
        &self,
        deployment_guid: &str,
        partial: bool,
    ) -> (Warnings, Result<()>);

    async fn get_detailed_app_summary(
        &self,
        app_name: &str,
        space_guid: &str,
        obfuscate: bool,
    ) -> (Warnings, Result<DetailedAppSummary>);
}

/// Convenience for building the error side of a collaborator result
pub fn platform_err<T>(message: impl Into<String>) -> Result<T> {
    Err(DeployError::platform(message))
}
