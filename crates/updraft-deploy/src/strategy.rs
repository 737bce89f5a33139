//! Deployment strategy execution
//!
//! Selects one of three execution paths for bringing an application to the
//! desired running state. Strategy takes precedence over action: rolling and
//! canary always go through the deployment resource, even for rollbacks that
//! would otherwise use direct lifecycle calls, and the already-started /
//! already-stopped short circuits exist only on the default path.

use crate::actor::PlatformActor;
use crate::error::Result;
use crate::poller::{self, PollMode};
use crate::reporter::Reporter;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};
use updraft_types::{
    Application, CanaryStep, DeploymentOptions, DeploymentRequest, DeploymentStrategy,
    DeploymentTarget,
};

/// What the caller is doing to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppAction {
    Starting,
    Restarting,
    RollingBack,
}

impl fmt::Display for AppAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AppAction::Starting => "Starting",
            AppAction::Restarting => "Restarting",
            AppAction::RollingBack => "Rolling back",
        })
    }
}

/// Configuration record for one start/restart/rollback call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppStartOpts {
    pub action: AppAction,
    pub strategy: DeploymentStrategy,
    /// Maximum instances simultaneously replaced by a rollout; zero is
    /// rejected before any platform call
    pub max_in_flight: u32,
    /// Request partial-wait polling where eligible
    pub no_wait: bool,
    /// Ordered weight steps; meaningful only for the canary strategy
    pub canary_steps: Vec<CanaryStep>,
}

/// How a strategy run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartOutcome {
    Completed,
    /// Default-path short circuit: the app was already in the desired state
    AlreadyStarted,
}

/// Runs one execution path against the platform for a single call
pub(crate) struct StrategyExecutor<'a> {
    actor: &'a dyn PlatformActor,
    reporter: &'a Reporter,
}

impl<'a> StrategyExecutor<'a> {
    pub(crate) fn new(actor: &'a dyn PlatformActor, reporter: &'a Reporter) -> Self {
        Self { actor, reporter }
    }

    #[instrument(skip(self, app, opts), fields(app_name = %app.name, strategy = %opts.strategy, action = ?opts.action))]
    pub(crate) async fn run(
        &self,
        app: &Application,
        resource_guid: Option<&str>,
        opts: &AppStartOpts,
    ) -> Result<StartOutcome> {
        match opts.strategy {
            DeploymentStrategy::Rolling | DeploymentStrategy::Canary => {
                self.run_deployment(app, resource_guid, opts).await
            }
            DeploymentStrategy::Default => self.run_direct(app, resource_guid, opts).await,
        }
    }

    /// Deployment-resource path, shared by rolling and canary. Independent
    /// of the action except for target selection; idempotence of repeated
    /// deployments is the platform's responsibility.
    async fn run_deployment(
        &self,
        app: &Application,
        resource_guid: Option<&str>,
        opts: &AppStartOpts,
    ) -> Result<StartOutcome> {
        self.reporter
            .text(&format!("Creating deployment for app {}...", app.name));

        let request = deployment_request(&app.guid, resource_guid, opts);
        let (warnings, created) = self.actor.create_deployment(&request).await;
        self.reporter.warn_batch(&warnings);
        let deployment_guid = created?;
        info!(deployment_guid = %deployment_guid, "deployment created");

        self.reporter.text("Waiting for app to deploy...");
        let mode = PollMode::for_deployment(opts.no_wait, opts.max_in_flight);
        poller::poll_deployment(self.actor, self.reporter, &deployment_guid, mode).await?;

        Ok(StartOutcome::Completed)
    }

    /// Direct lifecycle path: stop if restarting a started app, short
    /// circuit if starting an already-started app, assign the droplet,
    /// start, poll to completion.
    async fn run_direct(
        &self,
        app: &Application,
        resource_guid: Option<&str>,
        opts: &AppStartOpts,
    ) -> Result<StartOutcome> {
        if opts.action == AppAction::Restarting && app.state.is_started() {
            self.reporter.text("Stopping app...");
            let (warnings, stopped) = self.actor.stop_application(&app.guid).await;
            self.reporter.warn_batch(&warnings);
            stopped?;
        }

        if opts.action == AppAction::Starting && app.state.is_started() {
            self.reporter
                .text(&format!("App '{}' is already started.", app.name));
            return Ok(StartOutcome::AlreadyStarted);
        }

        if let Some(droplet_guid) = resource_guid {
            let (warnings, set) = self
                .actor
                .set_application_droplet(&app.guid, droplet_guid)
                .await;
            self.reporter.warn_batch(&warnings);
            set?;
        }

        self.reporter.text("Waiting for app to start...");
        let (warnings, started) = self.actor.start_application(&app.guid).await;
        self.reporter.warn_batch(&warnings);
        started?;

        poller::poll_application(self.actor, self.reporter, &app.guid).await?;
        Ok(StartOutcome::Completed)
    }
}

/// Build the deployment request for the rolling/canary path.
///
/// The target is the revision when rolling back, otherwise the droplet;
/// canary steps are attached iff the strategy is canary, order preserved.
fn deployment_request(
    app_guid: &str,
    resource_guid: Option<&str>,
    opts: &AppStartOpts,
) -> DeploymentRequest {
    let target = resource_guid.map(|guid| match opts.action {
        AppAction::RollingBack => DeploymentTarget::Revision(guid.to_string()),
        AppAction::Starting | AppAction::Restarting => DeploymentTarget::Droplet(guid.to_string()),
    });

    let canary_steps = (opts.strategy == DeploymentStrategy::Canary)
        .then(|| opts.canary_steps.clone());

    DeploymentRequest {
        app_guid: app_guid.to_string(),
        strategy: opts.strategy,
        options: DeploymentOptions {
            max_in_flight: opts.max_in_flight,
            canary_steps,
        },
        target,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(action: AppAction, strategy: DeploymentStrategy) -> AppStartOpts {
        AppStartOpts {
            action,
            strategy,
            max_in_flight: 4,
            no_wait: false,
            canary_steps: vec![
                CanaryStep { instance_weight: 1 },
                CanaryStep { instance_weight: 2 },
                CanaryStep { instance_weight: 3 },
            ],
        }
    }

    #[test]
    fn rollback_targets_the_revision() {
        let request = deployment_request(
            "app-guid",
            Some("revision-guid"),
            &opts(AppAction::RollingBack, DeploymentStrategy::Rolling),
        );
        assert_eq!(
            request.target,
            Some(DeploymentTarget::Revision("revision-guid".into()))
        );
        assert_eq!(request.options.max_in_flight, 4);
    }

    #[test]
    fn restart_targets_the_droplet() {
        let request = deployment_request(
            "app-guid",
            Some("droplet-guid"),
            &opts(AppAction::Restarting, DeploymentStrategy::Rolling),
        );
        assert_eq!(
            request.target,
            Some(DeploymentTarget::Droplet("droplet-guid".into()))
        );
        assert!(request.options.canary_steps.is_none());
    }

    #[test]
    fn canary_steps_attach_in_order_for_canary_only() {
        let request = deployment_request(
            "app-guid",
            Some("droplet-guid"),
            &opts(AppAction::Starting, DeploymentStrategy::Canary),
        );
        let steps = request.options.canary_steps.expect("steps for canary");
        let weights: Vec<u32> = steps.iter().map(|s| s.instance_weight).collect();
        assert_eq!(weights, vec![1, 2, 3]);
    }

    #[test]
    fn missing_resource_guid_means_no_target() {
        let request = deployment_request(
            "app-guid",
            None,
            &opts(AppAction::Restarting, DeploymentStrategy::Rolling),
        );
        assert_eq!(request.target, None);
    }

    #[test]
    fn request_wire_form_omits_absent_fields() {
        let mut opts = opts(AppAction::Restarting, DeploymentStrategy::Rolling);
        opts.canary_steps.clear();
        let request = deployment_request("app-guid", None, &opts);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["strategy"], "rolling");
        assert!(value.get("target").is_none());
        assert!(value["options"].get("canary_steps").is_none());
    }

    #[test]
    fn action_display_reads_as_operator_text() {
        assert_eq!(AppAction::Starting.to_string(), "Starting");
        assert_eq!(AppAction::Restarting.to_string(), "Restarting");
        assert_eq!(AppAction::RollingBack.to_string(), "Rolling back");
    }
}
