//! Top-level deployment orchestrator
//!
//! [`AppDeployer`] composes the stage executor, the strategy executor and
//! the poller into the three operations the command layer calls: stage and
//! start, stage only, start only.

use crate::actor::PlatformActor;
use crate::error::{DeployError, Result};
use crate::reporter::{DeployUi, Reporter};
use crate::stager;
use crate::strategy::{AppStartOpts, StartOutcome, StrategyExecutor};
use std::sync::Arc;
use tracing::{info, instrument};
use updraft_types::{Application, Droplet, Organization, Space};

/// Orchestrates staging and starting applications against the platform.
///
/// Holds no platform state of its own; every mutation is a request sent
/// through the actor, and concurrent calls for different applications are
/// fully independent.
pub struct AppDeployer {
    actor: Arc<dyn PlatformActor>,
    reporter: Reporter,
}

impl AppDeployer {
    pub fn new(actor: Arc<dyn PlatformActor>, ui: Arc<dyn DeployUi>) -> Self {
        Self {
            actor,
            reporter: Reporter::new(ui),
        }
    }

    /// Stage `package_guid` into a droplet, then bring the app to a running
    /// state on that droplet.
    pub async fn stage_and_start(
        &self,
        app: &Application,
        space: &Space,
        organization: &Organization,
        package_guid: &str,
        opts: &AppStartOpts,
    ) -> Result<()> {
        let droplet = self.stage_app(app, package_guid, space).await?;
        self.start_app(app, space, organization, Some(&droplet.guid), opts)
            .await
    }

    /// Stage a package while tracing its build logs; returns the droplet
    /// exactly as the platform produced it.
    #[instrument(skip(self, app, space), fields(app_name = %app.name))]
    pub async fn stage_app(
        &self,
        app: &Application,
        package_guid: &str,
        space: &Space,
    ) -> Result<Droplet> {
        self.reporter.text("Staging app and tracing logs...");
        stager::stage(
            self.actor.as_ref(),
            &self.reporter,
            package_guid,
            &app.name,
            &space.guid,
        )
        .await
    }

    /// Bring an application to a running state. `resource_guid` is the
    /// droplet to assign (or the revision to roll back to); `None` keeps
    /// the app's current droplet.
    #[instrument(skip(self, app, space, organization, opts), fields(app_name = %app.name, strategy = %opts.strategy))]
    pub async fn start_app(
        &self,
        app: &Application,
        space: &Space,
        organization: &Organization,
        resource_guid: Option<&str>,
        opts: &AppStartOpts,
    ) -> Result<()> {
        if opts.max_in_flight == 0 {
            return Err(DeployError::InvalidMaxInFlight);
        }

        let user = self.actor.get_current_user().await?;
        self.reporter.text(&format!(
            "{} app {} in org {} / space {} as {}...",
            opts.action, app.name, organization.name, space.name, user.name
        ));

        let outcome = StrategyExecutor::new(self.actor.as_ref(), &self.reporter)
            .run(app, resource_guid, opts)
            .await?;
        if outcome == StartOutcome::AlreadyStarted {
            return Ok(());
        }

        let (warnings, summary) = self
            .actor
            .get_detailed_app_summary(&app.name, &space.guid, false)
            .await;
        self.reporter.warn_batch(&warnings);
        let summary = summary?;
        self.reporter.app_summary(&summary);

        info!(app_name = %app.name, "app is running");
        Ok(())
    }
}
