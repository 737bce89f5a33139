//! Updraft Types - Resource types for the platform CLI
//!
//! Plain data types exchanged between the CLI command layer, the deployment
//! orchestrator and the platform control-plane client. Every type here is a
//! reference to platform-owned state: the CLI never mutates these directly,
//! it issues operations against the platform and reads the results back.
//!
//! ## Key Concepts
//!
//! - **Package**: an uploaded, not-yet-built source bundle (held by guid)
//! - **Droplet**: the staged, runnable build artifact produced from a package
//! - **Deployment**: a platform-tracked rollout shifting an app to a new
//!   droplet or revision
//! - **CanaryStep**: one weighted increment of a canary rollout

#![deny(unsafe_code)]

pub mod app;
pub mod deployment;
pub mod droplet;
pub mod logs;

pub use app::{
    Application, ApplicationState, DetailedAppSummary, Organization, Space, User,
};
pub use deployment::{
    CanaryStep, DeploymentOptions, DeploymentRequest, DeploymentStrategy, DeploymentTarget,
    InvalidStrategy,
};
pub use droplet::{Droplet, DropletState};
pub use logs::{LogMessage, STAGING_LOG};

/// Ordered batch of human-readable warnings surfaced by a platform call.
///
/// Batches are flushed to the operator in the order produced; a batch is
/// never reordered or deduplicated.
pub type Warnings = Vec<String>;
