//! Updraft Deploy - staging and deployment orchestration
//!
//! Takes a previously uploaded package, stages it into a runnable droplet
//! while tailing build logs to the operator, then brings the application to
//! a running state through one of three execution paths (direct lifecycle,
//! rolling deployment, canary deployment).
//!
//! ## Architectural Boundaries
//!
//! - The platform owns applications, droplets and deployments; this crate
//!   only issues operations against it through [`PlatformActor`] and holds
//!   identifiers it hands back.
//! - Display is behind [`DeployUi`]; this crate decides *what* the operator
//!   sees and in what order, never how it is rendered.
//! - Transport concerns (auth, retry, wire format) live beneath the actor
//!   contract and are invisible here.
//!
//! ## Concurrency
//!
//! One staging call runs two tasks: the log-drain task consuming the live
//! log feed, and the caller's task consuming the stage executor's feeds.
//! The terminal staging value is only acted on after the log feed has been
//! cancelled and fully drained, so build log lines never appear after the
//! final staging message.

#![deny(unsafe_code)]

pub mod actor;
pub mod deployer;
pub mod error;
pub mod logs;
pub mod poller;
pub mod reporter;
pub mod stager;
pub mod strategy;

pub use actor::{LogStream, PlatformActor, StagingStreams};
pub use deployer::AppDeployer;
pub use error::{DeployError, Result};
pub use logs::LogStreamHandle;
pub use poller::PollMode;
pub use reporter::{DeployUi, Reporter};
pub use strategy::{AppAction, AppStartOpts};
