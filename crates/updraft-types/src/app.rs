//! Application resources and their scoping context

use crate::droplet::Droplet;
use serde::{Deserialize, Serialize};

/// Lifecycle state of an application as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationState {
    /// No desired instances
    #[default]
    Stopped,
    /// The platform is keeping instances running
    Started,
}

impl ApplicationState {
    pub fn is_started(self) -> bool {
        matches!(self, ApplicationState::Started)
    }
}

/// A deployable unit on the platform
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Application {
    /// Platform identifier
    pub guid: String,
    /// Human-readable name, unique within a space
    pub name: String,
    /// Lifecycle state at the time it was read
    pub state: ApplicationState,
}

/// A space scoping applications within an organization
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Space {
    pub guid: String,
    pub name: String,
}

/// The ownership context a space belongs to
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Organization {
    pub guid: String,
    pub name: String,
}

/// The operator the CLI is currently authenticated as
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

/// Detailed post-start view of an application, fetched for display
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetailedAppSummary {
    pub app: Application,
    /// Droplet the app is currently running, if any
    pub current_droplet: Option<Droplet>,
}
