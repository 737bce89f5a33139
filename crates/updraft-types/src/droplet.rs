//! Droplets - staged, runnable build artifacts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staging state of a droplet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropletState {
    /// Build in progress
    Staging,
    /// Build finished, artifact runnable
    Staged,
    /// Build failed
    Failed,
    /// Artifact aged out and can no longer be assigned
    Expired,
}

/// A staged build artifact produced from a package.
///
/// Produced exactly once per successful staging call; owned by the platform,
/// the CLI only holds the identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Droplet {
    pub guid: String,
    /// Creation time as reported by the platform
    pub created_at: Option<DateTime<Utc>>,
    pub state: DropletState,
}
