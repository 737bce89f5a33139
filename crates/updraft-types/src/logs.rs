//! Streamed log lines

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source type tag carried by log lines emitted during staging
pub const STAGING_LOG: &str = "STG";

/// One line of streamed output from the platform's log feed.
///
/// Ordering within a single feed is arrival order; there is no ordering
/// guarantee across feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub message: String,
    pub message_type: String,
    pub timestamp: DateTime<Utc>,
    pub source_type: String,
    pub source_instance: String,
}

impl LogMessage {
    pub fn new(
        message: impl Into<String>,
        message_type: impl Into<String>,
        timestamp: DateTime<Utc>,
        source_type: impl Into<String>,
        source_instance: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            message_type: message_type.into(),
            timestamp,
            source_type: source_type.into(),
            source_instance: source_instance.into(),
        }
    }

    /// Whether this line was produced by a staging build
    pub fn staging(&self) -> bool {
        self.source_type == STAGING_LOG
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_lines_are_tagged_by_source_type() {
        let staging = LogMessage::new("building", STAGING_LOG, Utc::now(), STAGING_LOG, "1");
        let runtime = LogMessage::new("serving", "OUT", Utc::now(), "OUT", "0");
        assert!(staging.staging());
        assert!(!runtime.staging());
    }
}
