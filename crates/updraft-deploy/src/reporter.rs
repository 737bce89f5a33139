//! Operator-facing output seam and the warning side channel

use std::sync::Arc;
use updraft_types::{DetailedAppSummary, LogMessage, Warnings};

/// Display collaborator implemented by the CLI's UI layer.
///
/// `warnings` takes a whole batch in one call so that a batch can never be
/// interleaved mid-sequence by a concurrently reporting task.
pub trait DeployUi: Send + Sync {
    /// Display one progress line on the output stream
    fn text(&self, line: &str);

    /// Flush an ordered batch of warnings to the error stream
    fn warnings(&self, warnings: &[String]);

    /// Flush a single warning to the error stream
    fn warning(&self, warning: &str) {
        self.warnings(&[warning.to_string()]);
    }

    /// Display a streamed log line
    fn log_message(&self, message: &LogMessage);

    /// Display the post-start application summary
    fn app_summary(&self, summary: &DetailedAppSummary);
}

/// Warning reporter threaded through every sub-operation.
///
/// Append-only: batches are flushed in the order received, no reordering or
/// deduplication. Cloning shares the underlying UI.
#[derive(Clone)]
pub struct Reporter {
    ui: Arc<dyn DeployUi>,
}

impl Reporter {
    pub fn new(ui: Arc<dyn DeployUi>) -> Self {
        Self { ui }
    }

    pub fn text(&self, line: &str) {
        self.ui.text(line);
    }

    /// Flush a warnings batch; empty batches are dropped silently
    pub fn warn_batch(&self, warnings: &Warnings) {
        if !warnings.is_empty() {
            self.ui.warnings(warnings);
        }
    }

    pub fn warning(&self, warning: &str) {
        self.ui.warning(warning);
    }

    pub fn log_message(&self, message: &LogMessage) {
        self.ui.log_message(message);
    }

    pub fn app_summary(&self, summary: &DetailedAppSummary) {
        self.ui.app_summary(summary);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CapturingUi {
        err: Mutex<Vec<String>>,
    }

    impl DeployUi for CapturingUi {
        fn text(&self, _line: &str) {}

        fn warnings(&self, warnings: &[String]) {
            self.err.lock().unwrap().extend_from_slice(warnings);
        }

        fn log_message(&self, _message: &LogMessage) {}

        fn app_summary(&self, _summary: &DetailedAppSummary) {}
    }

    #[test]
    fn batches_flush_in_order_received() {
        let ui = Arc::new(CapturingUi::default());
        let reporter = Reporter::new(ui.clone());

        reporter.warn_batch(&vec!["a".into(), "b".into()]);
        reporter.warn_batch(&vec![]);
        reporter.warning("c");

        assert_eq!(*ui.err.lock().unwrap(), vec!["a", "b", "c"]);
    }
}
