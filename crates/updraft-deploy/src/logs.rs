//! Log tail coordination
//!
//! The platform's live log feed arrives as two unbounded productions: log
//! lines and transient tailing errors. Tailing errors are non-fatal; each is
//! reported as a warning and tailing continues. The feed is stopped through
//! [`LogStreamHandle`], whose cancellation is idempotent so the error path,
//! the success path and a feed that closed on its own all converge without
//! double-close faults.

use crate::actor::LogStream;
use crate::reporter::Reporter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

/// Single-use cancellation token for a log feed.
///
/// Clones share the same token. The first `cancel` wins; later or concurrent
/// calls are no-ops.
#[derive(Clone, Default)]
pub struct LogStreamHandle {
    cancelled: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl LogStreamHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the feed. Returns whether this call performed the cancellation.
    pub fn cancel(&self) -> bool {
        let first = !self.cancelled.swap(true, Ordering::SeqCst);
        if first {
            self.notify.notify_waiters();
        }
        first
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Resolve once the feed has been cancelled. Used by feed producers to
    /// know when to close their channels.
    pub async fn cancelled(&self) {
        while !self.is_cancelled() {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            // Register interest before re-checking the flag, otherwise a
            // cancel between check and await would be missed.
            notified.as_mut().enable();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

/// Consume a log feed until both of its channels close, forwarding staging
/// log lines to the operator and tailing errors to the warning stream.
///
/// Awaiting the returned handle is the drain-before-terminate barrier: once
/// it resolves, every line the feed delivered has reached the UI.
pub(crate) fn spawn_drain(mut stream: LogStream, reporter: Reporter) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut messages_open = true;
        let mut errors_open = true;

        while messages_open || errors_open {
            tokio::select! {
                message = stream.messages.recv(), if messages_open => match message {
                    Some(message) => {
                        // Runtime lines on the pre-start feed are noise;
                        // only build output is shown while staging.
                        if message.staging() {
                            reporter.log_message(&message);
                        }
                    }
                    None => messages_open = false,
                },
                error = stream.errors.recv(), if errors_open => match error {
                    Some(error) => {
                        debug!(error = %error, "transient log tailing error");
                        reporter.warning(&error.to_string());
                    }
                    None => errors_open = false,
                },
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::DeployUi;
    use std::time::Duration;
    use tokio::sync::mpsc;
    use updraft_types::{DetailedAppSummary, LogMessage};

    struct NullUi;

    impl DeployUi for NullUi {
        fn text(&self, _line: &str) {}
        fn warnings(&self, _warnings: &[String]) {}
        fn log_message(&self, _message: &LogMessage) {}
        fn app_summary(&self, _summary: &DetailedAppSummary) {}
    }

    #[test]
    fn cancel_is_idempotent() {
        let handle = LogStreamHandle::new();
        assert!(!handle.is_cancelled());
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(!handle.clone().cancel());
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn concurrent_cancels_converge_to_one_winner() {
        let handle = LogStreamHandle::new();
        let mut tasks = Vec::new();
        for _ in 0..8 {
            let handle = handle.clone();
            tasks.push(tokio::spawn(async move { handle.cancel() }));
        }

        let mut winners = 0;
        for task in tasks {
            if task.await.expect("cancel task should not panic") {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn cancelled_resolves_for_waiters_and_late_callers() {
        let handle = LogStreamHandle::new();
        let waiter = {
            let handle = handle.clone();
            tokio::spawn(async move { handle.cancelled().await })
        };

        handle.cancel();
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter should wake after cancel")
            .expect("waiter should not panic");

        // Already-cancelled handles resolve immediately.
        tokio::time::timeout(Duration::from_secs(1), handle.cancelled())
            .await
            .expect("late caller should not block");
    }

    #[tokio::test]
    async fn cancel_after_the_feed_closed_on_its_own_converges() {
        let (message_tx, messages) = mpsc::unbounded_channel();
        let (error_tx, errors) = mpsc::unbounded_channel();
        let handle = LogStreamHandle::new();
        let drain = spawn_drain(
            LogStream { messages, errors },
            Reporter::new(Arc::new(NullUi)),
        );

        // The producers go away without anyone cancelling.
        drop(message_tx);
        drop(error_tx);
        tokio::time::timeout(Duration::from_secs(1), drain)
            .await
            .expect("drain should finish once both channels close")
            .expect("drain task should not panic");

        // A cancel arriving after the fact is still a clean first-and-only.
        assert!(handle.cancel());
        assert!(!handle.cancel());
        tokio::time::timeout(Duration::from_secs(1), handle.cancelled())
            .await
            .expect("waiters still resolve after a post-close cancel");
    }
}
