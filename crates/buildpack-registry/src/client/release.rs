//! Awaiting the outcome of a published revision
//!
//! Revisions are built asynchronously by the registry. The client polls the
//! revision until it leaves `pending` or the attempt budget runs out.

use tracing::{info, warn};

use buildpack_core::types::RevisionStatus;

use super::RegistryClient;

/// State of one release wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// Still waiting on the registry
    Polling,
    /// The revision left `pending`
    Settled(RevisionStatus),
    /// Attempt budget exhausted; carries the last observed status
    TimedOut(RevisionStatus),
}

impl PollState {
    /// Next state after `attempt` fetches.
    ///
    /// `observed` is the status read on this attempt, `None` if the fetch
    /// failed. `last` is the last status ever observed (`failed` if none).
    pub fn advance(
        observed: Option<RevisionStatus>,
        last: RevisionStatus,
        attempt: u32,
        max_attempts: u32,
    ) -> Self {
        match observed {
            Some(status) if status.is_settled() => PollState::Settled(status),
            _ if attempt >= max_attempts => PollState::TimedOut(last),
            _ => PollState::Polling,
        }
    }
}

/// Result of waiting on a release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// Last known status
    pub status: RevisionStatus,
    /// Number of revision fetches performed
    pub attempts: u32,
    /// Whether the budget ran out before the revision settled
    pub timed_out: bool,
}

impl RegistryClient {
    /// Wait for a revision to leave `pending` and return its status.
    ///
    /// Never fails: fetch errors are skipped, and when the attempt budget
    /// runs out the last observed status is returned (`failed` if no fetch
    /// ever succeeded).
    pub async fn wait_for_release(&self, buildpack: &str, revision_id: &str) -> RevisionStatus {
        self.wait_for_release_outcome(buildpack, revision_id).await.status
    }

    /// Like [`wait_for_release`](Self::wait_for_release), also reporting the
    /// attempt count and whether the wait timed out
    pub async fn wait_for_release_outcome(&self, buildpack: &str, revision_id: &str) -> ReleaseOutcome {
        let max_attempts = self.poll.max_attempts.max(1);
        let mut status = RevisionStatus::default();
        let mut attempts = 0;

        loop {
            attempts += 1;

            let observed = match self.revision_info(buildpack, revision_id).await {
                Ok(revision) => {
                    status = revision.status;
                    Some(revision.status)
                }
                Err(error) => {
                    warn!(
                        buildpack = %buildpack,
                        revision = %revision_id,
                        attempt = attempts,
                        error = %error,
                        "revision fetch failed, will retry"
                    );
                    None
                }
            };

            match PollState::advance(observed, status, attempts, max_attempts) {
                PollState::Polling => tokio::time::sleep(self.poll.interval).await,
                PollState::Settled(settled) => {
                    info!(buildpack = %buildpack, revision = %revision_id, status = %settled, attempts, "release settled");
                    return ReleaseOutcome {
                        status: settled,
                        attempts,
                        timed_out: false,
                    };
                }
                PollState::TimedOut(last) => {
                    warn!(buildpack = %buildpack, revision = %revision_id, status = %last, attempts, "timed out waiting for release");
                    return ReleaseOutcome {
                        status: last,
                        attempts,
                        timed_out: true,
                    };
                }
            }
        }
    }
}
