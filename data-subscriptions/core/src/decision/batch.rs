use catalog::MetadataClient;
use notification::NotificationClient;

use super::NotificationDecision;
use crate::{
    model::{NotificationCandidate, Outcome},
    Error,
};

/// Summary of a batch of notification decisions.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub sent: usize,

    pub skipped: usize,

    /// User id and cause of every failed decision, in batch order.
    pub failed: Vec<(String, Error)>,
}

impl BatchReport {
    #[inline]
    #[must_use]
    pub fn total(&self) -> usize { self.sent + self.skipped + self.failed.len() }

    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool { self.failed.is_empty() }
}

impl<M, S> NotificationDecision<'_, M, S>
where
    M: MetadataClient + ?Sized,
    S: NotificationClient + ?Sized,
{
    /// Decides on every candidate in turn. A failure is recorded and the
    /// batch moves on to the next candidate.
    pub async fn dispatch_batch(&self, candidates: &[NotificationCandidate]) -> BatchReport {
        let mut report = BatchReport::default();

        for candidate in candidates {
            match self.decide_and_dispatch(candidate).await {
                Ok(Outcome::Sent) => report.sent += 1,
                Ok(Outcome::Skipped(reason)) => {
                    tracing::debug!(user_id = %candidate.user_id, %reason, "Candidate skipped");
                    report.skipped += 1;
                }
                Err(error) => {
                    tracing::error!(user_id = %candidate.user_id, %error, "Failed to notify user");
                    report.failed.push((candidate.user_id.clone(), error));
                }
            }
        }

        tracing::info!(
            sent = report.sent,
            skipped = report.skipped,
            failed = report.failed.len(),
            "Notification batch finished"
        );
        report
    }
}
