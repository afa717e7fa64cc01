use catalog::MetadataClient;
use notification::NotificationClient;
use snafu::ensure;

use super::dispatch;
use crate::{
    cache::MetadataCache,
    config::NotificationConfig,
    error,
    model::{NotificationCandidate, Outcome, SkipReason},
    template::{EmailTemplateBuilder, UserBlock},
    Result,
};

/// Decides whether a user gets an email about recent dataset activity, and
/// sends it.
pub struct NotificationDecision<'a, M: ?Sized, S: ?Sized> {
    metadata: &'a M,
    sender: &'a S,
    config: &'a NotificationConfig,
}

impl<'a, M, S> NotificationDecision<'a, M, S>
where
    M: MetadataClient + ?Sized,
    S: NotificationClient + ?Sized,
{
    #[inline]
    pub const fn new(metadata: &'a M, sender: &'a S, config: &'a NotificationConfig) -> Self {
        Self { metadata, sender, config }
    }

    /// Sends at most one email summarizing `candidate.activities`.
    ///
    /// Candidates without activities, and users the catalog does not know or
    /// shows without an email, are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the user id is empty, a metadata lookup fails or the
    /// email is rejected. No retry is made.
    #[tracing::instrument(
        skip_all,
        fields(user_id = %candidate.user_id, activities = candidate.activities.len())
    )]
    pub async fn decide_and_dispatch(&self, candidate: &NotificationCandidate) -> Result<Outcome> {
        let NotificationCandidate { user_id, activities, last_notification_time } = candidate;

        ensure!(!user_id.is_empty(), error::EmptyUserIdSnafu);

        if activities.is_empty() {
            tracing::info!("No dataset activity since {last_notification_time}, nothing to send");
            return Ok(Outcome::Skipped(SkipReason::NoActivities));
        }

        let mut cache = MetadataCache::new(self.metadata);

        let Some(user) = cache.user(user_id).await? else {
            tracing::info!("User is unknown to the catalog, skip notification");
            return Ok(Outcome::Skipped(SkipReason::UserNotFound));
        };
        let Some(user) = UserBlock::from_metadata(user_id, &user) else {
            tracing::info!("User has no email address, skip notification");
            return Ok(Outcome::Skipped(SkipReason::MissingEmail));
        };

        let dataset_ids = candidate.dataset_ids();
        let datasets = cache.datasets(&dataset_ids).await?;
        for dataset_id in dataset_ids.iter().filter(|id| !datasets.contains_key(*id)) {
            tracing::warn!(
                %dataset_id,
                "Dataset is unknown to the catalog, listing its activity without details"
            );
        }

        let template_data =
            EmailTemplateBuilder::new(&self.config.site_url).build(&user, &datasets, activities)?;

        dispatch(self.sender, self.config, &template_data).await?;

        tracing::info!(datasets = template_data.datasets.len(), "Notification sent");
        Ok(Outcome::Sent)
    }
}
