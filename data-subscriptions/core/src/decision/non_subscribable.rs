use catalog::MetadataClient;
use notification::NotificationClient;

use super::dispatch;
use crate::{
    cache::MetadataCache,
    config::NotificationConfig,
    model::{Outcome, SkipReason, Subscription},
    template::{EmailTemplateBuilder, UserBlock},
    Result,
};

/// Tells a user that a subscription was removed because its dataset can no
/// longer be subscribed to.
pub struct UnsubscribeNotificationDecision<'a, M: ?Sized, S: ?Sized> {
    metadata: &'a M,
    sender: &'a S,
    config: &'a NotificationConfig,
}

impl<'a, M, S> UnsubscribeNotificationDecision<'a, M, S>
where
    M: MetadataClient + ?Sized,
    S: NotificationClient + ?Sized,
{
    #[inline]
    pub const fn new(metadata: &'a M, sender: &'a S, config: &'a NotificationConfig) -> Self {
        Self { metadata, sender, config }
    }

    /// Sends one email about the removed `subscription` when both its dataset
    /// and its user resolve in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a metadata lookup fails or the email is rejected.
    #[tracing::instrument(
        skip_all,
        fields(dataset_id = %subscription.dataset_id, user_id = %subscription.user_id)
    )]
    pub async fn decide_and_dispatch(&self, subscription: &Subscription) -> Result<Outcome> {
        let Subscription { dataset_id, user_id } = subscription;

        let mut cache = MetadataCache::new(self.metadata);

        // both lookups happen before either result is checked
        let dataset = cache.dataset(dataset_id).await?;
        let user = cache.user(user_id).await?;

        let (dataset, user) = match (dataset, user) {
            (Some(dataset), Some(user)) => (dataset, user),
            (None, _) => {
                tracing::info!("Dataset is unknown to the catalog, skip notification");
                return Ok(Outcome::Skipped(SkipReason::DatasetNotFound));
            }
            (Some(_), None) => {
                tracing::info!("User is unknown to the catalog, skip notification");
                return Ok(Outcome::Skipped(SkipReason::UserNotFound));
            }
        };
        let Some(user) = UserBlock::from_metadata(user_id, &user) else {
            tracing::info!("User has no email address, skip notification");
            return Ok(Outcome::Skipped(SkipReason::MissingEmail));
        };

        let template_data =
            EmailTemplateBuilder::new(&self.config.site_url).build_non_subscribable(&user, &dataset);

        dispatch(self.sender, self.config, &template_data).await?;

        tracing::info!("Non-subscribable dataset notification sent");
        Ok(Outcome::Sent)
    }
}
