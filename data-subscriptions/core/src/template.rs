//! Dynamic template data for notification emails.
//!
//! Everything here is a pure transformation of already fetched metadata, so it
//! can be exercised without a catalog or a mail provider.

use std::collections::{BTreeMap, BTreeSet};

use catalog::{DatasetMetadata, UserMetadata};
use chrono::{DateTime, Utc};
use serde::Serialize;
use snafu::ensure;
use url::Url;

use crate::{error, model::ActivityRecord, Result};

/// The recipient as shown in the email.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserBlock {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl UserBlock {
    /// Builds the block for the user looked up as `user_id`, which may be
    /// a name rather than the id the catalog stores.
    ///
    /// Returns `None` when the catalog did not disclose an email address.
    #[must_use]
    pub fn from_metadata(user_id: &str, user: &UserMetadata) -> Option<Self> {
        let email = user.email.as_deref().filter(|email| !email.is_empty())?;

        Some(Self {
            id: user_id.to_string(),
            email: email.to_string(),
            name: user.display_name.clone(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DatasetEntry {
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ActivityEntry {
    pub dataset_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset_title: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// The dataset a user was unsubscribed from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PackageBlock {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Placeholder values handed to the email template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub user: UserBlock,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub datasets: Vec<DatasetEntry>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<ActivityEntry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub non_subs_package: Option<PackageBlock>,
}

#[derive(Clone, Copy, Debug)]
pub struct EmailTemplateBuilder<'a> {
    site_url: &'a Url,
}

impl<'a> EmailTemplateBuilder<'a> {
    #[inline]
    #[must_use]
    pub const fn new(site_url: &'a Url) -> Self { Self { site_url } }

    /// Link to a dataset on the frontend site: the organization name resolved
    /// against the site URL, followed by the dataset name.
    ///
    /// Datasets without an organization have no link.
    #[must_use]
    pub fn dataset_url(&self, dataset: &DatasetMetadata) -> Option<String> {
        let organization = dataset.organization.as_ref()?;
        let organization_url = self.site_url.join(&organization.name).ok()?;

        Some(format!("{organization_url}/{}", dataset.name))
    }

    /// Builds the update email for `user`.
    ///
    /// Datasets are listed once each, in order of their first activity.
    /// Activities on datasets missing from `datasets` are kept but carry no
    /// title.
    ///
    /// # Errors
    ///
    /// Returns an error if `activities` is empty.
    pub fn build(
        &self,
        user: &UserBlock,
        datasets: &BTreeMap<String, DatasetMetadata>,
        activities: &[ActivityRecord],
    ) -> Result<TemplateData> {
        ensure!(!activities.is_empty(), error::NoActivitiesSnafu);

        let mut listed = BTreeSet::new();
        let dataset_entries = activities
            .iter()
            .filter(|activity| listed.insert(activity.dataset_id.as_str()))
            .filter_map(|activity| datasets.get(&activity.dataset_id))
            .map(|dataset| DatasetEntry {
                id: dataset.id.clone(),
                name: dataset.name.clone(),
                title: dataset.title.clone(),
                url: self.dataset_url(dataset),
            })
            .collect();

        let activity_entries = activities
            .iter()
            .map(|activity| ActivityEntry {
                dataset_id: activity.dataset_id.clone(),
                dataset_title: datasets.get(&activity.dataset_id).map(|d| d.title.clone()),
                timestamp: activity.timestamp,
            })
            .collect();

        Ok(TemplateData {
            user: user.clone(),
            datasets: dataset_entries,
            activities: activity_entries,
            non_subs_package: None,
        })
    }

    /// Builds the email telling `user` that `dataset` can no longer be
    /// subscribed to.
    #[must_use]
    pub fn build_non_subscribable(&self, user: &UserBlock, dataset: &DatasetMetadata) -> TemplateData {
        TemplateData {
            user: user.clone(),
            datasets: Vec::new(),
            activities: Vec::new(),
            non_subs_package: Some(PackageBlock {
                title: dataset.title.clone(),
                url: self.dataset_url(dataset),
            }),
        }
    }
}
