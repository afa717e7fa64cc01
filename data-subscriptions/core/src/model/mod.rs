// Values flowing into and out of the notification decisions.

use std::{collections::BTreeSet, fmt};

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A user's registered interest in a dataset. Presence-only.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Subscription {
    pub dataset_id: String,
    pub user_id: String,
}

impl Subscription {
    #[inline]
    pub fn new(dataset_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self { dataset_id: dataset_id.into(), user_id: user_id.into() }
    }
}

/// One external change event of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ActivityRecord {
    #[serde(alias = "object_id")]
    pub dataset_id: String,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

/// Everything needed to decide on one user's notification.
///
/// `activities` are expected to be filtered to those newer than
/// `last_notification_time` already.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NotificationCandidate {
    pub user_id: String,

    #[serde(default)]
    pub activities: Vec<ActivityRecord>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    pub last_notification_time: DateTime<Utc>,
}

impl NotificationCandidate {
    /// Distinct ids of the datasets the activities refer to.
    #[must_use]
    pub fn dataset_ids(&self) -> BTreeSet<String> {
        self.activities.iter().map(|activity| activity.dataset_id.clone()).collect()
    }
}

/// Result of a decision that did not fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Sent,
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoActivities,
    UserNotFound,
    MissingEmail,
    DatasetNotFound,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActivities => write!(f, "no activities"),
            Self::UserNotFound => write!(f, "user not found"),
            Self::MissingEmail => write!(f, "user has no email"),
            Self::DatasetNotFound => write!(f, "dataset not found"),
        }
    }
}

/// Parses an RFC 3339 timestamp, or a naive ISO 8601 one taken as UTC.
///
/// # Errors
///
/// Returns an error if `value` matches neither format.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(value).map(|timestamp| timestamp.with_timezone(&Utc)).or_else(
        |_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc()),
    )
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let buf = String::deserialize(deserializer)?;

    parse_timestamp(&buf).map_err(serde::de::Error::custom)
}
