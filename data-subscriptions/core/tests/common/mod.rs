#![allow(dead_code)]

use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Mutex,
};

use async_trait::async_trait;
use catalog::{DatasetMetadata, MetadataClient, MetadataKind, Organization, UserMetadata};
use chrono::{DateTime, Utc};
use data_subscriptions_core::{
    config::NotificationConfig,
    model::{parse_timestamp, ActivityRecord, NotificationCandidate},
};
use notification::{Notification, NotificationClient};

pub const TEMPLATE_ID: &str = "d-template";
pub const SUBJECT: &str = "A dataset you have subscribed to has been updated";

pub fn config() -> NotificationConfig {
    NotificationConfig {
        template_id: TEMPLATE_ID.to_string(),
        subject: SUBJECT.to_string(),
        site_url: "https://data.example.com/".parse().unwrap(),
    }
}

pub fn timestamp(value: &str) -> DateTime<Utc> { parse_timestamp(value).unwrap() }

pub fn activity(dataset_id: &str, at: &str) -> ActivityRecord {
    ActivityRecord { dataset_id: dataset_id.to_string(), timestamp: timestamp(at) }
}

pub fn candidate(user_id: &str, activities: Vec<ActivityRecord>) -> NotificationCandidate {
    NotificationCandidate {
        user_id: user_id.to_string(),
        activities,
        last_notification_time: timestamp("2020-01-31T23:30:00Z"),
    }
}

/// In-memory catalog recording every lookup it serves.
#[derive(Default)]
pub struct MockMetadataClient {
    users: BTreeMap<String, UserMetadata>,
    packages: BTreeMap<String, DatasetMetadata>,
    fail_users: bool,
    fail_packages: bool,
    user_requests: Mutex<Vec<BTreeSet<String>>>,
    package_requests: Mutex<Vec<BTreeSet<String>>>,
}

impl MockMetadataClient {
    pub fn new() -> Self { Self::default() }

    pub fn with_user(mut self, id: &str, email: Option<&str>, display_name: &str) -> Self {
        let user = UserMetadata {
            id: id.to_string(),
            email: email.map(ToString::to_string),
            display_name: display_name.to_string(),
        };
        let _ = self.users.insert(id.to_string(), user);
        self
    }

    pub fn with_dataset(mut self, id: &str, title: &str, organization: Option<&str>) -> Self {
        let dataset = DatasetMetadata {
            id: id.to_string(),
            name: format!("{id}-name"),
            title: title.to_string(),
            organization: organization
                .map(|name| Organization { name: name.to_string(), title: name.to_uppercase() }),
        };
        let _ = self.packages.insert(id.to_string(), dataset);
        self
    }

    /// Registers a user the catalog resolves from `key`, a name or an id
    /// other than the one it stores.
    pub fn with_user_alias(mut self, key: &str, id: &str, email: &str) -> Self {
        let user = UserMetadata {
            id: id.to_string(),
            email: Some(email.to_string()),
            display_name: key.to_uppercase(),
        };
        let _ = self.users.insert(key.to_string(), user);
        self
    }

    pub fn failing_users(mut self) -> Self {
        self.fail_users = true;
        self
    }

    pub fn failing_packages(mut self) -> Self {
        self.fail_packages = true;
        self
    }

    pub fn user_requests(&self) -> Vec<BTreeSet<String>> { self.user_requests.lock().unwrap().clone() }

    pub fn package_requests(&self) -> Vec<BTreeSet<String>> {
        self.package_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataClient for MockMetadataClient {
    async fn fetch_users(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, UserMetadata>, catalog::Error> {
        self.user_requests.lock().unwrap().push(ids.clone());
        if self.fail_users {
            return Err(catalog::Error::ActionFailed {
                kind: MetadataKind::User,
                id: ids.iter().next().cloned().unwrap_or_default(),
                error_type: "Authorization Error".to_string(),
                message: "Access denied".to_string(),
            });
        }
        Ok(ids.iter().filter_map(|id| Some((id.clone(), self.users.get(id)?.clone()))).collect())
    }

    async fn fetch_packages(
        &self,
        ids: &BTreeSet<String>,
    ) -> Result<BTreeMap<String, DatasetMetadata>, catalog::Error> {
        self.package_requests.lock().unwrap().push(ids.clone());
        if self.fail_packages {
            return Err(catalog::Error::ActionFailed {
                kind: MetadataKind::Package,
                id: ids.iter().next().cloned().unwrap_or_default(),
                error_type: "Internal Server Error".to_string(),
                message: "database is down".to_string(),
            });
        }
        Ok(ids.iter().filter_map(|id| Some((id.clone(), self.packages.get(id)?.clone()))).collect())
    }
}

/// Mail transport recording every attempt; rejects mail for `failing_recipient`.
#[derive(Default)]
pub struct MockSender {
    failing_recipient: Option<String>,
    attempts: Mutex<Vec<Notification>>,
}

impl MockSender {
    pub fn new() -> Self { Self::default() }

    pub fn failing_for(recipient: &str) -> Self {
        Self { failing_recipient: Some(recipient.to_string()), attempts: Mutex::default() }
    }

    pub fn attempts(&self) -> Vec<Notification> { self.attempts.lock().unwrap().clone() }
}

#[async_trait]
impl NotificationClient for MockSender {
    async fn send_notification(&self, notification: &Notification) -> Result<(), notification::Error> {
        self.attempts.lock().unwrap().push(notification.clone());
        if self.failing_recipient.as_deref() == Some(notification.recipient()) {
            return Err(notification::Error::SendEmail {
                status: 400,
                body: r#"{"errors":[{"message":"Does not contain a valid address."}]}"#.to_string(),
            });
        }
        Ok(())
    }
}
