mod common;

use std::collections::BTreeSet;

use catalog::MetadataKind;
use data_subscriptions_core::{
    model::{Outcome, SkipReason},
    Error, NotificationDecision,
};
use notification::Notification;
use serde_json::json;

use self::common::{
    activity, candidate, config, timestamp, MockMetadataClient, MockSender, SUBJECT, TEMPLATE_ID,
};

fn catalog() -> MockMetadataClient {
    MockMetadataClient::new()
        .with_user("u1", Some("u1@x.com"), "U One")
        .with_dataset("d1", "D1", Some("org"))
        .with_dataset("d2", "D2", Some("org"))
}

fn ids(values: &[&str]) -> BTreeSet<String> { values.iter().map(ToString::to_string).collect() }

#[tokio::test]
async fn test_no_activities_is_skipped_without_lookups() {
    let metadata = catalog();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let outcome = decision.decide_and_dispatch(&candidate("u1", Vec::new())).await.unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::NoActivities));
    assert!(sender.attempts().is_empty());
    assert!(metadata.user_requests().is_empty());
    assert!(metadata.package_requests().is_empty());
}

#[tokio::test]
async fn test_unknown_user_is_skipped() {
    let metadata = catalog();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let outcome = decision.decide_and_dispatch(&candidate("stranger", activities)).await.unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::UserNotFound));
    assert!(sender.attempts().is_empty());
    assert!(metadata.package_requests().is_empty());
}

#[tokio::test]
async fn test_user_without_email_is_skipped() {
    let metadata = MockMetadataClient::new().with_user("u2", None, "U Two");
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let outcome = decision.decide_and_dispatch(&candidate("u2", activities)).await.unwrap();

    assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingEmail));
    assert!(sender.attempts().is_empty());
}

#[tokio::test]
async fn test_empty_user_id_is_rejected() {
    let metadata = catalog();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let err = decision.decide_and_dispatch(&candidate("", activities)).await.unwrap_err();

    assert!(matches!(err, Error::EmptyUserId), "expected EmptyUserId, got: {err}");
    assert!(metadata.user_requests().is_empty());
}

#[tokio::test]
async fn test_sends_one_email_with_template_data() {
    let metadata = catalog();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let at = "2020-02-01T00:00:00Z";
    let outcome = decision
        .decide_and_dispatch(&candidate("u1", vec![activity("d1", at)]))
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Sent);
    assert_eq!(
        sender.attempts(),
        vec![Notification::TemplateEmail {
            to: "u1@x.com".to_string(),
            subject: SUBJECT.to_string(),
            template_id: TEMPLATE_ID.to_string(),
            template_data: json!({
                "user": { "id": "u1", "email": "u1@x.com", "name": "U One" },
                "datasets": [{
                    "id": "d1",
                    "name": "d1-name",
                    "title": "D1",
                    "url": "https://data.example.com/org/d1-name"
                }],
                "activities": [{ "dataset_id": "d1", "dataset_title": "D1", "timestamp": timestamp(at) }]
            }),
        }]
    );
}

#[tokio::test]
async fn test_datasets_are_deduplicated_and_fetched_once() {
    let metadata = catalog();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![
        activity("d1", "2020-02-01T00:00:00Z"),
        activity("d1", "2020-02-01T00:10:00Z"),
        activity("d2", "2020-02-01T00:20:00Z"),
    ];
    let outcome = decision.decide_and_dispatch(&candidate("u1", activities)).await.unwrap();

    assert_eq!(outcome, Outcome::Sent);
    assert_eq!(metadata.user_requests(), vec![ids(&["u1"])]);
    assert_eq!(metadata.package_requests(), vec![ids(&["d1", "d2"])]);

    let attempts = sender.attempts();
    assert_eq!(attempts.len(), 1);
    let Notification::TemplateEmail { template_data, .. } = &attempts[0];
    let dataset_ids: Vec<_> =
        template_data["datasets"].as_array().unwrap().iter().map(|d| d["id"].clone()).collect();
    assert_eq!(dataset_ids, [json!("d1"), json!("d2")]);
    let activity_ids: Vec<_> =
        template_data["activities"].as_array().unwrap().iter().map(|a| a["dataset_id"].clone()).collect();
    assert_eq!(activity_ids, [json!("d1"), json!("d1"), json!("d2")]);
}

#[tokio::test]
async fn test_unknown_dataset_is_left_out_of_dataset_list() {
    let metadata = catalog();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities =
        vec![activity("d1", "2020-02-01T00:00:00Z"), activity("gone", "2020-02-01T00:05:00Z")];
    let outcome = decision.decide_and_dispatch(&candidate("u1", activities)).await.unwrap();

    assert_eq!(outcome, Outcome::Sent);
    let attempts = sender.attempts();
    let Notification::TemplateEmail { template_data, .. } = &attempts[0];
    assert_eq!(template_data["datasets"].as_array().unwrap().len(), 1);
    assert_eq!(template_data["activities"].as_array().unwrap().len(), 2);
    assert!(template_data["activities"][1].get("dataset_title").is_none());
}

#[tokio::test]
async fn test_transport_failure_is_reported_with_cause() {
    let metadata = catalog();
    let sender = MockSender::failing_for("u1@x.com");
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let err = decision.decide_and_dispatch(&candidate("u1", activities)).await.unwrap_err();

    assert!(
        matches!(
            err,
            Error::Dispatch {
                ref recipient,
                source: notification::Error::SendEmail { status: 400, ref body },
            } if recipient == "u1@x.com" && body.contains("valid address")
        ),
        "expected Dispatch, got: {err}"
    );
    // a single attempt, no retry
    assert_eq!(sender.attempts().len(), 1);
}

#[tokio::test]
async fn test_metadata_failure_is_reported_and_nothing_is_sent() {
    let metadata = catalog().failing_packages();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let err = decision.decide_and_dispatch(&candidate("u1", activities)).await.unwrap_err();

    assert!(
        matches!(err, Error::FetchMetadata { kind: MetadataKind::Package, .. }),
        "expected FetchMetadata, got: {err}"
    );
    assert!(sender.attempts().is_empty());
}

#[tokio::test]
async fn test_user_lookup_failure_is_reported_and_nothing_is_sent() {
    let metadata = catalog().failing_users();
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let err = decision.decide_and_dispatch(&candidate("u1", activities)).await.unwrap_err();

    assert!(
        matches!(err, Error::FetchMetadata { kind: MetadataKind::User, .. }),
        "expected FetchMetadata, got: {err}"
    );
    assert!(metadata.package_requests().is_empty());
    assert!(sender.attempts().is_empty());
}

#[tokio::test]
async fn test_user_block_carries_requested_id() {
    let metadata = catalog().with_user_alias("jane", "5f0e2a7c-uuid", "jane@x.com");
    let sender = MockSender::new();
    let config = config();
    let decision = NotificationDecision::new(&metadata, &sender, &config);

    let activities = vec![activity("d1", "2020-02-01T00:00:00Z")];
    let outcome = decision.decide_and_dispatch(&candidate("jane", activities)).await.unwrap();

    assert_eq!(outcome, Outcome::Sent);
    let attempts = sender.attempts();
    let Notification::TemplateEmail { template_data, .. } = &attempts[0];
    assert_eq!(template_data["user"]["id"], json!("jane"));
}
