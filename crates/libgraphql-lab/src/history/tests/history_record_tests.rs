use crate::history::HistoryRecord;
use crate::history::HistoryRequest;
use crate::history::HistorySubscription;
use crate::operation::Operation;
use std::time::Duration;
use time::OffsetDateTime;
use uuid::Uuid;

fn request(status: u16, response: &str) -> HistoryRequest {
    HistoryRequest {
        id: Uuid::new_v4(),
        status,
        duration: Duration::from_millis(12),
        size: response.len(),
        response: response.to_string(),
        headers: "{}".to_string(),
        operation: Operation::new("GetUser", "query GetUser { user { id } }"),
        preflight_logs: vec![],
        created_at: OffsetDateTime::now_utc(),
    }
}

#[test]
fn success_status_without_errors_is_not_an_error() {
    assert!(!request(200, r#"{"data":{"user":null}}"#).is_error());
    assert!(!request(204, "").is_error());
}

#[test]
fn non_success_status_is_an_error() {
    assert!(request(500, r#"{"data":null}"#).is_error());
    assert!(request(302, "").is_error());
    assert!(request(0, "connection refused").is_error());
}

#[test]
fn top_level_errors_member_is_an_error() {
    assert!(request(200, r#"{"data":null,"errors":[{"message":"boom"}]}"#).is_error());
    assert!(!request(200, r#"{"data":{"errors":"nested does not count"}}"#).is_error());
}

#[test]
fn records_are_tagged_by_kind() {
    let req = HistoryRecord::Request(request(200, "{}"));
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json["kind"], "request");
    assert_eq!(json["status"], 200);

    let sub = HistoryRecord::Subscription(HistorySubscription {
        id: Uuid::new_v4(),
        responses: vec![],
        operation: Operation::new("OnPost", "subscription OnPost { postAdded }"),
        preflight_logs: vec![],
        created_at: OffsetDateTime::now_utc(),
    });
    let json = serde_json::to_value(&sub).unwrap();
    assert_eq!(json["kind"], "subscription");
    assert_eq!(json["responses"], serde_json::json!([]));

    let back = serde_json::from_value::<HistoryRecord>(json).unwrap();
    assert_eq!(back, sub);
    assert!(back.as_subscription().is_some());
    assert!(back.as_request().is_none());
}
