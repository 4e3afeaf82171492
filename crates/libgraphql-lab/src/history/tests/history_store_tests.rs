use crate::history::HistoryRecord;
use crate::history::HistoryRequest;
use crate::history::HistoryStore;
use crate::history::HistorySubscription;
use crate::operation::Operation;
use std::time::Duration;
use time::OffsetDateTime;
use time::macros::date;
use time::macros::datetime;
use uuid::Uuid;

fn request_at(created_at: OffsetDateTime) -> HistoryRecord {
    HistoryRecord::Request(HistoryRequest {
        id: Uuid::new_v4(),
        status: 200,
        duration: Duration::from_millis(3),
        size: 2,
        response: "{}".to_string(),
        headers: "{}".to_string(),
        operation: Operation::new("A", "query A { a }"),
        preflight_logs: vec![],
        created_at,
    })
}

fn subscription(store: &HistoryStore) -> HistoryRecord {
    HistoryRecord::Subscription(HistorySubscription {
        id: Uuid::new_v4(),
        responses: vec![],
        operation: Operation::new("OnTick", "subscription OnTick { tick }"),
        preflight_logs: vec![],
        created_at: store.timestamp(),
    })
}

#[test]
fn add_get_remove() {
    let store = HistoryStore::new();
    let id = store.add(request_at(OffsetDateTime::now_utc()));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).map(|record| record.id()), Some(id));

    assert!(store.remove(id).is_some());
    assert!(store.remove(id).is_none());
    assert!(store.is_empty());
}

#[test]
fn appended_responses_have_increasing_timestamps() {
    let store = HistoryStore::new();
    let id = store.add(subscription(&store));
    for n in 0..3 {
        store.append_response(id, format!(r#"{{"data":{{"tick":{n}}}}}"#)).unwrap();
    }

    let record = store.get(id).unwrap();
    let responses = &record.as_subscription().unwrap().responses;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[2].data, r#"{"data":{"tick":2}}"#);
    assert!(responses.windows(2).all(|pair| pair[0].created_at < pair[1].created_at));
    assert!(record.created_at() < responses[0].created_at);
}

#[test]
fn append_to_request_or_unknown_record_does_nothing() {
    let store = HistoryStore::new();
    let id = store.add(request_at(OffsetDateTime::now_utc()));
    assert!(store.append_response(id, "{}".to_string()).is_none());
    assert!(store.append_response(Uuid::new_v4(), "{}".to_string()).is_none());
    assert_eq!(store.get(id), store.list().into_iter().next());
}

#[test]
fn remove_by_day_only_touches_that_day() {
    let store = HistoryStore::new();
    store.add(request_at(datetime!(2026-03-01 09:00 UTC)));
    store.add(request_at(datetime!(2026-03-01 23:59 UTC)));
    let kept = store.add(request_at(datetime!(2026-03-02 00:01 UTC)));

    let removed = store.remove_by_day(date!(2026-03-01));
    assert_eq!(removed.len(), 2);
    assert_eq!(store.list().iter().map(HistoryRecord::id).collect::<Vec<_>>(), vec![kept]);
}

#[test]
fn clear_returns_everything() {
    let store = HistoryStore::new();
    store.add(request_at(OffsetDateTime::now_utc()));
    store.add(request_at(OffsetDateTime::now_utc()));
    assert_eq!(store.clear().len(), 2);
    assert!(store.is_empty());
}

#[test]
fn clones_share_records() {
    let store = HistoryStore::new();
    let handle = store.clone();
    let id = handle.add(request_at(OffsetDateTime::now_utc()));
    assert!(store.get(id).is_some());
}

#[test]
fn timestamps_continue_after_loaded_records() {
    let future = OffsetDateTime::now_utc() + time::Duration::hours(1);
    let store = HistoryStore::from_records(vec![request_at(future)]);
    assert!(store.timestamp() > future);
}
