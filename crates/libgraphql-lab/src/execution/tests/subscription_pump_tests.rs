use crate::execution::OperationRunner;
use crate::execution::RunnerConfig;
use crate::execution::SubscriptionEvent;
use crate::history::HistoryRecord;
use crate::history::HistoryStore;
use crate::history::HistorySubscription;
use crate::operation::Operation;
use futures::stream;
use serde_json::json;
use uuid::Uuid;

fn setup() -> (OperationRunner, Operation, Uuid) {
    let runner = OperationRunner::new(RunnerConfig::default(), HistoryStore::new()).unwrap();
    let op = Operation::new("Ticks", "subscription Ticks { tick }");
    let history_id = runner.history().add(HistoryRecord::Subscription(HistorySubscription {
        id: Uuid::new_v4(),
        responses: vec![],
        operation: op.clone(),
        preflight_logs: vec![],
        created_at: runner.history().timestamp(),
    }));
    (runner, op, history_id)
}

#[tokio::test]
async fn messages_are_appended_until_complete() {
    let (runner, op, history_id) = setup();
    let ticket = runner.registry().try_register(op.id).unwrap();
    let events = stream::iter(vec![
        SubscriptionEvent::Next(json!({"data": {"tick": 1}})),
        SubscriptionEvent::Next(json!({"data": {"tick": 2}})),
        SubscriptionEvent::Next(json!({"data": {"tick": 3}})),
        SubscriptionEvent::Complete,
        SubscriptionEvent::Next(json!({"data": {"tick": 4}})),
    ]);

    assert_eq!(runner.pump_subscription(ticket, history_id, events).await, 3);
    assert!(!runner.is_running(op.id));

    let record = runner.history().get(history_id).unwrap();
    let responses = &record.as_subscription().unwrap().responses;
    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0].data, json!({"data": {"tick": 1}}).to_string());
    assert!(responses.windows(2).all(|pair| pair[0].created_at < pair[1].created_at));
}

#[tokio::test]
async fn failure_before_first_message_removes_the_record() {
    let (runner, op, history_id) = setup();
    let ticket = runner.registry().try_register(op.id).unwrap();
    let events = stream::iter(vec![SubscriptionEvent::Error("denied".to_string())]);

    assert_eq!(runner.pump_subscription(ticket, history_id, events).await, 0);
    assert!(runner.history().get(history_id).is_none());
    assert!(!runner.is_running(op.id));
}

#[tokio::test]
async fn failure_after_messages_keeps_the_record() {
    let (runner, op, history_id) = setup();
    let ticket = runner.registry().try_register(op.id).unwrap();
    let events = stream::iter(vec![
        SubscriptionEvent::Next(json!({"data": {"tick": 1}})),
        SubscriptionEvent::Closed,
    ]);

    assert_eq!(runner.pump_subscription(ticket, history_id, events).await, 1);
    assert!(runner.history().get(history_id).is_some());
}

#[tokio::test]
async fn stop_ends_a_quiet_subscription_and_keeps_its_record() {
    let (runner, op, history_id) = setup();
    let ticket = runner.registry().try_register(op.id).unwrap();

    let pump = tokio::spawn({
        let runner = runner.clone();
        async move {
            runner
                .pump_subscription(ticket, history_id, stream::pending::<SubscriptionEvent>())
                .await
        }
    });
    assert!(runner.stop(op.id));

    assert_eq!(pump.await.unwrap(), 0);
    assert!(runner.history().get(history_id).is_some());
    assert!(!runner.is_running(op.id));
}
