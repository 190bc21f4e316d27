//! Tests for `ResultTranslator` / `Promise`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::{json, Value};

use live_mirror::promise::{Deferred, OperationHandle, ResultTranslator};

fn pending() -> Deferred<Value, String> {
    Deferred::new()
}

// ============================================================================
// Settlement
// ============================================================================

#[tokio::test]
async fn success_fulfills_with_the_value() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());

    deferred.resolve(json!({"id": 1}));

    assert_eq!(promise.await, Ok(json!({"id": 1})));
}

#[tokio::test]
async fn failure_rejects_with_the_error_unchanged() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());

    deferred.reject("server said no".to_string());

    assert_eq!(promise.await, Err("server said no".to_string()));
}

#[tokio::test]
async fn first_terminal_outcome_wins() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());

    assert!(deferred.resolve(json!("first")));
    assert!(!deferred.reject("second".to_string()));
    assert!(!deferred.resolve(json!("third")));

    assert_eq!(promise.await, Ok(json!("first")));
}

#[tokio::test]
async fn already_settled_handle_translates_to_ready_promise() {
    let translator = ResultTranslator::new();
    let ok = translator.translate(OperationHandle::<Value, String>::resolved(json!(3)));
    let err = translator.translate(OperationHandle::<Value, String>::rejected("e".into()));

    assert_eq!(ok.await, Ok(json!(3)));
    assert_eq!(err.await, Err("e".to_string()));
}

#[tokio::test]
async fn settlement_from_another_task_wakes_the_promise() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());

    let producer = deferred.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        producer.resolve(json!("later"));
    });

    assert_eq!(promise.await, Ok(json!("later")));
}

// ============================================================================
// Progress
// ============================================================================

#[tokio::test]
async fn progress_reaches_listeners_without_settling() {
    let deferred = pending();
    let mut promise = ResultTranslator::new().translate(deferred.handle());
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        promise.on_progress(move |v| seen.lock().push(v.clone()));
    }

    deferred.notify(json!(25));
    deferred.notify(json!(75));

    let still_pending = tokio::time::timeout(Duration::from_millis(20), &mut promise).await;
    assert!(still_pending.is_err(), "progress must not settle the promise");
    assert_eq!(*seen.lock(), vec![json!(25), json!(75)]);

    deferred.resolve(json!(100));
    assert_eq!(promise.await, Ok(json!(100)));
}

#[tokio::test]
async fn progress_after_settlement_is_not_observed() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());
    let seen = Arc::new(Mutex::new(Vec::new()));
    {
        let seen = Arc::clone(&seen);
        promise.on_progress(move |v| seen.lock().push(v.clone()));
    }

    deferred.reject("failed".to_string());
    deferred.notify(json!(99));

    assert_eq!(promise.await, Err("failed".to_string()));
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn removed_progress_listener_stops_receiving() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let id = {
        let seen = Arc::clone(&seen);
        promise.on_progress(move |v| seen.lock().push(v.clone()))
    };

    deferred.notify(json!(1));
    assert!(promise.off_progress(id));
    deferred.notify(json!(2));
    deferred.resolve(Value::Null);

    assert_eq!(promise.await, Ok(Value::Null));
    assert_eq!(*seen.lock(), vec![json!(1)]);
}

// ============================================================================
// Non-terminating handles
// ============================================================================

#[tokio::test]
async fn handle_that_never_settles_leaves_promise_pending() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());

    let outcome = tokio::time::timeout(Duration::from_millis(20), promise).await;

    assert!(outcome.is_err(), "no built-in timeout: the caller races it");
    drop(deferred);
}

#[tokio::test]
async fn dropped_deferred_leaves_promise_pending() {
    let deferred = pending();
    let promise = ResultTranslator::new().translate(deferred.handle());
    drop(deferred);

    let outcome = tokio::time::timeout(Duration::from_millis(20), promise).await;

    assert!(outcome.is_err());
}
