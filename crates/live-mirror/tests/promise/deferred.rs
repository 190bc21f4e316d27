//! Tests for `Deferred` / `OperationHandle`.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};

use live_mirror::promise::{Deferred, DeferredState, OperationHandle};

fn make_log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

#[test]
fn done_callbacks_run_in_subscription_order() {
    let deferred: Deferred<Value, String> = Deferred::new();
    let handle = deferred.handle();
    let log = make_log();
    for tag in ["first", "second"] {
        let log = Arc::clone(&log);
        handle.done(move |v| log.lock().push(format!("{tag}:{v}")));
    }

    deferred.resolve(json!(1));

    assert_eq!(*log.lock(), vec!["first:1", "second:1"]);
}

#[test]
fn reject_skips_done_and_resolve_skips_fail() {
    let log = make_log();

    let rejected: Deferred<Value, String> = Deferred::new();
    {
        let log_done = Arc::clone(&log);
        let log_fail = Arc::clone(&log);
        rejected
            .handle()
            .done(move |_| log_done.lock().push("done".into()))
            .fail(move |e| log_fail.lock().push(format!("fail:{e}")));
    }
    rejected.reject("nope".to_string());

    let resolved: Deferred<Value, String> = Deferred::new();
    {
        let log_fail = Arc::clone(&log);
        resolved
            .handle()
            .fail(move |_| log_fail.lock().push("late fail".into()));
    }
    resolved.resolve(Value::Null);

    assert_eq!(*log.lock(), vec!["fail:nope"]);
}

#[test]
fn state_is_shared_between_deferred_and_handles() {
    let deferred: Deferred<Value, String> = Deferred::new();
    let handle = deferred.handle();
    let other = handle.clone();
    assert_eq!(handle.state(), DeferredState::Pending);

    deferred.reject("x".to_string());

    assert_eq!(handle.state(), DeferredState::Rejected);
    assert_eq!(other.state(), DeferredState::Rejected);
}

#[test]
fn late_fail_on_rejected_handle_fires_immediately() {
    let handle: OperationHandle<Value, String> = OperationHandle::rejected("gone".to_string());
    let log = make_log();
    {
        let log = Arc::clone(&log);
        handle.fail(move |e| log.lock().push(e));
    }
    assert_eq!(*log.lock(), vec!["gone"]);
}

#[test]
fn progress_registered_after_settlement_never_fires() {
    let deferred: Deferred<Value, String> = Deferred::new();
    deferred.resolve(json!("done"));
    let log = make_log();
    {
        let log = Arc::clone(&log);
        deferred.handle().progress(move |v| log.lock().push(v.to_string()));
    }
    assert!(!deferred.notify(json!(50)));
    assert!(log.lock().is_empty());
}
