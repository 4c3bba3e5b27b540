//! Cross-thread and async behaviour of `Will`.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::future::IntoFuture;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use restendpoint_will::{Abandoned, Will, channel};

#[derive(Debug, Clone, PartialEq)]
enum CallError {
    Refused(String),
    Abandoned,
}

impl From<Abandoned> for CallError {
    fn from(_: Abandoned) -> Self {
        Self::Abandoned
    }
}

#[test]
fn test_obtain_blocks_until_other_thread_resolves() {
    let (promise, will) = channel::<String, CallError>();

    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        promise.resolve("Hello world!".to_string());
    });

    assert_eq!(will.obtain(), Ok("Hello world!".to_string()));
    producer.join().unwrap();
}

#[test]
fn test_obtain_surfaces_failure() {
    let (promise, will) = channel::<String, CallError>();
    promise.fail(CallError::Refused("connection refused".into()));

    assert_eq!(
        will.obtain(),
        Err(CallError::Refused("connection refused".into()))
    );
}

#[test]
fn test_listener_after_completion_runs_immediately() {
    let will: Will<u32, CallError> = Will::resolved(5);
    let seen = Arc::new(Mutex::new(None));

    let s = seen.clone();
    will.on_success(move |value| {
        *s.lock() = Some(*value);
    });

    // No waiting: the listener has already run on this thread.
    assert_eq!(*seen.lock(), Some(5));
}

#[test]
fn test_failure_listener_after_completion_runs_immediately() {
    let (promise, will) = channel::<u32, CallError>();
    promise.fail(CallError::Refused("reset".into()));

    let seen = Arc::new(Mutex::new(None));
    let s = seen.clone();
    will.on_failure(move |error| {
        *s.lock() = Some(error.clone());
    });

    assert_eq!(*seen.lock(), Some(CallError::Refused("reset".into())));
}

#[test]
fn test_listeners_from_many_handles_each_run_once() {
    let (promise, will) = channel::<u32, CallError>();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..4 {
        let handle = will.clone();
        let c = calls.clone();
        handle.when_done(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
        });
    }

    let producer = thread::spawn(move || {
        promise.resolve(1);
        promise.resolve(2);
    });
    producer.join().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 4);
    assert_eq!(will.obtain(), Ok(1));

    // Late listener on an already completed result.
    let c = calls.clone();
    will.when_done(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

#[test]
fn test_listeners_run_before_waiters_wake() {
    let (promise, will) = channel::<u32, CallError>();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let s = seen.clone();
    will.on_success(move |value| {
        thread::sleep(Duration::from_millis(20));
        s.lock().push(*value);
    });

    let producer = thread::spawn(move || promise.resolve(4));

    assert_eq!(will.obtain(), Ok(4));
    assert_eq!(*seen.lock(), vec![4]);
    assert!(producer.join().unwrap());
}

#[test]
fn test_panicking_listener_does_not_strand_waiters() {
    let (promise, will) = channel::<u32, CallError>();
    let calls = Arc::new(AtomicUsize::new(0));

    will.on_success(|_| panic!("listener failed"));
    let c = calls.clone();
    will.when_done(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });

    let waiter = {
        let will = will.clone();
        thread::spawn(move || will.obtain_timeout(Duration::from_secs(5)))
    };
    thread::sleep(Duration::from_millis(20));

    assert!(promise.resolve(1));
    assert_eq!(waiter.join().unwrap(), Some(Ok(1)));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_panicking_listener_does_not_strand_await() {
    let (promise, will) = channel::<u32, CallError>();
    will.on_success(|_| panic!("listener failed"));

    let waiting = tokio::spawn(will.clone().into_future());
    tokio::time::sleep(Duration::from_millis(10)).await;

    thread::spawn(move || promise.resolve(2)).join().unwrap();

    let result = tokio::time::timeout(Duration::from_secs(5), waiting).await;
    assert_eq!(result.unwrap().unwrap(), Ok(2));
}

#[test]
fn test_late_panicking_listener_is_contained() {
    let will: Will<u32, CallError> = Will::resolved(3);
    will.when_done(|_| panic!("listener failed"));

    assert_eq!(will.obtain(), Ok(3));
}

#[test]
fn test_obtain_timeout_with_unbounded_duration() {
    let will: Will<u32, CallError> = Will::resolved(7);
    assert_eq!(will.obtain_timeout(Duration::MAX), Some(Ok(7)));

    let (promise, will) = channel::<u32, CallError>();
    let producer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        promise.resolve(8);
    });

    assert_eq!(will.obtain_timeout(Duration::MAX), Some(Ok(8)));
    producer.join().unwrap();
}

#[test]
fn test_dropped_promise_fails_with_abandoned() {
    let (promise, will) = channel::<u32, CallError>();

    let producer = thread::spawn(move || {
        drop(promise);
    });
    producer.join().unwrap();

    assert_eq!(will.obtain(), Err(CallError::Abandoned));
}

#[test]
fn test_completing_after_consumer_dropped_is_noop() {
    let (promise, will) = channel::<u32, CallError>();
    drop(will);

    assert!(promise.resolve(9));
    assert!(!promise.resolve(10));
}

#[test]
fn test_obtain_timeout() {
    let (promise, will) = channel::<u32, CallError>();
    assert_eq!(will.obtain_timeout(Duration::from_millis(10)), None);

    promise.resolve(3);
    assert_eq!(will.obtain_timeout(Duration::from_millis(10)), Some(Ok(3)));
}

#[tokio::test]
async fn test_await_resolves_without_blocking() {
    let (promise, will) = channel::<String, CallError>();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        promise.resolve("done".to_string());
    });

    assert_eq!(will.clone().await, Ok("done".to_string()));
    assert_eq!(will.wait().await, Ok("done".to_string()));
}

#[tokio::test]
async fn test_await_failed_will() {
    let will: Will<u8, CallError> = Will::failed(CallError::Abandoned);
    assert_eq!(will.await, Err(CallError::Abandoned));
}
