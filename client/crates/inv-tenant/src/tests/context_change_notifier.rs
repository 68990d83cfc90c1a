use crate::tests::{TENANT_KEY, harness};
use crate::{ContextChangeEvent, ContextChangeNotifier, ContextListener, TenantContextStore};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use inv_core::MemoryStore;

fn event(tenant_id: Option<&str>) -> ContextChangeEvent {
    ContextChangeEvent {
        tenant_id: tenant_id.map(String::from),
    }
}

#[tokio::test]
async fn given_existing_context_when_subscribed_then_first_event_replays_it() {
    let h = harness(&[(TENANT_KEY, "t1")]);

    let mut sub = h.tenant.notifier().subscribe();

    assert_eq!(sub.next().await, Some(event(Some("t1"))));
}

#[tokio::test]
async fn given_late_subscriber_when_subscribed_then_sees_latest_not_history() {
    let h = harness(&[]);
    h.tenant.set_current_tenant("t1").unwrap();
    h.tenant.set_current_tenant("t2").unwrap();

    let mut sub = h.tenant.notifier().subscribe();

    assert_eq!(sub.next().await, Some(event(Some("t2"))));
    assert_eq!(sub.try_next(), None);
}

#[tokio::test]
async fn given_two_subscribers_when_tenant_changes_then_both_notified() {
    let h = harness(&[]);
    let notifier = h.tenant.notifier();
    let mut first = notifier.subscribe();
    let mut second = notifier.subscribe();
    first.next().await;
    second.next().await;

    h.tenant.set_current_tenant("t5").unwrap();

    assert_eq!(first.next().await, Some(event(Some("t5"))));
    assert_eq!(second.next().await, Some(event(Some("t5"))));
    assert_eq!(notifier.subscriber_count(), 2);
}

#[tokio::test]
async fn given_waiting_subscriber_when_tenant_set_from_another_task_then_woken() {
    let h = harness(&[]);
    let mut sub = h.tenant.notifier().subscribe();
    sub.next().await;
    let tenant = h.tenant.clone();

    let waiter = tokio::spawn(async move { sub.next().await });
    tokio::task::yield_now().await;
    tenant.set_current_tenant("t7").unwrap();

    let received = tokio::time::timeout(Duration::from_secs(1), waiter)
        .await
        .expect("subscriber was not woken")
        .unwrap();
    assert_eq!(received, Some(event(Some("t7"))));
}

#[tokio::test]
async fn given_unchanged_context_when_refresh_triggered_then_current_value_reemitted() {
    let h = harness(&[(TENANT_KEY, "t1")]);
    let notifier = h.tenant.notifier();
    let mut sub = notifier.subscribe();
    sub.next().await;
    assert_eq!(sub.try_next(), None);

    notifier.trigger_refresh();

    assert_eq!(sub.next().await, Some(event(Some("t1"))));
}

#[tokio::test]
async fn given_context_cleared_when_subscribed_then_event_carries_none() {
    let h = harness(&[(TENANT_KEY, "t1")]);
    let mut sub = h.tenant.notifier().subscribe();
    sub.next().await;

    h.tenant.clear_tenant_context().unwrap();

    assert_eq!(sub.next().await, Some(event(None)));
}

#[tokio::test]
async fn given_store_dropped_when_waiting_then_subscription_ends() {
    let store = TenantContextStore::new(Arc::new(MemoryStore::new()), TENANT_KEY);
    let notifier = store.notifier();
    let mut sub = notifier.subscribe();
    sub.next().await;
    drop(store);
    drop(notifier);

    assert_eq!(sub.next().await, None);
}

// =========================================================================
// Synchronous listeners
// =========================================================================

type Seen = Arc<Mutex<Vec<(usize, Option<String>)>>>;

fn recorder(seen: &Seen, index: usize) -> ContextListener {
    let seen = seen.clone();
    Arc::new(move |event: &ContextChangeEvent| {
        seen.lock().unwrap().push((index, event.tenant_id.clone()));
    })
}

fn listen_all(notifier: &ContextChangeNotifier, seen: &Seen, count: usize) {
    for index in 0..count {
        notifier.on_change(recorder(seen, index));
    }
    seen.lock().unwrap().clear();
}

#[test]
fn given_existing_context_when_listener_registered_then_called_with_it() {
    let h = harness(&[(TENANT_KEY, "t1")]);
    let seen = Seen::default();

    h.tenant.notifier().on_change(recorder(&seen, 0));

    assert_eq!(*seen.lock().unwrap(), vec![(0, Some("t1".to_string()))]);
}

#[test]
fn given_listeners_when_tenant_changes_then_called_in_registration_order() {
    let h = harness(&[]);
    let seen = Seen::default();
    listen_all(&h.tenant.notifier(), &seen, 3);

    h.tenant.set_current_tenant("t1").unwrap();
    h.tenant.set_current_tenant("t2").unwrap();

    let t1 = Some("t1".to_string());
    let t2 = Some("t2".to_string());
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            (0, t1.clone()),
            (1, t1.clone()),
            (2, t1),
            (0, t2.clone()),
            (1, t2.clone()),
            (2, t2),
        ]
    );
}

#[test]
fn given_listeners_on_separate_notifiers_when_tenant_changes_then_order_is_global() {
    let h = harness(&[]);
    let seen = Seen::default();
    h.tenant.notifier().on_change(recorder(&seen, 0));
    h.tenant.notifier().on_change(recorder(&seen, 1));
    seen.lock().unwrap().clear();

    h.tenant.clear_tenant_context().unwrap();
    h.tenant.set_current_tenant("t1").unwrap();

    let indices: Vec<usize> = seen.lock().unwrap().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1]);
}

#[test]
fn given_same_tenant_when_set_twice_then_listener_called_once() {
    let h = harness(&[]);
    let seen = Seen::default();
    listen_all(&h.tenant.notifier(), &seen, 1);

    h.tenant.set_current_tenant("t1").unwrap();
    h.tenant.set_current_tenant("t1").unwrap();

    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn given_listeners_when_refresh_triggered_then_all_called_with_current_value() {
    let h = harness(&[(TENANT_KEY, "t1")]);
    let notifier = h.tenant.notifier();
    let seen = Seen::default();
    listen_all(&notifier, &seen, 2);

    notifier.trigger_refresh();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![(0, Some("t1".to_string())), (1, Some("t1".to_string()))]
    );
}

#[test]
fn given_removed_listener_when_tenant_changes_then_not_called() {
    let h = harness(&[]);
    let notifier = h.tenant.notifier();
    let seen = Seen::default();
    let first = notifier.on_change(recorder(&seen, 0));
    notifier.on_change(recorder(&seen, 1));
    seen.lock().unwrap().clear();

    assert!(notifier.remove_listener(first));
    assert!(!notifier.remove_listener(first));
    h.tenant.set_current_tenant("t1").unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(1, Some("t1".to_string()))]);
}

#[test]
fn given_signed_out_when_listener_registered_then_counted_as_subscriber() {
    let h = harness(&[]);
    let notifier = h.tenant.notifier();
    let before = notifier.subscriber_count();

    notifier.on_change(Arc::new(|_: &ContextChangeEvent| {}));

    assert_eq!(notifier.subscriber_count(), before + 1);
}
