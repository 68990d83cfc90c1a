use std::sync::{Arc, PoisonError, RwLock};

use log::debug;
use tokio::sync::watch;

/// Tenant context as seen by a subscriber. `None` means no tenant is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextChangeEvent {
    pub tenant_id: Option<String>,
}

/// Synchronous change callback registered through [`ContextChangeNotifier::on_change`].
pub type ContextListener = Arc<dyn Fn(&ContextChangeEvent) + Send + Sync>;

/// Handle returned by [`ContextChangeNotifier::on_change`], used to unregister.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

/// Current tenant plus everyone observing it. Shared by the store (writer)
/// and every notifier handle (readers).
pub(crate) struct ContextChannel {
    current: watch::Sender<Option<String>>,
    listeners: RwLock<Listeners>,
}

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(ListenerId, ContextListener)>,
}

impl ContextChannel {
    pub(crate) fn new(initial: Option<String>) -> Self {
        Self {
            current: watch::Sender::new(initial),
            listeners: RwLock::new(Listeners::default()),
        }
    }

    pub(crate) fn get(&self) -> Option<String> {
        self.current.borrow().clone()
    }

    /// Store `value`; emits only if it differs from the current one.
    pub(crate) fn publish(&self, value: Option<String>) {
        let changed = self.current.send_if_modified(|current| {
            if *current == value {
                return false;
            }
            *current = value.clone();
            true
        });
        if changed {
            self.deliver(ContextChangeEvent { tenant_id: value });
        }
    }

    pub(crate) fn refresh(&self) {
        self.current.send_modify(|_| {});
        self.deliver(ContextChangeEvent {
            tenant_id: self.get(),
        });
    }

    /// Call listeners in registration order, outside the lock so a listener
    /// may register or unregister others.
    fn deliver(&self, event: ContextChangeEvent) {
        let listeners: Vec<ContextListener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();

        for listener in listeners {
            listener(&event);
        }
    }
}

/// Multicast view of the tenant context with replay of the latest value.
///
/// Two ways to observe it:
/// - [`on_change`](Self::on_change) listeners run synchronously on every
///   emission, in registration order.
/// - [`subscribe`](Self::subscribe) streams are last-write-wins: a subscriber
///   that falls behind observes the newest tenant, not every intermediate one.
#[derive(Clone)]
pub struct ContextChangeNotifier {
    channel: Arc<ContextChannel>,
}

impl ContextChangeNotifier {
    pub(crate) fn new(channel: Arc<ContextChannel>) -> Self {
        Self { channel }
    }

    /// The first `next()` on the returned subscription yields the current value.
    pub fn subscribe(&self) -> ContextSubscription {
        let mut receiver = self.channel.current.subscribe();
        receiver.mark_changed();
        ContextSubscription { receiver }
    }

    /// Register a listener. It is called immediately with the current value.
    pub fn on_change(&self, listener: ContextListener) -> ListenerId {
        let id = {
            let mut listeners = self
                .channel
                .listeners
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            let id = ListenerId(listeners.next_id);
            listeners.next_id += 1;
            listeners.entries.push((id, listener.clone()));
            id
        };

        listener(&self.current());
        id
    }

    /// Returns false if the listener was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self
            .channel
            .listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = listeners.entries.len();
        listeners.entries.retain(|(entry_id, _)| *entry_id != id);
        listeners.entries.len() != before
    }

    pub fn current(&self) -> ContextChangeEvent {
        ContextChangeEvent {
            tenant_id: self.channel.get(),
        }
    }

    /// Re-emit the current value so that every observer reloads.
    pub fn trigger_refresh(&self) {
        debug!(
            "Refreshing tenant context for {} subscriber(s)",
            self.subscriber_count()
        );
        self.channel.refresh();
    }

    /// Stream subscriptions plus registered listeners.
    pub fn subscriber_count(&self) -> usize {
        let listeners = self
            .channel
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len();
        self.channel.current.receiver_count() + listeners
    }
}

pub struct ContextSubscription {
    receiver: watch::Receiver<Option<String>>,
}

impl ContextSubscription {
    /// Wait for the next change. Returns `None` once the store is gone.
    pub async fn next(&mut self) -> Option<ContextChangeEvent> {
        self.receiver.changed().await.ok()?;
        Some(self.take())
    }

    /// Non-blocking variant of [`next`](Self::next).
    pub fn try_next(&mut self) -> Option<ContextChangeEvent> {
        match self.receiver.has_changed() {
            Ok(true) => Some(self.take()),
            _ => None,
        }
    }

    fn take(&mut self) -> ContextChangeEvent {
        ContextChangeEvent {
            tenant_id: self.receiver.borrow_and_update().clone(),
        }
    }
}
