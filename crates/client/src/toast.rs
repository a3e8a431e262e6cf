//! Bounded, time-delayed notification queue.
//!
//! The store is an explicit object shared via `Arc`-style cloning; there is no
//! module-level singleton. Listeners are notified synchronously, in
//! registration order, after every mutation.

use dashmap::DashMap;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// At most one toast visible at a time unless configured otherwise.
pub const DEFAULT_TOAST_LIMIT: usize = 1;

/// Delay between dismissal and removal. Large on purpose: a dismissed toast
/// stays addressable until the host removes it or the delay elapses.
pub const DEFAULT_REMOVE_DELAY: Duration = Duration::from_millis(1_000_000);

/// Visual treatment of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
    Success,
}

/// A queued notification.
#[derive(Debug, Clone)]
pub struct ToastRecord {
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
    /// False once dismissed; the record remains until removal.
    pub open: bool,
}

/// Payload for [`ToastStore::add`].
#[derive(Debug, Clone, Default)]
pub struct NewToast {
    pub title: Option<String>,
    pub description: Option<String>,
    pub variant: ToastVariant,
}

impl NewToast {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: None,
            variant: ToastVariant::Success,
        }
    }

    pub fn destructive(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: Some(description.into()),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Tunables for a [`ToastStore`].
#[derive(Debug, Clone)]
pub struct ToastOptions {
    /// Maximum number of queued toasts; adding beyond it evicts the oldest.
    /// A limit of zero is treated as 1: the newest toast is always kept.
    pub limit: usize,
    /// Delay between dismissal and removal.
    pub remove_delay: Duration,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            limit: DEFAULT_TOAST_LIMIT,
            remove_delay: DEFAULT_REMOVE_DELAY,
        }
    }
}

type Listener = Arc<dyn Fn(&[ToastRecord]) + Send + Sync>;

/// Process-wide notification store for the lifetime of the application
/// instance. Cloning shares the same underlying state.
#[derive(Clone)]
pub struct ToastStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    options: ToastOptions,
    queue: Mutex<Vec<ToastRecord>>,
    listeners: Mutex<Vec<(Uuid, Listener)>>,
    /// Pending removal timer per toast id.
    timers: DashMap<String, JoinHandle<()>>,
}

impl ToastStore {
    pub fn new(options: ToastOptions) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                options,
                queue: Mutex::new(Vec::new()),
                listeners: Mutex::new(Vec::new()),
                timers: DashMap::new(),
            }),
        }
    }

    /// Adds a toast, evicting the oldest beyond the configured limit.
    /// Returns the generated id.
    pub fn add(&self, toast: NewToast) -> String {
        let id = Uuid::new_v4().to_string();
        let record = ToastRecord {
            id: id.clone(),
            title: toast.title,
            description: toast.description,
            variant: toast.variant,
            open: true,
        };

        let evicted: Vec<String> = {
            let mut queue = self.inner.lock_queue();
            queue.insert(0, record);
            let cut = self.inner.options.limit.max(1).min(queue.len());
            queue.split_off(cut).into_iter().map(|t| t.id).collect()
        };
        for old_id in evicted {
            self.inner.cancel_timer(&old_id);
        }

        tracing::debug!(%id, "toast added");
        self.inner.notify();
        id
    }

    /// Marks a toast closed and schedules its removal. With no id, dismisses
    /// every open toast. Re-dismissing resets the pending timer rather than
    /// stacking a second one. Unknown ids are a no-op.
    pub fn dismiss(&self, id: Option<&str>) {
        let dismissed: Vec<String> = {
            let mut queue = self.inner.lock_queue();
            queue
                .iter_mut()
                .filter(|t| match id {
                    Some(target) => t.id == target,
                    None => t.open,
                })
                .map(|t| {
                    t.open = false;
                    t.id.clone()
                })
                .collect()
        };

        if dismissed.is_empty() {
            return;
        }
        for id in &dismissed {
            self.schedule_removal(id.clone());
        }
        self.inner.notify();
    }

    /// Deletes a toast immediately, cancelling any pending removal timer.
    /// With no id, clears the whole queue. Unknown ids are a no-op.
    pub fn remove(&self, id: Option<&str>) {
        match id {
            Some(id) => self.inner.cancel_timer(id),
            None => self.inner.cancel_all_timers(),
        }
        if self.inner.remove_records(id) {
            self.inner.notify();
        }
    }

    /// Registers a listener invoked synchronously with a queue snapshot after
    /// every mutation. The subscription deregisters on drop.
    ///
    /// Listeners may call back into the store; each nested mutation runs its
    /// own notification round, so a listener that unconditionally mutates
    /// will recurse without bound.
    pub fn subscribe<F>(&self, listener: F) -> ToastSubscription
    where
        F: Fn(&[ToastRecord]) + Send + Sync + 'static,
    {
        let id = Uuid::new_v4();
        self.inner
            .lock_listeners()
            .push((id, Arc::new(listener)));
        ToastSubscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Current queue snapshot, most recent first.
    pub fn toasts(&self) -> Vec<ToastRecord> {
        self.inner.lock_queue().clone()
    }

    /// Aborts all pending removal timers. Part of explicit teardown; the
    /// queue itself is dropped with the last store handle.
    pub fn shutdown(&self) {
        self.inner.cancel_all_timers();
        tracing::info!("toast store shut down");
    }

    fn schedule_removal(&self, id: String) {
        let inner = Arc::clone(&self.inner);
        let delay = self.inner.options.remove_delay;
        let task_id = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            inner.timers.remove(&task_id);
            if inner.remove_records(Some(&task_id)) {
                inner.notify();
            }
        });
        // Reset-not-stack: a second dismiss replaces the pending timer.
        if let Some(previous) = self.inner.timers.insert(id, handle) {
            previous.abort();
        }
    }
}

impl StoreInner {
    fn lock_queue(&self) -> std::sync::MutexGuard<'_, Vec<ToastRecord>> {
        self.queue.lock().expect("toast queue lock poisoned")
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, Vec<(Uuid, Listener)>> {
        self.listeners.lock().expect("toast listener lock poisoned")
    }

    /// Deletes matching records; returns whether anything changed.
    fn remove_records(&self, id: Option<&str>) -> bool {
        let mut queue = self.lock_queue();
        let before = queue.len();
        match id {
            Some(id) => queue.retain(|t| t.id != id),
            None => queue.clear(),
        }
        queue.len() != before
    }

    fn cancel_timer(&self, id: &str) {
        if let Some((_, handle)) = self.timers.remove(id) {
            handle.abort();
        }
    }

    fn cancel_all_timers(&self) {
        for entry in self.timers.iter() {
            entry.value().abort();
        }
        self.timers.clear();
    }

    fn notify(&self) {
        let snapshot = self.lock_queue().clone();
        // Both locks are released before dispatch so a listener may call
        // back into the store.
        let listeners: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        self.cancel_all_timers();
    }
}

/// Listener registration handle; deregisters on drop.
pub struct ToastSubscription {
    id: Uuid,
    store: Weak<StoreInner>,
}

impl ToastSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for ToastSubscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.lock_listeners().retain(|(id, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_limit(limit: usize) -> ToastStore {
        ToastStore::new(ToastOptions {
            limit,
            remove_delay: Duration::from_millis(50),
        })
    }

    #[test]
    fn queue_never_exceeds_limit() {
        let store = store_with_limit(3);
        let mut ids = Vec::new();
        for i in 0..4 {
            ids.push(store.add(NewToast::success(format!("toast {i}"))));
        }

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 3);
        // Most recent first; the oldest was evicted.
        assert_eq!(toasts[0].id, ids[3]);
        assert_eq!(toasts[1].id, ids[2]);
        assert_eq!(toasts[2].id, ids[1]);
        assert!(!toasts.iter().any(|t| t.id == ids[0]));
    }

    #[test]
    fn add_beyond_limit_keeps_newest() {
        let store = store_with_limit(1);
        store.add(NewToast::success("first"));
        let second = store.add(NewToast::success("second"));

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, second);
    }

    #[test]
    fn zero_limit_still_keeps_the_newest_toast() {
        let store = store_with_limit(0);
        let id = store.add(NewToast::success("kept"));

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
    }

    #[test]
    fn dismiss_unknown_id_is_noop() {
        let store = store_with_limit(2);
        let id = store.add(NewToast::success("kept"));

        store.dismiss(Some("nonexistent"));

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
        assert!(toasts[0].open);
        assert_eq!(store.inner.timers.len(), 0);
    }

    #[test]
    fn remove_unknown_id_is_noop() {
        let store = store_with_limit(2);
        let id = store.add(NewToast::success("kept"));

        store.remove(Some("nonexistent"));

        let toasts = store.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].id, id);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_closes_then_removes_after_delay() {
        let store = store_with_limit(2);
        let id = store.add(NewToast::success("bye"));

        store.dismiss(Some(&id));
        assert!(!store.toasts()[0].open);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(store.toasts().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_is_idempotent() {
        let store = store_with_limit(2);
        let id = store.add(NewToast::success("once"));

        store.dismiss(Some(&id));
        let after_first = store.toasts();
        store.dismiss(Some(&id));
        let after_second = store.toasts();

        assert_eq!(after_first.len(), after_second.len());
        assert!(!after_second[0].open);
        // One pending timer, not two.
        assert_eq!(store.inner.timers.len(), 1);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(store.toasts().is_empty());
        assert_eq!(store.inner.timers.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn remove_before_delay_cancels_timer() {
        let store = store_with_limit(2);
        let id = store.add(NewToast::success("now"));

        store.dismiss(Some(&id));
        store.remove(Some(&id));
        assert!(store.toasts().is_empty());
        assert_eq!(store.inner.timers.len(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_all_closes_every_open_toast() {
        let store = store_with_limit(3);
        store.add(NewToast::success("a"));
        store.add(NewToast::success("b"));

        store.dismiss(None);

        assert!(store.toasts().iter().all(|t| !t.open));
        assert_eq!(store.inner.timers.len(), 2);
    }

    #[test]
    fn listeners_receive_snapshots_in_registration_order() {
        let store = store_with_limit(2);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            store.subscribe(move |toasts| {
                seen.lock().unwrap().push(("first", toasts.len()));
            })
        };
        let second = {
            let seen = Arc::clone(&seen);
            store.subscribe(move |toasts| {
                seen.lock().unwrap().push(("second", toasts.len()));
            })
        };

        store.add(NewToast::success("hello"));

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen, vec![("first", 1), ("second", 1)]);
        drop(first);
        drop(second);
    }

    #[test]
    fn listener_may_mutate_the_store() {
        let store = store_with_limit(2);
        let cleared = Arc::new(std::sync::atomic::AtomicBool::new(false));

        let sub = {
            let handle = store.clone();
            let cleared = Arc::clone(&cleared);
            store.subscribe(move |toasts| {
                // Clear the queue from inside the first notification only.
                if !toasts.is_empty()
                    && !cleared.swap(true, std::sync::atomic::Ordering::SeqCst)
                {
                    handle.remove(None);
                }
            })
        };

        store.add(NewToast::success("transient"));

        assert!(cleared.load(std::sync::atomic::Ordering::SeqCst));
        assert!(store.toasts().is_empty());
        drop(sub);
    }

    #[test]
    fn dropped_subscription_stops_receiving() {
        let store = store_with_limit(2);
        let seen = Arc::new(Mutex::new(0usize));

        let sub = {
            let seen = Arc::clone(&seen);
            store.subscribe(move |_| {
                *seen.lock().unwrap() += 1;
            })
        };
        store.add(NewToast::success("one"));
        sub.unsubscribe();
        store.add(NewToast::success("two"));

        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
