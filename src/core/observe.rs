//! Observable state cells with scoped subscriptions.
//!
//! An [`Observable`] owns a value that is only ever *replaced*, never patched
//! in place.  Every replacement is pushed to the registered listeners.
//! [`Observable::subscribe`] hands back a [`Subscription`] guard; dropping the
//! guard removes the listener, so a listener can never outlive its owner.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Inner<T> {
    value: T,
    next_id: u64,
    listeners: Vec<(u64, Listener<T>)>,
}

/// Shared, observable state cell.  Clones share the same value and listeners.
pub struct Observable<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                value,
                next_id: 0,
                listeners: Vec::new(),
            })),
        }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.lock().value.clone()
    }

    /// Replace the value and notify every listener.
    ///
    /// Listeners run after the internal lock is released, so they may call
    /// back into `get`/`set`/`subscribe` freely.
    pub fn set(&self, value: T) {
        Self::commit(self.lock(), value);
    }

    /// Derive a new value from the current one and publish it.
    pub fn replace_with(&self, f: impl FnOnce(&T) -> T) {
        self.update(|current| Some(f(current)));
    }

    /// Derive the next value while holding the lock, so no other writer can
    /// slip in between the read and the write.  `None` keeps the current
    /// value and notifies nobody.  Returns whether the value was replaced.
    ///
    /// `f` must not call back into this cell.
    pub fn update(&self, f: impl FnOnce(&T) -> Option<T>) -> bool {
        let inner = self.lock();
        match f(&inner.value) {
            Some(next) => {
                Self::commit(inner, next);
                true
            }
            None => false,
        }
    }

    fn commit(mut inner: MutexGuard<'_, Inner<T>>, value: T) {
        inner.value = value;
        let listeners: Vec<Listener<T>> =
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
        let snapshot = inner.value.clone();
        drop(inner);
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Register a listener.  It stays registered until the returned guard
    /// is dropped.
    #[must_use = "dropping the subscription immediately unregisters the listener"]
    pub fn subscribe(&self, listener: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut inner = self.lock();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push((id, Arc::new(listener)));
            id
        };

        let weak: Weak<Mutex<Inner<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut inner = inner.lock().unwrap_or_else(|p| p.into_inner());
                    inner.listeners.retain(|(lid, _)| *lid != id);
                    tracing::debug!(listener = id, "subscription released");
                }
            })),
        }
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    fn lock(&self) -> MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

/// RAII guard for a registered listener.
pub struct Subscription {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Explicitly unregister.  Equivalent to dropping the guard.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}
