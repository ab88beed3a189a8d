//! Auth-state subscriptions.
//!
//! The callback-registered-on-a-global of the browser SDK becomes an explicit
//! subscription interface: `subscribe` hands back an [`AuthStateSubscription`]
//! and dropping (or [`cancel`](AuthStateSubscription::cancel)-ing) it
//! unregisters the callback. The registry dispatches synchronously; the SDK
//! side decides when state changes are emitted (sign-in, sign-out, token
//! refresh re-emissions).

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::types::AuthUser;

/// Callback invoked on every auth-state change. `None` means signed out.
pub type AuthStateCallback = Arc<dyn Fn(Option<&AuthUser>) + Send + Sync>;

type CallbackMap = Mutex<HashMap<u64, AuthStateCallback>>;

/// Registry of auth-state callbacks. Cloning shares the underlying map.
#[derive(Clone, Default)]
pub struct AuthStateRegistry {
    callbacks: Arc<CallbackMap>,
    next_id: Arc<AtomicU64>,
}

impl AuthStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback; it stays registered until the returned
    /// subscription is dropped.
    pub fn subscribe(&self, callback: AuthStateCallback) -> AuthStateSubscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut map) = self.callbacks.lock() {
            map.insert(id, callback);
        }
        AuthStateSubscription {
            id,
            callbacks: Arc::downgrade(&self.callbacks),
        }
    }

    /// Invoke every registered callback with the given state.
    ///
    /// Callbacks run outside the registry lock, so a callback may itself
    /// subscribe or cancel without deadlocking.
    pub fn emit(&self, user: Option<&AuthUser>) {
        let snapshot: Vec<AuthStateCallback> = match self.callbacks.lock() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => return,
        };
        for callback in snapshot {
            callback(user);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.lock().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for AuthStateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStateRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}

/// Handle for a registered auth-state callback. Dropping it cancels the
/// registration; if the registry is already gone, dropping is a no-op.
pub struct AuthStateSubscription {
    id: u64,
    callbacks: Weak<CallbackMap>,
}

impl AuthStateSubscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Explicitly unregister. Equivalent to dropping the handle.
    pub fn cancel(self) {}
}

impl Drop for AuthStateSubscription {
    fn drop(&mut self) {
        if let Some(map) = self.callbacks.upgrade() {
            if let Ok(mut map) = map.lock() {
                map.remove(&self.id);
            }
        }
    }
}

impl fmt::Debug for AuthStateSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStateSubscription")
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn counting_callback(counter: Arc<AtomicUsize>) -> AuthStateCallback {
        Arc::new(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        })
    }

    #[test]
    fn emit_reaches_all_subscribers() {
        let registry = AuthStateRegistry::new();
        let a = Arc::new(AtomicUsize::new(0));
        let b = Arc::new(AtomicUsize::new(0));
        let _sub_a = registry.subscribe(counting_callback(a.clone()));
        let _sub_b = registry.subscribe(counting_callback(b.clone()));

        registry.emit(Some(&AuthUser::new("u1")));
        registry.emit(None);

        assert_eq!(a.load(Ordering::Relaxed), 2);
        assert_eq!(b.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn drop_unregisters() {
        let registry = AuthStateRegistry::new();
        let counter = Arc::new(AtomicUsize::new(0));
        let sub = registry.subscribe(counting_callback(counter.clone()));
        assert_eq!(registry.len(), 1);

        drop(sub);
        assert!(registry.is_empty());

        registry.emit(None);
        assert_eq!(counter.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn cancel_is_drop() {
        let registry = AuthStateRegistry::new();
        let sub = registry.subscribe(Arc::new(|_| {}));
        sub.cancel();
        assert!(registry.is_empty());
    }

    #[test]
    fn drop_after_registry_gone_is_noop() {
        let registry = AuthStateRegistry::new();
        let sub = registry.subscribe(Arc::new(|_| {}));
        drop(registry);
        drop(sub); // must not panic
    }

    #[test]
    fn callback_sees_state() {
        let registry = AuthStateRegistry::new();
        let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_by_cb = seen.clone();
        let _sub = registry.subscribe(Arc::new(move |user| {
            seen_by_cb
                .lock()
                .unwrap()
                .push(user.map(|u| u.display_identity().to_string()));
        }));

        registry.emit(Some(&AuthUser::with_email("u1", "a@b.com")));
        registry.emit(None);

        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![Some("a@b.com".to_string()), None]);
    }
}
