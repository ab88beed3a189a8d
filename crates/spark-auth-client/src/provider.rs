//! The SDK capability interface and the in-memory provider.
//!
//! The browser script's duck-typed checks (`typeof firebase === 'undefined'`,
//! `firebase.auth` present or not) become an explicit trait: a real SDK
//! binding implements [`AuthProvider`], returning `None` from [`auth`]
//! when the auth capability was not loaded. SDK absence is modeled by the
//! host simply not supplying a provider to the context.
//!
//! [`auth`]: AuthProvider::auth

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use spark_auth_core::{BootstrapError, ClientConfig};

use crate::subscription::{AuthStateCallback, AuthStateRegistry, AuthStateSubscription};
use crate::types::{AuthClientHandle, AuthUser};

/// Capability interface for an auth SDK.
pub trait AuthProvider: Send + Sync {
    /// Stable identifier for diagnostics (e.g. `"memory"`).
    fn id(&self) -> &str;

    /// Number of client instances already created. Non-zero means
    /// initialization must be skipped.
    fn app_count(&self) -> usize;

    /// The first existing client handle, if any.
    fn app(&self) -> Option<AuthClientHandle>;

    /// Create a client instance from the config. Called at most once per
    /// context; errors are caught and logged by the bootstrap.
    fn initialize(&self, config: &ClientConfig) -> Result<AuthClientHandle, BootstrapError>;

    /// The auth capability, when the SDK exposes one.
    fn auth(&self) -> Option<&dyn AuthStateSource> {
        None
    }
}

/// Auth-state half of the SDK capability surface.
pub trait AuthStateSource: Send + Sync {
    /// Register a state-change callback. The callback is invoked immediately
    /// with the current state, then again on every change (including token
    /// refresh re-emissions). Dropping the subscription unregisters it.
    fn on_auth_state_changed(
        &self,
        callback: AuthStateCallback,
    ) -> Result<AuthStateSubscription, BootstrapError>;

    /// The currently signed-in user, if any.
    fn current_user(&self) -> Option<AuthUser>;
}

// ─── In-memory provider ────────────────────────────────────────────

/// Auth-state source backed by the in-process registry. Obtainable from a
/// [`MemoryProvider`]; tests and prototypes drive it directly.
#[derive(Debug, Default)]
pub struct MemoryAuth {
    registry: AuthStateRegistry,
    current: Mutex<Option<AuthUser>>,
}

impl MemoryAuth {
    fn set_and_emit(&self, user: Option<AuthUser>) {
        if let Ok(mut current) = self.current.lock() {
            *current = user;
        }
        let snapshot = self.current_user();
        self.registry.emit(snapshot.as_ref());
    }

    /// Number of registered state-change callbacks.
    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }
}

impl AuthStateSource for MemoryAuth {
    fn on_auth_state_changed(
        &self,
        callback: AuthStateCallback,
    ) -> Result<AuthStateSubscription, BootstrapError> {
        let subscription = self.registry.subscribe(callback.clone());
        // SDK contract: the freshly registered callback observes the current
        // state right away.
        let current = self.current_user();
        callback(current.as_ref());
        Ok(subscription)
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.current.lock().ok().and_then(|user| user.clone())
    }
}

/// Fully functional in-process [`AuthProvider`] for tests, prototypes and
/// development. Sign-in and sign-out are driven by the caller through
/// [`emit_signed_in`](MemoryProvider::emit_signed_in) /
/// [`emit_signed_out`](MemoryProvider::emit_signed_out).
#[derive(Debug)]
pub struct MemoryProvider {
    apps: Mutex<Vec<AuthClientHandle>>,
    init_calls: AtomicUsize,
    fail_message: Option<String>,
    auth: Option<MemoryAuth>,
}

impl MemoryProvider {
    /// Provider with the auth capability and no pre-existing apps.
    pub fn new() -> Self {
        Self {
            apps: Mutex::new(Vec::new()),
            init_calls: AtomicUsize::new(0),
            fail_message: None,
            auth: Some(MemoryAuth::default()),
        }
    }

    /// Provider whose SDK surface lacks the auth capability.
    pub fn without_auth() -> Self {
        Self {
            auth: None,
            ..Self::new()
        }
    }

    /// Provider whose `initialize` always fails with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            fail_message: Some(message.into()),
            ..Self::new()
        }
    }

    /// Provider that already holds an initialized client under `app_name`,
    /// as after an earlier script on the same page ran the SDK setup.
    pub fn with_existing_app(app_name: impl Into<String>) -> Self {
        let provider = Self::new();
        if let Ok(mut apps) = provider.apps.lock() {
            apps.push(AuthClientHandle::new("memory", app_name));
        }
        provider
    }

    /// How many times `initialize` has been called.
    pub fn init_call_count(&self) -> usize {
        self.init_calls.load(Ordering::Relaxed)
    }

    /// Drive a sign-in event through the auth-state registry.
    /// No-op when the provider was built without the auth capability.
    pub fn emit_signed_in(&self, user: AuthUser) {
        if let Some(auth) = &self.auth {
            auth.set_and_emit(Some(user));
        }
    }

    /// Drive a sign-out event through the auth-state registry.
    pub fn emit_signed_out(&self) {
        if let Some(auth) = &self.auth {
            auth.set_and_emit(None);
        }
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for MemoryProvider {
    fn id(&self) -> &str {
        "memory"
    }

    fn app_count(&self) -> usize {
        self.apps.lock().map(|apps| apps.len()).unwrap_or(0)
    }

    fn app(&self) -> Option<AuthClientHandle> {
        self.apps.lock().ok().and_then(|apps| apps.first().cloned())
    }

    fn initialize(&self, config: &ClientConfig) -> Result<AuthClientHandle, BootstrapError> {
        self.init_calls.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = &self.fail_message {
            return Err(BootstrapError::initialization(message.clone()));
        }

        let handle = AuthClientHandle::new(self.id(), config.app_name());
        if let Ok(mut apps) = self.apps.lock() {
            apps.push(handle.clone());
        }
        Ok(handle)
    }

    fn auth(&self) -> Option<&dyn AuthStateSource> {
        self.auth.as_ref().map(|auth| auth as &dyn AuthStateSource)
    }
}
