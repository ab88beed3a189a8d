//! The owned application context replacing the browser page's globals.
//!
//! Where the original environment kept one implicit SDK instance on the
//! page, `AuthContext` holds the at-most-one client handle explicitly, with
//! idempotent get-or-create semantics, and owns the listener registration
//! for its lifetime.

use std::fmt;
use std::sync::{Arc, Mutex, OnceLock};

use spark_auth_core::{AuthLogger, ClientConfig};

use crate::provider::AuthProvider;
use crate::subscription::AuthStateSubscription;
use crate::types::{AuthClientHandle, BootstrapOutcome};

/// Per-host auth context. Create one per "page load" equivalent via
/// [`AuthContextBuilder`], then call [`bootstrap`](AuthContext::bootstrap).
pub struct AuthContext {
    pub(crate) config: Option<ClientConfig>,
    pub(crate) provider: Option<Arc<dyn AuthProvider>>,
    pub(crate) logger: AuthLogger,
    /// The at-most-one client handle. Set during the guarded init region.
    pub(crate) handle: OnceLock<AuthClientHandle>,
    /// Recorded outcome; doubles as the run-once guard.
    pub(crate) outcome: OnceLock<BootstrapOutcome>,
    /// Keeps the auth-state listener registered for the context lifetime.
    pub(crate) listener: Mutex<Option<AuthStateSubscription>>,
}

impl AuthContext {
    /// The config this context was built with, if any.
    pub fn config(&self) -> Option<&ClientConfig> {
        self.config.as_ref()
    }

    /// The SDK provider, if one was supplied.
    pub fn provider(&self) -> Option<&Arc<dyn AuthProvider>> {
        self.provider.as_ref()
    }

    pub fn logger(&self) -> &AuthLogger {
        &self.logger
    }

    /// The client handle, once the bootstrap created or adopted one.
    pub fn client_handle(&self) -> Option<&AuthClientHandle> {
        self.handle.get()
    }

    /// The recorded bootstrap outcome, or `None` before the first
    /// [`bootstrap`](AuthContext::bootstrap) call.
    pub fn outcome(&self) -> Option<BootstrapOutcome> {
        self.outcome.get().copied()
    }

    /// Whether the auth-state listener is currently registered.
    pub fn listener_attached(&self) -> bool {
        self.listener
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("has_config", &self.config.is_some())
            .field("has_provider", &self.provider.is_some())
            .field("outcome", &self.outcome.get())
            .field("handle", &self.handle.get())
            .finish()
    }
}

/// Builder for [`AuthContext`].
#[derive(Default)]
pub struct AuthContextBuilder {
    config: Option<ClientConfig>,
    provider: Option<Arc<dyn AuthProvider>>,
    logger: Option<AuthLogger>,
}

impl AuthContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the injected client config.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the config only when the host actually injected one.
    pub fn maybe_config(mut self, config: Option<ClientConfig>) -> Self {
        self.config = config;
        self
    }

    /// Resolve the config from `SPARK_AUTH_*` environment variables.
    pub fn config_from_env(mut self) -> Self {
        self.config = ClientConfig::from_env();
        self
    }

    /// Supply the SDK provider. Leaving it unset models a page where the
    /// SDK script failed to load.
    pub fn provider(mut self, provider: Arc<dyn AuthProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn logger(mut self, logger: AuthLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn build(self) -> AuthContext {
        AuthContext {
            config: self.config,
            provider: self.provider,
            logger: self.logger.unwrap_or_default(),
            handle: OnceLock::new(),
            outcome: OnceLock::new(),
            listener: Mutex::new(None),
        }
    }
}

impl fmt::Debug for AuthContextBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContextBuilder")
            .field("has_config", &self.config.is_some())
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MemoryProvider;

    #[test]
    fn builder_defaults() {
        let ctx = AuthContextBuilder::new().build();
        assert!(ctx.config().is_none());
        assert!(ctx.provider().is_none());
        assert!(ctx.outcome().is_none());
        assert!(ctx.client_handle().is_none());
        assert!(!ctx.listener_attached());
    }

    #[test]
    fn builder_carries_parts() {
        let ctx = AuthContextBuilder::new()
            .config(ClientConfig::new("web-key"))
            .provider(Arc::new(MemoryProvider::new()))
            .build();
        assert_eq!(ctx.config().map(|c| c.api_key.as_str()), Some("web-key"));
        assert!(ctx.provider().is_some());
    }

    #[test]
    fn maybe_config_none_stays_absent() {
        let ctx = AuthContextBuilder::new().maybe_config(None).build();
        assert!(ctx.config().is_none());
    }
}
