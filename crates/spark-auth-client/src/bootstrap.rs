//! The bootstrap sequence.
//!
//! One guarded pass per context, short-circuiting at each guard:
//!
//! 1. no usable config → warn, done (server-side auth only);
//! 2. no SDK provider → warn, done;
//! 3. guarded region: idempotent client creation, then listener
//!    registration — any SDK error is caught and logged, never propagated.
//!
//! The state machine is
//! `Unconfigured → SkippedNoConfig | SkippedNoSdk |
//! Initialized(Attached | Unavailable) | Failed`; every state is terminal.

use std::sync::Arc;

use spark_auth_core::{BootstrapError, ClientConfig};

use crate::context::AuthContext;
use crate::provider::AuthProvider;
use crate::types::{BootstrapOutcome, ListenerStatus};

impl AuthContext {
    /// Run the bootstrap sequence once and record its outcome.
    ///
    /// Subsequent calls return the recorded outcome without repeating any
    /// side effect. This never panics and never surfaces an error to the
    /// host; failures degrade to a logged diagnostic.
    pub fn bootstrap(&self) -> BootstrapOutcome {
        *self.outcome.get_or_init(|| self.run_guarded_sequence())
    }

    fn run_guarded_sequence(&self) -> BootstrapOutcome {
        let Some(config) = self.config.as_ref().filter(|config| config.is_usable()) else {
            self.logger
                .warn("Client configuration not loaded - server-side auth only");
            return BootstrapOutcome::SkippedNoConfig;
        };

        let Some(provider) = self.provider.as_ref() else {
            self.logger.warn(
                "Auth SDK not loaded. Ensure the SDK provider is supplied before bootstrapping.",
            );
            return BootstrapOutcome::SkippedNoSdk;
        };

        match self.init_and_listen(config, provider.as_ref()) {
            Ok(status) => BootstrapOutcome::Initialized(status),
            Err(err) => {
                self.logger
                    .error(&format!("Error initializing auth client: {err}"));
                BootstrapOutcome::Failed
            }
        }
    }

    /// The guarded region: everything in here may fail, and every failure is
    /// reported to the caller for logging rather than propagated further.
    fn init_and_listen(
        &self,
        config: &ClientConfig,
        provider: &dyn AuthProvider,
    ) -> Result<ListenerStatus, BootstrapError> {
        if provider.app_count() == 0 {
            let handle = provider.initialize(config)?;
            let _ = self.handle.set(handle);
            self.logger.success("Auth client initialized.");
        } else {
            // Adopt the existing instance instead of creating a second one.
            if let Some(existing) = provider.app() {
                let _ = self.handle.set(existing);
            }
            self.logger
                .info("Auth client already initialized; skipping initialization.");
        }

        let Some(auth) = provider.auth() else {
            self.logger
                .warn("Auth capability is not available; auth-state changes will not be observed.");
            return Ok(ListenerStatus::Unavailable);
        };

        let logger = self.logger.clone();
        let subscription = auth.on_auth_state_changed(Arc::new(move |user| match user {
            Some(user) => logger.info(&format!("User signed in: {}", user.display_identity())),
            None => logger.info("No user signed in."),
        }))?;

        if let Ok(mut slot) = self.listener.lock() {
            *slot = Some(subscription);
        }
        Ok(ListenerStatus::Attached)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthContextBuilder;
    use crate::provider::MemoryProvider;
    use spark_auth_core::AuthLogger;

    // The observable-behavior properties live in tests/bootstrap_tests.rs;
    // these cover the internal guard wiring.

    #[test]
    fn handle_is_set_after_fresh_init() {
        let provider = Arc::new(MemoryProvider::new());
        let ctx = AuthContextBuilder::new()
            .config(ClientConfig::new("web-key"))
            .provider(provider.clone())
            .logger(AuthLogger::new(spark_auth_core::LoggerConfig {
                disabled: true,
                ..Default::default()
            }))
            .build();

        let outcome = ctx.bootstrap();
        assert_eq!(outcome, BootstrapOutcome::Initialized(ListenerStatus::Attached));
        assert!(ctx.client_handle().is_some());
        assert!(ctx.listener_attached());
        assert_eq!(provider.init_call_count(), 1);
    }

    #[test]
    fn existing_app_is_adopted() {
        let provider = Arc::new(MemoryProvider::with_existing_app("demo"));
        let ctx = AuthContextBuilder::new()
            .config(ClientConfig::new("web-key"))
            .provider(provider.clone())
            .logger(AuthLogger::new(spark_auth_core::LoggerConfig {
                disabled: true,
                ..Default::default()
            }))
            .build();

        ctx.bootstrap();
        assert_eq!(provider.init_call_count(), 0);
        assert_eq!(ctx.client_handle().map(|h| h.app_name()), Some("demo"));
    }

    #[test]
    fn failed_outcome_keeps_no_handle_or_listener() {
        let ctx = AuthContextBuilder::new()
            .config(ClientConfig::new("web-key"))
            .provider(Arc::new(MemoryProvider::failing("boom")))
            .logger(AuthLogger::new(spark_auth_core::LoggerConfig {
                disabled: true,
                ..Default::default()
            }))
            .build();

        assert_eq!(ctx.bootstrap(), BootstrapOutcome::Failed);
        assert!(ctx.client_handle().is_none());
        assert!(!ctx.listener_attached());
    }
}
