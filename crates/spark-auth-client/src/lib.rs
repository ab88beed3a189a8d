//! # Spark Auth client bootstrap
//!
//! A small, embeddable rendition of the "auth bootstrap" every
//! server-rendered page carries: read the injected configuration, decide
//! whether the auth SDK can be initialized, create at most one client
//! instance, attach an auth-state listener, and log what happened. Nothing
//! in here can take the host down — missing config, missing SDK, and SDK
//! failures all degrade to a logged diagnostic.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use spark_auth_client::{AuthContextBuilder, AuthUser, MemoryProvider};
//! use spark_auth_core::ClientConfig;
//!
//! let provider = Arc::new(MemoryProvider::new());
//! let ctx = AuthContextBuilder::new()
//!     .config(ClientConfig::new("web-api-key"))
//!     .provider(provider.clone())
//!     .build();
//!
//! let outcome = ctx.bootstrap();
//! assert!(outcome.is_initialized());
//!
//! // The SDK (here: the in-memory provider) drives auth-state changes;
//! // the bootstrap's listener logs them.
//! provider.emit_signed_in(AuthUser::with_email("u1", "alice@example.com"));
//! provider.emit_signed_out();
//! ```
//!
//! The same context with no config, or no provider, bootstraps into a
//! degraded mode with a single warning — the host keeps rendering either way.

mod bootstrap;
mod context;
mod provider;
mod subscription;
mod token;
mod types;

pub use context::{AuthContext, AuthContextBuilder};
pub use provider::{AuthProvider, AuthStateSource, MemoryAuth, MemoryProvider};
pub use subscription::{AuthStateCallback, AuthStateRegistry, AuthStateSubscription};
pub use token::TokenForwarder;
pub use types::{AuthClientHandle, AuthUser, BootstrapOutcome, ListenerStatus};
