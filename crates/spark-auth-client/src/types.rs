//! Data types crossing the bootstrap boundary: the signed-in user shape, the
//! opaque client handle, and the terminal outcome of a bootstrap pass.

use serde::{Deserialize, Serialize};

/// A user reported by the auth-state listener. Produced by the SDK; never
/// persisted by this component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl AuthUser {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
        }
    }

    pub fn with_email(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: Some(email.into()),
        }
    }

    /// Identity string for diagnostics: the email, falling back to the uid.
    pub fn display_identity(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.uid)
    }
}

/// Opaque handle for an initialized SDK client instance.
///
/// At most one handle exists per [`crate::AuthContext`]; its lifetime is the
/// context's lifetime and there is no explicit teardown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClientHandle {
    provider_id: String,
    app_name: String,
}

impl AuthClientHandle {
    pub fn new(provider_id: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            app_name: app_name.into(),
        }
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }
}

/// Whether the auth-state listener ended up registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerStatus {
    /// The SDK exposes the auth capability and the listener is attached.
    Attached,
    /// The SDK has no auth capability; a warning was logged instead.
    Unavailable,
}

/// Terminal outcome of a bootstrap pass. All states are terminal for the
/// context; there are no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Config absent or `apiKey` empty; nothing was done.
    SkippedNoConfig,
    /// No SDK provider supplied; nothing was done.
    SkippedNoSdk,
    /// The client exists (created now or pre-existing).
    Initialized(ListenerStatus),
    /// The SDK raised during the guarded region; the error was logged.
    Failed,
}

impl BootstrapOutcome {
    pub fn is_initialized(&self) -> bool {
        matches!(self, Self::Initialized(_))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkippedNoConfig => "skipped-no-config",
            Self::SkippedNoSdk => "skipped-no-sdk",
            Self::Initialized(ListenerStatus::Attached) => "initialized",
            Self::Initialized(ListenerStatus::Unavailable) => "initialized-no-listener",
            Self::Failed => "failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_identity_prefers_email() {
        let user = AuthUser::with_email("u1", "a@b.com");
        assert_eq!(user.display_identity(), "a@b.com");

        let no_email = AuthUser::new("u1");
        assert_eq!(no_email.display_identity(), "u1");
    }

    #[test]
    fn user_deserializes_without_email() {
        let user: AuthUser = serde_json::from_str(r#"{"uid": "u1"}"#).unwrap();
        assert_eq!(user.uid, "u1");
        assert!(user.email.is_none());
    }

    #[test]
    fn outcome_labels() {
        assert_eq!(BootstrapOutcome::SkippedNoConfig.as_str(), "skipped-no-config");
        assert_eq!(
            BootstrapOutcome::Initialized(ListenerStatus::Attached).as_str(),
            "initialized"
        );
        assert!(BootstrapOutcome::Initialized(ListenerStatus::Unavailable).is_initialized());
        assert!(!BootstrapOutcome::Failed.is_initialized());
    }
}
