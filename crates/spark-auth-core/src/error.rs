// Error taxonomy for the client bootstrap sequence.
//
// Every variant is recovered locally by the bootstrap: the condition is
// logged and the component continues in degraded (no-auth-client) mode.
// Nothing here surfaces to the host as a failure.

use thiserror::Error;

/// Errors that can arise while bootstrapping the auth client.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The injected `ClientConfig` is absent or its `apiKey` is empty.
    #[error("client configuration not loaded")]
    ConfigMissing,

    /// No auth SDK provider was supplied to the context.
    #[error("auth SDK is not available")]
    SdkMissing,

    /// The SDK raised an error while creating the client instance or
    /// registering the auth-state listener.
    #[error("SDK initialization failed: {0}")]
    Initialization(String),

    /// The SDK is present but does not expose the auth capability.
    #[error("auth capability is not exposed by the SDK")]
    ListenerUnavailable,

    /// Forwarding an identity token to the host's server endpoint failed.
    #[error("identity token forwarding failed: {0}")]
    TokenForward(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BootstrapError {
    /// Shorthand for a [`BootstrapError::Initialization`] with a formatted message.
    pub fn initialization(message: impl Into<String>) -> Self {
        Self::Initialization(message.into())
    }

    /// Shorthand for a [`BootstrapError::TokenForward`] with a formatted message.
    pub fn token_forward(message: impl Into<String>) -> Self {
        Self::TokenForward(message.into())
    }
}

/// Unified result type for spark-auth operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            BootstrapError::ConfigMissing.to_string(),
            "client configuration not loaded"
        );
        assert_eq!(
            BootstrapError::SdkMissing.to_string(),
            "auth SDK is not available"
        );
        assert_eq!(
            BootstrapError::initialization("boom").to_string(),
            "SDK initialization failed: boom"
        );
        assert_eq!(
            BootstrapError::ListenerUnavailable.to_string(),
            "auth capability is not exposed by the SDK"
        );
    }

    #[test]
    fn from_anyhow() {
        let err: BootstrapError = anyhow::anyhow!("wrapped").into();
        assert!(matches!(err, BootstrapError::Other(_)));
        assert_eq!(err.to_string(), "wrapped");
    }
}
