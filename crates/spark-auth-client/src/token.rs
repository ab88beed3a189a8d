//! Identity-token forwarding.
//!
//! After a sign-in, a host may choose to hand the SDK's identity token to its
//! own server endpoint for session establishment. This component only does
//! the forwarding; verifying the token is the server's job and out of scope
//! here. Nothing in the bootstrap path calls this — it is opt-in.

use std::time::Duration;

use spark_auth_core::{BootstrapError, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Posts `{"idToken": ...}` to a host-chosen endpoint and returns the
/// server's JSON response. The HTTP client keeps a cookie jar so a session
/// cookie set by the endpoint survives for follow-up requests.
#[derive(Debug, Clone)]
pub struct TokenForwarder {
    http: reqwest::Client,
    endpoint: String,
}

impl TokenForwarder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT_SECS)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Forward an identity token. Returns the endpoint's JSON body on any
    /// 2xx response.
    pub async fn forward(&self, id_token: &str) -> Result<serde_json::Value> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&serde_json::json!({ "idToken": id_token }))
            .send()
            .await
            .map_err(|err| BootstrapError::token_forward(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| BootstrapError::token_forward(err.to_string()))?;

        if !status.is_success() {
            return Err(BootstrapError::token_forward(format!(
                "endpoint returned {status}: {body}"
            )));
        }

        if body.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        serde_json::from_str(&body)
            .map_err(|err| BootstrapError::token_forward(format!("invalid JSON response: {err}")))
    }
}
