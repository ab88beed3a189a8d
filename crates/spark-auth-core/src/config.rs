// Client configuration — the object a server-rendered host injects into the
// page before the bootstrap runs.
//
// The wire shape is camelCase JSON:
//   { "apiKey": "...", "authDomain": "...", "projectId": "...", ... }
//
// Absence of the config, or an empty `apiKey`, is a defined non-fatal
// condition: the bootstrap logs a warning and the host continues with
// server-side auth only.

use serde::{Deserialize, Serialize};

/// Default application name used when the config carries no identifier.
pub const DEFAULT_APP_NAME: &str = "[DEFAULT]";

/// SDK configuration supplied once by the host, immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClientConfig {
    /// API key identifying the client to the auth backend. Required; an
    /// empty value is treated the same as a missing config.
    pub api_key: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl ClientConfig {
    /// Create a config with just an API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Whether this config can actually drive an SDK initialization.
    /// An empty or whitespace-only `apiKey` counts as absent.
    pub fn is_usable(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Name under which the client instance is registered. Prefers the
    /// explicit app id, then the project id, then the SDK default name.
    pub fn app_name(&self) -> String {
        self.app_id
            .clone()
            .or_else(|| self.project_id.clone())
            .unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
    }

    /// Parse a server-injected JSON blob.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// Resolve the config from the environment.
    ///
    /// `SPARK_AUTH_CONFIG` (a full JSON blob) wins; otherwise the individual
    /// `SPARK_AUTH_API_KEY`, `SPARK_AUTH_AUTH_DOMAIN`, `SPARK_AUTH_PROJECT_ID`,
    /// `SPARK_AUTH_STORAGE_BUCKET`, `SPARK_AUTH_MESSAGING_SENDER_ID`,
    /// `SPARK_AUTH_APP_ID` and `SPARK_AUTH_MEASUREMENT_ID` variables are read.
    /// Returns `None` when no usable API key can be found.
    pub fn from_env() -> Option<Self> {
        if let Ok(blob) = std::env::var("SPARK_AUTH_CONFIG") {
            if let Ok(config) = Self::from_json(&blob) {
                if config.is_usable() {
                    return Some(config);
                }
            }
        }

        let api_key = std::env::var("SPARK_AUTH_API_KEY").ok()?;
        let config = Self {
            api_key,
            auth_domain: std::env::var("SPARK_AUTH_AUTH_DOMAIN").ok(),
            project_id: std::env::var("SPARK_AUTH_PROJECT_ID").ok(),
            storage_bucket: std::env::var("SPARK_AUTH_STORAGE_BUCKET").ok(),
            messaging_sender_id: std::env::var("SPARK_AUTH_MESSAGING_SENDER_ID").ok(),
            app_id: std::env::var("SPARK_AUTH_APP_ID").ok(),
            measurement_id: std::env::var("SPARK_AUTH_MEASUREMENT_ID").ok(),
        };
        config.is_usable().then_some(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_api_key_is_not_usable() {
        assert!(!ClientConfig::default().is_usable());
        assert!(!ClientConfig::new("").is_usable());
        assert!(!ClientConfig::new("   ").is_usable());
        assert!(ClientConfig::new("web-key").is_usable());
    }

    #[test]
    fn parses_camel_case_blob() {
        let config = ClientConfig::from_json(
            r#"{
                "apiKey": "AIza-test",
                "authDomain": "demo.example.app",
                "projectId": "demo-project",
                "messagingSenderId": "123456",
                "appId": "1:123456:web:abc"
            }"#,
        )
        .unwrap();

        assert_eq!(config.api_key, "AIza-test");
        assert_eq!(config.auth_domain.as_deref(), Some("demo.example.app"));
        assert_eq!(config.project_id.as_deref(), Some("demo-project"));
        assert_eq!(config.messaging_sender_id.as_deref(), Some("123456"));
        assert!(config.measurement_id.is_none());
        assert!(config.is_usable());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        // Hosts sometimes inject extra keys; they must not break parsing.
        let config =
            ClientConfig::from_json(r#"{"apiKey": "k", "databaseURL": "ignored"}"#).unwrap();
        assert_eq!(config.api_key, "k");
    }

    #[test]
    fn serializes_camel_case_without_nulls() {
        let config = ClientConfig {
            api_key: "k".into(),
            project_id: Some("p".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["apiKey"], "k");
        assert_eq!(json["projectId"], "p");
        assert!(json.get("authDomain").is_none());
    }

    #[test]
    fn app_name_fallback_chain() {
        assert_eq!(ClientConfig::new("k").app_name(), DEFAULT_APP_NAME);

        let with_project = ClientConfig {
            api_key: "k".into(),
            project_id: Some("demo-project".into()),
            ..Default::default()
        };
        assert_eq!(with_project.app_name(), "demo-project");

        let with_app_id = ClientConfig {
            app_id: Some("1:1:web:a".into()),
            ..with_project
        };
        assert_eq!(with_app_id.app_name(), "1:1:web:a");
    }
}
