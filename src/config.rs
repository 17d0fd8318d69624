// ABOUTME: AdapterConfig - per-adapter runtime settings (timeout, type conversion).
// ABOUTME: Deserializable so orchestrators can load it from their own config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Runtime settings for a `ToolAdapter`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Upper bound on a single invocation, in milliseconds.
    /// `None` waits for the target indefinitely.
    pub timeout_ms: Option<u64>,

    /// Convert string parameters to their declared kind where lossless.
    pub convert_types: bool,
}

impl AdapterConfig {
    /// Create a config with no timeout and strict input types.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the invocation timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Enable or disable input type conversion.
    pub fn convert_types(mut self, convert: bool) -> Self {
        self.convert_types = convert;
        self
    }

    /// The timeout as a `Duration`.
    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: AdapterConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert!(config.timeout_duration().is_none());
        assert!(!config.convert_types);
    }

    #[test]
    fn test_deserialize_fields() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"timeout_ms": 2500, "convert_types": true}"#).unwrap();
        assert_eq!(config.timeout_duration(), Some(Duration::from_millis(2500)));
        assert!(config.convert_types);
    }

    #[test]
    fn test_builder() {
        let config = AdapterConfig::new()
            .timeout(Duration::from_secs(3))
            .convert_types(true);
        assert_eq!(config.timeout_ms, Some(3000));
        assert!(config.convert_types);
    }
}
