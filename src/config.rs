//! Plugin configuration.
//!
//! The host hands the plugin a JSON mapping on every (re)configuration.
//! Missing fields fall back to defaults; the resulting value is immutable
//! and replaced wholesale on the next `configure` call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default command timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Plugin configuration supplied by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Whether the plugin handles events at all.
    pub enabled: bool,

    /// Shell command to run for each matching event.
    pub command: String,

    /// Event type to listen for; empty means every broadcast event.
    pub event_type: String,

    /// Wall-clock budget for one command run, in seconds.
    pub timeout: u64,

    /// Whether to log captured events and command output.
    pub log_events: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            command: String::new(),
            event_type: String::new(),
            timeout: DEFAULT_TIMEOUT_SECS,
            log_events: false,
        }
    }
}

impl PluginConfig {
    /// Build a config from the host-supplied mapping.
    ///
    /// Each field is read independently: a missing or mistyped field falls
    /// back to its own default without touching the others. Unknown keys
    /// are ignored and the timeout is clamped to at least one second.
    pub fn from_map(value: &Value) -> Self {
        let defaults = Self::default();
        let Some(map) = value.as_object() else {
            return defaults;
        };

        Self {
            enabled: map
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.enabled),
            command: map
                .get("command")
                .and_then(Value::as_str)
                .map_or(defaults.command, str::to_string),
            event_type: map
                .get("event_type")
                .and_then(Value::as_str)
                .map_or(defaults.event_type, str::to_string),
            timeout: map
                .get("timeout")
                .and_then(Value::as_u64)
                .unwrap_or(defaults.timeout)
                .max(1),
            log_events: map
                .get("log_events")
                .and_then(Value::as_bool)
                .unwrap_or(defaults.log_events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_map_yields_defaults() {
        let config = PluginConfig::from_map(&json!({}));
        assert_eq!(config, PluginConfig::default());
        assert!(!config.enabled);
        assert_eq!(config.timeout, 60);
    }

    #[test]
    fn test_partial_map_defaults_missing_fields() {
        let config = PluginConfig::from_map(&json!({
            "enabled": true,
            "command": "echo hi",
        }));
        assert!(config.enabled);
        assert_eq!(config.command, "echo hi");
        assert_eq!(config.event_type, "");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
        assert!(!config.log_events);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let config = PluginConfig::from_map(&json!({
            "enabled": true,
            "legacy_field": "ignored",
        }));
        assert!(config.enabled);
    }

    #[test]
    fn test_timeout_clamped_to_one_second() {
        let config = PluginConfig::from_map(&json!({"timeout": 0}));
        assert_eq!(config.timeout, 1);
    }

    #[test]
    fn test_mistyped_field_degrades_alone() {
        let config = PluginConfig::from_map(&json!({
            "enabled": true,
            "command": "echo hi",
            "timeout": "60",
        }));
        assert!(config.enabled);
        assert_eq!(config.command, "echo hi");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_malformed_map_yields_defaults() {
        let config = PluginConfig::from_map(&json!("not a mapping"));
        assert_eq!(config, PluginConfig::default());
    }
}
