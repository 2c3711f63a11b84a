//! Configuration form exposed to the host UI.
//!
//! The host renders the plugin's settings page from this schema: five
//! editable fields plus a default-values mapping matching the serde defaults
//! of [`PluginConfig`](crate::config::PluginConfig).

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::event::EventType;

/// Kind of widget a form field renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Boolean toggle.
    Switch,
    /// Integer input.
    Number,
    /// Single-choice dropdown.
    Select,
    /// Multi-line text input.
    Textarea,
}

/// One selectable option of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Human-readable title.
    pub title: String,
    /// Value stored in the configuration.
    pub value: String,
}

/// A single editable field of the plugin's configuration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormField {
    /// Configuration key this field binds to.
    pub model: String,
    /// Widget kind.
    pub kind: FieldKind,
    /// Field label.
    pub label: String,
    /// Explanatory hint shown under the field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    /// Placeholder text for empty inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Options for select fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl FormField {
    fn new(model: &str, kind: FieldKind, label: &str) -> Self {
        Self {
            model: model.to_string(),
            kind,
            label: label.to_string(),
            hint: None,
            placeholder: None,
            options: Vec::new(),
        }
    }

    fn hint(mut self, hint: &str) -> Self {
        self.hint = Some(hint.to_string());
        self
    }

    fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    fn options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }
}

/// All broadcast event types as select options, wildcard first.
///
/// High-traffic types get a star so they stand out in the dropdown.
pub fn event_options() -> Vec<SelectOption> {
    let mut options = vec![SelectOption {
        title: "🌐 All events".to_string(),
        value: String::new(),
    }];
    for event_type in EventType::ALL {
        let star = if event_type.featured() { "⭐ " } else { "" };
        options.push(SelectOption {
            title: format!("{star}{} ({event_type})", event_type.label()),
            value: event_type.to_string(),
        });
    }
    options
}

/// The plugin's configuration form.
pub fn form() -> Vec<FormField> {
    vec![
        FormField::new("enabled", FieldKind::Switch, "Enable plugin"),
        FormField::new("log_events", FieldKind::Switch, "Log captured events")
            .hint("Record every captured event in the log"),
        FormField::new("timeout", FieldKind::Number, "Command timeout (seconds)")
            .hint("Wall-clock budget for one command run"),
        FormField::new("event_type", FieldKind::Select, "Event type to listen for")
            .hint("Pick a single event type, or \"All events\"")
            .options(event_options()),
        FormField::new("command", FieldKind::Textarea, "Shell command")
            .hint(
                "Event data is passed via environment variables: \
                 MP_EVENT_TYPE, MP_EVENT_DATA, MP_EVENT_TIME. \
                 jq is handy for parsing MP_EVENT_DATA.",
            )
            .placeholder(r#"echo "Event: $MP_EVENT_TYPE" >> /var/log/mp-events.log"#),
    ]
}

/// Default values for every form field.
pub fn default_values() -> Value {
    json!({
        "enabled": false,
        "log_events": false,
        "timeout": 60,
        "event_type": "",
        "command": "",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PluginConfig;

    #[test]
    fn test_form_has_all_five_fields() {
        let fields = form();
        let models: Vec<&str> = fields.iter().map(|f| f.model.as_str()).collect();
        assert_eq!(
            models,
            vec!["enabled", "log_events", "timeout", "event_type", "command"]
        );
    }

    #[test]
    fn test_event_options_cover_wildcard_and_every_type() {
        let options = event_options();
        assert_eq!(options.len(), EventType::ALL.len() + 1);
        assert_eq!(options[0].value, "");

        for event_type in EventType::ALL {
            assert!(options.iter().any(|o| o.value == event_type.as_str()));
        }
    }

    #[test]
    fn test_featured_types_are_starred() {
        let options = event_options();
        let transfer = options
            .iter()
            .find(|o| o.value == "transfer.complete")
            .unwrap();
        assert!(transfer.title.starts_with('⭐'));
    }

    #[test]
    fn test_defaults_match_plugin_config() {
        let config = PluginConfig::from_map(&default_values());
        assert_eq!(config, PluginConfig::default());
    }
}
