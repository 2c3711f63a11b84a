//! The plugin shell: configuration state and event-bus wiring.
//!
//! The host constructs one [`EventExecutorPlugin`], calls
//! [`configure`](EventExecutorPlugin::configure) with the stored settings,
//! and registers [`on_event`](EventExecutorPlugin::on_event) as a broadcast
//! callback. Event handling reads an `Arc` snapshot of the configuration, so
//! a concurrent reconfiguration never produces a torn read.

use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::info;

use crate::config::PluginConfig;
use crate::event::Event;
use crate::executor::CommandExecutor;
use crate::filter::should_handle;
use crate::form::{self, FormField};

/// Plugin identifier used for config storage keys.
pub const PLUGIN_ID: &str = "eventexecutor";
/// Human-readable plugin name.
pub const PLUGIN_NAME: &str = "Event Executor";
/// One-line plugin description shown in the host's plugin list.
pub const PLUGIN_DESC: &str =
    "Listen for host events and run a custom shell command with the event data \
     passed in environment variables.";
/// Plugin version reported to the host.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Icon asset name.
pub const PLUGIN_ICON: &str = "executor.png";
/// Prefix for the plugin's configuration keys.
pub const PLUGIN_CONFIG_PREFIX: &str = "eventexecutor_";
/// Load order relative to other plugins (higher loads later).
pub const PLUGIN_ORDER: u32 = 99;

/// The event-executor plugin.
pub struct EventExecutorPlugin {
    config: RwLock<Arc<PluginConfig>>,
    executor: CommandExecutor,
}

impl EventExecutorPlugin {
    /// Create an unconfigured plugin backed by the system shell.
    pub fn new() -> Self {
        Self::with_executor(CommandExecutor::new())
    }

    /// Create a plugin with a custom executor.
    pub fn with_executor(executor: CommandExecutor) -> Self {
        Self {
            config: RwLock::new(Arc::new(PluginConfig::default())),
            executor,
        }
    }

    /// Replace the whole configuration from the host-supplied mapping.
    ///
    /// Missing fields default; there is no partial update path. Safe to call
    /// repeatedly, e.g. on every reconfiguration.
    pub fn configure(&self, value: &Value) {
        let config = PluginConfig::from_map(value);

        if config.enabled {
            info!("event executor plugin enabled");
            if !config.command.is_empty() {
                info!(command = %config.command, "configured command");
            }
            if config.event_type.is_empty() {
                info!("listening for all broadcast events");
            } else {
                info!(event_type = %config.event_type, "listening for one event type");
            }
            info!(timeout_secs = config.timeout, "command timeout");
        }

        *self.config.write() = Arc::new(config);
    }

    /// Whether the plugin is currently enabled.
    pub fn enabled(&self) -> bool {
        self.config.read().enabled
    }

    /// Snapshot of the active configuration.
    pub fn config(&self) -> Arc<PluginConfig> {
        Arc::clone(&self.config.read())
    }

    /// Broadcast callback wired to the host's event bus.
    ///
    /// No-op when the plugin is disabled or no event was delivered. Never
    /// fails: all execution errors are logged and swallowed downstream.
    pub fn on_event(&self, event: Option<&Event>) {
        let config = self.config();
        if !config.enabled {
            return;
        }
        let Some(event) = event else { return };

        if !should_handle(&config.event_type, event.event_type.as_str()) {
            return;
        }

        self.executor.execute(&config, event);
    }

    /// Configuration form schema and default values for the host UI.
    pub fn form(&self) -> (Vec<FormField>, Value) {
        (form::form(), form::default_values())
    }

    /// Host shutdown hook. The plugin holds no resources to release; any
    /// still-running command finishes, times out, or dies with the host.
    pub fn stop(&self) {}
}

impl Default for EventExecutorPlugin {
    fn default() -> Self {
        Self::new()
    }
}
