//! # Event Executor
//!
//! A plugin for a media-management host that listens to the host's broadcast
//! event bus and runs a user-configured shell command for each matching
//! event, with the event data exposed through environment variables:
//!
//! - `MP_EVENT_TYPE` — the raw event type string, e.g. `transfer.complete`
//! - `MP_EVENT_DATA` — the JSON envelope `{"type": ..., "data": ...}`
//! - `MP_EVENT_TIME` — the ISO-8601 timestamp of the invocation
//!
//! The host owns the event bus, the plugin lifecycle, and configuration
//! persistence; this crate is the glue in between: filter the event,
//! normalize its payload to JSON, build the environment, and run the command
//! with a hard timeout. Command failures are logged and swallowed so one bad
//! command never disturbs event delivery.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]

pub mod config;
pub mod error;
pub mod event;
pub mod executor;
pub mod filter;
pub mod form;
pub mod payload;
pub mod plugin;

pub use config::{PluginConfig, DEFAULT_TIMEOUT_SECS};
pub use error::{ExecError, ExecResult};
pub use event::{Event, EventType, UnknownEventType};
pub use executor::{
    encode_envelope, CommandExecutor, CommandOutput, CommandRunner, ShellRunner, ENV_EVENT_DATA,
    ENV_EVENT_TIME, ENV_EVENT_TYPE,
};
pub use filter::should_handle;
pub use form::{FieldKind, FormField, SelectOption};
pub use payload::{normalize, ObjectPayload, Payload};
pub use plugin::{
    EventExecutorPlugin, PLUGIN_CONFIG_PREFIX, PLUGIN_DESC, PLUGIN_ICON, PLUGIN_ID, PLUGIN_NAME,
    PLUGIN_ORDER, PLUGIN_VERSION,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
