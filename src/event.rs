//! Host event-bus contract.
//!
//! The host broadcasts typed events to every registered plugin. This module
//! mirrors the host's closed event-type enumeration and the event value
//! delivered to the plugin's callback.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::payload::Payload;

/// Broadcast event identifiers defined by the host.
///
/// The string forms are part of the host contract and are what reaches the
/// spawned command in `MP_EVENT_TYPE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// A plugin was reloaded.
    #[serde(rename = "plugin.reload")]
    PluginReload,
    /// A plugin action was triggered.
    #[serde(rename = "plugin.action")]
    PluginAction,
    /// A plugin event was triggered.
    #[serde(rename = "plugin.triggered")]
    PluginTriggered,
    /// A remote command was executed. The string form keeps the host's
    /// historical spelling.
    #[serde(rename = "command.excute")]
    CommandExecute,
    /// A site was deleted.
    #[serde(rename = "site.deleted")]
    SiteDeleted,
    /// A site was updated.
    #[serde(rename = "site.updated")]
    SiteUpdated,
    /// Site data was refreshed.
    #[serde(rename = "site.refreshed")]
    SiteRefreshed,
    /// A media transfer finished.
    #[serde(rename = "transfer.complete")]
    TransferComplete,
    /// A download task was added.
    #[serde(rename = "download.added")]
    DownloadAdded,
    /// A history record was deleted.
    #[serde(rename = "history.deleted")]
    HistoryDeleted,
    /// A download source file was deleted.
    #[serde(rename = "downloadfile.deleted")]
    DownloadFileDeleted,
    /// A download task was deleted.
    #[serde(rename = "download.deleted")]
    DownloadDeleted,
    /// A user message was received.
    #[serde(rename = "user.message")]
    UserMessage,
    /// A webhook message was received.
    #[serde(rename = "webhook.message")]
    WebhookMessage,
    /// A notification message was sent.
    #[serde(rename = "notice.message")]
    NoticeMessage,
    /// A subscription was added.
    #[serde(rename = "subscribe.added")]
    SubscribeAdded,
    /// A subscription was adjusted.
    #[serde(rename = "subscribe.modified")]
    SubscribeModified,
    /// A subscription was deleted.
    #[serde(rename = "subscribe.deleted")]
    SubscribeDeleted,
    /// A subscription completed.
    #[serde(rename = "subscribe.complete")]
    SubscribeComplete,
    /// The host reported an internal error.
    #[serde(rename = "system.error")]
    SystemError,
    /// Metadata was scraped for a media item.
    #[serde(rename = "metadata.scrape")]
    MetadataScrape,
    /// A host module was reloaded.
    #[serde(rename = "module.reload")]
    ModuleReload,
    /// A configuration entry changed.
    #[serde(rename = "config.updated")]
    ConfigUpdated,
    /// An interactive message action was performed.
    #[serde(rename = "message.action")]
    MessageAction,
    /// A workflow was executed.
    #[serde(rename = "workflow.execute")]
    WorkflowExecute,
}

impl EventType {
    /// Every broadcast event type, in the order the host documents them.
    pub const ALL: &'static [Self] = &[
        Self::PluginReload,
        Self::PluginAction,
        Self::PluginTriggered,
        Self::CommandExecute,
        Self::SiteDeleted,
        Self::SiteUpdated,
        Self::SiteRefreshed,
        Self::TransferComplete,
        Self::DownloadAdded,
        Self::HistoryDeleted,
        Self::DownloadFileDeleted,
        Self::DownloadDeleted,
        Self::UserMessage,
        Self::WebhookMessage,
        Self::NoticeMessage,
        Self::SubscribeAdded,
        Self::SubscribeModified,
        Self::SubscribeDeleted,
        Self::SubscribeComplete,
        Self::SystemError,
        Self::MetadataScrape,
        Self::ModuleReload,
        Self::ConfigUpdated,
        Self::MessageAction,
        Self::WorkflowExecute,
    ];

    /// The dotted string form used on the wire and in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PluginReload => "plugin.reload",
            Self::PluginAction => "plugin.action",
            Self::PluginTriggered => "plugin.triggered",
            Self::CommandExecute => "command.excute",
            Self::SiteDeleted => "site.deleted",
            Self::SiteUpdated => "site.updated",
            Self::SiteRefreshed => "site.refreshed",
            Self::TransferComplete => "transfer.complete",
            Self::DownloadAdded => "download.added",
            Self::HistoryDeleted => "history.deleted",
            Self::DownloadFileDeleted => "downloadfile.deleted",
            Self::DownloadDeleted => "download.deleted",
            Self::UserMessage => "user.message",
            Self::WebhookMessage => "webhook.message",
            Self::NoticeMessage => "notice.message",
            Self::SubscribeAdded => "subscribe.added",
            Self::SubscribeModified => "subscribe.modified",
            Self::SubscribeDeleted => "subscribe.deleted",
            Self::SubscribeComplete => "subscribe.complete",
            Self::SystemError => "system.error",
            Self::MetadataScrape => "metadata.scrape",
            Self::ModuleReload => "module.reload",
            Self::ConfigUpdated => "config.updated",
            Self::MessageAction => "message.action",
            Self::WorkflowExecute => "workflow.execute",
        }
    }

    /// Human-readable title shown in the configuration form.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PluginReload => "Plugin reloaded",
            Self::PluginAction => "Plugin action triggered",
            Self::PluginTriggered => "Plugin event triggered",
            Self::CommandExecute => "Command executed",
            Self::SiteDeleted => "Site deleted",
            Self::SiteUpdated => "Site updated",
            Self::SiteRefreshed => "Site refreshed",
            Self::TransferComplete => "Transfer complete",
            Self::DownloadAdded => "Download added",
            Self::HistoryDeleted => "History record deleted",
            Self::DownloadFileDeleted => "Download source file deleted",
            Self::DownloadDeleted => "Download task deleted",
            Self::UserMessage => "User message received",
            Self::WebhookMessage => "Webhook message received",
            Self::NoticeMessage => "Notification sent",
            Self::SubscribeAdded => "Subscription added",
            Self::SubscribeModified => "Subscription adjusted",
            Self::SubscribeDeleted => "Subscription deleted",
            Self::SubscribeComplete => "Subscription complete",
            Self::SystemError => "System error",
            Self::MetadataScrape => "Metadata scraped",
            Self::ModuleReload => "Module reloaded",
            Self::ConfigUpdated => "Configuration updated",
            Self::MessageAction => "Message action",
            Self::WorkflowExecute => "Workflow executed",
        }
    }

    /// Whether this is one of the high-traffic types the form highlights.
    pub fn featured(&self) -> bool {
        matches!(
            self,
            Self::TransferComplete
                | Self::DownloadAdded
                | Self::SubscribeAdded
                | Self::SubscribeComplete
        )
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown event-type string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event type: {0}")]
pub struct UnknownEventType(pub String);

impl FromStr for EventType {
    type Err = UnknownEventType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|event_type| event_type.as_str() == s)
            .ok_or_else(|| UnknownEventType(s.to_string()))
    }
}

/// One event delivered by the host's dispatcher.
///
/// Owned by the dispatch call; the plugin borrows it for the duration of one
/// `on_event` invocation and never retains it.
#[derive(Debug, Clone)]
pub struct Event {
    /// The broadcast event type.
    pub event_type: EventType,
    /// Opaque, host-defined payload.
    pub data: Payload,
}

impl Event {
    /// Create a new event.
    pub fn new(event_type: EventType, data: Payload) -> Self {
        Self { event_type, data }
    }
}
