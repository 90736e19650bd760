//! The typed wire protocol.
//!
//! Commands travel as JSON objects tagged by a `type` field. The set is
//! closed on both directions: the server only needs to understand the two
//! outgoing commands, and unrecognized incoming payloads are dropped at the
//! socket layer before they reach any hook.

use serde::{Deserialize, Serialize};

/// A keyboard shortcut forwarded to the server.
///
/// Constructed per key press, sent once, not retained. Privileged
/// combinations carry `ctrlKey: true` for both Ctrl and Cmd; bare shortcut
/// keys carry no modifier fields at all.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ShortcutCommand {
    /// The key name (`j`, `/`, `Escape`, ...).
    pub key: String,
    #[serde(rename = "ctrlKey", default, skip_serializing_if = "Option::is_none")]
    pub ctrl_key: Option<bool>,
    #[serde(rename = "metaKey", default, skip_serializing_if = "Option::is_none")]
    pub meta_key: Option<bool>,
}

impl ShortcutCommand {
    /// A shortcut with no modifiers.
    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl_key: None,
            meta_key: None,
        }
    }

    /// A privileged shortcut carrying the command modifier.
    pub fn with_ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl_key: Some(true),
            meta_key: None,
        }
    }
}

/// Acknowledgement that a highlighted message was scrolled into view.
///
/// The server clears its pending-highlight flag on receipt, so the next
/// re-render does not trigger the scroll again.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct HighlightAcknowledgement {
    pub message_id: String,
}

/// Identifies the message a scroll command targets. The element is located
/// via the derived id `message-<message_id>`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ScrollTarget {
    pub message_id: String,
}

/// Commands sent from client to server.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum OutgoingCommand {
    #[serde(rename = "keyboard_shortcut")]
    KeyboardShortcut(ShortcutCommand),
    #[serde(rename = "highlight_message")]
    HighlightMessage(HighlightAcknowledgement),
}

/// Commands pushed from server to client.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum IncomingCommand {
    /// Bring a specific message into view.
    #[serde(rename = "scroll_to_message")]
    ScrollToMessage(ScrollTarget),
    /// Move focus to the composer textarea.
    #[serde(rename = "focus_message_input")]
    FocusMessageInput,
    /// Live navigation started loading.
    #[serde(rename = "page_loading_start")]
    PageLoadingStart,
    /// Live navigation finished loading.
    #[serde(rename = "page_loading_stop")]
    PageLoadingStop,
}

/// Discriminant used for incoming-command subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncomingKind {
    ScrollToMessage,
    FocusMessageInput,
    PageLoadingStart,
    PageLoadingStop,
}

impl IncomingCommand {
    /// The subscription discriminant for this command.
    pub fn kind(&self) -> IncomingKind {
        match self {
            IncomingCommand::ScrollToMessage(_) => IncomingKind::ScrollToMessage,
            IncomingCommand::FocusMessageInput => IncomingKind::FocusMessageInput,
            IncomingCommand::PageLoadingStart => IncomingKind::PageLoadingStart,
            IncomingCommand::PageLoadingStop => IncomingKind::PageLoadingStop,
        }
    }
}
