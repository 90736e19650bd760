//! Configuration for the behavior units.
//!
//! Defaults match the markers the server-rendered markup exposes: the
//! `modal-open` class, the `query` search input, the `message[content]`
//! composer textarea, `message-<id>` element ids, and the `data-highlight`
//! container attribute.

use std::time::Duration;

/// Which key combinations the shortcut dispatcher privileges over typing
/// context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShortcutVariant {
    /// Ctrl/Cmd+J and Ctrl/Cmd+K switch rooms (next/previous).
    #[default]
    Navigation,
    /// Only Ctrl/Cmd+K is privileged, opening search.
    SearchOnly,
}

/// Configuration for the keyboard shortcut dispatcher.
#[derive(Debug, Clone, Default)]
pub struct ShortcutConfig {
    pub variant: ShortcutVariant,
}

/// Configuration for the message scroll coordinator.
#[derive(Debug, Clone)]
pub struct ScrollConfig {
    /// Attribute whose presence on the container suspends bottom-follow.
    pub highlight_attr: String,
    /// Prefix joined with a message id to form the target element id.
    pub message_id_prefix: String,
    /// Class applied for the transient pulse effect.
    pub pulse_class: String,
    /// Delay before the pulse class is applied.
    pub pulse_delay: Duration,
    /// How long the pulse class stays applied.
    pub pulse_duration: Duration,
    /// Whether server-driven highlight scrolls also pulse the target. The
    /// local scroll path always pulses.
    pub pulse_on_highlight: bool,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            highlight_attr: "data-highlight".to_string(),
            message_id_prefix: "message-".to_string(),
            pulse_class: "animate-pulse".to_string(),
            pulse_delay: Duration::ZERO,
            pulse_duration: Duration::from_millis(2000),
            pulse_on_highlight: false,
        }
    }
}

/// Configuration for the modal focus manager.
#[derive(Debug, Clone)]
pub struct ModalConfig {
    /// Class marking the modal as open.
    pub open_class: String,
    /// `name` attribute of the input to focus.
    pub input_name: String,
    /// Wait between the open transition and the focus attempt, covering
    /// layout and animation that may not be complete when the class flips.
    pub settle_delay: Duration,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            open_class: "modal-open".to_string(),
            input_name: "query".to_string(),
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Configuration for the enter-to-submit composer controller.
#[derive(Debug, Clone)]
pub struct ComposeConfig {
    /// `name` attribute of the textarea the controller owns.
    pub textarea_name: String,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            textarea_name: "message[content]".to_string(),
        }
    }
}
