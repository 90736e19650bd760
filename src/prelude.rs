//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```ignore
//! use parlor::prelude::*;
//! ```
//!
//! This will import:
//! - The runtime and page model (Runtime, Document, ElementId, Tag, Selector)
//! - Input event types (PageEvent, Key, KeyInput, Modifiers, CustomEvent)
//! - The behavior hooks and their configs
//! - The command channel types

// Runtime and page model
pub use crate::page::{Document, Element, ElementId, Selector, SubmitEvent, Tag};
pub use crate::runtime::Runtime;

// Input events
pub use crate::events::{CustomEvent, Key, KeyEvent, KeyInput, Modifiers, PageEvent};

// Behavior hooks
pub use crate::hooks::{
    Hook, HookContext, HookId, KeyboardShortcuts, MessageInput, MessageScroll, ModalFocus,
    ShortcutTable,
};

// Configuration
pub use crate::config::{
    ComposeConfig, ModalConfig, ScrollConfig, ShortcutConfig, ShortcutVariant,
};

// Command channel
pub use crate::channel::{
    HighlightAcknowledgement, IncomingCommand, OutgoingCommand, ScrollTarget, ShortcutCommand,
    SocketClient, SocketConfig, SocketError, Transport,
};

// Errors and collaborators
pub use crate::error::{ParlorError, ParlorResult};
pub use crate::progress::{NoopProgress, ProgressIndicator};
