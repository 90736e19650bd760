//! Input events delivered to the behavior runtime.
//!
//! The page's input layer reports key presses and custom events; the driver
//! wraps them in [`PageEvent`] values and feeds them to the runtime in
//! delivery order. Within one behavior unit, events are processed strictly
//! in that order.

use serde_json::Value;

use crate::page::ElementId;

/// A key identity as reported by the page's input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character key (lowercase unless Shift produced a symbol).
    Char(char),
    Enter,
    Escape,
    Tab,
    Backspace,
    ArrowUp,
    ArrowDown,
}

/// Modifier keys held during a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        meta: false,
        shift: false,
        alt: false,
    };

    /// Whether the platform command modifier (Ctrl or Cmd) is held.
    pub fn command_held(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A raw key press: key identity plus held modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyInput {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyInput {
    /// Creates a key input with the given key and modifiers.
    pub const fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key press with no modifiers.
    pub const fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// A key press with Control held.
    pub const fn ctrl(key: Key) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: true,
                meta: false,
                shift: false,
                alt: false,
            },
        )
    }

    /// A key press with Cmd (macOS) held.
    pub const fn meta(key: Key) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: false,
                meta: true,
                shift: false,
                alt: false,
            },
        )
    }

    /// A key press with Shift held.
    pub const fn shift(key: Key) -> Self {
        Self::new(
            key,
            Modifiers {
                ctrl: false,
                meta: false,
                shift: true,
                alt: false,
            },
        )
    }
}

/// A key press as seen by hook handlers.
///
/// Tracks whether any handler suppressed the default page action, so the
/// embedding layer knows whether to let the press through (e.g. insert the
/// character, move browser focus).
#[derive(Debug)]
pub struct KeyEvent {
    input: KeyInput,
    default_prevented: bool,
}

impl KeyEvent {
    /// Wraps a raw key press for dispatch.
    pub fn new(input: KeyInput) -> Self {
        Self {
            input,
            default_prevented: false,
        }
    }

    /// The raw key press.
    pub fn input(&self) -> KeyInput {
        self.input
    }

    /// The key identity.
    pub fn key(&self) -> Key {
        self.input.key
    }

    /// The held modifiers.
    pub fn modifiers(&self) -> Modifiers {
        self.input.modifiers
    }

    /// Suppresses the default page action for this press.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether any handler suppressed the default action.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// A page-local custom event, dispatched by same-page code (never by the
/// server).
#[derive(Debug, Clone)]
pub struct CustomEvent {
    /// Event name, e.g. `scroll-to-message`.
    pub name: String,
    /// Open-shaped detail payload.
    pub detail: Value,
}

impl CustomEvent {
    /// Creates a custom event with the given name and detail payload.
    pub fn new(name: impl Into<String>, detail: Value) -> Self {
        Self {
            name: name.into(),
            detail,
        }
    }
}

/// Events the embedding layer feeds to the runtime.
#[derive(Debug, Clone)]
pub enum PageEvent {
    /// A key was pressed somewhere on the page.
    Key(KeyInput),
    /// Same-page code dispatched a custom event.
    Custom(CustomEvent),
    /// The server re-rendered the subtree rooted at the element.
    Updated(ElementId),
    /// The element left the document.
    Removed(ElementId),
}
