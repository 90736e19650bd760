//! Shortcut tables for the keyboard dispatcher.
//!
//! Two tables ship, differing only in which combinations are privileged
//! over typing context; everything else about the dispatcher is shared.

use std::collections::HashSet;

use crate::config::ShortcutVariant;
use crate::events::{Key, KeyInput};

/// The set of bare shortcut keys, active outside typing context.
const BARE_KEYS: [char; 9] = ['/', '?', 's', 'j', 'k', 'r', 'l', 'p', 'n'];

/// Outcome of a table lookup for one key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ShortcutMatch {
    /// Privileged combination: emit with the command modifier, suppress
    /// default.
    Privileged(char),
    /// Bare shortcut key: emit bare, suppress default.
    Bare(char),
}

/// Table of privileged combinations and bare shortcut keys.
///
/// Privileged combinations (a letter with Ctrl or Cmd held) dispatch
/// regardless of typing context; bare keys only apply outside of it. Escape
/// is not in either table - the dispatcher forwards it unconditionally.
#[derive(Debug, Clone)]
pub struct ShortcutTable {
    privileged: HashSet<char>,
    bare: HashSet<char>,
}

impl ShortcutTable {
    /// Room-navigation table: Ctrl/Cmd+J (next room) and Ctrl/Cmd+K
    /// (previous room) are privileged.
    pub fn navigation() -> Self {
        Self {
            privileged: HashSet::from(['j', 'k']),
            bare: HashSet::from(BARE_KEYS),
        }
    }

    /// Search table: only Ctrl/Cmd+K is privileged, opening search.
    pub fn search_only() -> Self {
        Self {
            privileged: HashSet::from(['k']),
            bare: HashSet::from(BARE_KEYS),
        }
    }

    /// The table for a configured variant.
    pub fn for_variant(variant: ShortcutVariant) -> Self {
        match variant {
            ShortcutVariant::Navigation => Self::navigation(),
            ShortcutVariant::SearchOnly => Self::search_only(),
        }
    }

    /// Resolves one key press against the table.
    ///
    /// Privileged combinations win unconditionally; bare keys are gated by
    /// `typing`. Modifiers are not consulted for bare keys: the key identity
    /// already reflects what the press produced.
    pub(crate) fn resolve(&self, input: KeyInput, typing: bool) -> Option<ShortcutMatch> {
        if let Key::Char(c) = input.key {
            if input.modifiers.command_held() && self.privileged.contains(&c) {
                return Some(ShortcutMatch::Privileged(c));
            }
            if !typing && self.bare.contains(&c) {
                return Some(ShortcutMatch::Bare(c));
            }
        }
        None
    }
}

impl Default for ShortcutTable {
    fn default() -> Self {
        Self::navigation()
    }
}
