//! Global keyboard shortcut dispatch.
//!
//! One window-scope key listener, filtered through the typing-context
//! guard: privileged navigation combos always win, Escape is always
//! forwarded without suppressing default, and the bare shortcut table only
//! applies when the user is not typing. The guard precedence is what keeps
//! shortcuts from hijacking normal text entry while navigation and Escape
//! keep working everywhere.

use tracing::debug;

use crate::channel::{OutgoingCommand, ShortcutCommand};
use crate::config::ShortcutConfig;
use crate::events::{Key, KeyEvent};

use super::keymap::{ShortcutMatch, ShortcutTable};
use super::{Hook, HookContext};

/// The shortcut dispatcher hook, mounted on the window-scope element.
#[derive(Debug, Clone, Default)]
pub struct KeyboardShortcuts {
    table: ShortcutTable,
}

impl KeyboardShortcuts {
    /// Dispatcher with the default (navigation) table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher for a configured variant.
    pub fn with_config(config: ShortcutConfig) -> Self {
        Self {
            table: ShortcutTable::for_variant(config.variant),
        }
    }

    /// Dispatcher with an explicit table.
    pub fn with_table(table: ShortcutTable) -> Self {
        Self { table }
    }
}

impl Hook for KeyboardShortcuts {
    fn name(&self) -> &'static str {
        "KeyboardShortcuts"
    }

    fn mounted(&mut self, ctx: &mut HookContext<'_>) {
        ctx.listen_global_keys();
    }

    fn on_key(&mut self, ctx: &mut HookContext<'_>, event: &mut KeyEvent) {
        let input = event.input();
        let typing = ctx.document().is_typing_context();

        match self.table.resolve(input, typing) {
            Some(ShortcutMatch::Privileged(key)) => {
                event.prevent_default();
                debug!(key = %key, "privileged shortcut");
                ctx.push_command(OutgoingCommand::KeyboardShortcut(
                    ShortcutCommand::with_ctrl(key.to_string()),
                ));
            }
            Some(ShortcutMatch::Bare(key)) => {
                event.prevent_default();
                debug!(key = %key, "bare shortcut");
                ctx.push_command(OutgoingCommand::KeyboardShortcut(ShortcutCommand::bare(
                    key.to_string(),
                )));
            }
            // Escape is always forwarded and never suppressed, typing or not.
            None if input.key == Key::Escape => {
                ctx.push_command(OutgoingCommand::KeyboardShortcut(ShortcutCommand::bare(
                    "Escape",
                )));
            }
            None => {}
        }
    }
}
