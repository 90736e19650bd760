//! Enter-to-submit control for the message composer.
//!
//! Enter alone submits the enclosing form; Shift+Enter stays a literal
//! newline. The dispatched submit bubbles and is cancelable, so form-level
//! submit handling and validation still apply.

use tracing::debug;

use crate::channel::{IncomingCommand, IncomingKind};
use crate::config::ComposeConfig;
use crate::events::{Key, KeyEvent};
use crate::page::{ElementId, Selector, Tag};

use super::{Hook, HookContext};

/// The composer input hook, mounted on the element wrapping the message
/// form.
#[derive(Debug, Clone, Default)]
pub struct MessageInput {
    config: ComposeConfig,
    textarea: Option<ElementId>,
}

impl MessageInput {
    /// Controller with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller with an explicit configuration.
    pub fn with_config(config: ComposeConfig) -> Self {
        Self {
            config,
            textarea: None,
        }
    }
}

impl Hook for MessageInput {
    fn name(&self) -> &'static str {
        "MessageInput"
    }

    fn mounted(&mut self, ctx: &mut HookContext<'_>) {
        let root = ctx.element();
        let selector = Selector::tag_with_name(Tag::TextArea, self.config.textarea_name.clone());
        let Some(textarea) = ctx.document().query_selector_within(root, &selector) else {
            // no composer textarea: stay inert, register nothing
            debug!(name = %self.config.textarea_name, "composer textarea not found");
            return;
        };
        self.textarea = Some(textarea);
        ctx.listen_element_keys(textarea);
        ctx.listen_command(IncomingKind::FocusMessageInput);
    }

    fn on_key(&mut self, ctx: &mut HookContext<'_>, event: &mut KeyEvent) {
        if event.key() != Key::Enter || event.modifiers().shift {
            return;
        }
        event.prevent_default();
        let Some(textarea) = self.textarea else {
            return;
        };
        let Some(form) = ctx.document().closest(textarea, &Selector::tag(Tag::Form)) else {
            debug!("composer has no enclosing form");
            return;
        };
        ctx.document_mut().dispatch_submit(form);
    }

    fn on_command(&mut self, ctx: &mut HookContext<'_>, command: &IncomingCommand) {
        if matches!(command, IncomingCommand::FocusMessageInput) {
            if let Some(textarea) = self.textarea {
                ctx.document_mut().focus(textarea);
            }
        }
    }
}
