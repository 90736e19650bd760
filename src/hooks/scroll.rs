//! Message list scrolling and highlight coordination.
//!
//! The container follows the newest message (bottom scroll) on mount and on
//! every re-render, unless the server has marked a highlight: the highlight
//! attribute means "keep a specific message visible, not the latest one",
//! and the coordinator must not fight that intent. Highlight scrolls are
//! acknowledged upstream so the server clears the marker before the next
//! render, which is what prevents a scroll-on-every-render loop.

use serde_json::Value;
use tracing::debug;

use crate::channel::{
    HighlightAcknowledgement, IncomingCommand, IncomingKind, OutgoingCommand,
};
use crate::config::ScrollConfig;
use crate::events::CustomEvent;
use crate::page::{ElementId, Selector};
use crate::schedule::TimerAction;

use super::{Hook, HookContext};

/// Name of the page-local scroll request event.
pub const SCROLL_EVENT: &str = "scroll-to-message";

/// The scroll/highlight coordinator hook, mounted on the scrollable message
/// container.
#[derive(Debug, Clone, Default)]
pub struct MessageScroll {
    config: ScrollConfig,
}

impl MessageScroll {
    /// Coordinator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Coordinator with an explicit configuration.
    pub fn with_config(config: ScrollConfig) -> Self {
        Self { config }
    }

    fn highlight_pending(&self, ctx: &HookContext<'_>) -> bool {
        ctx.document()
            .element(ctx.element())
            .is_some_and(|el| el.attribute(&self.config.highlight_attr).is_some())
    }

    fn follow_bottom(&self, ctx: &mut HookContext<'_>) {
        if self.highlight_pending(ctx) {
            return;
        }
        let container = ctx.element();
        ctx.document_mut().scroll_to_bottom(container);
    }

    fn scroll_to_message(&mut self, ctx: &mut HookContext<'_>, message_id: &str) {
        let dom_id = format!("{}{}", self.config.message_id_prefix, message_id);
        let Some(target) = ctx.document().element_by_dom_id(&dom_id) else {
            // not yet rendered; the server will not repeat an unreachable target
            debug!(%dom_id, "scroll target not found");
            return;
        };
        ctx.document_mut().scroll_into_view_centered(target);
        ctx.push_command(OutgoingCommand::HighlightMessage(HighlightAcknowledgement {
            message_id: message_id.to_string(),
        }));
        if self.config.pulse_on_highlight {
            self.schedule_pulse(ctx, target);
        }
    }

    fn schedule_pulse(&mut self, ctx: &mut HookContext<'_>, target: ElementId) {
        let apply_at = self.config.pulse_delay;
        ctx.schedule(apply_at, TimerAction::PulseApply(target));
        ctx.schedule(
            apply_at + self.config.pulse_duration,
            TimerAction::PulseClear(target),
        );
    }
}

impl Hook for MessageScroll {
    fn name(&self) -> &'static str {
        "MessageScroll"
    }

    fn mounted(&mut self, ctx: &mut HookContext<'_>) {
        ctx.listen_command(IncomingKind::ScrollToMessage);
        ctx.listen_custom(SCROLL_EVENT);
        self.follow_bottom(ctx);
    }

    fn updated(&mut self, ctx: &mut HookContext<'_>) {
        self.follow_bottom(ctx);
    }

    fn on_command(&mut self, ctx: &mut HookContext<'_>, command: &IncomingCommand) {
        if let IncomingCommand::ScrollToMessage(target) = command {
            self.scroll_to_message(ctx, &target.message_id);
        }
    }

    fn on_custom(&mut self, ctx: &mut HookContext<'_>, event: &CustomEvent) {
        let Some(raw) = event.detail.get("to").and_then(Value::as_str) else {
            debug!("scroll event without a `to` selector");
            return;
        };
        let Some(selector) = Selector::parse(raw) else {
            debug!(selector = raw, "unsupported scroll selector");
            return;
        };
        let Some(target) = ctx.document().query_selector(&selector) else {
            return;
        };
        ctx.document_mut().scroll_into_view_centered(target);
        // local navigation: pulse, but no acknowledgement upstream
        self.schedule_pulse(ctx, target);
    }

    fn on_timer(&mut self, ctx: &mut HookContext<'_>, action: TimerAction) {
        match action {
            TimerAction::PulseApply(target) => {
                ctx.document_mut().add_class(target, &self.config.pulse_class);
            }
            TimerAction::PulseClear(target) => {
                ctx.document_mut().remove_class(target, &self.config.pulse_class);
            }
            TimerAction::FocusSettled => {}
        }
    }
}
