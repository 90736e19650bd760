//! Focus management for server-toggled modals.
//!
//! The server opens and closes the modal by swapping a class on its
//! element; this hook observes that class attribute and, on a closed-to-open
//! transition, moves keyboard focus to the nested input once the open
//! transition has had time to settle. Focusing immediately can target an
//! element that is not yet focusable in some engines, hence the delay.

use tracing::debug;

use crate::config::ModalConfig;
use crate::page::{Mutation, Selector, Tag};
use crate::schedule::{TimerAction, TimerHandle};

use super::{Hook, HookContext};

/// The modal focus hook, mounted on the modal container.
#[derive(Debug, Clone, Default)]
pub struct ModalFocus {
    config: ModalConfig,
    was_open: bool,
    pending: Option<TimerHandle>,
}

impl ModalFocus {
    /// Manager with the default configuration (search modal).
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager with an explicit configuration.
    pub fn with_config(config: ModalConfig) -> Self {
        Self {
            config,
            was_open: false,
            pending: None,
        }
    }

    fn is_open(&self, ctx: &HookContext<'_>) -> bool {
        ctx.document()
            .element(ctx.element())
            .is_some_and(|el| el.has_class(&self.config.open_class))
    }
}

impl Hook for ModalFocus {
    fn name(&self) -> &'static str {
        "ModalFocus"
    }

    fn mounted(&mut self, ctx: &mut HookContext<'_>) {
        let element = ctx.element();
        ctx.observe_classes(element);
        self.was_open = self.is_open(ctx);
    }

    fn on_mutation(&mut self, ctx: &mut HookContext<'_>, _mutation: &Mutation) {
        let open = self.is_open(ctx);
        if open && !self.was_open {
            // a new open transition must not stack delayed focus calls
            if let Some(pending) = self.pending.take() {
                ctx.cancel_timer(pending);
            }
            self.pending = Some(ctx.schedule(self.config.settle_delay, TimerAction::FocusSettled));
        }
        self.was_open = open;
    }

    fn on_timer(&mut self, ctx: &mut HookContext<'_>, action: TimerAction) {
        if action != TimerAction::FocusSettled {
            return;
        }
        self.pending = None;
        let selector = Selector::tag_with_name(Tag::Input, self.config.input_name.clone());
        let root = ctx.element();
        match ctx.document().query_selector_within(root, &selector) {
            Some(input) => ctx.document_mut().focus(input),
            None => debug!(input = %self.config.input_name, "modal input not found; skipping focus"),
        }
    }

    fn destroyed(&mut self, _ctx: &mut HookContext<'_>) {
        // the runtime already disconnected the observer and dropped the timer
        self.pending = None;
    }
}
