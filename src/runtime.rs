//! The synchronous behavior runtime.
//!
//! Owns the document, the mounted hooks, their subscription tables, and the
//! timer queue, and dispatches every event to completion before the next
//! one starts: callbacks never interleave, so mutating the shared page
//! needs no locking. The async driver (or a test) decides when events
//! arrive and when the clock advances; the runtime only decides who sees
//! them and in what order.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::channel::{IncomingCommand, OutgoingCommand};
use crate::error::{ParlorError, ParlorResult};
use crate::events::{CustomEvent, KeyEvent, KeyInput, PageEvent};
use crate::hooks::{Hook, HookContext, HookId, HookRegistry, ListenerTable};
use crate::page::{Document, ElementId};
use crate::progress::{NoopProgress, ProgressIndicator};
use crate::schedule::Scheduler;

/// The behavior runtime for one page.
pub struct Runtime {
    document: Document,
    hooks: HookRegistry,
    listeners: ListenerTable,
    scheduler: Scheduler,
    outgoing: mpsc::UnboundedSender<OutgoingCommand>,
    progress: Box<dyn ProgressIndicator>,
}

impl Runtime {
    /// Creates a runtime over `document`, returning the receiving end of
    /// the outgoing command stream for the channel collaborator to drain.
    pub fn new(document: Document) -> (Self, mpsc::UnboundedReceiver<OutgoingCommand>) {
        let (outgoing, outgoing_rx) = mpsc::unbounded_channel();
        (
            Self {
                document,
                hooks: HookRegistry::default(),
                listeners: ListenerTable::default(),
                scheduler: Scheduler::new(),
                outgoing,
                progress: Box::new(NoopProgress),
            },
            outgoing_rx,
        )
    }

    /// Replaces the progress-indicator collaborator.
    pub fn set_progress_indicator(&mut self, indicator: Box<dyn ProgressIndicator>) {
        self.progress = indicator;
    }

    /// The page document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access to the page document. Call [`Runtime::flush`]
    /// afterwards so attribute observers see the changes.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Number of live subscriptions across all hooks.
    pub fn active_subscriptions(&self) -> usize {
        self.listeners.len()
    }

    /// Number of pending timers across all hooks.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    /// Mounts `hook` on `element` and runs its `mounted` callback.
    pub fn mount<H: Hook + 'static>(
        &mut self,
        element: ElementId,
        hook: H,
    ) -> ParlorResult<HookId> {
        if !self.document.contains(element) {
            return Err(ParlorError::UnknownElement(element));
        }
        let id = self.hooks.insert(element, Box::new(hook))?;
        self.with_hook(id, |hook, ctx| hook.mounted(ctx));
        self.flush();
        Ok(id)
    }

    /// Unmounts and destroys the hook on `element`, if one is mounted,
    /// leaving the element in place. Returns whether a hook was destroyed.
    pub fn unmount(&mut self, element: ElementId) -> bool {
        match self.hooks.id_for_element(element) {
            Some(id) => {
                self.destroy_hook(id);
                true
            }
            None => false,
        }
    }

    /// Removes `element` and its subtree from the document, destroying
    /// every hook mounted within it.
    pub fn remove_element(&mut self, element: ElementId) {
        let removed = self.document.remove_subtree(element);
        for el in removed {
            if let Some(id) = self.hooks.id_for_element(el) {
                self.destroy_hook(id);
            }
        }
        self.flush();
    }

    /// Dispatches one page event.
    pub fn dispatch(&mut self, event: PageEvent) {
        match event {
            PageEvent::Key(input) => {
                self.dispatch_key(input);
            }
            PageEvent::Custom(event) => self.dispatch_custom(&event),
            PageEvent::Updated(element) => self.notify_updated(element),
            PageEvent::Removed(element) => self.remove_element(element),
        }
    }

    /// Dispatches a key press to element-scoped listeners on the focused
    /// element, then to window-scope listeners. Returns the event so the
    /// embedding layer can honor its final default-suppression state.
    pub fn dispatch_key(&mut self, input: KeyInput) -> KeyEvent {
        let mut event = KeyEvent::new(input);
        let targets = self.listeners.key_targets(self.document.active_element());
        for id in targets {
            self.with_hook(id, |hook, ctx| hook.on_key(ctx, &mut event));
        }
        self.flush();
        event
    }

    /// Dispatches a page-local custom event to its subscribers.
    pub fn dispatch_custom(&mut self, event: &CustomEvent) {
        let targets = self.listeners.custom_targets(&event.name);
        for id in targets {
            self.with_hook(id, |hook, ctx| hook.on_custom(ctx, event));
        }
        self.flush();
    }

    /// Delivers an incoming command from the server.
    pub fn deliver(&mut self, command: IncomingCommand) {
        match &command {
            IncomingCommand::PageLoadingStart => self.progress.loading_started(),
            IncomingCommand::PageLoadingStop => self.progress.loading_stopped(),
            _ => {}
        }
        let targets = self.listeners.command_targets(command.kind());
        for id in targets {
            self.with_hook(id, |hook, ctx| hook.on_command(ctx, &command));
        }
        self.flush();
    }

    /// Notifies the hook on `element` that the server re-rendered its
    /// subtree.
    pub fn notify_updated(&mut self, element: ElementId) {
        if let Some(id) = self.hooks.id_for_element(element) {
            self.with_hook(id, |hook, ctx| hook.updated(ctx));
        }
        self.flush();
    }

    /// Advances the virtual clock, firing due timers in order.
    pub fn advance(&mut self, dt: Duration) {
        let due = self.scheduler.advance(dt);
        for (owner, action) in due {
            self.with_hook(owner, |hook, ctx| hook.on_timer(ctx, action));
        }
        self.flush();
    }

    /// Delivers journaled attribute mutations to their observers, repeating
    /// until a pass produces no further mutations (run-to-completion).
    pub fn flush(&mut self) {
        loop {
            let mutations = self.document.take_mutations();
            if mutations.is_empty() {
                break;
            }
            for mutation in mutations {
                if !mutation.is_class() {
                    continue;
                }
                let targets = self.listeners.class_observers(mutation.target);
                for id in targets {
                    self.with_hook(id, |hook, ctx| hook.on_mutation(ctx, &mutation));
                }
            }
        }
    }

    fn destroy_hook(&mut self, id: HookId) {
        // release everything the hook owns before its destroyed() runs, so
        // a stale callback can never fire after the element is gone
        self.listeners.release_owned(id);
        self.scheduler.cancel_owned(id);
        if let Some(mut mounted) = self.hooks.remove(id) {
            debug!(hook = mounted.hook.name(), "destroying hook");
            let mut ctx = HookContext {
                id,
                element: mounted.element,
                document: &mut self.document,
                scheduler: &mut self.scheduler,
                listeners: &mut self.listeners,
                outgoing: &self.outgoing,
            };
            mounted.hook.destroyed(&mut ctx);
        }
    }

    fn with_hook<F>(&mut self, id: HookId, f: F)
    where
        F: FnOnce(&mut Box<dyn Hook>, &mut HookContext<'_>),
    {
        let Some(mounted) = self.hooks.get_mut(id) else {
            return;
        };
        let mut ctx = HookContext {
            id,
            element: mounted.element,
            document: &mut self.document,
            scheduler: &mut self.scheduler,
            listeners: &mut self.listeners,
            outgoing: &self.outgoing,
        };
        f(&mut mounted.hook, &mut ctx);
    }
}
