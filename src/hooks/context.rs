//! Per-dispatch context handed to hook entry points.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::warn;

use crate::channel::{IncomingKind, OutgoingCommand};
use crate::page::{Document, ElementId};
use crate::schedule::{Scheduler, TimerAction, TimerHandle};

use super::registry::{HookId, ListenerHandle, ListenerKind, ListenerTable};

/// Everything a hook may touch while handling one event.
///
/// Holds split borrows of the runtime's parts so a hook can mutate the
/// page, manage its subscriptions and timers, and emit commands upstream,
/// while the runtime keeps ownership of the hook set itself. Callbacks run
/// to completion before the next event is dispatched, so no locking is
/// involved anywhere here.
pub struct HookContext<'a> {
    pub(crate) id: HookId,
    pub(crate) element: ElementId,
    pub(crate) document: &'a mut Document,
    pub(crate) scheduler: &'a mut Scheduler,
    pub(crate) listeners: &'a mut ListenerTable,
    pub(crate) outgoing: &'a mpsc::UnboundedSender<OutgoingCommand>,
}

impl HookContext<'_> {
    /// The element this hook is mounted on.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// The page document.
    pub fn document(&self) -> &Document {
        self.document
    }

    /// The page document, mutably. Attribute changes made here are
    /// journaled and delivered to observers when the runtime flushes.
    pub fn document_mut(&mut self) -> &mut Document {
        self.document
    }

    /// Sends a command upstream. Delivery failures are the channel
    /// collaborator's concern: they are logged and dropped, never surfaced
    /// to the hook.
    pub fn push_command(&self, command: OutgoingCommand) {
        if self.outgoing.send(command).is_err() {
            warn!("upstream command channel closed; dropping command");
        }
    }

    /// Subscribes to key presses anywhere on the page.
    pub fn listen_global_keys(&mut self) -> ListenerHandle {
        self.listeners.subscribe(self.id, ListenerKind::GlobalKeys)
    }

    /// Subscribes to key presses delivered while `element` is focused.
    pub fn listen_element_keys(&mut self, element: ElementId) -> ListenerHandle {
        self.listeners
            .subscribe(self.id, ListenerKind::ElementKeys(element))
    }

    /// Observes class-attribute mutations on `element`.
    pub fn observe_classes(&mut self, element: ElementId) -> ListenerHandle {
        self.listeners
            .subscribe(self.id, ListenerKind::ClassAttribute(element))
    }

    /// Subscribes to page-local custom events with the given name.
    pub fn listen_custom(&mut self, name: &str) -> ListenerHandle {
        self.listeners
            .subscribe(self.id, ListenerKind::Custom(name.to_string()))
    }

    /// Subscribes to incoming commands of the given kind.
    pub fn listen_command(&mut self, kind: IncomingKind) -> ListenerHandle {
        self.listeners.subscribe(self.id, ListenerKind::Command(kind))
    }

    /// Cancels one subscription. Returns `false` if the handle was already
    /// released.
    pub fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.unsubscribe(handle)
    }

    /// Schedules a timer owned by this hook.
    pub fn schedule(&mut self, delay: Duration, action: TimerAction) -> TimerHandle {
        self.scheduler.schedule(self.id, delay, action)
    }

    /// Cancels a pending timer.
    pub fn cancel_timer(&mut self, handle: TimerHandle) -> bool {
        self.scheduler.cancel(handle)
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }
}
