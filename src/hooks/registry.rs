//! Hook instances and subscription tables.
//!
//! Subscriptions follow an explicit subscribe/unsubscribe pair: every
//! subscribe returns a [`ListenerHandle`], and destroying a hook releases
//! every registration that hook owns. "Mounted/destroyed" is therefore
//! "subscribe at mount, and the owner's disposal cancels the handles".

use std::collections::HashMap;

use crate::channel::IncomingKind;
use crate::error::{ParlorError, ParlorResult};
use crate::page::ElementId;

use super::Hook;

/// Identifier of a mounted hook instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HookId(pub(crate) u64);

/// Cancellation handle for one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerHandle(u64);

/// What a subscription listens for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ListenerKind {
    /// Key presses anywhere on the page (window scope).
    GlobalKeys,
    /// Key presses while the given element is focused.
    ElementKeys(ElementId),
    /// Class-attribute mutations on the given element.
    ClassAttribute(ElementId),
    /// Page-local custom events with the given name.
    Custom(String),
    /// Incoming commands of the given kind.
    Command(IncomingKind),
}

#[derive(Debug, Clone)]
struct Registration {
    handle: ListenerHandle,
    owner: HookId,
    kind: ListenerKind,
}

/// Subscription table shared by every mounted hook.
#[derive(Debug, Default)]
pub struct ListenerTable {
    next_handle: u64,
    registrations: Vec<Registration>,
}

impl ListenerTable {
    pub(crate) fn subscribe(&mut self, owner: HookId, kind: ListenerKind) -> ListenerHandle {
        self.next_handle += 1;
        let handle = ListenerHandle(self.next_handle);
        self.registrations.push(Registration {
            handle,
            owner,
            kind,
        });
        handle
    }

    pub(crate) fn unsubscribe(&mut self, handle: ListenerHandle) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|reg| reg.handle != handle);
        self.registrations.len() != before
    }

    pub(crate) fn release_owned(&mut self, owner: HookId) {
        self.registrations.retain(|reg| reg.owner != owner);
    }

    /// Number of live registrations across all hooks.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether no registrations are live.
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Hooks a key press reaches: listeners scoped to the focused element
    /// first (target phase), then window-scope listeners (bubble phase),
    /// each in registration order.
    pub(crate) fn key_targets(&self, focused: Option<ElementId>) -> Vec<HookId> {
        let mut targets = Vec::new();
        if let Some(focused) = focused {
            targets.extend(self.registrations.iter().filter_map(|reg| match reg.kind {
                ListenerKind::ElementKeys(el) if el == focused => Some(reg.owner),
                _ => None,
            }));
        }
        targets.extend(self.registrations.iter().filter_map(|reg| {
            matches!(reg.kind, ListenerKind::GlobalKeys).then_some(reg.owner)
        }));
        targets
    }

    /// Hooks observing class mutations on `target`, in registration order.
    pub(crate) fn class_observers(&self, target: ElementId) -> Vec<HookId> {
        self.registrations
            .iter()
            .filter_map(|reg| match reg.kind {
                ListenerKind::ClassAttribute(el) if el == target => Some(reg.owner),
                _ => None,
            })
            .collect()
    }

    /// Hooks listening for the named custom event, in registration order.
    pub(crate) fn custom_targets(&self, name: &str) -> Vec<HookId> {
        self.registrations
            .iter()
            .filter_map(|reg| match &reg.kind {
                ListenerKind::Custom(event) if event == name => Some(reg.owner),
                _ => None,
            })
            .collect()
    }

    /// Hooks subscribed to the given incoming-command kind, in registration
    /// order.
    pub(crate) fn command_targets(&self, kind: IncomingKind) -> Vec<HookId> {
        self.registrations
            .iter()
            .filter_map(|reg| match reg.kind {
                ListenerKind::Command(command) if command == kind => Some(reg.owner),
                _ => None,
            })
            .collect()
    }
}

pub(crate) struct MountedHook {
    pub(crate) element: ElementId,
    pub(crate) hook: Box<dyn Hook>,
}

/// Mounted hook instances, at most one per element.
#[derive(Default)]
pub struct HookRegistry {
    next_id: u64,
    hooks: HashMap<HookId, MountedHook>,
    by_element: HashMap<ElementId, HookId>,
}

impl HookRegistry {
    pub(crate) fn insert(
        &mut self,
        element: ElementId,
        hook: Box<dyn Hook>,
    ) -> ParlorResult<HookId> {
        if let Some(existing) = self.by_element.get(&element) {
            let kind = self
                .hooks
                .get(existing)
                .map(|mounted| mounted.hook.name())
                .unwrap_or("unknown");
            return Err(ParlorError::AlreadyMounted { element, kind });
        }
        self.next_id += 1;
        let id = HookId(self.next_id);
        self.hooks.insert(id, MountedHook { element, hook });
        self.by_element.insert(element, id);
        Ok(id)
    }

    pub(crate) fn remove(&mut self, id: HookId) -> Option<MountedHook> {
        let mounted = self.hooks.remove(&id)?;
        self.by_element.remove(&mounted.element);
        Some(mounted)
    }

    pub(crate) fn get_mut(&mut self, id: HookId) -> Option<&mut MountedHook> {
        self.hooks.get_mut(&id)
    }

    /// The hook mounted on `element`, if any.
    pub fn id_for_element(&self, element: ElementId) -> Option<HookId> {
        self.by_element.get(&element).copied()
    }

    /// Number of mounted hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hooks are mounted.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}
