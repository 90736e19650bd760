//! Behavior hooks and their plumbing.
//!
//! A hook is a bundle of listeners and local state attached to one
//! element's lifecycle: subscriptions are taken out at mount, and every
//! registration, observer, and timer a hook owns is released when its
//! element leaves the document - no listener outlives its owning instance.
//!
//! # Architecture
//!
//! ```text
//! PageEvent -> Runtime -> ListenerTable lookup -> Hook entry point
//!     -> page mutation and/or OutgoingCommand
//! ```
//!
//! # Modules
//!
//! - [`shortcuts`] - global keyboard shortcut dispatch
//! - [`scroll`] - message list scrolling and highlight coordination
//! - [`modal`] - focus management for server-toggled modals
//! - [`compose`] - enter-to-submit control for the message composer
//! - [`keymap`] - the shortcut tables
//! - [`registry`] - hook instances and subscription tables
//! - [`context`] - per-dispatch context handed to hook entry points

pub mod compose;
pub mod context;
pub mod keymap;
pub mod modal;
pub mod registry;
pub mod scroll;
pub mod shortcuts;

pub use compose::MessageInput;
pub use context::HookContext;
pub use keymap::ShortcutTable;
pub use modal::ModalFocus;
pub use registry::{HookId, HookRegistry, ListenerHandle, ListenerTable};
pub use scroll::MessageScroll;
pub use shortcuts::KeyboardShortcuts;

use crate::channel::IncomingCommand;
use crate::events::{CustomEvent, KeyEvent};
use crate::page::Mutation;
use crate::schedule::TimerAction;

/// One mounted behavior unit.
///
/// Entry points default to no-ops; each unit overrides only the ones its
/// subscriptions can deliver. `Send` because the runtime that owns the
/// mounted hooks is handed to the async driver task.
pub trait Hook: Send {
    /// Short name used in logs and duplicate-mount errors.
    fn name(&self) -> &'static str;

    /// Called once when the element enters the document. Subscriptions and
    /// initial page adjustments happen here.
    fn mounted(&mut self, ctx: &mut HookContext<'_>);

    /// Called after the server re-renders the element's subtree.
    fn updated(&mut self, _ctx: &mut HookContext<'_>) {}

    /// Called when the element leaves the document. The runtime has already
    /// released the hook's subscriptions and timers by the time this runs.
    fn destroyed(&mut self, _ctx: &mut HookContext<'_>) {}

    /// A key press delivered through one of the hook's key subscriptions.
    fn on_key(&mut self, _ctx: &mut HookContext<'_>, _event: &mut KeyEvent) {}

    /// An attribute mutation on an element the hook observes.
    fn on_mutation(&mut self, _ctx: &mut HookContext<'_>, _mutation: &Mutation) {}

    /// An incoming command the hook subscribed to.
    fn on_command(&mut self, _ctx: &mut HookContext<'_>, _command: &IncomingCommand) {}

    /// A page-local custom event the hook subscribed to.
    fn on_custom(&mut self, _ctx: &mut HookContext<'_>, _event: &CustomEvent) {}

    /// A timer the hook scheduled came due.
    fn on_timer(&mut self, _ctx: &mut HookContext<'_>, _action: TimerAction) {}
}
