// Integration tests for hook lifecycle: destruction must leave zero
// residual listeners, observers, or timers.

mod common;

use std::time::Duration;

use common::TestPageBuilder;
use parlor::prelude::*;
use serde_json::json;

#[test]
fn unmounted_shortcut_dispatcher_hears_nothing() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();

    let event = page.press(KeyInput::plain(Key::Char('j')));
    assert!(event.default_prevented());
    page.drain_commands();

    assert!(page.runtime.unmount(page.root));
    assert_eq!(page.runtime.active_subscriptions(), 0);

    let event = page.press(KeyInput::plain(Key::Char('j')));
    assert!(!event.default_prevented(), "destroyed hook must not see keys");
    assert!(page.drain_commands().is_empty());
}

#[test]
fn removing_the_container_destroys_the_scroll_hook() {
    let mut page = TestPageBuilder::new().build();
    page.mount_scroll();
    page.drain_commands();

    page.runtime.remove_element(page.container);
    assert_eq!(page.runtime.active_subscriptions(), 0);

    page.runtime.deliver(IncomingCommand::ScrollToMessage(ScrollTarget {
        message_id: "4".to_string(),
    }));
    page.runtime.dispatch_custom(&CustomEvent::new(
        "scroll-to-message",
        json!({ "to": "#message-4" }),
    ));
    assert!(page.drain_commands().is_empty());
}

#[test]
fn unmounting_cancels_pending_pulse_timers() {
    let mut page = TestPageBuilder::new().build();
    page.mount_scroll();
    page.drain_commands();
    let target = page.messages[5];

    page.runtime.dispatch_custom(&CustomEvent::new(
        "scroll-to-message",
        json!({ "to": "#message-6" }),
    ));
    assert_eq!(page.runtime.pending_timers(), 2, "pulse apply and clear pending");

    assert!(page.runtime.unmount(page.container));
    assert_eq!(page.runtime.pending_timers(), 0);

    page.runtime.advance(Duration::ZERO);
    assert!(
        !page.has_class(target, "animate-pulse"),
        "a cancelled pulse must never apply"
    );
}

#[test]
fn mounting_twice_on_one_element_is_rejected() {
    let mut page = TestPageBuilder::new().build();
    page.mount_scroll();

    let result = page.runtime.mount(page.container, MessageScroll::new());
    assert!(matches!(
        result,
        Err(ParlorError::AlreadyMounted { kind: "MessageScroll", .. })
    ));
}

#[test]
fn mounting_on_a_removed_element_is_rejected() {
    let mut page = TestPageBuilder::new().build();
    page.runtime.remove_element(page.modal);

    let result = page.runtime.mount(page.modal, ModalFocus::new());
    assert!(matches!(result, Err(ParlorError::UnknownElement(_))));
}

#[test]
fn all_hooks_release_everything_on_destruction() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();
    page.mount_scroll();
    page.mount_modal();
    page.mount_compose();

    // shortcuts: 1, scroll: 2, modal: 1, compose: 2
    assert_eq!(page.runtime.active_subscriptions(), 6);

    page.runtime.unmount(page.root);
    page.runtime.unmount(page.container);
    page.runtime.unmount(page.modal);
    page.runtime.unmount(page.composer);

    assert_eq!(page.runtime.active_subscriptions(), 0);
    assert_eq!(page.runtime.pending_timers(), 0);
}

#[test]
fn removed_page_events_produce_no_observable_effect() {
    let mut page = TestPageBuilder::new().build();
    page.mount_modal();
    page.mount_compose();

    page.runtime.dispatch(PageEvent::Removed(page.modal));
    page.runtime.dispatch(PageEvent::Removed(page.composer));
    assert_eq!(page.runtime.active_subscriptions(), 0);

    page.runtime.deliver(IncomingCommand::FocusMessageInput);
    page.runtime.advance(Duration::from_millis(200));
    assert_eq!(page.runtime.document().active_element(), None);
}
