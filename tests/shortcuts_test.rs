// Integration tests for the keyboard shortcut dispatcher

mod common;

use common::TestPageBuilder;
use parlor::prelude::*;

const BARE_KEYS: [char; 9] = ['/', '?', 's', 'j', 'k', 'r', 'l', 'p', 'n'];

#[test]
fn bare_shortcut_outside_typing_context_emits_and_suppresses_default() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();

    for key in BARE_KEYS {
        let event = page.press(KeyInput::plain(Key::Char(key)));
        assert!(
            event.default_prevented(),
            "bare shortcut '{}' should suppress default",
            key
        );
        assert_eq!(
            page.drain_commands(),
            vec![OutgoingCommand::KeyboardShortcut(ShortcutCommand::bare(
                key.to_string()
            ))],
            "bare shortcut '{}' should emit exactly one command",
            key
        );
    }
}

#[test]
fn bare_shortcuts_are_ignored_while_typing() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();
    let textarea = page.textarea.expect("fixture builds a textarea");
    page.runtime.document_mut().focus(textarea);

    for key in BARE_KEYS {
        let event = page.press(KeyInput::plain(Key::Char(key)));
        assert!(
            !event.default_prevented(),
            "typing '{}' must not suppress default",
            key
        );
    }
    assert!(
        page.drain_commands().is_empty(),
        "no commands while the user is typing"
    );
}

#[test]
fn content_editable_counts_as_typing_context() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();
    page.runtime.document_mut().focus(page.editable);

    let event = page.press(KeyInput::plain(Key::Char('s')));
    assert!(!event.default_prevented());
    assert!(page.drain_commands().is_empty());
}

#[test]
fn navigation_combos_win_regardless_of_typing_context() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();
    let textarea = page.textarea.expect("fixture builds a textarea");
    page.runtime.document_mut().focus(textarea);

    let event = page.press(KeyInput::ctrl(Key::Char('j')));
    assert!(event.default_prevented(), "Ctrl+J should suppress default");
    assert_eq!(
        page.drain_commands(),
        vec![OutgoingCommand::KeyboardShortcut(ShortcutCommand::with_ctrl("j"))]
    );

    let event = page.press(KeyInput::meta(Key::Char('k')));
    assert!(event.default_prevented(), "Cmd+K should suppress default");
    assert_eq!(
        page.drain_commands(),
        vec![OutgoingCommand::KeyboardShortcut(ShortcutCommand::with_ctrl("k"))]
    );
}

#[test]
fn escape_is_always_forwarded_and_never_suppressed() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();

    // non-typing context
    let event = page.press(KeyInput::plain(Key::Escape));
    assert!(!event.default_prevented(), "Escape must keep its default");
    assert_eq!(
        page.drain_commands(),
        vec![OutgoingCommand::KeyboardShortcut(ShortcutCommand::bare("Escape"))]
    );

    // typing context
    let textarea = page.textarea.expect("fixture builds a textarea");
    page.runtime.document_mut().focus(textarea);
    let event = page.press(KeyInput::plain(Key::Escape));
    assert!(!event.default_prevented(), "Escape must keep its default");
    assert_eq!(
        page.drain_commands(),
        vec![OutgoingCommand::KeyboardShortcut(ShortcutCommand::bare("Escape"))]
    );
}

#[test]
fn unmatched_keys_are_silently_ignored() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();

    for input in [
        KeyInput::plain(Key::Char('x')),
        KeyInput::plain(Key::Enter),
        KeyInput::plain(Key::Tab),
        KeyInput::ctrl(Key::Char('q')),
    ] {
        let event = page.press(input);
        assert!(!event.default_prevented());
    }
    assert!(page.drain_commands().is_empty());
}

#[test]
fn search_only_variant_privileges_only_ctrl_k() {
    let mut page = TestPageBuilder::new().build();
    page.runtime
        .mount(
            page.root,
            KeyboardShortcuts::with_config(ShortcutConfig {
                variant: ShortcutVariant::SearchOnly,
            }),
        )
        .expect("mount shortcuts");
    let textarea = page.textarea.expect("fixture builds a textarea");
    page.runtime.document_mut().focus(textarea);

    // Ctrl+J is no longer privileged, so typing context swallows it
    let event = page.press(KeyInput::ctrl(Key::Char('j')));
    assert!(!event.default_prevented());
    assert!(page.drain_commands().is_empty());

    // Ctrl+K still opens search from anywhere
    let event = page.press(KeyInput::ctrl(Key::Char('k')));
    assert!(event.default_prevented());
    assert_eq!(
        page.drain_commands(),
        vec![OutgoingCommand::KeyboardShortcut(ShortcutCommand::with_ctrl("k"))]
    );
}

#[test]
fn input_element_focus_counts_as_typing_context() {
    let mut page = TestPageBuilder::new().build();
    page.mount_shortcuts();
    page.runtime.document_mut().focus(page.modal_input);

    let event = page.press(KeyInput::plain(Key::Char('/')));
    assert!(!event.default_prevented());
    assert!(page.drain_commands().is_empty());
}
