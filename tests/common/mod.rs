//! Common test utilities for integration tests.
//!
//! Provides a reusable page fixture resembling what the server renders:
//! a scrollable message container, a search modal, the composer form, and
//! a content-editable element, plus helpers for pressing keys and draining
//! emitted commands.
//!
//! # Example
//!
//! ```ignore
//! use common::TestPageBuilder;
//!
//! let mut page = TestPageBuilder::new().with_messages(10).build();
//! page.mount_shortcuts();
//! let event = page.press(KeyInput::plain(Key::Char('j')));
//! assert!(event.default_prevented());
//! ```

#![allow(dead_code)]

use parlor::prelude::*;
use tokio::sync::mpsc;

/// Enables tracing output for test runs when `RUST_LOG` is set.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Height of one rendered message row, in pixels.
pub const MESSAGE_HEIGHT: u32 = 40;
/// Vertical distance between message tops.
pub const MESSAGE_STRIDE: u32 = 50;
/// Viewport height of the message container.
pub const VIEWPORT_HEIGHT: u32 = 200;

/// A built chat page with its runtime and the outgoing command stream.
pub struct TestPage {
    pub runtime: Runtime,
    pub commands: mpsc::UnboundedReceiver<OutgoingCommand>,
    /// Window-scope element the shortcut dispatcher mounts on.
    pub root: ElementId,
    /// The scrollable message container.
    pub container: ElementId,
    /// Message elements, ids `message-1` through `message-<n>`.
    pub messages: Vec<ElementId>,
    /// The search modal and its query input.
    pub modal: ElementId,
    pub modal_input: ElementId,
    /// The composer: wrapper div, form, and textarea (if built).
    pub composer: ElementId,
    pub form: ElementId,
    pub textarea: Option<ElementId>,
    /// A content-editable element for typing-context tests.
    pub editable: ElementId,
}

impl TestPage {
    /// Mounts the shortcut dispatcher with the default (navigation) table.
    pub fn mount_shortcuts(&mut self) -> HookId {
        self.runtime
            .mount(self.root, KeyboardShortcuts::new())
            .expect("mount shortcuts")
    }

    /// Mounts the scroll coordinator with the default configuration.
    pub fn mount_scroll(&mut self) -> HookId {
        self.runtime
            .mount(self.container, MessageScroll::new())
            .expect("mount scroll")
    }

    /// Mounts the scroll coordinator with an explicit configuration.
    pub fn mount_scroll_with(&mut self, config: ScrollConfig) -> HookId {
        self.runtime
            .mount(self.container, MessageScroll::with_config(config))
            .expect("mount scroll")
    }

    /// Mounts the modal focus manager.
    pub fn mount_modal(&mut self) -> HookId {
        self.runtime
            .mount(self.modal, ModalFocus::new())
            .expect("mount modal")
    }

    /// Mounts the composer controller.
    pub fn mount_compose(&mut self) -> HookId {
        self.runtime
            .mount(self.composer, MessageInput::new())
            .expect("mount compose")
    }

    /// Dispatches a key press and returns the resulting event.
    pub fn press(&mut self, input: KeyInput) -> KeyEvent {
        self.runtime.dispatch_key(input)
    }

    /// Drains every command emitted so far, in emission order.
    pub fn drain_commands(&mut self) -> Vec<OutgoingCommand> {
        let mut commands = Vec::new();
        while let Ok(command) = self.commands.try_recv() {
            commands.push(command);
        }
        commands
    }

    /// Current scroll offset of the message container.
    pub fn scroll_top(&self) -> u32 {
        self.runtime
            .document()
            .element(self.container)
            .expect("container in document")
            .scroll_top()
    }

    /// Largest reachable scroll offset of the message container.
    pub fn max_scroll_top(&self) -> u32 {
        self.runtime
            .document()
            .element(self.container)
            .expect("container in document")
            .max_scroll_top()
    }

    /// Whether the element currently carries the class.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.runtime
            .document()
            .element(element)
            .is_some_and(|el| el.has_class(class))
    }
}

/// Builder for [`TestPage`] fixtures.
#[derive(Debug, Clone)]
pub struct TestPageBuilder {
    message_count: usize,
    highlight_marker: bool,
    with_textarea: bool,
}

impl Default for TestPageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPageBuilder {
    pub fn new() -> Self {
        Self {
            message_count: 10,
            highlight_marker: false,
            with_textarea: true,
        }
    }

    /// Number of rendered messages (default 10).
    pub fn with_messages(mut self, count: usize) -> Self {
        self.message_count = count;
        self
    }

    /// Marks the container with the pending-highlight attribute.
    pub fn with_highlight_marker(mut self) -> Self {
        self.highlight_marker = true;
        self
    }

    /// Builds the composer without its textarea (inert-controller case).
    pub fn without_textarea(mut self) -> Self {
        self.with_textarea = false;
        self
    }

    pub fn build(self) -> TestPage {
        init_tracing();

        let mut doc = Document::new();

        let root = doc.create_element(Tag::Div);

        // scrollable message container with addressable message rows
        let container = doc.create_element(Tag::Div);
        doc.append_child(root, container);
        let content_height = (self.message_count as u32) * MESSAGE_STRIDE;
        doc.set_scroll_geometry(container, content_height, VIEWPORT_HEIGHT);
        if self.highlight_marker {
            doc.set_attribute(container, "data-highlight", "1");
        }

        let mut messages = Vec::with_capacity(self.message_count);
        for index in 0..self.message_count {
            let message = doc.create_element(Tag::Div);
            doc.set_dom_id(message, format!("message-{}", index + 1));
            doc.set_layout(message, (index as u32) * MESSAGE_STRIDE, MESSAGE_HEIGHT);
            doc.append_child(container, message);
            messages.push(message);
        }

        // search modal with its query input
        let modal = doc.create_element(Tag::Div);
        doc.append_child(root, modal);
        let modal_input = doc.create_element(Tag::Input);
        doc.set_name(modal_input, "query");
        doc.append_child(modal, modal_input);

        // composer: wrapper > form > textarea
        let composer = doc.create_element(Tag::Div);
        doc.append_child(root, composer);
        let form = doc.create_element(Tag::Form);
        doc.append_child(composer, form);
        let textarea = self.with_textarea.then(|| {
            let textarea = doc.create_element(Tag::TextArea);
            doc.set_name(textarea, "message[content]");
            doc.append_child(form, textarea);
            textarea
        });

        let editable = doc.create_element(Tag::Div);
        doc.set_content_editable(editable, true);
        doc.append_child(root, editable);

        let (runtime, commands) = Runtime::new(doc);

        TestPage {
            runtime,
            commands,
            root,
            container,
            messages,
            modal,
            modal_input,
            composer,
            form,
            textarea,
            editable,
        }
    }
}
