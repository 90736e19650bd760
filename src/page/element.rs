//! Elements of the page model.

use std::collections::BTreeMap;

/// Handle to an element in a [`Document`](super::Document).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub(crate) u64);

/// Element kind - the subset of markup tags the behavior layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Form,
    Input,
    TextArea,
    Button,
    Span,
}

impl Tag {
    /// Lowercase tag name as written in selectors.
    pub fn name(&self) -> &'static str {
        match self {
            Tag::Div => "div",
            Tag::Form => "form",
            Tag::Input => "input",
            Tag::TextArea => "textarea",
            Tag::Button => "button",
            Tag::Span => "span",
        }
    }

    pub(crate) fn parse(name: &str) -> Option<Tag> {
        match name {
            "div" => Some(Tag::Div),
            "form" => Some(Tag::Form),
            "input" => Some(Tag::Input),
            "textarea" => Some(Tag::TextArea),
            "button" => Some(Tag::Button),
            "span" => Some(Tag::Span),
            _ => None,
        }
    }
}

/// One element of the page model.
///
/// Geometry fields (`scroll_*`, `offset_top`, `height`) are set by the
/// embedding layer when rendered markup is applied; the behavior layer only
/// reads and scrolls them.
#[derive(Debug, Clone)]
pub struct Element {
    pub(crate) tag: Tag,
    pub(crate) dom_id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: BTreeMap<String, String>,
    pub(crate) content_editable: bool,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    /// Scroll offset from the top of the content, in pixels.
    pub(crate) scroll_top: u32,
    /// Total content height.
    pub(crate) scroll_height: u32,
    /// Visible viewport height.
    pub(crate) client_height: u32,
    /// Offset of the element's top edge within its scroll container.
    pub(crate) offset_top: u32,
    /// Rendered height of the element itself.
    pub(crate) height: u32,
}

impl Element {
    pub(crate) fn new(tag: Tag) -> Self {
        Self {
            tag,
            dom_id: None,
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            content_editable: false,
            parent: None,
            children: Vec::new(),
            scroll_top: 0,
            scroll_height: 0,
            client_height: 0,
            offset_top: 0,
            height: 0,
        }
    }

    /// The element's tag.
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The element's markup `id`, if any.
    pub fn dom_id(&self) -> Option<&str> {
        self.dom_id.as_deref()
    }

    /// Whether the class list contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// The element's classes, in application order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Value of the named attribute, if present.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Whether the element is marked content-editable.
    pub fn is_content_editable(&self) -> bool {
        self.content_editable
    }

    /// Whether the element accepts literal character input when focused.
    pub fn is_typing_target(&self) -> bool {
        matches!(self.tag, Tag::Input | Tag::TextArea) || self.content_editable
    }

    /// The element's parent, if attached.
    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    /// Child elements, in document order.
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Current scroll offset.
    pub fn scroll_top(&self) -> u32 {
        self.scroll_top
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll_top(&self) -> u32 {
        self.scroll_height.saturating_sub(self.client_height)
    }

    /// Whether the element has overflowing content it can scroll.
    pub fn is_scrollable(&self) -> bool {
        self.client_height > 0 && self.scroll_height > self.client_height
    }
}
