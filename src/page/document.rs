//! The document: element arena, focus tracking, and journals.

use std::collections::BTreeMap;

use tracing::debug;

use super::element::{Element, ElementId, Tag};
use super::selector::Selector;

/// A recorded attribute mutation, delivered to attribute observers when the
/// runtime flushes the journal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutation {
    /// The element whose attribute changed.
    pub target: ElementId,
    /// Name of the changed attribute (`class` for class-list changes).
    pub attribute: String,
}

impl Mutation {
    /// Whether this mutation touched the class attribute.
    pub fn is_class(&self) -> bool {
        self.attribute == "class"
    }
}

/// A submit dispatched on a form by the behavior layer.
///
/// Submission handling itself (validation, transport) belongs to the form's
/// owner; the document only journals the dispatch, with the flags the
/// dispatch carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitEvent {
    pub form: ElementId,
    pub bubbles: bool,
    pub cancelable: bool,
}

/// The element tree the hooks act upon.
///
/// Mutators silently ignore unknown element ids: an element that has left
/// the document may legitimately still be referenced by in-flight events,
/// and nothing in this layer is allowed to crash the page over it.
#[derive(Debug, Default)]
pub struct Document {
    elements: BTreeMap<ElementId, Element>,
    next_id: u64,
    focused: Option<ElementId>,
    mutations: Vec<Mutation>,
    submits: Vec<SubmitEvent>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached element of the given tag.
    pub fn create_element(&mut self, tag: Tag) -> ElementId {
        self.next_id += 1;
        let id = ElementId(self.next_id);
        self.elements.insert(id, Element::new(tag));
        id
    }

    /// Appends `child` under `parent`. Detaches the child from its previous
    /// parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.elements.contains_key(&parent) || !self.elements.contains_key(&child) {
            return;
        }
        self.detach(child);
        if let Some(el) = self.elements.get_mut(&child) {
            el.parent = Some(parent);
        }
        if let Some(el) = self.elements.get_mut(&parent) {
            el.children.push(child);
        }
    }

    fn detach(&mut self, child: ElementId) {
        let old_parent = self.elements.get(&child).and_then(|el| el.parent);
        if let Some(parent) = old_parent {
            if let Some(el) = self.elements.get_mut(&parent) {
                el.children.retain(|c| *c != child);
            }
        }
        if let Some(el) = self.elements.get_mut(&child) {
            el.parent = None;
        }
    }

    /// The element behind `id`, if it is in the document.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    /// Whether `id` is in the document.
    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    /// Sets the element's markup `id`.
    pub fn set_dom_id(&mut self, id: ElementId, dom_id: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.dom_id = Some(dom_id.into());
        }
    }

    /// Sets an attribute, journaling the change for observers.
    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.attributes.insert(name.to_string(), value.into());
            self.mutations.push(Mutation {
                target: id,
                attribute: name.to_string(),
            });
        }
    }

    /// Removes an attribute, journaling the change if it was present.
    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            if el.attributes.remove(name).is_some() {
                self.mutations.push(Mutation {
                    target: id,
                    attribute: name.to_string(),
                });
            }
        }
    }

    /// Sets the element's `name` attribute.
    pub fn set_name(&mut self, id: ElementId, name: impl Into<String>) {
        self.set_attribute(id, "name", name);
    }

    /// Adds a class. Journals a class mutation only when the list changed.
    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            if !el.has_class(class) {
                el.classes.push(class.to_string());
                self.mutations.push(Mutation {
                    target: id,
                    attribute: "class".to_string(),
                });
            }
        }
    }

    /// Removes a class. Journals a class mutation only when the list changed.
    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(el) = self.elements.get_mut(&id) {
            let before = el.classes.len();
            el.classes.retain(|c| c != class);
            if el.classes.len() != before {
                self.mutations.push(Mutation {
                    target: id,
                    attribute: "class".to_string(),
                });
            }
        }
    }

    /// Marks the element content-editable (or not).
    pub fn set_content_editable(&mut self, id: ElementId, editable: bool) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.content_editable = editable;
        }
    }

    /// Sets the element's scrollable geometry.
    pub fn set_scroll_geometry(&mut self, id: ElementId, scroll_height: u32, client_height: u32) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.scroll_height = scroll_height;
            el.client_height = client_height;
            el.scroll_top = el.scroll_top.min(el.max_scroll_top());
        }
    }

    /// Sets the element's position within its scroll container.
    pub fn set_layout(&mut self, id: ElementId, offset_top: u32, height: u32) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.offset_top = offset_top;
            el.height = height;
        }
    }

    /// Sets the scroll offset, clamped to the reachable range.
    pub fn set_scroll_top(&mut self, id: ElementId, scroll_top: u32) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.scroll_top = scroll_top.min(el.max_scroll_top());
        }
    }

    /// Scrolls the element to its maximum offset (the bottom edge).
    pub fn scroll_to_bottom(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.scroll_top = el.max_scroll_top();
        }
    }

    /// Scrolls the nearest scrollable ancestor so `target` sits centered in
    /// its viewport, clamped to the reachable range.
    pub fn scroll_into_view_centered(&mut self, target: ElementId) {
        let Some(container) = self.scroll_container_of(target) else {
            debug!(?target, "no scrollable ancestor; ignoring scroll request");
            return;
        };
        let (offset_top, height) = match self.elements.get(&target) {
            Some(el) => (el.offset_top as i64, el.height as i64),
            None => return,
        };
        if let Some(el) = self.elements.get_mut(&container) {
            let centered = offset_top + height / 2 - (el.client_height as i64) / 2;
            el.scroll_top = centered.clamp(0, el.max_scroll_top() as i64) as u32;
        }
    }

    fn scroll_container_of(&self, target: ElementId) -> Option<ElementId> {
        let mut current = self.elements.get(&target)?.parent;
        while let Some(id) = current {
            let el = self.elements.get(&id)?;
            if el.is_scrollable() {
                return Some(id);
            }
            current = el.parent;
        }
        None
    }

    /// Moves keyboard focus to the element.
    pub fn focus(&mut self, id: ElementId) {
        if self.elements.contains_key(&id) {
            self.focused = Some(id);
        }
    }

    /// Clears keyboard focus.
    pub fn blur(&mut self) {
        self.focused = None;
    }

    /// The currently focused element, if any.
    pub fn active_element(&self) -> Option<ElementId> {
        self.focused
    }

    /// Whether the focused element expects literal character input.
    pub fn is_typing_context(&self) -> bool {
        self.focused
            .and_then(|id| self.elements.get(&id))
            .is_some_and(Element::is_typing_target)
    }

    /// Finds the element carrying the given markup id.
    pub fn element_by_dom_id(&self, dom_id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, el)| el.dom_id() == Some(dom_id))
            .map(|(id, _)| *id)
    }

    /// First element in the document matching `selector`, in document order.
    pub fn query_selector(&self, selector: &Selector) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|(_, el)| selector.matches(el))
            .map(|(id, _)| *id)
    }

    /// First descendant of `root` matching `selector`, depth-first in child
    /// order. `root` itself is not considered.
    pub fn query_selector_within(&self, root: ElementId, selector: &Selector) -> Option<ElementId> {
        let children = self.elements.get(&root)?.children.clone();
        for child in children {
            if let Some(el) = self.elements.get(&child) {
                if selector.matches(el) {
                    return Some(child);
                }
            }
            if let Some(found) = self.query_selector_within(child, selector) {
                return Some(found);
            }
        }
        None
    }

    /// Nearest ancestor (including `from` itself) matching `selector`.
    pub fn closest(&self, from: ElementId, selector: &Selector) -> Option<ElementId> {
        let mut current = Some(from);
        while let Some(id) = current {
            let el = self.elements.get(&id)?;
            if selector.matches(el) {
                return Some(id);
            }
            current = el.parent;
        }
        None
    }

    /// Dispatches a bubbling, cancelable submit on `form`, journaling it for
    /// the form's owner. Non-form targets are ignored.
    pub fn dispatch_submit(&mut self, form: ElementId) {
        match self.elements.get(&form) {
            Some(el) if el.tag() == Tag::Form => self.submits.push(SubmitEvent {
                form,
                bubbles: true,
                cancelable: true,
            }),
            _ => debug!(?form, "submit dispatched on non-form target; ignoring"),
        }
    }

    /// Removes `root` and its entire subtree, returning every removed id in
    /// document order. Clears focus if the focused element was removed.
    pub fn remove_subtree(&mut self, root: ElementId) -> Vec<ElementId> {
        if !self.elements.contains_key(&root) {
            return Vec::new();
        }
        self.detach(root);
        let mut removed = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.elements.remove(&id) {
                stack.extend(el.children.iter().copied());
                removed.push(id);
            }
        }
        removed.sort();
        if let Some(focused) = self.focused {
            if removed.contains(&focused) {
                self.focused = None;
            }
        }
        removed
    }

    /// Drains the attribute-mutation journal, in mutation order.
    pub fn take_mutations(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.mutations)
    }

    /// Drains the submit journal, in dispatch order.
    pub fn take_submits(&mut self) -> Vec<SubmitEvent> {
        std::mem::take(&mut self.submits)
    }
}
