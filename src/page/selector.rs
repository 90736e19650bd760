//! Minimal selector matching for the behavior layer.
//!
//! Hooks address elements by id, by tag, and by `name` attribute; only
//! those selector shapes are supported: `#id`, `tag`, `[name="value"]`,
//! and `tag[name="value"]`. Anything else fails to parse, and an
//! unparseable selector is treated like any other miss.

use super::element::{Element, Tag};

/// A parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    pub(crate) id: Option<String>,
    pub(crate) tag: Option<Tag>,
    pub(crate) name: Option<String>,
}

impl Selector {
    /// Selects by markup id, as `#id` does.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            tag: None,
            name: None,
        }
    }

    /// Selects by tag alone.
    pub fn tag(tag: Tag) -> Self {
        Self {
            id: None,
            tag: Some(tag),
            name: None,
        }
    }

    /// Selects by tag and `name` attribute, as `tag[name="value"]` does.
    pub fn tag_with_name(tag: Tag, name: impl Into<String>) -> Self {
        Self {
            id: None,
            tag: Some(tag),
            name: Some(name.into()),
        }
    }

    /// Parses a selector string. Returns `None` for unsupported shapes.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Some(id) = input.strip_prefix('#') {
            if id.is_empty() || id.contains(|c: char| c.is_whitespace() || c == '[') {
                return None;
            }
            return Some(Self::id(id));
        }

        let (tag_part, attr_part) = match input.find('[') {
            Some(at) => (&input[..at], Some(&input[at..])),
            None => (input, None),
        };

        let tag = if tag_part.is_empty() {
            None
        } else {
            Some(Tag::parse(tag_part)?)
        };

        let name = match attr_part {
            None => None,
            Some(attr) => {
                let inner = attr.strip_prefix('[')?.strip_suffix(']')?;
                let value = inner.strip_prefix("name=")?;
                let value = value
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
                    .unwrap_or(value);
                if value.is_empty() {
                    return None;
                }
                Some(value.to_string())
            }
        };

        if tag.is_none() && name.is_none() {
            return None;
        }

        Some(Self { id: None, tag, name })
    }

    pub(crate) fn matches(&self, element: &Element) -> bool {
        if let Some(id) = &self.id {
            if element.dom_id() != Some(id.as_str()) {
                return false;
            }
        }
        if let Some(tag) = self.tag {
            if element.tag() != tag {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if element.attribute("name") != Some(name.as_str()) {
                return false;
            }
        }
        true
    }
}
