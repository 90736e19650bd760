//! The page model: the shared mutable substrate the hooks act upon.
//!
//! The server renders markup; the embedding layer mirrors the parts the
//! behavior layer cares about into a [`Document`] - an element arena with
//! focus tracking, scroll geometry, an attribute-mutation journal for
//! observers, and a submit journal for the form collaborator.

pub mod document;
pub mod element;
pub mod selector;

pub use document::{Document, Mutation, SubmitEvent};
pub use element::{Element, ElementId, Tag};
pub use selector::Selector;
