//! Unified error handling for parlor.
//!
//! The hook layer itself never fails: a selector or id lookup that misses is
//! a silent no-op (the target may simply not be rendered yet), and a unit
//! whose expected element is absent at mount stays inert. The error type
//! below covers the embedding API surface only - mounting hooks and wiring
//! the command channel - so it stays deliberately small.

use thiserror::Error;

use crate::page::ElementId;

/// Result alias used throughout the crate.
pub type ParlorResult<T> = Result<T, ParlorError>;

/// Errors surfaced to the embedding layer.
#[derive(Debug, Error)]
pub enum ParlorError {
    /// An operation referenced an element that is not in the document.
    #[error("element {0:?} is not in the document")]
    UnknownElement(ElementId),

    /// A hook is already mounted on the element.
    #[error("a {kind} hook is already mounted on element {element:?}")]
    AlreadyMounted {
        /// The element the mount was attempted on.
        element: ElementId,
        /// Name of the hook already occupying it.
        kind: &'static str,
    },
}
