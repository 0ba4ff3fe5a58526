//! Overlay Display
//!
//! A small retained element tree standing in for the host page: text
//! bearing elements with styles and titles, parent/child attachment,
//! lookup by a stable id, and click listeners.

mod document;
mod element;

pub use document::{dispatch_click, ClickListener, Document, SharedDocument};
pub use element::{Element, ElementId, ElementKind};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DisplayError {
    #[error("element {0} does not exist")]
    UnknownElement(ElementId),

    #[error("cannot append {child} under {parent}: it would contain itself")]
    HierarchyCycle { parent: ElementId, child: ElementId },
}
