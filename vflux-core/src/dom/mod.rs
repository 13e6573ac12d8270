//! Host Document Boundary
//!
//! The materializer and renderer never talk to a concrete output tree. They
//! drive a [`Document`], which exposes the handful of primitives a host must
//! provide: create a text node, create an element, set a property, append a
//! child and clear a container.
//!
//! [`MemoryDocument`] is the bundled host. It keeps nodes in an arena,
//! validates tags and properties against an allowlist, and can be inspected
//! (or serialized to HTML) after a render.

mod allowlist;
mod memory;

pub use allowlist::{is_custom_element, is_html_tag, is_known_property, is_void_tag};
pub use memory::{MemoryDocument, NodeId};

use crate::error::DomError;
use crate::vdom::AttributeValue;

/// Capabilities the framework requires from an output platform.
pub trait Document {
    /// Handle to a node owned by the document.
    type Node: Clone;

    /// Create a detached text node holding exactly `text`.
    fn create_text_node(&mut self, text: &str) -> Self::Node;

    /// Create a detached element. Fails with
    /// [`DomError::UnsupportedElementType`] for tags the host cannot build.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, DomError>;

    /// Assign a property on an element. Assigning the same key twice keeps
    /// the last value.
    fn set_property(&mut self, node: &Self::Node, key: &str, value: &AttributeValue) -> Result<(), DomError>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), DomError>;

    /// Remove every child of `parent`.
    fn clear_children(&mut self, parent: &Self::Node) -> Result<(), DomError>;

    /// Release a detached subtree that will never be attached, e.g. after a
    /// failed materialization. Hosts with their own garbage collection can
    /// ignore this.
    fn discard(&mut self, _node: Self::Node) {}
}
