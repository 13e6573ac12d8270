//! Virtual DOM
//!
//! Declarative description of the UI. Application code builds a [`VNode`]
//! tree from the current state with [`create_element`] (or the
//! [`ElementBuilder`]) and hands it to [`render`](crate::render::render).
//!
//! # Children
//!
//! Children are passed as an ordered list of [`Child`] values. A child is
//! either a single node (strings become text nodes) or a list of nodes,
//! which is spliced in place. Splicing goes exactly one level deep.
//!
//! # Reserved key
//!
//! `children` is reserved for nested nodes and never appears in an
//! element's attribute map.
//!
//! # Depth
//!
//! `VNode` trees are dropped and materialized recursively, so their depth is
//! bounded by the thread's stack. [`MemoryDocument`](crate::dom::MemoryDocument)
//! walks its own trees iteratively.

mod attribute;
mod node;

pub use attribute::{attributes, AttributeValue, Attributes, EventHandler};
pub use node::{create_element, Child, ElementBuilder, ElementNode, VNode, CHILDREN_KEY};
