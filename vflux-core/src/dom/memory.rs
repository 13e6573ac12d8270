//! In-Memory Document
//!
//! An arena-backed output tree. Nodes are addressed by [`NodeId`]; slots
//! freed by [`Document::clear_children`] or [`Document::discard`] are reused
//! by later allocations, so repeated full renders do not grow the arena.
//!
//! Every element is created with a validated tag and every property
//! assignment passes the allowlist in [`super::allowlist`]. Handler values
//! are only accepted on `on*` keys, and `on*` keys only accept handlers.

use std::fmt::Write as _;

use tracing::trace;

use super::allowlist::{
    is_custom_element, is_handler_property, is_html_tag, is_known_property, is_valid_property_name,
    is_valid_tag, is_void_tag,
};
use super::Document;
use crate::config::DocumentOptions;
use crate::error::DomError;
use crate::vdom::{create_element, AttributeValue, Attributes, EventHandler, VNode, CHILDREN_KEY};

/// Handle to a node in a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the raw slot index.
    pub fn raw(&self) -> usize {
        self.0
    }
}

#[derive(Debug)]
enum NodeData {
    Text(String),
    Element {
        tag: String,
        properties: Attributes,
        children: Vec<NodeId>,
    },
}

#[derive(Debug)]
struct Slot {
    data: NodeData,
    parent: Option<NodeId>,
}

/// An output tree held entirely in memory.
#[derive(Debug)]
pub struct MemoryDocument {
    options: DocumentOptions,
    slots: Vec<Option<Slot>>,
    free: Vec<usize>,
    body: NodeId,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Create a document with the strict default allowlist.
    pub fn new() -> Self {
        Self::with_options(DocumentOptions::default())
    }

    pub fn with_options(options: DocumentOptions) -> Self {
        let mut doc = Self {
            options,
            slots: Vec::new(),
            free: Vec::new(),
            body: NodeId(0),
        };
        doc.body = doc.alloc(NodeData::Element {
            tag: "body".to_string(),
            properties: Attributes::new(),
            children: Vec::new(),
        });
        doc
    }

    /// The `<body>` element every document starts with.
    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn options(&self) -> &DocumentOptions {
        &self.options
    }

    pub fn is_live(&self, node: NodeId) -> bool {
        self.slot(node).is_ok()
    }

    /// Number of nodes currently allocated, attached or not.
    pub fn live_nodes(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        match &self.slot(node).ok()?.data {
            NodeData::Element { tag, .. } => Some(tag),
            NodeData::Text(_) => None,
        }
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        match &self.slot(node).ok()?.data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    pub fn properties(&self, node: NodeId) -> Option<&Attributes> {
        match &self.slot(node).ok()?.data {
            NodeData::Element { properties, .. } => Some(properties),
            NodeData::Text(_) => None,
        }
    }

    pub fn property(&self, node: NodeId, key: &str) -> Option<&AttributeValue> {
        self.properties(node)?.get(key)
    }

    /// Children of an element; empty for text nodes and stale handles.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        match self.slot(node).map(|slot| &slot.data) {
            Ok(NodeData::Element { children, .. }) => children.as_slice(),
            _ => &[],
        }
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slot(node).ok()?.parent
    }

    /// Look up the handler assigned to `on<event>`.
    pub fn handler(&self, node: NodeId, event: &str) -> Option<EventHandler> {
        self.property(node, &format!("on{event}"))
            .and_then(AttributeValue::as_handler)
            .cloned()
    }

    /// Depth-first search below `root` for an element whose `id` property
    /// equals `id`.
    pub fn find_by_id(&self, root: NodeId, id: &str) -> Option<NodeId> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.property(node, "id").and_then(AttributeValue::as_str) == Some(id) {
                return Some(node);
            }
            stack.extend(self.children(node).iter().rev());
        }
        None
    }

    /// Concatenated text of every text node below `node`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    /// Read a live subtree back into a [`VNode`].
    pub fn snapshot(&self, node: NodeId) -> Option<VNode> {
        // (node, index of the next child to visit, children built so far)
        let mut stack: Vec<(NodeId, usize, Vec<VNode>)> = vec![(node, 0, Vec::new())];

        while let Some((current, next, built)) = stack.last_mut() {
            let children = match &self.slot(*current).ok()?.data {
                NodeData::Text(_) => &[][..],
                NodeData::Element { children, .. } => children.as_slice(),
            };
            if let Some(child) = children.get(*next) {
                *next += 1;
                let child = *child;
                stack.push((child, 0, Vec::new()));
                continue;
            }

            let done = std::mem::take(built);
            let current = *current;
            stack.pop();
            let vnode = match &self.slot(current).ok()?.data {
                NodeData::Text(text) => VNode::text(text.as_str()),
                NodeData::Element { tag, properties, .. } => {
                    create_element(tag.as_str(), Some(properties.clone()), done)
                }
            };
            match stack.last_mut() {
                Some((_, _, parent_built)) => parent_built.push(vnode),
                None => return Some(vnode),
            }
        }
        None
    }

    /// Serialize a subtree as HTML. Handlers and `false` booleans are
    /// omitted; text and attribute values are escaped.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let mut stack = vec![node];
        while let Some(node) = stack.pop() {
            match self.slot(node).map(|slot| &slot.data) {
                Ok(NodeData::Text(text)) => out.push_str(text),
                Ok(NodeData::Element { children, .. }) => stack.extend(children.iter().rev()),
                Err(_) => {}
            }
        }
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let mut stack = vec![HtmlStep::Open(node)];
        while let Some(step) = stack.pop() {
            let node = match step {
                HtmlStep::Open(node) => node,
                HtmlStep::Close(tag) => {
                    let _ = write!(out, "</{tag}>");
                    continue;
                }
            };
            let Ok(slot) = self.slot(node) else {
                continue;
            };
            match &slot.data {
                NodeData::Text(text) => escape_into(text, false, out),
                NodeData::Element {
                    tag,
                    properties,
                    children,
                } => {
                    out.push('<');
                    out.push_str(tag);
                    for (key, value) in properties {
                        match value {
                            AttributeValue::Handler(_) | AttributeValue::Bool(false) => {}
                            AttributeValue::Bool(true) => {
                                out.push(' ');
                                out.push_str(html_attribute_name(key));
                            }
                            other => {
                                let _ = write!(out, " {}=\"", html_attribute_name(key));
                                escape_into(&other.to_string(), true, out);
                                out.push('"');
                            }
                        }
                    }
                    out.push('>');
                    if is_void_tag(tag) && children.is_empty() {
                        continue;
                    }
                    stack.push(HtmlStep::Close(tag.as_str()));
                    stack.extend(children.iter().rev().map(|child| HtmlStep::Open(*child)));
                }
            }
        }
    }

    fn alloc(&mut self, data: NodeData) -> NodeId {
        let slot = Slot { data, parent: None };
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(slot);
                NodeId(index)
            }
            None => {
                self.slots.push(Some(slot));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    fn slot(&self, node: NodeId) -> Result<&Slot, DomError> {
        self.slots
            .get(node.0)
            .and_then(Option::as_ref)
            .ok_or(DomError::StaleNode(node.0))
    }

    fn slot_mut(&mut self, node: NodeId) -> Result<&mut Slot, DomError> {
        self.slots
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::StaleNode(node.0))
    }

    fn children_mut(&mut self, node: NodeId) -> Result<&mut Vec<NodeId>, DomError> {
        match &mut self.slot_mut(node)?.data {
            NodeData::Element { children, .. } => Ok(children),
            NodeData::Text(_) => Err(DomError::NotAContainer(node.0)),
        }
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.slot(id).ok().and_then(|slot| slot.parent);
        }
        false
    }

    fn detach(&mut self, node: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.slot_mut(node)?.parent.take() else {
            return Ok(());
        };
        self.children_mut(parent)?.retain(|child| *child != node);
        Ok(())
    }

    fn free_subtree(&mut self, root: NodeId) {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if let Some(slot) = self.slots.get_mut(node.0).and_then(Option::take) {
                if let NodeData::Element { children, .. } = slot.data {
                    stack.extend(children);
                }
                self.free.push(node.0);
            }
        }
    }
}

enum HtmlStep<'a> {
    Open(NodeId),
    Close(&'a str),
}

fn check_tag(options: &DocumentOptions, tag: &str) -> Result<(), DomError> {
    let known = !options.strict_tags
        || is_html_tag(tag)
        || is_custom_element(tag)
        || options.extra_tags.iter().any(|extra| extra.eq_ignore_ascii_case(tag));

    if is_valid_tag(tag) && known {
        Ok(())
    } else {
        Err(DomError::UnsupportedElementType {
            tag: tag.to_string(),
        })
    }
}

fn check_property(options: &DocumentOptions, tag: &str, key: &str, value: &AttributeValue) -> Result<(), DomError> {
    let allowed = key != CHILDREN_KEY
        && is_valid_property_name(key)
        && value.is_handler() == is_handler_property(key)
        && (!options.strict_properties
            || is_known_property(key)
            || options.extra_properties.iter().any(|extra| extra == key));

    if allowed {
        Ok(())
    } else {
        Err(DomError::DisallowedProperty {
            tag: tag.to_string(),
            key: key.to_string(),
        })
    }
}

fn html_attribute_name(key: &str) -> &str {
    match key {
        "className" => "class",
        "htmlFor" => "for",
        other => other,
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
}

impl Document for MemoryDocument {
    type Node = NodeId;

    fn create_text_node(&mut self, text: &str) -> NodeId {
        let node = self.alloc(NodeData::Text(text.to_string()));
        trace!(node = node.0, "created text node");
        node
    }

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        check_tag(&self.options, tag)?;
        let node = self.alloc(NodeData::Element {
            tag: tag.to_string(),
            properties: Attributes::new(),
            children: Vec::new(),
        });
        trace!(node = node.0, %tag, "created element");
        Ok(node)
    }

    fn set_property(&mut self, node: &NodeId, key: &str, value: &AttributeValue) -> Result<(), DomError> {
        let options = &self.options;
        let slot = self
            .slots
            .get_mut(node.0)
            .and_then(Option::as_mut)
            .ok_or(DomError::StaleNode(node.0))?;

        match &mut slot.data {
            NodeData::Element { tag, properties, .. } => {
                check_property(options, tag, key, value)?;
                properties.insert(key.to_string(), value.clone());
                Ok(())
            }
            NodeData::Text(_) => Err(DomError::DisallowedProperty {
                tag: "#text".to_string(),
                key: key.to_string(),
            }),
        }
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let (parent, child) = (*parent, *child);
        self.slot(child)?;
        self.children_mut(parent)?;
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest {
                parent: parent.0,
                child: child.0,
            });
        }

        self.detach(child)?;
        self.children_mut(parent)?.push(child);
        self.slot_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn clear_children(&mut self, parent: &NodeId) -> Result<(), DomError> {
        let removed = std::mem::take(self.children_mut(*parent)?);
        for child in removed {
            self.free_subtree(child);
        }
        Ok(())
    }

    fn discard(&mut self, node: NodeId) {
        if node == self.body {
            return;
        }
        if self.detach(node).is_ok() {
            self.free_subtree(node);
        }
    }
}
