//! Virtual Node Tree
//!
//! A [`VNode`] is either raw text or an element with a tag, an ordered
//! attribute map and an ordered list of children. Nodes are plain values:
//! they are never mutated after construction and hold no parent links, so a
//! fresh tree is simply built for every render.

use tracing::warn;

use super::attribute::{AttributeValue, Attributes};

/// Attribute key reserved for nested nodes.
pub const CHILDREN_KEY: &str = "children";

/// An immutable description of a desired output node.
#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Text(String),
    Element(ElementNode),
}

/// A tagged element with attributes and children.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    tag: String,
    attributes: Attributes,
    children: Vec<VNode>,
}

impl ElementNode {
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Attributes in insertion order. Never contains [`CHILDREN_KEY`].
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    pub fn children(&self) -> &[VNode] {
        &self.children
    }
}

/// One argument in a children list.
///
/// A `Many` is spliced into its parent's children, which flattens the list
/// by exactly one level.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    One(VNode),
    Many(Vec<VNode>),
}

impl From<VNode> for Child {
    fn from(node: VNode) -> Self {
        Self::One(node)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::One(VNode::text(text))
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::One(VNode::Text(text))
    }
}

impl From<Vec<VNode>> for Child {
    fn from(nodes: Vec<VNode>) -> Self {
        Self::Many(nodes)
    }
}

impl From<&str> for VNode {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for VNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<ElementNode> for VNode {
    fn from(element: ElementNode) -> Self {
        Self::Element(element)
    }
}

/// Build a `Vec<Child>` from heterogeneous arguments.
///
/// ```rust,ignore
/// let node = create_element("p", None, children!["count: ", count.to_string(), badge]);
/// ```
#[macro_export]
macro_rules! children {
    ($($child:expr),* $(,)?) => {
        ::std::vec![$($crate::vdom::Child::from($child)),*]
    };
}

/// Create an element node.
///
/// The resulting attribute map is the given attributes with the reserved
/// `children` key removed; the children arguments always take that slot.
/// Tag names are not validated here, the host document does that when the
/// tree is materialized.
pub fn create_element<I, C>(tag: impl Into<String>, attributes: Option<Attributes>, children: I) -> VNode
where
    I: IntoIterator<Item = C>,
    C: Into<Child>,
{
    let tag = tag.into();
    let mut attributes = attributes.unwrap_or_default();
    if attributes.shift_remove(CHILDREN_KEY).is_some() {
        warn!(%tag, "dropping reserved `children` attribute");
    }

    let mut flat = Vec::new();
    for child in children {
        match child.into() {
            Child::One(node) => flat.push(node),
            Child::Many(nodes) => flat.extend(nodes),
        }
    }

    VNode::Element(ElementNode {
        tag,
        attributes,
        children: flat,
    })
}

impl VNode {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Start building an element with the given tag.
    pub fn element(tag: impl Into<String>) -> ElementBuilder {
        ElementBuilder::new(tag)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element(_) => None,
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Self::Element(element) => Some(element),
            Self::Text(_) => None,
        }
    }

    /// Tag of an element node, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        self.as_element().map(ElementNode::tag)
    }

    /// Children of an element node; text nodes have none.
    pub fn children(&self) -> &[VNode] {
        match self {
            Self::Element(element) => &element.children,
            Self::Text(_) => &[],
        }
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children());
        }
        count
    }
}

/// Incremental builder for element nodes.
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: String,
    attributes: Attributes,
    children: Vec<Child>,
}

impl ElementBuilder {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute. Setting the same key again replaces the value but
    /// keeps its original position.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, C>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> VNode {
        create_element(self.tag, Some(self.attributes), self.children)
    }
}

impl From<ElementBuilder> for VNode {
    fn from(builder: ElementBuilder) -> Self {
        builder.build()
    }
}

impl From<ElementBuilder> for Child {
    fn from(builder: ElementBuilder) -> Self {
        Self::One(builder.build())
    }
}
