//! Materializer
//!
//! Translates a virtual tree into host nodes. The output subtree is
//! structurally isomorphic to the input: same tags, same properties in map
//! order, same children in order, text preserved byte for byte.

use tracing::trace;

use crate::dom::Document;
use crate::error::DomError;
use crate::vdom::{ElementNode, VNode, CHILDREN_KEY};

/// Build a detached host subtree for `node`.
///
/// On failure the partially built subtree is handed back to the document
/// through [`Document::discard`] and the host error is returned unchanged.
///
/// Recursion depth equals the depth of `node`, the same bound that dropping
/// a [`VNode`] tree already has.
pub fn materialize<D: Document>(doc: &mut D, node: &VNode) -> Result<D::Node, DomError> {
    match node {
        VNode::Text(text) => Ok(doc.create_text_node(text)),
        VNode::Element(element) => {
            let out = doc.create_element(element.tag())?;
            trace!(tag = element.tag(), "materializing element");

            if let Err(err) = populate(doc, &out, element) {
                doc.discard(out);
                return Err(err);
            }
            Ok(out)
        }
    }
}

fn populate<D: Document>(doc: &mut D, out: &D::Node, element: &ElementNode) -> Result<(), DomError> {
    for (key, value) in element.attributes() {
        if key == CHILDREN_KEY {
            continue;
        }
        doc.set_property(out, key, value)?;
    }

    for child in element.children() {
        let child_out = materialize(doc, child)?;
        if let Err(err) = doc.append_child(out, &child_out) {
            doc.discard(child_out);
            return Err(err);
        }
    }
    Ok(())
}
