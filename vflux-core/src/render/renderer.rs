//! Renderer
//!
//! Full-replace rendering into a container node.

use tracing::debug;

use super::materialize::materialize;
use crate::dom::Document;
use crate::error::DomError;
use crate::vdom::VNode;

/// Replace every child of `container` with a freshly materialized `node`.
///
/// The new subtree is built detached before the container is touched, so a
/// failing materialization leaves the container exactly as it was. Nothing
/// outside the container's child list is modified.
pub fn render<D: Document>(doc: &mut D, node: &VNode, container: &D::Node) -> Result<(), DomError> {
    let tree = materialize(doc, node)?;

    if let Err(err) = doc.clear_children(container) {
        doc.discard(tree);
        return Err(err);
    }
    if let Err(err) = doc.append_child(container, &tree) {
        doc.discard(tree);
        return Err(err);
    }

    debug!(
        root = node.tag().unwrap_or("#text"),
        nodes = node.node_count(),
        "rendered tree"
    );
    Ok(())
}
