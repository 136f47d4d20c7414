//! Block/inline reclassification of an element's children.
//!
//! Doxygen descriptions mix free text with block elements, for example a
//! `<para>` holding a `<simplesect kind="note">` followed by more prose.
//! AsciiDoc needs those blocks separated by blank lines, so when an element
//! has any block-level child, every run of inline children between blocks is
//! moved into a synthetic `<para>` before rendering.

use crate::config::is_block_level;
use crate::xml::{get_text, NodeId, Tree};

/// Tag of the synthetic paragraph wrapper.
pub const WRAPPER_TAG: &str = "para";

/// Check whether an element's children form a block-formatting context.
pub fn is_block_context(tree: &Tree, element: NodeId) -> bool {
    tree.children(element)
        .iter()
        .any(|&child| tree.tag_name(child).is_some_and(is_block_level))
}

/// Regroup the children of `element` so block children only have block siblings.
///
/// Inline runs are wrapped in a `<para>` inserted before the next block
/// child. A run with no visible text is not inserted there; it stays open
/// and picks up the following inline children instead. A run still open at
/// the end is appended unless it holds nothing but whitespace. Adjacent text
/// runs are merged afterwards.
///
/// Elements that are not a block context are left untouched.
pub fn normalize(tree: &mut Tree, element: NodeId) -> NodeId {
    if !is_block_context(tree, element) {
        return element;
    }

    let children = tree.children(element).to_vec();
    let mut regrouped = Vec::with_capacity(children.len());
    let mut pending: Vec<NodeId> = Vec::new();
    let mut wrappers = Vec::new();

    for child in children {
        let block = tree.tag_name(child).is_some_and(is_block_level);
        if !block {
            pending.push(child);
            continue;
        }
        if has_visible_text(tree, &pending) {
            let wrapper = wrap(tree, std::mem::take(&mut pending));
            wrappers.push(wrapper);
            regrouped.push(wrapper);
        }
        regrouped.push(child);
    }

    if has_visible_text(tree, &pending) || pending.iter().any(|&node| tree.is_element(node)) {
        let wrapper = wrap(tree, pending);
        wrappers.push(wrapper);
        regrouped.push(wrapper);
    }

    tree.replace_children(element, regrouped);
    for wrapper in wrappers {
        tree.merge_adjacent_text(wrapper);
    }
    tree.merge_adjacent_text(element);

    tracing::trace!(element = ?element, "normalized block context");
    element
}

fn wrap(tree: &mut Tree, nodes: Vec<NodeId>) -> NodeId {
    let wrapper = tree.create_element(WRAPPER_TAG);
    tree.replace_children(wrapper, nodes);
    wrapper
}

fn has_visible_text(tree: &Tree, nodes: &[NodeId]) -> bool {
    nodes.iter().any(|&node| !get_text(tree, node).is_empty())
}
