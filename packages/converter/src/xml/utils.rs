//! XML utility functions for navigating and extracting data from the tree.

use super::tree::{NodeId, Tree};
use crate::error::{ConverterError, Result};

/// Get the tag name of a node, or `""` for text runs.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::xml::{get_tag_name, Tree};
///
/// let (tree, root) = Tree::parse("<compounddef><title>text</title></compounddef>").unwrap();
/// assert_eq!(get_tag_name(&tree, root), "compounddef");
/// ```
pub fn get_tag_name(tree: &Tree, node: NodeId) -> &str {
    tree.tag_name(node).unwrap_or_default()
}

/// Find the first child element with the given tag name.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::xml::{find_child, Tree};
///
/// let (tree, root) = Tree::parse("<memberdef><type/><name>foo</name></memberdef>").unwrap();
///
/// assert!(find_child(&tree, root, "name").is_some());
/// assert!(find_child(&tree, root, "argsstring").is_none());
/// ```
pub fn find_child(tree: &Tree, node: NodeId, tag: &str) -> Option<NodeId> {
    tree.children(node)
        .iter()
        .copied()
        .find(|&child| has_tag(tree, child, tag))
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::xml::{find_children, Tree};
///
/// let (tree, root) = Tree::parse("<memberdef><param/><name/><param/></memberdef>").unwrap();
/// assert_eq!(find_children(&tree, root, "param").len(), 2);
/// ```
pub fn find_children(tree: &Tree, node: NodeId, tag: &str) -> Vec<NodeId> {
    tree.children(node)
        .iter()
        .copied()
        .filter(|&child| has_tag(tree, child, tag))
        .collect()
}

/// Find child elements with the given tag name and `kind` attribute.
pub fn find_children_of_kind(tree: &Tree, node: NodeId, tag: &str, kind: &str) -> Vec<NodeId> {
    find_children(tree, node, tag)
        .into_iter()
        .filter(|&child| tree.attribute(child, "kind") == Some(kind))
        .collect()
}

/// Find all descendant elements with the given tag name, in document order.
pub fn find_descendants(tree: &Tree, node: NodeId, tag: &str) -> Vec<NodeId> {
    tree.descendants(node)
        .into_iter()
        .filter(|&child| has_tag(tree, child, tag))
        .collect()
}

/// Get the text content of a node.
///
/// Every text run beneath the node is trimmed on its own and the non-empty
/// pieces are concatenated, so whitespace between runs disappears.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::xml::{get_text, Tree};
///
/// let (tree, root) = Tree::parse("<para> Hello <bold> world </bold></para>").unwrap();
/// assert_eq!(get_text(&tree, root), "Helloworld");
/// ```
pub fn get_text(tree: &Tree, node: NodeId) -> String {
    if let Some(text) = tree.text(node) {
        return text.trim().to_string();
    }
    tree.descendants(node)
        .into_iter()
        .filter_map(|child| tree.text(child))
        .map(str::trim)
        .collect()
}

/// Get the text content of the first child with the given tag name.
///
/// Returns `None` when no such child exists, which callers use to tell an
/// absent field from an empty one.
pub fn child_text(tree: &Tree, node: NodeId, tag: &str) -> Option<String> {
    find_child(tree, node, tag).map(|child| get_text(tree, child))
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(tree: &'a Tree, node: NodeId, name: &str) -> Option<&'a str> {
    tree.attribute(node, name)
}

/// Get an attribute the renderer cannot do without.
///
/// # Errors
/// Returns `MalformedSchema` when the attribute is absent.
pub fn require_attribute<'a>(tree: &'a Tree, node: NodeId, name: &str) -> Result<&'a str> {
    tree.attribute(node, name)
        .ok_or_else(|| ConverterError::missing_attribute(get_tag_name(tree, node), name))
}

/// Check if a node is an element with a specific tag name.
pub fn has_tag(tree: &Tree, node: NodeId, tag: &str) -> bool {
    tree.tag_name(node) == Some(tag)
}

/// Get all element children of a node.
pub fn element_children(tree: &Tree, node: NodeId) -> Vec<NodeId> {
    tree.children(node)
        .iter()
        .copied()
        .filter(|&child| tree.is_element(child))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_get_tag_name_of_text() {
        let (tree, root) = Tree::parse("<para>text</para>").unwrap();
        let text = tree.children(root)[0];
        assert_eq!(get_tag_name(&tree, text), "");
    }

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#;
        let (tree, root) = Tree::parse(xml).unwrap();
        assert_eq!(get_tag_name(&tree, root), "root");
    }

    #[test]
    fn test_find_children_of_kind() {
        let xml = r#"<compounddef>
            <sectiondef kind="func"/>
            <sectiondef kind="define"/>
            <sectiondef kind="func"/>
        </compounddef>"#;
        let (tree, root) = Tree::parse(xml).unwrap();

        assert_eq!(find_children_of_kind(&tree, root, "sectiondef", "func").len(), 2);
        assert_eq!(find_children_of_kind(&tree, root, "sectiondef", "var").len(), 0);
    }

    #[test]
    fn test_find_descendants() {
        let xml = r#"<compounddef>
            <sectiondef><memberdef kind="variable"/></sectiondef>
            <sectiondef><memberdef kind="variable"/><memberdef kind="function"/></sectiondef>
        </compounddef>"#;
        let (tree, root) = Tree::parse(xml).unwrap();

        assert_eq!(find_descendants(&tree, root, "memberdef").len(), 3);
    }

    #[test]
    fn test_get_text_trims_each_run() {
        let xml = "<enumvalue><name> FOO </name><initializer>=  -5</initializer></enumvalue>";
        let (tree, root) = Tree::parse(xml).unwrap();

        assert_eq!(get_text(&tree, root), "FOO=  -5");
        assert_eq!(child_text(&tree, root, "initializer"), Some("=  -5".to_string()));
        assert_eq!(child_text(&tree, root, "briefdescription"), None);
    }

    #[test]
    fn test_get_text_empty_element() {
        let (tree, root) = Tree::parse("<briefdescription>\n  </briefdescription>").unwrap();
        assert_eq!(get_text(&tree, root), "");
    }

    #[test]
    fn test_require_attribute() {
        let (tree, root) = Tree::parse(r#"<memberdef static="no"/>"#).unwrap();

        assert_eq!(require_attribute(&tree, root, "static").unwrap(), "no");
        let err = require_attribute(&tree, root, "inline").unwrap_err();
        assert!(err.to_string().contains("inline"));
    }

    #[test]
    fn test_element_children() {
        let (tree, root) = Tree::parse("<root>text<child1/>more<child2/></root>").unwrap();
        assert_eq!(element_children(&tree, root).len(), 2);
    }
}
