//! Arena-owned XML tree.
//!
//! `roxmltree` documents are read-only, but rendering needs to regroup
//! children in place. Parsed documents are therefore copied into a
//! [`Tree`], where every node is addressed by a [`NodeId`] and child lists
//! are plain vectors of ids. Several documents can live in the same tree so
//! cross-document references are ordinary ids.

use crate::error::Result;

/// Index of a node inside a [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeData {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena holding the nodes of one or more parsed documents.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a single document into a fresh tree.
    ///
    /// Returns the tree and the id of the document's root element.
    pub fn parse(xml: &str) -> Result<(Self, NodeId)> {
        let mut tree = Self::new();
        let root = tree.load(xml)?;
        Ok((tree, root))
    }

    /// Parse a document and add it to this tree.
    ///
    /// Comments and processing instructions are dropped; whitespace-only
    /// text is kept since it takes part in whitespace collapsing.
    pub fn load(&mut self, xml: &str) -> Result<NodeId> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(self.import(doc.root_element(), None))
    }

    fn import(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let attributes = node
            .attributes()
            .map(|attr| (attr.name().to_string(), attr.value().to_string()))
            .collect();
        let id = self.push(
            NodeData::Element {
                name: node.tag_name().name().to_string(),
                attributes,
            },
            parent,
        );

        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(self.import(child, Some(id)));
            } else if child.is_text() {
                let text = child.text().unwrap_or_default();
                children.push(self.push(NodeData::Text(text.to_string()), Some(id)));
            }
        }
        self.nodes[id.0].children = children;
        id
    }

    fn push(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element with no attributes.
    pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
        self.push(
            NodeData::Element {
                name: name.into(),
                attributes: Vec::new(),
            },
            None,
        )
    }

    /// Tag name of an element, `None` for text.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Element { name, .. } => Some(name),
            NodeData::Text(_) => None,
        }
    }

    /// Content of a text run, `None` for elements.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].data {
            NodeData::Text(text) => Some(text),
            NodeData::Element { .. } => None,
        }
    }

    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Element { .. })
    }

    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].data, NodeData::Text(_))
    }

    /// Attribute value of an element.
    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.attributes(id)
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes of an element in document order.
    #[must_use]
    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        match &self.nodes[id.0].data {
            NodeData::Element { attributes, .. } => attributes,
            NodeData::Text(_) => &[],
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Index of a node among its parent's children.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    /// Whether a node is the last child of its parent.
    #[must_use]
    pub fn is_last_child(&self, id: NodeId) -> bool {
        self.parent(id)
            .and_then(|parent| self.children(parent).last())
            .is_some_and(|&last| last == id)
    }

    /// Closest preceding sibling that is an element.
    #[must_use]
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&child| child == id)?;
        siblings[..index]
            .iter()
            .rev()
            .copied()
            .find(|&sibling| self.is_element(sibling))
    }

    /// Closest following sibling that is an element.
    #[must_use]
    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let index = siblings.iter().position(|&child| child == id)?;
        siblings[index + 1..]
            .iter()
            .copied()
            .find(|&sibling| self.is_element(sibling))
    }

    /// All descendants of a node in document order, excluding the node.
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            result.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        result
    }

    /// Replace the child list of an element.
    ///
    /// New children are re-parented; children that are no longer listed
    /// become detached.
    pub fn replace_children(&mut self, id: NodeId, children: Vec<NodeId>) {
        let previous = std::mem::take(&mut self.nodes[id.0].children);
        for old in previous {
            if self.nodes[old.0].parent == Some(id) {
                self.nodes[old.0].parent = None;
            }
        }
        for &child in &children {
            self.nodes[child.0].parent = Some(id);
        }
        self.nodes[id.0].children = children;
    }

    /// Merge runs of adjacent text children into their first run.
    pub fn merge_adjacent_text(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        let mut merged: Vec<NodeId> = Vec::with_capacity(children.len());

        for child in children {
            let tail = self.text(child).map(str::to_string);
            match (merged.last().copied(), tail) {
                (Some(last), Some(tail)) if self.is_text(last) => {
                    if let NodeData::Text(text) = &mut self.nodes[last.0].data {
                        text.push_str(&tail);
                    }
                }
                _ => merged.push(child),
            }
        }

        if merged.len() != self.children(id).len() {
            self.replace_children(id, merged);
        }
    }
}
