//! Cross-document resolution.
//!
//! Doxygen splits its output into one XML file per compound. The index and
//! group documents refer to other compounds by `refid`, and the renderers
//! need those compounds in hand. Everything that touches the filesystem
//! happens here, before rendering starts: referenced documents are loaded
//! into the shared [`Tree`] once each, and the renderers receive a
//! [`ResolvedCompounds`] map.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::config::compound_path;
use crate::error::{ConverterError, Result};
use crate::xml::{
    element_children, find_child, find_children, find_children_of_kind, get_tag_name,
    require_attribute, NodeId, Tree,
};

/// Where compound documents come from.
pub trait CompoundSource {
    /// Read the XML text of the compound document for `refid`.
    ///
    /// # Errors
    /// Returns `MissingReferencedDocument` if the document cannot be read.
    fn load(&self, refid: &str) -> Result<String>;

    /// Path reported in errors about the document for `refid`.
    fn path(&self, refid: &str) -> PathBuf;
}

/// Compound documents stored as `{refid}.xml` files in one directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    xml_dir: PathBuf,
}

impl DirectorySource {
    #[must_use]
    pub fn new(xml_dir: impl Into<PathBuf>) -> Self {
        Self {
            xml_dir: xml_dir.into(),
        }
    }

    /// Source for the directory holding `input`.
    #[must_use]
    pub fn beside(input: &Path) -> Self {
        Self::new(input.parent().unwrap_or_else(|| Path::new(".")))
    }

    #[must_use]
    pub fn xml_dir(&self) -> &Path {
        &self.xml_dir
    }
}

impl CompoundSource for DirectorySource {
    fn load(&self, refid: &str) -> Result<String> {
        let path = self.path(refid);
        std::fs::read_to_string(&path).map_err(|e| ConverterError::MissingReferencedDocument {
            refid: refid.to_string(),
            path,
            reason: e.to_string(),
        })
    }

    fn path(&self, refid: &str) -> PathBuf {
        compound_path(&self.xml_dir, refid)
    }
}

/// Compound documents held in memory, keyed by refid.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, String>,
}

impl MemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document, builder style.
    #[must_use]
    pub fn with_document(mut self, refid: impl Into<String>, xml: impl Into<String>) -> Self {
        self.insert(refid, xml);
        self
    }

    pub fn insert(&mut self, refid: impl Into<String>, xml: impl Into<String>) {
        self.documents.insert(refid.into(), xml.into());
    }
}

impl CompoundSource for MemorySource {
    fn load(&self, refid: &str) -> Result<String> {
        self.documents
            .get(refid)
            .cloned()
            .ok_or_else(|| ConverterError::MissingReferencedDocument {
                refid: refid.to_string(),
                path: self.path(refid),
                reason: "no such document".to_string(),
            })
    }

    fn path(&self, refid: &str) -> PathBuf {
        compound_path(Path::new(""), refid)
    }
}

/// Loads compound documents into a tree, at most once per refid.
pub struct CompoundLoader<'a> {
    source: &'a dyn CompoundSource,
    loaded: HashMap<String, NodeId>,
}

impl<'a> CompoundLoader<'a> {
    #[must_use]
    pub fn new(source: &'a dyn CompoundSource) -> Self {
        Self {
            source,
            loaded: HashMap::new(),
        }
    }

    /// Load the document for `refid` and return its root element.
    ///
    /// A document already loaded is returned from the cache.
    ///
    /// # Errors
    /// Returns `MissingReferencedDocument` if the document cannot be read
    /// or is not well-formed XML.
    pub fn load(&mut self, tree: &mut Tree, refid: &str) -> Result<NodeId> {
        if let Some(&root) = self.loaded.get(refid) {
            return Ok(root);
        }

        let xml = self.source.load(refid)?;
        let root = tree
            .load(&xml)
            .map_err(|e| ConverterError::MissingReferencedDocument {
                refid: refid.to_string(),
                path: self.source.path(refid),
                reason: e.to_string(),
            })?;

        tracing::debug!(refid, "loaded compound document");
        self.loaded.insert(refid.to_string(), root);
        Ok(root)
    }

    /// Number of distinct documents loaded so far.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }
}

/// A module (Doxygen group) in the module hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    pub refid: String,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// The group's `compounddef`, once its document has been seen.
    pub compounddef: Option<NodeId>,
}

/// The module hierarchy of an index, stored as an arena of entries.
#[derive(Debug, Clone, Default)]
pub struct ModuleForest {
    entries: Vec<ModuleEntry>,
    by_refid: HashMap<String, usize>,
}

impl ModuleForest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the entry for `refid`, creating it on first sight.
    pub fn register(&mut self, refid: &str) -> usize {
        if let Some(&index) = self.by_refid.get(refid) {
            return index;
        }
        let index = self.entries.len();
        self.entries.push(ModuleEntry {
            refid: refid.to_string(),
            parent: None,
            children: Vec::new(),
            compounddef: None,
        });
        self.by_refid.insert(refid.to_string(), index);
        index
    }

    /// Attach a definition to an entry unless it already has one.
    pub fn attach_definition(&mut self, index: usize, compounddef: NodeId) {
        let entry = &mut self.entries[index];
        if entry.compounddef.is_none() {
            entry.compounddef = Some(compounddef);
        }
    }

    /// Make `child` a child of `parent`.
    ///
    /// A module keeps its first parent. Links that would give a module a
    /// second parent or close a cycle are ignored and reported. Returns
    /// whether the link was made.
    pub fn link(&mut self, parent: usize, child: usize) -> bool {
        if let Some(existing) = self.entries[child].parent {
            if existing != parent {
                tracing::warn!(
                    module = %self.entries[child].refid,
                    kept = %self.entries[existing].refid,
                    ignored = %self.entries[parent].refid,
                    "module listed under more than one parent"
                );
            }
            return false;
        }
        if parent == child || self.is_ancestor(child, parent) {
            tracing::warn!(
                module = %self.entries[child].refid,
                parent = %self.entries[parent].refid,
                "ignoring module link that would form a cycle"
            );
            return false;
        }

        self.entries[child].parent = Some(parent);
        self.entries[parent].children.push(child);
        true
    }

    fn is_ancestor(&self, candidate: usize, mut node: usize) -> bool {
        while let Some(parent) = self.entries[node].parent {
            if parent == candidate {
                return true;
            }
            node = parent;
        }
        false
    }

    /// Parentless entries in first-registration order.
    #[must_use]
    pub fn roots(&self) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.parent.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    #[must_use]
    pub fn entry(&self, index: usize) -> &ModuleEntry {
        &self.entries[index]
    }

    #[must_use]
    pub fn get(&self, refid: &str) -> Option<&ModuleEntry> {
        self.by_refid.get(refid).map(|&index| &self.entries[index])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All group definitions attached so far.
    fn definitions(&self) -> Vec<NodeId> {
        self.entries
            .iter()
            .filter_map(|entry| entry.compounddef)
            .collect()
    }
}

/// Build the module hierarchy from the group compounds of an index.
///
/// # Errors
/// Returns `MissingReferencedDocument` if a group document cannot be
/// loaded and `MalformedSchema` if a required `refid` or `id` is absent.
pub fn build_root_modules(
    tree: &mut Tree,
    index: NodeId,
    loader: &mut CompoundLoader<'_>,
) -> Result<ModuleForest> {
    let mut forest = ModuleForest::new();

    for compound in find_children_of_kind(tree, index, "compound", "group") {
        let refid = require_attribute(tree, compound, "refid")?.to_string();
        let document = loader.load(tree, &refid)?;

        for compounddef in find_children_of_kind(tree, document, "compounddef", "group") {
            let id = require_attribute(tree, compounddef, "id")?;
            let group = forest.register(id);
            forest.attach_definition(group, compounddef);

            for innergroup in find_children(tree, compounddef, "innergroup") {
                let child_refid = require_attribute(tree, innergroup, "refid")?;
                let child = forest.register(child_refid);
                forest.link(group, child);
            }
        }
    }

    tracing::debug!(
        modules = forest.len(),
        roots = forest.roots().len(),
        "built module hierarchy"
    );
    Ok(forest)
}

/// Collect the struct definitions listed in an index, in index order.
///
/// # Errors
/// Returns `MissingReferencedDocument` if a struct document cannot be
/// loaded and `MalformedSchema` if a `refid` is absent.
pub fn collect_data_structures(
    tree: &mut Tree,
    index: NodeId,
    loader: &mut CompoundLoader<'_>,
) -> Result<Vec<NodeId>> {
    let mut structs = Vec::new();

    for compound in find_children_of_kind(tree, index, "compound", "struct") {
        let refid = require_attribute(tree, compound, "refid")?.to_string();
        let document = loader.load(tree, &refid)?;

        match find_children_of_kind(tree, document, "compounddef", "struct").first() {
            Some(&compounddef) => structs.push(compounddef),
            None => tracing::warn!(refid = %refid, "struct document has no struct definition"),
        }
    }

    Ok(structs)
}

/// Load every compound named by an `innergroup` or `innerclass` of the
/// given group definitions.
///
/// Groups are visited in order and their references in document order.
/// Only direct references are loaded: the documents of nested groups are
/// opened, but not what they refer to in turn. Returns a map from refid to
/// the first `compounddef` of each loaded document.
///
/// # Errors
/// Returns `MissingReferencedDocument` if a document cannot be loaded and
/// `MalformedSchema` if a reference has no `refid` or its document has no
/// `compounddef`.
pub fn preload_inner_compounds(
    tree: &mut Tree,
    loader: &mut CompoundLoader<'_>,
    groups: &[NodeId],
) -> Result<HashMap<String, NodeId>> {
    let mut compounds = HashMap::new();

    for &group in groups {
        for child in element_children(tree, group) {
            let tag = get_tag_name(tree, child);
            if tag != "innergroup" && tag != "innerclass" {
                continue;
            }

            let refid = require_attribute(tree, child, "refid")?.to_string();
            if compounds.contains_key(&refid) {
                continue;
            }

            let document = loader.load(tree, &refid)?;
            let compounddef = find_child(tree, document, "compounddef").ok_or_else(|| {
                ConverterError::MalformedSchema {
                    element: get_tag_name(tree, document).to_string(),
                    detail: format!("document '{refid}' has no compounddef"),
                }
            })?;
            compounds.insert(refid, compounddef);
        }
    }

    Ok(compounds)
}

/// Everything the renderers need from other documents.
#[derive(Debug, Clone, Default)]
pub struct ResolvedCompounds {
    compounds: HashMap<String, NodeId>,
    modules: ModuleForest,
    data_structures: Vec<NodeId>,
}

impl ResolvedCompounds {
    /// Run the resolution pre-pass for the document rooted at `root`.
    ///
    /// For a `doxygenindex` this builds the module hierarchy and collects
    /// the data structures. The direct inner groups and inner classes of
    /// every group that will be rendered are then loaded: each module of an
    /// index, or the group definitions of a single compound document.
    ///
    /// # Errors
    /// Propagates the first loading or schema fault.
    pub fn resolve(tree: &mut Tree, root: NodeId, source: &dyn CompoundSource) -> Result<Self> {
        let mut loader = CompoundLoader::new(source);
        let mut resolved = Self::default();

        let root_tag = get_tag_name(tree, root).to_string();
        let groups = match root_tag.as_str() {
            "doxygenindex" => {
                resolved.modules = build_root_modules(tree, root, &mut loader)?;
                resolved.data_structures = collect_data_structures(tree, root, &mut loader)?;
                resolved.modules.definitions()
            }
            "compounddef" => vec![root],
            _ => find_children_of_kind(tree, root, "compounddef", "group"),
        };
        resolved.compounds = preload_inner_compounds(tree, &mut loader, &groups)?;

        tracing::debug!(
            documents = loader.loaded_count(),
            compounds = resolved.compounds.len(),
            "resolved referenced compounds"
        );
        Ok(resolved)
    }

    /// The `compounddef` for a referenced refid.
    #[must_use]
    pub fn compound(&self, refid: &str) -> Option<NodeId> {
        self.compounds.get(refid).copied()
    }

    #[must_use]
    pub fn modules(&self) -> &ModuleForest {
        &self.modules
    }

    #[must_use]
    pub fn data_structures(&self) -> &[NodeId] {
        &self.data_structures
    }
}
