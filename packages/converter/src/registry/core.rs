//! Element registry for mapping tag names to renderer variants.

use std::collections::{HashMap, HashSet};

use super::types::ElementKind;
use crate::error::{ConverterError, Result};

/// Registry mapping element names (and `kind` attributes) to renderers.
///
/// Most tags resolve by name alone. Polymorphic tags such as `memberdef`
/// resolve through their `kind` attribute, and an undeclared kind is a
/// fault rather than a fallback.
pub struct ElementRegistry {
    kinds: HashMap<String, ElementKind>,
    polymorphic: HashMap<String, HashMap<String, ElementKind>>,
    skip_tags: HashSet<String>,
}

impl ElementRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            polymorphic: HashMap::new(),
            skip_tags: HashSet::new(),
        }
    }

    /// Register a renderer for a specific tag name.
    pub fn register(&mut self, tag_name: impl Into<String>, kind: ElementKind) {
        self.kinds.insert(tag_name.into(), kind);
    }

    /// Register a renderer for a tag carrying a specific `kind` attribute.
    pub fn register_kind(
        &mut self,
        tag_name: impl Into<String>,
        kind_attribute: impl Into<String>,
        kind: ElementKind,
    ) {
        self.polymorphic
            .entry(tag_name.into())
            .or_default()
            .insert(kind_attribute.into(), kind);
    }

    /// Mark tags as skip (don't render, return empty).
    pub fn skip(&mut self, tag_names: impl IntoIterator<Item = impl Into<String>>) {
        for tag in tag_names {
            self.skip_tags.insert(tag.into());
        }
    }

    /// Look up the renderer for a tag and its `kind` attribute.
    fn lookup(&self, tag_name: &str, kind: Option<&str>) -> Option<ElementKind> {
        if self.skip_tags.contains(tag_name) {
            return Some(ElementKind::Skip);
        }
        if let Some(by_kind) = self.polymorphic.get(tag_name) {
            return kind.and_then(|kind| by_kind.get(kind)).copied();
        }
        self.kinds.get(tag_name).copied()
    }

    /// Resolve the renderer for a tag and its `kind` attribute.
    ///
    /// # Errors
    /// Returns `UnknownElementKind` if the combination is not registered.
    pub fn resolve(&self, tag_name: &str, kind: Option<&str>) -> Result<ElementKind> {
        self.lookup(tag_name, kind)
            .ok_or_else(|| ConverterError::UnknownElementKind {
                tag_name: tag_name.to_string(),
                kind: kind
                    .filter(|_| self.is_polymorphic(tag_name))
                    .map(str::to_string),
                context: None,
            })
    }

    /// Check if a tag should be skipped.
    #[cfg(test)]
    pub(crate) fn should_skip(&self, tag_name: &str) -> bool {
        self.skip_tags.contains(tag_name)
    }

    /// Check if a tag dispatches on its `kind` attribute.
    fn is_polymorphic(&self, tag_name: &str) -> bool {
        self.polymorphic.contains_key(tag_name)
    }

    /// Check if a renderer is registered for a tag.
    #[cfg(test)]
    pub(crate) fn has_renderer(&self, tag_name: &str) -> bool {
        self.kinds.contains_key(tag_name) || self.polymorphic.contains_key(tag_name)
    }

    /// Return set of all tag names registered by name alone.
    #[cfg(test)]
    pub(crate) fn registered_tags(&self) -> HashSet<&str> {
        self.kinds.keys().map(|s| s.as_str()).collect()
    }

    /// Return every `(tag, kind)` pair registered for polymorphic tags.
    #[cfg(test)]
    pub(crate) fn registered_kinds(&self) -> Vec<(&str, &str)> {
        self.polymorphic
            .iter()
            .flat_map(|(tag, by_kind)| {
                by_kind
                    .keys()
                    .map(move |kind| (tag.as_str(), kind.as_str()))
            })
            .collect()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
