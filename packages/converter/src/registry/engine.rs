//! Render engine that dispatches elements to their renderers.

use super::config::create_doxygen_registry;
use super::core::ElementRegistry;
use super::handlers::{compounds, inline, members, sections, structural};
use super::types::{ElementKind, RenderContext};
use crate::asciidoc::render_text;
use crate::error::{ConverterError, Result};
use crate::normalize::{is_block_context, normalize};
use crate::resolver::ResolvedCompounds;
use crate::xml::{find_child, get_tag_name, NodeId, Tree};

/// Separator between rendered blocks unless a renderer chooses another.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Separator between consecutive lines of one block.
pub const LINE_SEPARATOR: &str = "\n";

/// Engine that renders a tree to AsciiDoc using the registry.
///
/// The engine owns the tree because rendering normalizes block contexts in
/// place. Cross-document lookups go through the pre-resolved compounds, so
/// rendering itself never touches the filesystem.
pub struct RenderEngine {
    registry: ElementRegistry,
    tree: Tree,
    resolved: ResolvedCompounds,
}

impl RenderEngine {
    /// Create an engine over a tree and its resolved compounds.
    #[must_use]
    pub fn new(tree: Tree, resolved: ResolvedCompounds) -> Self {
        Self {
            registry: create_doxygen_registry(),
            tree,
            resolved,
        }
    }

    /// Create an engine for a tree with no cross-document references.
    #[must_use]
    pub fn from_tree(tree: Tree) -> Self {
        Self::new(tree, ResolvedCompounds::default())
    }

    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    #[must_use]
    pub fn resolved(&self) -> &ResolvedCompounds {
        &self.resolved
    }

    /// Resolve the renderer variant for an element.
    ///
    /// # Errors
    /// Returns `UnknownElementKind`, naming the parent element, if the
    /// registry has no renderer for the element's tag and kind.
    pub fn resolve(&self, node: NodeId) -> Result<ElementKind> {
        let tag_name = get_tag_name(&self.tree, node);
        let kind = self.tree.attribute(node, "kind");

        self.registry
            .resolve(tag_name, kind)
            .map_err(|err| match err {
                ConverterError::UnknownElementKind { tag_name, kind, .. } => {
                    let context = self
                        .tree
                        .parent(node)
                        .map(|parent| format!("<{}>", get_tag_name(&self.tree, parent)));
                    ConverterError::UnknownElementKind {
                        tag_name,
                        kind,
                        context,
                    }
                }
                other => other,
            })
    }

    /// Render a node (element or text run) to AsciiDoc.
    ///
    /// # Errors
    /// Propagates the first fault met anywhere beneath `node`.
    pub fn render(&mut self, node: NodeId, ctx: &RenderContext) -> Result<String> {
        if let Some(text) = self.tree.text(node) {
            let is_first = self.tree.position(node).unwrap_or(0) == 0;
            let is_last = self.tree.is_last_child(node);
            return Ok(render_text(text, is_first, is_last, ctx.programlisting));
        }

        match self.resolve(node)? {
            ElementKind::Generic => self.render_contents(node, ctx, BLOCK_SEPARATOR),
            ElementKind::Skip => Ok(String::new()),

            ElementKind::Anchor => inline::anchor(self, node),
            ElementKind::Bold => inline::bold(self, node, ctx),
            ElementKind::Emphasis => inline::emphasis(self, node, ctx),
            ElementKind::ComputerOutput => inline::computer_output(self, node, ctx),
            ElementKind::Copyright => Ok(inline::COPYRIGHT.to_string()),
            ElementKind::Mdash => Ok(inline::MDASH.to_string()),
            ElementKind::Ndash => Ok(inline::NDASH.to_string()),
            ElementKind::NonBreakableSpace => Ok(inline::NBSP.to_string()),
            ElementKind::Space => Ok(" ".to_string()),
            ElementKind::LineBreak => Ok(inline::LINE_BREAK.to_string()),
            ElementKind::Ulink => inline::ulink(self, node, ctx),
            ElementKind::Ref => inline::reference(self, node, ctx),

            ElementKind::Title => structural::title(self, node, ctx),
            ElementKind::Section => structural::section(self, node, ctx),
            ElementKind::DetailedDescription => structural::detailed_description(self, node, ctx),
            ElementKind::Simplesect => structural::simplesect(self, node, ctx),
            ElementKind::ItemizedList => {
                self.render_contents(node, &ctx.in_unordered_list(), BLOCK_SEPARATOR)
            }
            ElementKind::OrderedList => {
                self.render_contents(node, &ctx.in_ordered_list(), BLOCK_SEPARATOR)
            }
            ElementKind::ListItem => structural::list_item(self, node, ctx),
            ElementKind::Table => structural::table(self, node, ctx),
            ElementKind::Row => structural::row(self, node, ctx),
            ElementKind::Entry => structural::entry(self, node, ctx),
            ElementKind::ParameterList => structural::parameter_list(self, node, ctx),
            ElementKind::ParameterNameList => Ok(structural::parameter_name_list(self, node)),
            ElementKind::ParameterDescription => {
                structural::parameter_description(self, node, ctx)
            }
            ElementKind::ProgramListing => structural::program_listing(self, node, ctx),
            ElementKind::CodeLine => {
                self.render_contents(node, &ctx.in_programlisting(), BLOCK_SEPARATOR)
            }
            ElementKind::Verbatim => structural::verbatim(self, node, ctx),

            ElementKind::Index => compounds::index(self, node, ctx),
            ElementKind::Group => compounds::group(self, node, ctx),
            ElementKind::Page => compounds::page(self, node, ctx),
            ElementKind::DataStructure => compounds::data_structure(self, node, ctx),
            ElementKind::InnerGroup => compounds::inner_group(self, node, ctx),
            ElementKind::InnerClass => compounds::inner_class(self, node, ctx),
            ElementKind::Sectiondef(kind) => sections::summary(self, node, kind, ctx),
            ElementKind::Memberdef(kind) => members::memberdef(self, node, kind, ctx),
        }
    }

    /// Render the children of an element and join them.
    ///
    /// In a block context the element is normalized first and the non-empty
    /// child renderings are joined with `separator`; otherwise they are
    /// concatenated.
    pub fn render_contents(
        &mut self,
        node: NodeId,
        ctx: &RenderContext,
        separator: &str,
    ) -> Result<String> {
        let block = is_block_context(&self.tree, node);
        if block {
            normalize(&mut self.tree, node);
        }

        let children = self.tree.children(node).to_vec();
        let mut rendered = Vec::with_capacity(children.len());
        for child in children {
            rendered.push(self.render(child, ctx)?);
        }

        if block {
            Ok(join_blocks(rendered, separator))
        } else {
            Ok(rendered.concat())
        }
    }

    /// Render the first child with the given tag, or `""` if there is none.
    pub fn render_child(&mut self, node: NodeId, tag: &str, ctx: &RenderContext) -> Result<String> {
        match find_child(&self.tree, node, tag) {
            Some(child) => self.render(child, ctx),
            None => Ok(String::new()),
        }
    }
}

/// Join non-empty fragments with a separator.
pub fn join_blocks(fragments: impl IntoIterator<Item = String>, separator: &str) -> String {
    fragments
        .into_iter()
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(xml: &str) -> Result<String> {
        let (tree, root) = Tree::parse(xml)?;
        let mut engine = RenderEngine::from_tree(tree);
        engine.render(root, &RenderContext::new())
    }

    #[test]
    fn test_engine_renders_generic_inline() {
        assert_eq!(
            render("<para>Hello <bold>world</bold></para>").unwrap(),
            "Hello *world*"
        );
    }

    #[test]
    fn test_engine_skip() {
        assert_eq!(render(r#"<location file="foo.h" line="3"/>"#).unwrap(), "");
    }

    #[test]
    fn test_engine_unknown_element_names_parent() {
        let err = render("<para>text <xrefsect id=\"x\"/></para>").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No renderer for element <xrefsect> in <para>"
        );
    }

    #[test]
    fn test_engine_unknown_kind() {
        let err = render(r#"<memberdef kind="signal"><name>x</name></memberdef>"#).unwrap_err();
        assert!(matches!(
            err,
            ConverterError::UnknownElementKind { ref kind, .. } if kind.as_deref() == Some("signal")
        ));
    }

    #[test]
    fn test_engine_whitespace_is_processed_like_html() {
        let (tree, root) =
            Tree::parse("<detaileddescription>   Hello \n    <bold> world</bold>  </detaileddescription>")
                .unwrap();
        let mut engine = RenderEngine::from_tree(tree);
        let ctx = RenderContext::new().in_documentation();

        assert_eq!(engine.render(root, &ctx).unwrap(), "Hello *world*");
    }

    #[test]
    fn test_engine_mixed_blocks_and_inline() {
        let xml = r#"<para><simplesect kind="note"><para>This is important</para></simplesect> Hello <bold>world</bold></para>"#;
        assert_eq!(
            render(xml).unwrap(),
            "[NOTE]\n====\nThis is important\n====\n\nHello *world*"
        );
    }

    #[test]
    fn test_join_blocks_skips_empty() {
        let joined = join_blocks(
            vec!["a".to_string(), String::new(), "b".to_string()],
            "\n\n",
        );
        assert_eq!(joined, "a\n\nb");
    }
}
