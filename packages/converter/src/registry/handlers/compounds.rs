//! Compound renderers: the index, groups, pages and data structures.
//!
//! Compounds own the heading hierarchy of the output. The index places
//! root modules at level 2 and their direct submodules, rendered as groups,
//! at level 3 with member sections below that. Each further level of
//! nesting moves everything one level deeper.

use super::sections;
use crate::asciidoc::{escape_text, sanitize, title, TitleAttributes};
use crate::error::{ConverterError, Result};
use crate::registry::engine::{join_blocks, RenderEngine, BLOCK_SEPARATOR};
use crate::registry::types::{RenderContext, SectionKind};
use crate::resolver::ModuleForest;
use crate::xml::{
    child_text, find_children, find_children_of_kind, find_descendants, get_attribute,
    require_attribute, NodeId,
};

const MODULE_LEVEL: usize = 2;
const GROUP_LEVEL: usize = 3;
const LISTING_LEVEL: usize = 4;

/// Summaries in the order they appear in a group.
const SUMMARY_ORDER: [SectionKind; 6] = [
    SectionKind::Define,
    SectionKind::Typedef,
    SectionKind::Enum,
    SectionKind::Func,
    SectionKind::Var,
    SectionKind::UserDefined,
];

/// Detail sections in the order they appear in a group.
const DETAILS_ORDER: [SectionKind; 5] = [
    SectionKind::Define,
    SectionKind::Typedef,
    SectionKind::Enum,
    SectionKind::Func,
    SectionKind::Var,
];

fn title_text(engine: &RenderEngine, node: NodeId) -> String {
    child_text(engine.tree(), node, "title").unwrap_or_default()
}

/// `{empty}` keeps a labelled list item valid when there is no brief.
fn brief_or_empty(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let brief = engine.render_child(node, "briefdescription", ctx)?;
    if brief.is_empty() {
        Ok("{empty}".to_string())
    } else {
        Ok(brief)
    }
}

fn dangling_module(refid: &str) -> ConverterError {
    ConverterError::MalformedSchema {
        element: "innergroup".to_string(),
        detail: format!("module '{refid}' has no group definition"),
    }
}

fn unresolved(element: &str, refid: &str) -> ConverterError {
    ConverterError::MalformedSchema {
        element: element.to_string(),
        detail: format!("reference '{refid}' was not resolved"),
    }
}

/// `<doxygenindex>`: every root module with its module table and nested
/// modules, then the data structures.
pub fn index(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let forest = engine.resolved().modules().clone();
    let index_attributes = TitleAttributes::from_element(engine.tree(), node);

    let mut output = Vec::new();
    for root in forest.roots() {
        output.push(root_module(engine, &forest, root, &index_attributes, ctx)?);
    }

    let structs = engine.resolved().data_structures().to_vec();
    if !structs.is_empty() {
        output.push(title(
            "Data Structures",
            MODULE_LEVEL + ctx.depth,
            &TitleAttributes::new().with_id("datastructures"),
        ));
        for compounddef in structs {
            output.push(engine.render(compounddef, ctx)?);
        }
    }

    tracing::debug!(
        modules = forest.len(),
        roots = forest.roots().len(),
        "rendered index"
    );
    Ok(join_blocks(output, BLOCK_SEPARATOR))
}

fn root_module(
    engine: &mut RenderEngine,
    forest: &ModuleForest,
    root: usize,
    index_attributes: &TitleAttributes,
    ctx: &RenderContext,
) -> Result<String> {
    let entry = forest.entry(root);
    let compounddef = entry.compounddef.ok_or_else(|| dangling_module(&entry.refid))?;
    let module_title = title_text(engine, compounddef);

    let attributes = TitleAttributes {
        id: Some(entry.refid.clone()),
        ..index_attributes.clone()
    }
    .with_reftext(module_title.as_str());

    let mut output = vec![
        title(&module_title, MODULE_LEVEL + ctx.depth, &attributes),
        engine.render_child(compounddef, "briefdescription", ctx)?,
        engine.render_child(compounddef, "detaileddescription", &ctx.in_documentation())?,
    ];

    if !entry.children.is_empty() {
        let mut rows = Vec::new();
        for &child in &entry.children {
            rows.push(module_rows(engine, forest, child, 0)?);
        }
        output.push(format!(
            "[cols=\"1,4\"]\n|===\n{}\n|===",
            rows.join(BLOCK_SEPARATOR)
        ));
    }

    // A group title sits one level below the module title at the same depth
    for &child in &entry.children {
        output.push(module_section(engine, forest, child, ctx)?);
    }
    Ok(join_blocks(output, BLOCK_SEPARATOR))
}

/// Table rows for a module and, after it, its descendants.
fn module_rows(
    engine: &mut RenderEngine,
    forest: &ModuleForest,
    module: usize,
    level: usize,
) -> Result<String> {
    let entry = forest.entry(module);
    let compounddef = entry.compounddef.ok_or_else(|| dangling_module(&entry.refid))?;

    let indent = "{nbsp}".repeat(4 * level);
    let link = format!(
        "<<{},{}>>",
        sanitize(&entry.refid),
        escape_text(&title_text(engine, compounddef))
    );
    let brief = engine.render_child(compounddef, "briefdescription", &RenderContext::new())?;

    let mut rows = vec![format!("|{indent}{link}\n|{brief}")];
    for &child in &entry.children {
        rows.push(module_rows(engine, forest, child, level + 1)?);
    }
    Ok(rows.join(BLOCK_SEPARATOR))
}

/// A module's group rendering followed by its submodules one level deeper.
fn module_section(
    engine: &mut RenderEngine,
    forest: &ModuleForest,
    module: usize,
    ctx: &RenderContext,
) -> Result<String> {
    let entry = forest.entry(module);
    let compounddef = entry.compounddef.ok_or_else(|| dangling_module(&entry.refid))?;

    let mut output = vec![engine.render(compounddef, ctx)?];
    let child_ctx = ctx.deeper(1);
    for &child in &entry.children {
        output.push(module_section(engine, forest, child, &child_ctx)?);
    }
    Ok(join_blocks(output, BLOCK_SEPARATOR))
}

/// `<compounddef kind="group">`: a module with its members.
pub fn group(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let group_title = title_text(engine, node);
    let attributes = TitleAttributes::from_element(engine.tree(), node)
        .with_reftext(group_title.as_str());
    let description_ctx = ctx.deeper(2);

    let mut output = vec![
        title(&group_title, GROUP_LEVEL + ctx.depth, &attributes),
        engine.render_child(node, "briefdescription", &description_ctx)?,
        engine.render_child(node, "detaileddescription", &description_ctx)?,
        listing(engine, node, "innergroup", "Modules", ctx)?,
        listing(engine, node, "innerclass", "Data Structures", ctx)?,
    ];

    for kind in SUMMARY_ORDER {
        for sectiondef in find_children_of_kind(engine.tree(), node, "sectiondef", kind.as_str()) {
            output.push(engine.render(sectiondef, ctx)?);
        }
    }
    for kind in DETAILS_ORDER {
        for sectiondef in find_children_of_kind(engine.tree(), node, "sectiondef", kind.as_str()) {
            output.push(sections::details(engine, sectiondef, kind, ctx)?);
        }
    }

    Ok(join_blocks(output, BLOCK_SEPARATOR))
}

/// Titled list of `innergroup` or `innerclass` references, or `""`.
fn listing(
    engine: &mut RenderEngine,
    node: NodeId,
    tag: &str,
    heading: &str,
    ctx: &RenderContext,
) -> Result<String> {
    let references = find_children(engine.tree(), node, tag);
    if references.is_empty() {
        return Ok(String::new());
    }

    let mut items = Vec::with_capacity(references.len());
    for reference in references {
        items.push(engine.render(reference, ctx)?);
    }
    let heading = title(heading, LISTING_LEVEL + ctx.depth, &TitleAttributes::new());
    Ok(format!("{heading}\n\n{}", items.join("\n")))
}

/// `<innergroup>`: link to a submodule with its brief.
pub fn inner_group(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let refid = require_attribute(engine.tree(), node, "refid")?.to_string();
    let compounddef = engine
        .resolved()
        .compound(&refid)
        .ok_or_else(|| unresolved("innergroup", &refid))?;

    let id = get_attribute(engine.tree(), compounddef, "id").unwrap_or(refid.as_str());
    let link = format!(
        "<<{},{}>>::",
        sanitize(id),
        escape_text(&title_text(engine, compounddef))
    );
    let brief = brief_or_empty(engine, compounddef, ctx)?;
    Ok(format!("{link} {brief}"))
}

/// `<innerclass>`: link to a struct with its brief.
pub fn inner_class(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let refid = require_attribute(engine.tree(), node, "refid")?.to_string();
    let compounddef = engine
        .resolved()
        .compound(&refid)
        .ok_or_else(|| unresolved("innerclass", &refid))?;

    let tree = engine.tree();
    let id = get_attribute(tree, compounddef, "id").unwrap_or(refid.as_str());
    let name = child_text(tree, compounddef, "compoundname").unwrap_or_default();
    let link = format!("struct <<{},{}>>::", sanitize(id), escape_text(&name));
    let brief = brief_or_empty(engine, compounddef, ctx)?;
    Ok(format!("{link} {brief}"))
}

/// `<compounddef kind="page">`: a page whose section titles become headings.
pub fn page(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let page_title = title_text(engine, node);
    let attributes = TitleAttributes::from_element(engine.tree(), node);

    let output = vec![
        title(&page_title, ctx.depth + 1, &attributes),
        engine.render_child(node, "briefdescription", ctx)?,
        engine.render_child(node, "detaileddescription", &ctx.in_page())?,
    ];
    Ok(join_blocks(output, BLOCK_SEPARATOR))
}

/// `<compounddef kind="struct">`: a struct and the documentation of its fields.
pub fn data_structure(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let tree = engine.tree();
    let name = child_text(tree, node, "compoundname").unwrap_or_default();
    let attributes = TitleAttributes::from_element(tree, node);
    let fields: Vec<NodeId> = find_descendants(tree, node, "memberdef")
        .into_iter()
        .filter(|&member| get_attribute(tree, member, "kind") == Some("variable"))
        .collect();

    let mut output = vec![
        title(&name, GROUP_LEVEL + ctx.depth, &attributes),
        engine.render_child(node, "briefdescription", ctx)?,
        engine.render_child(node, "detaileddescription", &ctx.in_documentation())?,
    ];

    if !fields.is_empty() {
        output.push(title(
            "Variable Documentation",
            LISTING_LEVEL + ctx.depth,
            &TitleAttributes::new(),
        ));
        for field in fields {
            output.push(engine.render(field, ctx)?);
        }
    }
    Ok(join_blocks(output, BLOCK_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use crate::registry::{RenderContext, RenderEngine};
    use crate::resolver::{MemorySource, ResolvedCompounds};
    use crate::xml::Tree;
    use pretty_assertions::assert_eq;

    fn render_resolved(xml: &str, source: &MemorySource, ctx: RenderContext) -> String {
        let (mut tree, root) = Tree::parse(xml).unwrap();
        let resolved = ResolvedCompounds::resolve(&mut tree, root, source).unwrap();
        let mut engine = RenderEngine::new(tree, resolved);
        engine.render(root, &ctx).unwrap()
    }

    fn render(xml: &str) -> String {
        render_resolved(xml, &MemorySource::new(), RenderContext::new())
    }

    #[test]
    fn test_page() {
        let xml = r#"<compounddef id="index" kind="page">
<compoundname>index</compoundname>
<title>Introduction</title>
<briefdescription/>
<detaileddescription>
<sect1 id="index_1autotoc_md1">
<title>Getting started</title>
<para>Read the <ulink url="https://example.com/guide">guide</ulink>.</para>
</sect1>
</detaileddescription>
</compounddef>"#;
        assert_eq!(
            render(xml),
            "[#index]\n== Introduction\n\n\
             [#index_1autotoc_md1]\n=== Getting started\n\n\
             Read the https://example.com/guide[guide]."
        );
    }

    #[test]
    fn test_data_structure() {
        let xml = r#"<compounddef id="structfoo" kind="struct">
<compoundname>foo</compoundname>
<sectiondef kind="public-attrib">
<memberdef kind="variable" id="structfoo_1a"><type>uint32_t</type><definition>uint32_t foo::count</definition><name>count</name><briefdescription><para>Number of items.</para></briefdescription></memberdef>
</sectiondef>
<briefdescription><para>A foo.</para></briefdescription>
<detaileddescription/>
</compounddef>"#;
        assert_eq!(
            render_resolved(xml, &MemorySource::new(), RenderContext::at_depth(0)),
            "[#structfoo]\n==== foo\n\nA foo.\n\n===== Variable Documentation\n\n\
             [#structfoo_1a]\n====== count\n\n`uint32_t foo::count`\n\nNumber of items."
        );
    }

    #[test]
    fn test_group_with_modules_and_classes() {
        let source = MemorySource::new()
            .with_document(
                "group__irq",
                r#"<doxygen><compounddef id="group__irq" kind="group"><title>hardware_irq</title><briefdescription><para>IRQ API</para></briefdescription></compounddef></doxygen>"#,
            )
            .with_document(
                "structbar",
                r#"<doxygen><compounddef id="structbar" kind="struct"><compoundname>bar</compoundname><briefdescription/></compounddef></doxygen>"#,
            );
        let xml = r#"<compounddef id="group__hardware" kind="group">
<compoundname>hardware</compoundname>
<title>Hardware</title>
<innergroup refid="group__irq">hardware_irq</innergroup>
<innerclass refid="structbar" prot="public">bar</innerclass>
<briefdescription><para>Hardware APIs.</para></briefdescription>
<detaileddescription><para>More.</para></detaileddescription>
</compounddef>"#;
        assert_eq!(
            render_resolved(xml, &source, RenderContext::new()),
            "[#group_hardware,reftext=\"Hardware\"]\n==== Hardware\n\n\
             Hardware APIs.\n\n\
             ===== Detailed Description\n\nMore.\n\n\
             ===== Modules\n\n<<group_irq,hardware_irq>>:: IRQ API\n\n\
             ===== Data Structures\n\nstruct <<structbar,bar>>:: {empty}"
        );
    }

    #[test]
    fn test_index_module_hierarchy_levels() {
        let source = MemorySource::new()
            .with_document(
                "group__hardware",
                r#"<doxygen version="1.9.7">
  <compounddef id="group__hardware" kind="group">
    <compoundname>hardware</compoundname>
    <title>Hardware APIs</title>
    <innergroup refid="group__hardware__base">hardware_base</innergroup>
    <briefdescription>
    </briefdescription>
    <detaileddescription>
<para>This group of libraries provides a thin and efficient C API / abstractions to access the RP2040 hardware without having to read and write hardware registers directly. </para>
    </detaileddescription>
  </compounddef>
</doxygen>"#,
            )
            .with_document(
                "group__hardware__base",
                r#"<doxygen version="1.9.7">
  <compounddef id="group__hardware__base" kind="group">
    <compoundname>hardware_base</compoundname>
    <title>hardware_base</title>
    <innergroup refid="group__channel__config">channel_config</innergroup>
    <briefdescription>
    </briefdescription>
    <detaileddescription>
<para>Low-level types and (atomic) accessors for memory-mapped hardware registers</para>
<para><computeroutput>hardware_base</computeroutput> defines the low level types and access functions for memory mapped hardware registers. It is included by default by all other hardware libraries.</para>
    </detaileddescription>
  </compounddef>
</doxygen>"#,
            )
            .with_document(
                "group__channel__config",
                r#"<doxygen version="1.9.7">
  <compounddef id="group__channel__config" kind="group">
    <compoundname>channel_config</compoundname>
    <title>channel_config</title>
    <briefdescription>
<para>DMA channel configuration. </para>
    </briefdescription>
    <detaileddescription>
    </detaileddescription>
  </compounddef>
</doxygen>"#,
            );
        let xml = r#"<doxygenindex version="1.9.7">
<compound refid="group__hardware" kind="group"><name>hardware</name>
</compound>
<compound refid="group__hardware__base" kind="group"><name>hardware_base</name>
</compound>
<compound refid="group__channel__config" kind="group"><name>channel_config</name>
</compound>
</doxygenindex>"#;

        assert_eq!(
            render_resolved(xml, &source, RenderContext::new()),
            "[#group_hardware,reftext=\"Hardware APIs\"]\n=== Hardware APIs\n\n\
             This group of libraries provides a thin and efficient C API / abstractions to access the RP2040 hardware without having to read and write hardware registers directly.\n\n\
             [cols=\"1,4\"]\n|===\n\
             |<<group_hardware_base,hardware_base>>\n|\n\n\
             |{nbsp}{nbsp}{nbsp}{nbsp}<<group_channel_config,channel_config>>\n|DMA channel configuration.\n\
             |===\n\n\
             [#group_hardware_base,reftext=\"hardware_base\"]\n==== hardware_base\n\n\
             ===== Detailed Description\n\n\
             Low-level types and (atomic) accessors for memory-mapped hardware registers\n\n\
             `hardware_base` defines the low level types and access functions for memory mapped hardware registers. It is included by default by all other hardware libraries.\n\n\
             ===== Modules\n\n\
             <<group_channel_config,channel_config>>:: DMA channel configuration.\n\n\
             [#group_channel_config,reftext=\"channel_config\"]\n===== channel_config\n\n\
             DMA channel configuration."
        );
    }

    #[test]
    fn test_group_reftext_precedes_role() {
        let xml = r#"<compounddef id="group__adc" kind="group" role="contextspecific">
<title>hardware_adc</title>
<briefdescription/>
<detaileddescription/>
</compounddef>"#;
        assert_eq!(
            render(xml),
            "[#group_adc,reftext=\"hardware_adc\",role=contextspecific]\n==== hardware_adc"
        );
    }

    #[test]
    fn test_unresolved_innergroup_is_malformed() {
        let (tree, root) = Tree::parse(r#"<innergroup refid="group__x">x</innergroup>"#).unwrap();
        let mut engine = RenderEngine::from_tree(tree);
        let err = engine.render(root, &RenderContext::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed Doxygen XML in <innergroup>: reference 'group__x' was not resolved"
        );
    }
}
