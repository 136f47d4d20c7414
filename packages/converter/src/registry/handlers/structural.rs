//! Structural element renderers for block-level elements.
//!
//! These renderers handle titles, sections, admonitions, lists, tables,
//! parameter lists and code blocks.

use crate::asciidoc::{escape_text, heading, title as render_title, TitleAttributes};
use crate::error::Result;
use crate::registry::engine::{join_blocks, RenderEngine, BLOCK_SEPARATOR};
use crate::registry::types::RenderContext;
use crate::xml::{
    child_text, element_children, find_children, get_attribute, get_tag_name, get_text, has_tag,
    require_attribute, NodeId, Tree,
};

/// Section level implied by the element a page title belongs to.
fn section_level(tag: &str) -> usize {
    match tag {
        "sect1" => 1,
        "sect2" => 2,
        "sect3" => 3,
        _ => 0,
    }
}

/// `<title>`: a block title, or a real heading inside a page.
pub fn title(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    if !ctx.page {
        return Ok(format!(".{contents}"));
    }

    let level = engine
        .tree()
        .parent(node)
        .map_or(0, |parent| section_level(get_tag_name(engine.tree(), parent)));
    Ok(heading(
        &contents,
        ctx.depth + 1 + level,
        &TitleAttributes::new(),
    ))
}

/// `<sect1>` to `<sect3>`: anchor line followed by the section body.
pub fn section(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let attributes = TitleAttributes::from_element(engine.tree(), node).to_list(None);
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(match attributes {
        Some(list) => format!("[{list}]\n{contents}"),
        None => contents,
    })
}

/// `<detaileddescription>`, headed unless the caller already wrote a heading.
pub fn detailed_description(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    if contents.is_empty() || ctx.documentation || ctx.page {
        return Ok(contents);
    }

    let attributes = TitleAttributes::from_element(engine.tree(), node);
    let heading = render_title("Detailed Description", ctx.depth + 2, &attributes);
    Ok(format!("{heading}\n\n{contents}"))
}

fn is_simplesect_of_kind(tree: &Tree, node: Option<NodeId>, kind: &str) -> bool {
    node.is_some_and(|node| {
        has_tag(tree, node, "simplesect") && get_attribute(tree, node, "kind") == Some(kind)
    })
}

/// Wrap a simplesect in a delimited block shared with same-kind neighbours.
///
/// The block opens only when the previous sibling element is not the same
/// kind of simplesect, and closes only when the next one is not.
fn merged_block(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
    kind: &str,
    open: &str,
    close: &str,
) -> Result<String> {
    let tree = engine.tree();
    let continues = is_simplesect_of_kind(tree, tree.previous_element_sibling(node), kind);
    let continued = is_simplesect_of_kind(tree, tree.next_element_sibling(node), kind);

    let mut output = String::new();
    if !continues {
        output.push_str(open);
    }
    output.push_str(&engine.render_contents(node, ctx, BLOCK_SEPARATOR)?);
    if !continued {
        output.push_str(close);
    }
    Ok(output)
}

/// `<simplesect>`: see-also, note, return and titled paragraphs.
pub fn simplesect(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let kind = get_attribute(engine.tree(), node, "kind")
        .unwrap_or_default()
        .to_string();

    match kind.as_str() {
        "see" => merged_block(engine, node, ctx, "see", "--\n*See also*\n\n", "\n--"),
        "note" => merged_block(engine, node, ctx, "note", "[NOTE]\n====\n", "\n===="),
        "return" => {
            let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
            Ok(format!("--\n*Returns*\n\n{contents}\n--"))
        }
        "par" => titled_paragraph(engine, node, ctx),
        _ => engine.render_contents(node, ctx, BLOCK_SEPARATOR),
    }
}

/// `<simplesect kind="par">`: optional bold title, then the paragraphs.
fn titled_paragraph(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let mut blocks = Vec::new();
    for child in element_children(engine.tree(), node) {
        if has_tag(engine.tree(), child, "title") {
            let text = get_text(engine.tree(), child);
            if !text.is_empty() {
                blocks.push(format!("*{}*", escape_text(&text)));
            }
        } else {
            blocks.push(engine.render(child, ctx)?);
        }
    }
    Ok(join_blocks(blocks, BLOCK_SEPARATOR))
}

/// `<listitem>`: marker plus a body kept attached through continuations.
pub fn list_item(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let marker = ctx.list_marker();
    if ctx.list_depth() == 1 {
        let body = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
        Ok(format!("{marker} {{empty}}\n+\n--\n{body}\n--"))
    } else {
        let body = engine.render_contents(node, ctx, "\n+\n")?;
        Ok(format!("{marker} {{empty}}\n+\n{body}"))
    }
}

pub fn table(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(format!("|===\n{contents}\n|==="))
}

/// `<row>`: the first row keeps its cells on one line as the header.
pub fn row(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let separator = if engine.tree().position(node).unwrap_or(0) == 0 {
        " "
    } else {
        "\n"
    };
    engine.render_contents(node, ctx, separator)
}

pub fn entry(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(format!("|{contents}"))
}

/// `<parameterlist>`: a horizontal labelled list for function parameters.
pub fn parameter_list(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let kind = require_attribute(engine.tree(), node, "kind")?.to_string();
    let items = engine.render_contents(node, ctx, "\n")?;
    if kind == "param" {
        Ok(format!("*Parameters*\n\n[horizontal]\n{items}"))
    } else {
        Ok(items)
    }
}

pub fn parameter_name_list(engine: &RenderEngine, node: NodeId) -> String {
    let name = child_text(engine.tree(), node, "parametername").unwrap_or_default();
    format!("`{}`::", escape_text(&name).trim_end())
}

pub fn parameter_description(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    if contents.is_empty() {
        Ok("{empty}".to_string())
    } else {
        Ok(contents)
    }
}

/// `<programlisting>`: numbered C source block, one line per `<codeline>`.
pub fn program_listing(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let mut lines = Vec::new();
    if let Some(filename) = get_attribute(engine.tree(), node, "filename") {
        lines.push(format!("// {filename}"));
    }
    lines.push("[source,c,linenums]\n----".to_string());
    for codeline in find_children(engine.tree(), node, "codeline") {
        lines.push(engine.render(codeline, ctx)?);
    }
    lines.push("----".to_string());
    Ok(lines.join("\n"))
}

/// `<verbatim>`: unnumbered source block with the raw text.
pub fn verbatim(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let contents = engine.render_contents(node, &ctx.in_programlisting(), BLOCK_SEPARATOR)?;
    Ok(format!("[source,c]\n----\n{contents}----"))
}
