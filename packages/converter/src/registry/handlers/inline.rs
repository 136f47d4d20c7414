//! Inline element renderers for text-level elements.
//!
//! These renderers handle elements that flow within a line of text, such as
//! emphasis, cross-references and typographic symbols.

use crate::asciidoc::{escape_text, sanitize};
use crate::error::Result;
use crate::registry::engine::{RenderEngine, BLOCK_SEPARATOR};
use crate::registry::types::RenderContext;
use crate::xml::{get_text, require_attribute, NodeId};

pub const COPYRIGHT: &str = "©";
pub const MDASH: &str = "—";
pub const NDASH: &str = "–";
pub const NBSP: &str = "{nbsp}";
/// Hard line break: trailing ` +` keeps the break in AsciiDoc.
pub const LINE_BREAK: &str = " +\n";

/// `<anchor id="..."/>` becomes an inline anchor `[[id]]`.
pub fn anchor(engine: &RenderEngine, node: NodeId) -> Result<String> {
    let id = require_attribute(engine.tree(), node, "id")?;
    Ok(format!("[[{}]]", sanitize(id)))
}

pub fn bold(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(format!("*{contents}*"))
}

pub fn emphasis(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(format!("_{contents}_"))
}

/// Monospaced text; trailing whitespace would break the closing backtick.
pub fn computer_output(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<String> {
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(format!("`{}`", contents.trim_end()))
}

/// External link: `url[text]`.
pub fn ulink(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let url = require_attribute(engine.tree(), node, "url")?.to_string();
    let contents = engine.render_contents(node, ctx, BLOCK_SEPARATOR)?;
    Ok(format!("{url}[{contents}]"))
}

/// Cross-reference to another documented entity.
///
/// Inside program listings the link text is emitted as plain code.
pub fn reference(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    if ctx.programlisting {
        return engine.render_contents(node, ctx, BLOCK_SEPARATOR);
    }

    let tree = engine.tree();
    let refid = require_attribute(tree, node, "refid")?;
    Ok(format!(
        "<<{},{}>>",
        sanitize(refid),
        escape_text(&get_text(tree, node))
    ))
}
