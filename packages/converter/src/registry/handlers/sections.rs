//! Sectiondef renderers: member summaries and detail sections.
//!
//! A compound lists each section twice. The summary is a labelled list of
//! one-line declarations linking to the members; the details render every
//! member in full under a "... Documentation" heading.

use super::members::{declared_static, macro_arguments, macro_value};
use crate::asciidoc::{escape_text, sanitize, title, TitleAttributes};
use crate::error::Result;
use crate::registry::engine::{join_blocks, RenderEngine, BLOCK_SEPARATOR, LINE_SEPARATOR};
use crate::registry::types::{RenderContext, SectionKind};
use crate::xml::{
    child_text, find_child, find_children, find_children_of_kind, get_text, require_attribute,
    NodeId,
};

/// Heading level of a section relative to the context depth.
const SECTION_LEVEL: usize = 4;

fn summary_title(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Define => "Macros",
        SectionKind::Enum => "Enumerations",
        SectionKind::Typedef => "Typedefs",
        SectionKind::Func => "Functions",
        SectionKind::Var => "Variables",
        SectionKind::UserDefined => "",
    }
}

fn details_title(kind: SectionKind) -> Option<&'static str> {
    match kind {
        SectionKind::Define => Some("Macro Definition Documentation"),
        SectionKind::Enum => Some("Enumeration Type Documentation"),
        SectionKind::Typedef => Some("Typedef Documentation"),
        SectionKind::Func => Some("Function Documentation"),
        SectionKind::Var => Some("Variable Documentation"),
        SectionKind::UserDefined => None,
    }
}

/// Members of a section that match its kind.
fn members(engine: &RenderEngine, node: NodeId, kind: SectionKind) -> Vec<NodeId> {
    match kind.member_kind() {
        Some(member_kind) => {
            find_children_of_kind(engine.tree(), node, "memberdef", member_kind.as_str())
        }
        None => find_children(engine.tree(), node, "memberdef"),
    }
}

/// `<<id,name>>` link to a member.
fn member_link(engine: &RenderEngine, member: NodeId) -> Result<String> {
    let id = require_attribute(engine.tree(), member, "id")?;
    let name = child_text(engine.tree(), member, "name").unwrap_or_default();
    Ok(format!("<<{},{}>>", sanitize(id), escape_text(&name)))
}

fn brief_or_empty(engine: &mut RenderEngine, member: NodeId, ctx: &RenderContext) -> Result<String> {
    let brief = engine.render_child(member, "briefdescription", ctx)?;
    if brief.is_empty() {
        Ok("{empty}".to_string())
    } else {
        Ok(brief)
    }
}

fn escaped_child(engine: &RenderEngine, node: NodeId, tag: &str) -> String {
    escape_text(&child_text(engine.tree(), node, tag).unwrap_or_default())
}

/// Render the summary of a `sectiondef`.
///
/// Summaries with no matching members render as the empty string.
pub fn summary(
    engine: &mut RenderEngine,
    node: NodeId,
    kind: SectionKind,
    ctx: &RenderContext,
) -> Result<String> {
    type LineRenderer = fn(&mut RenderEngine, NodeId, &RenderContext) -> Result<String>;
    let render_line: LineRenderer = match kind {
        SectionKind::Func => function_line,
        SectionKind::Typedef => typedef_line,
        SectionKind::Enum => enum_line,
        SectionKind::Define => macro_line,
        SectionKind::Var => variable_line,
        SectionKind::UserDefined => return user_defined(engine, node, ctx),
    };

    let members = members(engine, node, kind);
    if members.is_empty() {
        return Ok(String::new());
    }

    let mut lines = Vec::with_capacity(members.len());
    for member in members {
        lines.push(render_line(engine, member, ctx)?);
    }

    let heading = title(
        summary_title(kind),
        SECTION_LEVEL + ctx.depth,
        &TitleAttributes::new(),
    );
    Ok(format!("{heading}\n\n{}", lines.join("\n")))
}

fn function_line(engine: &mut RenderEngine, member: NodeId, ctx: &RenderContext) -> Result<String> {
    let prefix = if declared_static(engine, member)? {
        "static "
    } else {
        ""
    };
    let type_ = engine.render_child(member, "type", ctx)?;
    let link = member_link(engine, member)?;
    let args = escaped_child(engine, member, "argsstring");
    let brief = brief_or_empty(engine, member, ctx)?;
    Ok(format!(
        "`{prefix}{type_} {link} {}`:: {brief}",
        args.trim_end()
    ))
}

fn typedef_line(engine: &mut RenderEngine, member: NodeId, ctx: &RenderContext) -> Result<String> {
    let type_ = engine.render_child(member, "type", ctx)?;
    let link = member_link(engine, member)?;
    let args = escaped_child(engine, member, "argsstring");
    let brief = brief_or_empty(engine, member, ctx)?;
    Ok(format!("`typedef {type_} {link}{args}`:: {brief}"))
}

/// `` `enum <<id,name>> { A, <<id,B>> = 1 }`:: brief ``
///
/// Enumerators with a brief description link to their table row.
fn enum_line(engine: &mut RenderEngine, member: NodeId, ctx: &RenderContext) -> Result<String> {
    let name = child_text(engine.tree(), member, "name").unwrap_or_default();
    let opening = if name.is_empty() {
        "`enum { ".to_string()
    } else {
        format!("`enum {} {{ ", member_link(engine, member)?)
    };

    let mut values = Vec::new();
    for value in find_children(engine.tree(), member, "enumvalue") {
        let tree = engine.tree();
        let described = find_child(tree, value, "briefdescription")
            .is_some_and(|brief| !get_text(tree, brief).is_empty());
        let mut rendered = if described {
            member_link(engine, value)?
        } else {
            escaped_child(engine, value, "name")
        };
        let initializer = child_text(tree, value, "initializer").unwrap_or_default();
        if !initializer.is_empty() {
            rendered.push(' ');
            rendered.push_str(&escape_text(&initializer));
        }
        values.push(rendered);
    }

    let brief = brief_or_empty(engine, member, ctx)?;
    Ok(format!("{opening}{} }}`:: {brief}", values.join(", ")))
}

/// `` * `#define <<id,NAME>>(args) value` ``; multi-line values are left out.
fn macro_line(engine: &mut RenderEngine, member: NodeId, ctx: &RenderContext) -> Result<String> {
    let link = member_link(engine, member)?;
    let args = escape_text(&macro_arguments(engine, member));
    let value = match macro_value(engine, member, ctx)? {
        Some(value) if !value.contains('\n') => format!(" {}", escape_text(&value)),
        _ => String::new(),
    };
    Ok(format!("* `#define {link}{args}{value}`"))
}

fn variable_line(engine: &mut RenderEngine, member: NodeId, ctx: &RenderContext) -> Result<String> {
    let type_ = engine.render_child(member, "type", ctx)?;
    let link = member_link(engine, member)?;
    let brief = brief_or_empty(engine, member, ctx)?;
    Ok(format!("`{type_} {link}`:: {brief}"))
}

/// A user-defined group: optional header, description, then full members.
fn user_defined(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let header = child_text(engine.tree(), node, "header").unwrap_or_default();
    let heading = if header.is_empty() {
        String::new()
    } else {
        title(&header, SECTION_LEVEL + ctx.depth, &TitleAttributes::new())
    };

    let description = engine.render_child(node, "description", ctx)?;

    let mut rendered = Vec::new();
    for member in members(engine, node, SectionKind::UserDefined) {
        rendered.push(engine.render(member, ctx)?);
    }
    let members = join_blocks(rendered, LINE_SEPARATOR);
    Ok(join_blocks([heading, description, members], BLOCK_SEPARATOR))
}

/// Render the detail section of a `sectiondef`: every member in full.
///
/// Functions are sorted by name and separated by blank lines; other
/// members follow each other line by line. User-defined sections have no detail
/// section since their members are rendered in the summary.
pub fn details(
    engine: &mut RenderEngine,
    node: NodeId,
    kind: SectionKind,
    ctx: &RenderContext,
) -> Result<String> {
    let Some(heading) = details_title(kind) else {
        return Ok(String::new());
    };

    let mut members = members(engine, node, kind);
    if members.is_empty() {
        return Ok(String::new());
    }
    if kind == SectionKind::Func {
        let tree = engine.tree();
        members.sort_by_cached_key(|&member| child_text(tree, member, "name").unwrap_or_default());
    }

    // Only function documentation keeps a blank line between members
    let separator = if kind == SectionKind::Func {
        BLOCK_SEPARATOR
    } else {
        LINE_SEPARATOR
    };
    let mut rendered = Vec::with_capacity(members.len());
    for member in members {
        rendered.push(engine.render(member, ctx)?);
    }

    let heading = title(heading, SECTION_LEVEL + ctx.depth, &TitleAttributes::new());
    Ok(format!("{heading}\n\n{}", join_blocks(rendered, separator)))
}
