//! Member renderers: functions, typedefs, enums, variables and macros.
//!
//! Every member gets a heading five levels below the current depth, a
//! one-line declaration and its brief and detailed descriptions.

use crate::asciidoc::{escape_text, sanitize, title, TitleAttributes};
use crate::error::Result;
use crate::registry::engine::{join_blocks, RenderEngine, BLOCK_SEPARATOR};
use crate::registry::types::{MemberKind, RenderContext};
use crate::xml::{child_text, find_child, find_children, get_text, require_attribute, NodeId};

/// Heading level of a member relative to the context depth.
const MEMBER_LEVEL: usize = 5;

/// Render a `memberdef` of the given kind.
pub fn memberdef(
    engine: &mut RenderEngine,
    node: NodeId,
    kind: MemberKind,
    ctx: &RenderContext,
) -> Result<String> {
    match kind {
        MemberKind::Function => function(engine, node, ctx),
        MemberKind::Typedef => typedef(engine, node, ctx),
        MemberKind::Enum => enumeration(engine, node, ctx),
        MemberKind::Variable => variable(engine, node, ctx),
        MemberKind::Define => define(engine, node, ctx),
    }
}

fn member_heading(engine: &RenderEngine, node: NodeId, name: &str, ctx: &RenderContext) -> String {
    let attributes = TitleAttributes::from_element(engine.tree(), node);
    title(name, MEMBER_LEVEL + ctx.depth, &attributes)
}

/// Heading and declaration, then both descriptions in documentation mode.
fn assemble(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
    heading: String,
    declaration: String,
) -> Result<String> {
    let body_ctx = ctx.deeper(MEMBER_LEVEL).in_documentation();
    let brief = engine.render_child(node, "briefdescription", &body_ctx)?;
    let detailed = engine.render_child(node, "detaileddescription", &body_ctx)?;
    Ok(join_blocks([heading, declaration, brief, detailed], BLOCK_SEPARATOR))
}

fn name_of(engine: &RenderEngine, node: NodeId) -> String {
    child_text(engine.tree(), node, "name").unwrap_or_default()
}

fn is_yes(engine: &RenderEngine, node: NodeId, attribute: &str) -> Result<bool> {
    Ok(require_attribute(engine.tree(), node, attribute)? == "yes")
}

/// `` `[static ]type name (type declname, ...) [inline], [static]` ``
fn function(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let name = name_of(engine, node);
    let heading = member_heading(engine, node, &name, ctx);
    let is_static = declared_static(engine, node)?;
    let is_inline = is_yes(engine, node, "inline")?;

    let mut signature = String::from("`");
    if is_static {
        signature.push_str("static ");
    }
    signature.push_str(&engine.render_child(node, "type", ctx)?);
    signature.push(' ');
    signature.push_str(&escape_text(&name));

    let params = find_children(engine.tree(), node, "param");
    if !params.is_empty() {
        let mut args = Vec::with_capacity(params.len());
        for param in params {
            let mut arg = engine.render_child(param, "type", ctx)?;
            if let Some(declname) = child_text(engine.tree(), param, "declname") {
                if !declname.is_empty() {
                    arg.push(' ');
                    arg.push_str(&escape_text(&declname));
                }
            }
            args.push(arg);
        }
        signature.push_str(&format!(" ({})", args.join(", ")));
    }

    let qualifiers: Vec<&str> = [(is_inline, "[inline]"), (is_static, "[static]")]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect();
    if !qualifiers.is_empty() {
        signature.push(' ');
        signature.push_str(&qualifiers.join(", "));
    }

    let declaration = format!("{}`", signature.trim_end());
    assemble(engine, node, ctx, heading, declaration)
}

fn typedef(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let name = name_of(engine, node);
    let heading = member_heading(engine, node, &name, ctx);
    let definition = child_text(engine.tree(), node, "definition").unwrap_or_default();
    let declaration = format!("`{}`", escape_text(&definition).trim_end());
    assemble(engine, node, ctx, heading, declaration)
}

/// Enumerations, with a table of the enumerators that carry a brief.
fn enumeration(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let name = name_of(engine, node);
    let (heading, declaration) = if name.is_empty() {
        (
            member_heading(engine, node, "anonymous enum", ctx),
            "`anonymous enum`".to_string(),
        )
    } else {
        (
            member_heading(engine, node, &name, ctx),
            format!("`enum {}`", escape_text(&name).trim_end()),
        )
    };
    let documented = assemble(engine, node, ctx, heading, declaration)?;

    let described: Vec<NodeId> = find_children(engine.tree(), node, "enumvalue")
        .into_iter()
        .filter(|&value| {
            find_child(engine.tree(), value, "briefdescription")
                .is_some_and(|brief| !get_text(engine.tree(), brief).is_empty())
        })
        .collect();
    if described.is_empty() {
        return Ok(documented);
    }

    let body_ctx = ctx.deeper(MEMBER_LEVEL).in_documentation();
    let mut rows = Vec::with_capacity(described.len());
    for value in described {
        let id = require_attribute(engine.tree(), value, "id")?;
        let anchor = sanitize(id);
        let value_name = child_text(engine.tree(), value, "name").unwrap_or_default();
        let brief = engine.render_child(value, "briefdescription", &body_ctx)?;
        rows.push(format!("|[[{anchor}]]{value_name}\n|{brief}"));
    }

    let table = [
        ".Enumerator".to_string(),
        "[cols=\"h,1\"]".to_string(),
        "|===".to_string(),
        rows.join("\n\n"),
        "|===".to_string(),
    ]
    .join("\n");
    Ok(join_blocks([documented, table], BLOCK_SEPARATOR))
}

/// Variables; initialized ones are shown as a C source block.
fn variable(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let name = match name_of(engine, node) {
        name if name.is_empty() => {
            child_text(engine.tree(), node, "qualifiedname").unwrap_or_default()
        }
        name => name,
    };
    let heading = member_heading(engine, node, &name, ctx);
    let definition = child_text(engine.tree(), node, "definition").unwrap_or_default();

    let has_initializer =
        child_text(engine.tree(), node, "initializer").is_some_and(|text| !text.is_empty());
    let declaration = if has_initializer {
        let initializer = engine.render_child(node, "initializer", &ctx.in_programlisting())?;
        format!(
            "[source,c]\n----\n{definition} {}\n----",
            initializer.trim_start()
        )
    } else {
        format!("`{}`", escape_text(&definition).trim_end())
    };
    assemble(engine, node, ctx, heading, declaration)
}

/// Argument list of a function-like macro, `(a, b)`, or `""`.
pub(crate) fn macro_arguments(engine: &RenderEngine, node: NodeId) -> String {
    let params: Vec<String> = find_children(engine.tree(), node, "param")
        .into_iter()
        .map(|param| get_text(engine.tree(), param))
        .collect();
    if params.is_empty() {
        String::new()
    } else {
        format!("({})", params.join(", "))
    }
}

/// Replacement text of a macro rendered raw, if it has any.
pub(crate) fn macro_value(
    engine: &mut RenderEngine,
    node: NodeId,
    ctx: &RenderContext,
) -> Result<Option<String>> {
    let has_initializer =
        child_text(engine.tree(), node, "initializer").is_some_and(|text| !text.is_empty());
    if !has_initializer {
        return Ok(None);
    }
    let value = engine.render_child(node, "initializer", &ctx.in_programlisting())?;
    Ok(Some(value))
}

/// `#define` macros; multi-line values become a C source block.
fn define(engine: &mut RenderEngine, node: NodeId, ctx: &RenderContext) -> Result<String> {
    let name = name_of(engine, node);
    let heading = member_heading(engine, node, &name, ctx);
    let args = macro_arguments(engine, node);

    let declaration = match macro_value(engine, node, ctx)? {
        Some(value) if value.contains('\n') => format!(
            "[source,c]\n----\n#define {name}{args} {}\n----",
            value.trim_start()
        ),
        Some(value) => format!(
            "`#define {}{} {}`",
            escape_text(&name),
            escape_text(&args),
            escape_text(&value).trim_end()
        ),
        None => format!(
            "`#define {}{}`",
            escape_text(&name),
            escape_text(&args).trim_end()
        ),
    };
    assemble(engine, node, ctx, heading, declaration)
}

/// Whether a function member is declared `static`.
///
/// # Errors
/// Returns `MalformedSchema` if the member has no `static` attribute.
pub(crate) fn declared_static(engine: &RenderEngine, node: NodeId) -> Result<bool> {
    is_yes(engine, node, "static")
}

#[cfg(test)]
mod tests {
    use crate::registry::{RenderContext, RenderEngine};
    use crate::xml::Tree;
    use pretty_assertions::assert_eq;

    fn render_with(xml: &str, ctx: RenderContext) -> String {
        let (tree, root) = Tree::parse(xml).unwrap();
        let mut engine = RenderEngine::from_tree(tree);
        engine.render(root, &ctx).unwrap()
    }

    fn render(xml: &str) -> String {
        render_with(xml, RenderContext::new())
    }

    const GPIO_PUT: &str = r#"<memberdef kind="function" id="group__hardware__gpio_1ga1" prot="public" static="yes" const="no" explicit="no" inline="yes" virt="non-virtual">
<type>void</type>
<definition>static void gpio_put</definition>
<argsstring>(uint gpio, bool value)</argsstring>
<name>gpio_put</name>
<param><type>uint</type><declname>gpio</declname></param>
<param><type>bool</type><declname>value</declname></param>
<briefdescription><para>Drive a single GPIO high/low. </para></briefdescription>
<detaileddescription>
<para><parameterlist kind="param"><parameteritem>
<parameternamelist><parametername>gpio</parametername></parameternamelist>
<parameterdescription><para>GPIO number</para></parameterdescription>
</parameteritem></parameterlist></para>
</detaileddescription>
<location file="gpio.h" line="700"/>
</memberdef>"#;

    #[test]
    fn test_function() {
        assert_eq!(
            render(GPIO_PUT),
            "[#group_hardware_gpio_1ga1]\n====== gpio_put\n\n\
             `static void gpio_put (uint gpio, bool value) [inline], [static]`\n\n\
             Drive a single GPIO high/low.\n\n\
             *Parameters*\n\n[horizontal]\n`gpio`:: GPIO number"
        );
    }

    #[test]
    fn test_function_beyond_heading_levels() {
        let rendered = render_with(GPIO_PUT, RenderContext::at_depth(1));
        assert!(rendered.starts_with("[#group_hardware_gpio_1ga1,role=h6]\n*gpio_put*\n\n"));
    }

    #[test]
    fn test_function_without_params() {
        let xml = r#"<memberdef kind="function" id="a_1b" static="no" inline="no">
<type><ref refid="group__x_1ga2">uint32_t</ref></type>
<name>time_us_32</name>
<briefdescription/>
<detaileddescription/>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#a_1b]\n====== time_us_32\n\n`<<group_x_1ga2,uint32_t>> time_us_32`"
        );
    }

    #[test]
    fn test_function_requires_static_attribute() {
        let (tree, root) =
            Tree::parse(r#"<memberdef kind="function" inline="no"><name>f</name></memberdef>"#)
                .unwrap();
        let mut engine = RenderEngine::from_tree(tree);
        let err = engine.render(root, &RenderContext::new()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Malformed Doxygen XML in <memberdef>: missing required attribute 'static'"
        );
    }

    #[test]
    fn test_typedef() {
        let xml = r#"<memberdef kind="typedef" id="group__irq_1ga3">
<type>void(*</type>
<definition>typedef void(* irq_handler_t) (void)</definition>
<argsstring>)(void)</argsstring>
<name>irq_handler_t</name>
<briefdescription><para>Interrupt handler function type.</para></briefdescription>
<detaileddescription/>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#group_irq_1ga3]\n====== irq_handler_t\n\n\
             `typedef void(++*++ irq_handler_t) (void)`\n\n\
             Interrupt handler function type."
        );
    }

    #[test]
    fn test_enum_with_enumerators() {
        let xml = r#"<memberdef kind="enum" id="group__gpio_1ga4">
<name>gpio_function</name>
<enumvalue id="group__gpio_1gaa" prot="public"><name>GPIO_FUNC_SPI</name><initializer>= 1</initializer><briefdescription><para>SPI</para></briefdescription><detaileddescription/></enumvalue>
<enumvalue id="group__gpio_1gab" prot="public"><name>GPIO_FUNC_NULL</name><initializer>= 0x1f</initializer><briefdescription/><detaileddescription/></enumvalue>
<briefdescription><para>GPIO function definitions.</para></briefdescription>
<detaileddescription/>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#group_gpio_1ga4]\n====== gpio_function\n\n\
             `enum gpio_function`\n\n\
             GPIO function definitions.\n\n\
             .Enumerator\n[cols=\"h,1\"]\n|===\n|[[group_gpio_1gaa]]GPIO_FUNC_SPI\n|SPI\n|==="
        );
    }

    #[test]
    fn test_anonymous_enum_without_enumerator_briefs() {
        let xml = r#"<memberdef kind="enum" id="group__a_1gb">
<name></name>
<enumvalue id="group__a_1gc"><name>A</name><briefdescription/></enumvalue>
<briefdescription/>
<detaileddescription/>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#group_a_1gb]\n====== anonymous enum\n\n`anonymous enum`"
        );
    }

    #[test]
    fn test_variable_with_initializer() {
        let xml = r#"<memberdef kind="variable" id="group__a_1v">
<type>const uint</type>
<definition>const uint LED_PIN</definition>
<name>LED_PIN</name>
<initializer>=  25</initializer>
<briefdescription/>
<detaileddescription/>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#group_a_1v]\n====== LED_PIN\n\n[source,c]\n----\nconst uint LED_PIN =  25\n----"
        );
    }

    #[test]
    fn test_variable_falls_back_to_qualified_name() {
        let xml = r#"<memberdef kind="variable" id="structfoo_1bar">
<type>uint32_t</type>
<definition>uint32_t foo::bar</definition>
<name></name>
<qualifiedname>foo::bar</qualifiedname>
<briefdescription><para>Counter.</para></briefdescription>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#structfoo_1bar]\n====== foo::bar\n\n`uint32_t foo::bar`\n\nCounter."
        );
    }

    #[test]
    fn test_define_single_line() {
        let xml = r#"<memberdef kind="define" id="group__a_1d">
<name>PICO_DEFAULT_LED_PIN</name>
<initializer>25</initializer>
<briefdescription/>
<detaileddescription/>
</memberdef>"#;
        assert_eq!(
            render(xml),
            "[#group_a_1d]\n====== PICO_DEFAULT_LED_PIN\n\n`#define PICO_DEFAULT_LED_PIN 25`"
        );
    }

    #[test]
    fn test_define_with_args_and_multiline_value() {
        let xml = "<memberdef kind=\"define\" id=\"group__a_1m\">\
<name>MAX</name>\
<param><defname>a</defname></param>\
<param><defname>b</defname></param>\
<initializer>((a) &gt; (b) ? \\\n (a) : (b))</initializer>\
</memberdef>";
        assert_eq!(
            render(xml),
            "[#group_a_1m]\n====== MAX\n\n[source,c]\n----\n#define MAX(a, b) ((a) > (b) ? \\\n (a) : (b))\n----"
        );
    }

    #[test]
    fn test_define_without_value() {
        let xml = r#"<memberdef kind="define" id="group__a_1e"><name>__not_in_flash</name></memberdef>"#;
        assert_eq!(
            render(xml),
            "[#group_a_1e]\n====== ++__not_in_flash++\n\n`#define ++__not_in_flash++`"
        );
    }
}
