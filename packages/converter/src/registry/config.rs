//! Registry configuration for Doxygen XML.

use super::core::ElementRegistry;
use super::types::{ElementKind, MemberKind, SectionKind};

/// Create a registry configured for Doxygen's compound XML schema.
#[must_use]
pub fn create_doxygen_registry() -> ElementRegistry {
    let mut registry = ElementRegistry::new();

    // Inline formatting
    registry.register("anchor", ElementKind::Anchor);
    registry.register("bold", ElementKind::Bold);
    registry.register("emphasis", ElementKind::Emphasis);
    registry.register("computeroutput", ElementKind::ComputerOutput);
    registry.register("copy", ElementKind::Copyright);
    registry.register("mdash", ElementKind::Mdash);
    registry.register("ndash", ElementKind::Ndash);
    registry.register("nonbreakablespace", ElementKind::NonBreakableSpace);
    registry.register("sp", ElementKind::Space);
    registry.register("linebreak", ElementKind::LineBreak);
    registry.register("ulink", ElementKind::Ulink);
    registry.register("ref", ElementKind::Ref);

    // Block structure
    registry.register("title", ElementKind::Title);
    registry.register("sect1", ElementKind::Section);
    registry.register("sect2", ElementKind::Section);
    registry.register("sect3", ElementKind::Section);
    registry.register("detaileddescription", ElementKind::DetailedDescription);
    registry.register("simplesect", ElementKind::Simplesect);
    registry.register("itemizedlist", ElementKind::ItemizedList);
    registry.register("orderedlist", ElementKind::OrderedList);
    registry.register("listitem", ElementKind::ListItem);
    registry.register("table", ElementKind::Table);
    registry.register("row", ElementKind::Row);
    registry.register("entry", ElementKind::Entry);
    registry.register("parameterlist", ElementKind::ParameterList);
    registry.register("parameternamelist", ElementKind::ParameterNameList);
    registry.register("parameterdescription", ElementKind::ParameterDescription);
    registry.register("programlisting", ElementKind::ProgramListing);
    registry.register("codeline", ElementKind::CodeLine);
    registry.register("verbatim", ElementKind::Verbatim);

    // Cross-document references
    registry.register("doxygenindex", ElementKind::Index);
    registry.register("innergroup", ElementKind::InnerGroup);
    registry.register("innerclass", ElementKind::InnerClass);

    // Structurally transparent wrappers
    for tag in [
        "briefdescription",
        "compound",
        "description",
        "doxygen",
        "enumvalue",
        "highlight",
        "initializer",
        "para",
        "param",
        "parameteritem",
        "type",
    ] {
        registry.register(tag, ElementKind::Generic);
    }

    // Compounds dispatch on their kind
    registry.register_kind("compounddef", "group", ElementKind::Group);
    registry.register_kind("compounddef", "page", ElementKind::Page);
    registry.register_kind("compounddef", "struct", ElementKind::DataStructure);

    for kind in SectionKind::ALL {
        registry.register_kind("sectiondef", kind.as_str(), ElementKind::Sectiondef(kind));
    }
    for kind in MemberKind::ALL {
        registry.register_kind("memberdef", kind.as_str(), ElementKind::Memberdef(kind));
    }

    // Metadata only read by compound renderers:
    //   - compoundname: used as the struct title, never rendered inline
    //   - location: source file position
    registry.skip(["compoundname", "location"]);

    registry
}
