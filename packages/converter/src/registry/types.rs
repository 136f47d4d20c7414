//! Types for the element registry system.

/// Kind of a `sectiondef` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Define,
    Enum,
    Typedef,
    Func,
    Var,
    UserDefined,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        Self::Define,
        Self::Enum,
        Self::Typedef,
        Self::Func,
        Self::Var,
        Self::UserDefined,
    ];

    /// Value of the `kind` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Define => "define",
            Self::Enum => "enum",
            Self::Typedef => "typedef",
            Self::Func => "func",
            Self::Var => "var",
            Self::UserDefined => "user-defined",
        }
    }

    /// Kind of the members listed in a section of this kind.
    ///
    /// User-defined sections mix members of any kind.
    #[must_use]
    pub fn member_kind(self) -> Option<MemberKind> {
        match self {
            Self::Define => Some(MemberKind::Define),
            Self::Enum => Some(MemberKind::Enum),
            Self::Typedef => Some(MemberKind::Typedef),
            Self::Func => Some(MemberKind::Function),
            Self::Var => Some(MemberKind::Variable),
            Self::UserDefined => None,
        }
    }
}

/// Kind of a `memberdef` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Define,
    Enum,
    Typedef,
    Function,
    Variable,
}

impl MemberKind {
    pub const ALL: [MemberKind; 5] = [
        Self::Define,
        Self::Enum,
        Self::Typedef,
        Self::Function,
        Self::Variable,
    ];

    /// Value of the `kind` attribute.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Define => "define",
            Self::Enum => "enum",
            Self::Typedef => "typedef",
            Self::Function => "function",
            Self::Variable => "variable",
        }
    }
}

/// Renderer variant selected for an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Structurally transparent wrapper: render the children.
    Generic,
    /// Contributes nothing to the output.
    Skip,

    // Inline formatting
    Anchor,
    Bold,
    Emphasis,
    ComputerOutput,
    Copyright,
    Mdash,
    Ndash,
    NonBreakableSpace,
    Space,
    LineBreak,
    Ulink,
    Ref,

    // Block structure
    Title,
    Section,
    DetailedDescription,
    Simplesect,
    ItemizedList,
    OrderedList,
    ListItem,
    Table,
    Row,
    Entry,
    ParameterList,
    ParameterNameList,
    ParameterDescription,
    ProgramListing,
    CodeLine,
    Verbatim,

    // Compounds
    Index,
    Group,
    Page,
    DataStructure,
    InnerGroup,
    InnerClass,
    Sectiondef(SectionKind),
    Memberdef(MemberKind),
}

/// Which list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Ordered,
    Unordered,
}

/// Context passed down through rendering.
///
/// Contexts are values: renderers derive a modified copy for their
/// children and never change the one they were given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Heading depth added to each renderer's own base level.
    pub depth: usize,
    /// Kind of the innermost enclosing list.
    pub list_mode: Option<ListMode>,
    /// Number of enclosing ordered lists.
    pub ordered_depth: usize,
    /// Number of enclosing itemized lists.
    pub unordered_depth: usize,
    /// Inside a member or module body whose heading is already written.
    pub documentation: bool,
    /// Inside a code block: text is emitted raw.
    pub programlisting: bool,
    /// Inside a page compound, where titles become headings.
    pub page: bool,
}

impl RenderContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh context starting at the given heading depth.
    #[must_use]
    pub fn at_depth(depth: usize) -> Self {
        Self {
            depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_depth(self, depth: usize) -> Self {
        Self { depth, ..self }
    }

    /// Advance the heading depth by `levels`.
    #[must_use]
    pub fn deeper(self, levels: usize) -> Self {
        self.with_depth(self.depth + levels)
    }

    #[must_use]
    pub fn in_documentation(self) -> Self {
        Self {
            documentation: true,
            ..self
        }
    }

    #[must_use]
    pub fn in_programlisting(self) -> Self {
        Self {
            programlisting: true,
            ..self
        }
    }

    #[must_use]
    pub fn in_page(self) -> Self {
        Self { page: true, ..self }
    }

    #[must_use]
    pub fn in_ordered_list(self) -> Self {
        Self {
            list_mode: Some(ListMode::Ordered),
            ordered_depth: self.ordered_depth + 1,
            ..self
        }
    }

    #[must_use]
    pub fn in_unordered_list(self) -> Self {
        Self {
            list_mode: Some(ListMode::Unordered),
            unordered_depth: self.unordered_depth + 1,
            ..self
        }
    }

    /// Total number of enclosing lists.
    #[must_use]
    pub fn list_depth(&self) -> usize {
        self.ordered_depth + self.unordered_depth
    }

    /// Marker for an item of the innermost list (`*`, `**`, `.`, `..`).
    #[must_use]
    pub fn list_marker(&self) -> String {
        match self.list_mode {
            Some(ListMode::Ordered) => ".".repeat(self.ordered_depth.max(1)),
            _ => "*".repeat(self.unordered_depth.max(1)),
        }
    }
}
