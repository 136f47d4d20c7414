//! Section titles and block attribute lists.

use super::text::{escape_text, sanitize};
use crate::config::MAX_HEADING_LEVEL;
use crate::xml::{get_attribute, NodeId, Tree};

/// Attributes carried on the line above a title or section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleAttributes {
    pub id: Option<String>,
    /// Cross-reference text, emitted right after the id.
    pub reftext: Option<String>,
    pub role: Option<String>,
    pub tag: Option<String>,
    pub type_: Option<String>,
    /// Further `key="value"` pairs, in output order.
    pub extra: Vec<(String, String)>,
}

impl TitleAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `id`, `role`, `tag` and `type` from an element.
    #[must_use]
    pub fn from_element(tree: &Tree, node: NodeId) -> Self {
        let read = |name: &str| get_attribute(tree, node, name).map(str::to_string);
        Self {
            id: read("id"),
            reftext: None,
            role: read("role"),
            tag: read("tag"),
            type_: read("type"),
            extra: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_reftext(mut self, reftext: impl Into<String>) -> Self {
        self.reftext = Some(reftext.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.push((key.into(), value.into()));
        self
    }

    /// Render the comma-separated attribute list, without brackets.
    ///
    /// Returns `None` when there is nothing to emit.
    #[must_use]
    pub fn to_list(&self, heading_role: Option<&str>) -> Option<String> {
        let mut items = Vec::new();

        if let Some(id) = &self.id {
            items.push(format!("#{}", sanitize(id)));
        }
        if let Some(reftext) = &self.reftext {
            items.push(format!("reftext=\"{}\"", escape_text(reftext)));
        }

        let roles: Vec<&str> = heading_role
            .into_iter()
            .chain(self.role.as_deref())
            .collect();
        if !roles.is_empty() {
            items.push(format!("role={}", roles.join(" ")));
        }

        if let Some(tag) = &self.tag {
            items.push(format!("tag={}", escape_text(tag)));
        }
        if let Some(type_) = &self.type_ {
            items.push(format!("type={}", escape_text(type_)));
        }
        for (key, value) in &self.extra {
            items.push(format!("{}=\"{}\"", escape_text(key), escape_text(value)));
        }

        if items.is_empty() {
            None
        } else {
            Some(items.join(","))
        }
    }
}

/// Render an escaped title at the given section level.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::asciidoc::{title, TitleAttributes};
///
/// let attributes = TitleAttributes::new().with_id("group__foo");
/// assert_eq!(title("Title", 1, &attributes), "[#group_foo]\n== Title");
/// ```
#[must_use]
pub fn title(text: &str, level: usize, attributes: &TitleAttributes) -> String {
    heading(&escape_text(text), level, attributes)
}

/// Render already-escaped heading content at the given section level.
///
/// Levels deeper than AsciiDoc supports become a bold line with the `h6`
/// role.
#[must_use]
pub fn heading(content: &str, level: usize, attributes: &TitleAttributes) -> String {
    let too_deep = level > MAX_HEADING_LEVEL;
    let mut output = String::new();

    if let Some(list) = attributes.to_list(too_deep.then_some("h6")) {
        output.push('[');
        output.push_str(&list);
        output.push_str("]\n");
    }

    if too_deep {
        output.push('*');
        output.push_str(content);
        output.push('*');
    } else {
        output.push_str(&"=".repeat(level + 1));
        output.push(' ');
        output.push_str(content);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_without_attributes() {
        assert_eq!(title("Title", 1, &TitleAttributes::new()), "== Title");
        assert_eq!(title("Top", 0, &TitleAttributes::new()), "= Top");
    }

    #[test]
    fn test_title_with_all_attributes() {
        let attributes = TitleAttributes {
            id: Some("group__foo".to_string()),
            reftext: None,
            role: Some("contextspecific".to_string()),
            tag: Some("TAG".to_string()),
            type_: Some("TYPE".to_string()),
            extra: Vec::new(),
        };
        assert_eq!(
            title("Title", 1, &attributes),
            "[#group_foo,role=contextspecific,tag=TAG,type=TYPE]\n== Title"
        );
    }

    #[test]
    fn test_title_beyond_level_five() {
        assert_eq!(
            title("Level 6 Section Title", 6, &TitleAttributes::new()),
            "[role=h6]\n*Level 6 Section Title*"
        );

        let attributes = TitleAttributes {
            role: Some("contextspecific".to_string()),
            ..TitleAttributes::new()
        };
        assert_eq!(
            title("Deep", 7, &attributes),
            "[role=h6 contextspecific]\n*Deep*"
        );
    }

    #[test]
    fn test_title_with_extra_attributes() {
        let attributes = TitleAttributes::new()
            .with_attribute("foo", "bar")
            .with_attribute("baz", "quux");
        assert_eq!(
            title("Title", 1, &attributes),
            "[foo=\"bar\",baz=\"quux\"]\n== Title"
        );
    }

    #[test]
    fn test_reftext_follows_id() {
        let attributes = TitleAttributes {
            id: Some("group__adc".to_string()),
            role: Some("contextspecific".to_string()),
            ..TitleAttributes::new()
        }
        .with_reftext("hardware_adc");
        assert_eq!(
            title("hardware_adc", 3, &attributes),
            "[#group_adc,reftext=\"hardware_adc\",role=contextspecific]\n==== hardware_adc"
        );
    }

    #[test]
    fn test_title_escapes_text() {
        assert_eq!(
            title("__foo", 2, &TitleAttributes::new()),
            "=== ++__foo++"
        );
    }

    #[test]
    fn test_from_element() {
        let (tree, root) =
            Tree::parse(r#"<memberdef id="a__b" kind="function" role="extra"/>"#).unwrap();
        let attributes = TitleAttributes::from_element(&tree, root);

        assert_eq!(attributes.id.as_deref(), Some("a__b"));
        assert_eq!(attributes.to_list(None).as_deref(), Some("#a_b,role=extra"));
    }
}
