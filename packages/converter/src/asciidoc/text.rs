//! Escaping and whitespace collapsing for AsciiDoc text.

use regex::Regex;
use std::sync::LazyLock;

/// Identifiers starting with a double underscore (`__attribute__`, `__not_in_flash`).
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DUNDER_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(__\w+)").expect("valid regex"));

/// A `((...))` span, which AsciiDoc would turn into an index term.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DOUBLE_PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\((.+)\)\)").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PADDED_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+\n\s+").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static UNDERSCORE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__+").expect("valid regex"));

/// Escape text so AsciiDoc renders it literally.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::asciidoc::escape_text;
///
/// assert_eq!(escape_text("foo __bar baz"), "foo ++__bar++ baz");
/// assert_eq!(escape_text("* foo * bar"), "++*++ foo ++*++ bar");
/// assert_eq!(escape_text("((hello))"), "\\((hello))");
/// assert_eq!(escape_text("((hello)-1)"), "((hello)-1)");
/// ```
pub fn escape_text(text: &str) -> String {
    let escaped = DUNDER_WORD
        .replace_all(text, "++${1}++")
        .replace('*', "++*++")
        .replace(" \\\n", " ")
        .replace("->", "\\->");
    DOUBLE_PARENS
        .replace_all(&escaped, r"\((${1}))")
        .into_owned()
}

/// Turn a Doxygen id into an AsciiDoc anchor id.
///
/// # Examples
/// ```
/// use doxygen_asciidoc::asciidoc::sanitize;
///
/// assert_eq!(sanitize("group__hardware__gpio_1ga5d7dbad"), "group_hardware_gpio_1ga5d7dbad");
/// ```
pub fn sanitize(id: &str) -> String {
    UNDERSCORE_RUN.replace_all(id, "_").into_owned()
}

/// Render a text run the way a browser would lay it out.
///
/// Whitespace runs collapse to one space; the leading edge is trimmed when
/// the run is the first child of its element and the trailing edge when it
/// is the last. In program listings the text is returned untouched.
pub fn render_text(text: &str, is_first: bool, is_last: bool, programlisting: bool) -> String {
    if text.is_empty() {
        return String::new();
    }
    if programlisting {
        return text.to_string();
    }

    let escaped = escape_text(text);
    let joined = PADDED_NEWLINE.replace_all(&escaped, "\n").replace('\n', " ");
    let collapsed = WHITESPACE_RUN.replace_all(&joined, " ");

    let mut rendered: &str = &collapsed;
    if is_first {
        rendered = rendered.trim_start();
    }
    if is_last {
        rendered = rendered.trim_end();
    }
    rendered.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_dunder_words() {
        assert_eq!(escape_text("foo __bar baz"), "foo ++__bar++ baz");
        assert_eq!(escape_text("__not_in_flash_func"), "++__not_in_flash_func++");
        assert_eq!(escape_text("foo__bar"), "foo__bar");
    }

    #[test]
    fn test_escape_asterisks() {
        assert_eq!(escape_text("* foo * bar"), "++*++ foo ++*++ bar");
        assert_eq!(escape_text("char *"), "char ++*++");
    }

    #[test]
    fn test_escape_backslash_newline() {
        assert_eq!(escape_text(" \\\n"), " ");
    }

    #[test]
    fn test_escape_arrow() {
        assert_eq!(escape_text("->"), "\\->");
        assert_eq!(escape_text("lock->spin_lock"), "lock\\->spin_lock");
    }

    #[test]
    fn test_escape_double_parens() {
        assert_eq!(escape_text("((hello))"), "\\((hello))");
        assert_eq!(escape_text("((hello)-1)"), "((hello)-1)");
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("group__foo_1bar"), "group_foo_1bar");
        assert_eq!(sanitize("struct____x"), "struct_x");
        assert_eq!(sanitize("plain_id"), "plain_id");
    }

    #[test]
    fn test_render_text_collapses_whitespace() {
        assert_eq!(
            render_text("   Hello \n    ", true, false, false),
            "Hello "
        );
        assert_eq!(render_text(" a  \t b ", false, false, false), " a b ");
    }

    #[test]
    fn test_render_text_trims_edges() {
        assert_eq!(render_text("  middle  ", false, false, false), " middle ");
        assert_eq!(render_text("  first  ", true, false, false), "first ");
        assert_eq!(render_text("  last  ", false, true, false), " last");
        assert_eq!(render_text("\n    ", true, true, false), "");
    }

    #[test]
    fn test_render_text_programlisting_is_raw() {
        assert_eq!(
            render_text("  *p = a->b;\n", true, true, true),
            "  *p = a->b;\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        assert_eq!(render_text("", true, true, false), "");
    }

    #[test]
    fn test_render_text_collapse_is_idempotent() {
        let inputs = [
            "  Hello \n\n   world  ",
            "\tone\ttwo  three\n",
            "already clean",
            " \n ",
        ];
        for input in inputs {
            for (first, last) in [(false, false), (true, false), (false, true), (true, true)] {
                let once = render_text(input, first, last, false);
                let twice = render_text(&once, first, last, false);
                assert_eq!(once, twice, "input {input:?}");
                assert!(!once.contains("  "));
            }
        }
    }
}
