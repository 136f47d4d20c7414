//! Configuration constants and validation functions for the converter.

use std::path::{Path, PathBuf};

use crate::error::{ConverterError, Result};

/// File extension of Doxygen compound documents.
pub const COMPOUND_FILE_EXTENSION: &str = "xml";

/// Starting heading depth when converting a `doxygenindex` document.
pub const DEFAULT_INDEX_DEPTH: usize = 0;

/// Starting heading depth when converting a single `doxygen` fragment.
pub const DEFAULT_FRAGMENT_DEPTH: usize = 1;

/// Deepest heading level AsciiDoc can express (`======`).
///
/// Titles beyond this level are rendered as bold text with the `h6` role.
pub const MAX_HEADING_LEVEL: usize = 5;

/// Tags that start a block-formatting context.
///
/// An element with at least one of these as a direct child has its
/// remaining inline children wrapped into paragraphs before rendering.
pub const BLOCK_LEVEL_TAGS: &[&str] = &[
    "entry",
    "itemizedlist",
    "listitem",
    "orderedlist",
    "para",
    "parameteritem",
    "parameterlist",
    "programlisting",
    "row",
    "sect1",
    "sect2",
    "sect3",
    "simplesect",
    "table",
    "title",
    "verbatim",
];

/// Which kind of document a conversion starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionMode {
    /// A `doxygenindex` document with module hierarchy and data structures.
    Index,
    /// A single `doxygen` compound document.
    Fragment,
}

impl ConversionMode {
    /// Heading depth used when none is given explicitly.
    #[must_use]
    pub fn default_depth(self) -> usize {
        match self {
            Self::Index => DEFAULT_INDEX_DEPTH,
            Self::Fragment => DEFAULT_FRAGMENT_DEPTH,
        }
    }
}

/// Options for one conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub mode: ConversionMode,
    pub depth: usize,
}

impl ConvertOptions {
    /// Options for `mode` at its default depth.
    #[must_use]
    pub fn new(mode: ConversionMode) -> Self {
        Self {
            mode,
            depth: mode.default_depth(),
        }
    }

    /// Override the starting heading depth.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }
}

/// Check whether a tag starts a block-formatting context.
#[must_use]
pub fn is_block_level(tag: &str) -> bool {
    BLOCK_LEVEL_TAGS.contains(&tag)
}

/// Path of the compound document for `refid` inside `xml_dir`.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use doxygen_asciidoc::config::compound_path;
///
/// assert_eq!(
///     compound_path(Path::new("xml"), "group__hardware__irq"),
///     Path::new("xml/group__hardware__irq.xml")
/// );
/// ```
#[must_use]
pub fn compound_path(xml_dir: &Path, refid: &str) -> PathBuf {
    xml_dir.join(format!("{refid}.{COMPOUND_FILE_EXTENSION}"))
}

/// Validate that the input path names an existing file.
///
/// # Returns
/// * `Ok(())` if the path is a regular file
/// * `Err(ConverterError::InputNotFound)` otherwise
pub fn validate_input_path(path: &Path) -> Result<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConverterError::InputNotFound(path.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_level_tags() {
        assert!(is_block_level("para"));
        assert!(is_block_level("simplesect"));
        assert!(is_block_level("sect3"));
        assert!(!is_block_level("bold"));
        assert!(!is_block_level("ref"));
    }

    #[test]
    fn test_default_depths() {
        assert_eq!(ConvertOptions::new(ConversionMode::Index).depth, 0);
        assert_eq!(ConvertOptions::new(ConversionMode::Fragment).depth, 1);
        assert_eq!(
            ConvertOptions::new(ConversionMode::Index).with_depth(3).depth,
            3
        );
    }

    #[test]
    fn test_validate_input_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("index.xml");
        std::fs::write(&file, "<doxygenindex/>").unwrap();

        assert!(validate_input_path(&file).is_ok());
        assert!(validate_input_path(dir.path()).is_err());
        assert!(validate_input_path(&dir.path().join("missing.xml")).is_err());
    }
}
