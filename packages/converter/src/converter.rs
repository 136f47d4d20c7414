//! Conversion entry points that tie parsing, resolution and rendering together.

use std::path::Path;

use crate::config::{validate_input_path, ConversionMode, ConvertOptions};
use crate::error::{ConverterError, Result};
use crate::registry::{RenderContext, RenderEngine};
use crate::resolver::{CompoundSource, DirectorySource, ResolvedCompounds};
use crate::xml::{get_tag_name, Tree};

/// Convert a `doxygenindex` document to AsciiDoc.
///
/// # Arguments
/// * `xml` - The index document
/// * `source` - Where the group and struct documents it names are read from
/// * `depth` - Heading depth added to every level
///
/// # Errors
/// Returns the first fault met while parsing, loading or rendering. No
/// partial output is produced.
pub fn convert_index(xml: &str, source: &dyn CompoundSource, depth: usize) -> Result<String> {
    convert(
        xml,
        source,
        ConvertOptions::new(ConversionMode::Index).with_depth(depth),
    )
}

/// Convert a single `doxygen` compound document to AsciiDoc.
///
/// # Errors
/// Returns the first fault met while parsing, loading or rendering.
pub fn convert_fragment(xml: &str, source: &dyn CompoundSource, depth: usize) -> Result<String> {
    convert(
        xml,
        source,
        ConvertOptions::new(ConversionMode::Fragment).with_depth(depth),
    )
}

/// Convert the document in `path`, reading referenced compounds from the
/// same directory.
///
/// # Errors
/// Returns `InputNotFound` if `path` is not a file, and otherwise the first
/// fault met while converting.
pub fn convert_file(path: &Path, options: ConvertOptions) -> Result<String> {
    validate_input_path(path)?;
    let xml = std::fs::read_to_string(path)?;
    let source = DirectorySource::beside(path);
    tracing::debug!(input = %path.display(), xml_dir = %source.xml_dir().display(), "reading input");
    convert(&xml, &source, options)
}

/// Convert a document according to `options`.
///
/// # Errors
/// Returns `MalformedSchema` if the root element does not match the mode,
/// and otherwise the first fault met while converting.
pub fn convert(xml: &str, source: &dyn CompoundSource, options: ConvertOptions) -> Result<String> {
    tracing::info!(mode = ?options.mode, depth = options.depth, "converting");

    let (mut tree, root) = Tree::parse(xml)?;
    let expected = match options.mode {
        ConversionMode::Index => "doxygenindex",
        ConversionMode::Fragment => "doxygen",
    };
    let actual = get_tag_name(&tree, root);
    if actual != expected {
        return Err(ConverterError::MalformedSchema {
            element: actual.to_string(),
            detail: format!("expected a <{expected}> document"),
        });
    }

    let resolved = ResolvedCompounds::resolve(&mut tree, root, source)?;
    let mut engine = RenderEngine::new(tree, resolved);
    let output = engine.render(root, &RenderContext::at_depth(options.depth))?;

    tracing::info!(bytes = output.len(), "conversion finished");
    Ok(output)
}
