//! Error types for the converter.
//!
//! Every fault is unrecoverable: it propagates to the top-level conversion
//! call and no partial AsciiDoc is produced.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// The dispatch registry has no renderer for a tag (or tag and kind).
    #[error(
        "No renderer for element <{tag_name}{}>{}",
        .kind.as_ref().map(|k| format!(" kind=\"{k}\"")).unwrap_or_default(),
        .context.as_ref().map(|c| format!(" in {c}")).unwrap_or_default()
    )]
    UnknownElementKind {
        tag_name: String,
        kind: Option<String>,
        context: Option<String>,
    },

    /// A compound document named by a reference could not be loaded.
    #[error("Cannot load referenced document '{refid}' ({}): {reason}", .path.display())]
    MissingReferencedDocument {
        refid: String,
        path: PathBuf,
        reason: String,
    },

    /// The input does not follow the Doxygen schema where a renderer needs it to.
    #[error("Malformed Doxygen XML in <{element}>: {detail}")]
    MalformedSchema { element: String, detail: String },

    /// Input file does not exist or is not a regular file.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Build a `MalformedSchema` fault for a missing attribute.
    pub(crate) fn missing_attribute(element: &str, attribute: &str) -> Self {
        Self::MalformedSchema {
            element: element.to_string(),
            detail: format!("missing required attribute '{attribute}'"),
        }
    }
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;
