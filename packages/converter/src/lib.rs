//! Doxygen XML to AsciiDoc converter.
//!
//! This crate turns the XML output of Doxygen (an `index.xml` plus one
//! document per compound) into a single AsciiDoc document, keeping the
//! module hierarchy, member summaries and detailed documentation.
//!
//! # Example
//!
//! ```
//! use doxygen_asciidoc::converter::convert_fragment;
//! use doxygen_asciidoc::resolver::MemorySource;
//!
//! let xml = r#"<doxygen>
//!   <compounddef id="md_intro" kind="page">
//!     <title>Intro</title>
//!     <detaileddescription><para>Hello <bold>world</bold></para></detaileddescription>
//!   </compounddef>
//! </doxygen>"#;
//!
//! let asciidoc = convert_fragment(xml, &MemorySource::new(), 1).unwrap();
//! assert_eq!(asciidoc, "[#md_intro]\n=== Intro\n\nHello *world*");
//! ```
//!
//! # Architecture
//!
//! The converter is organized into several modules:
//!
//! - [`config`]: Configuration constants, conversion options and validation
//! - [`error`]: Error types and Result alias
//! - [`xml`]: Arena tree and navigation helpers
//! - [`asciidoc`]: Escaping, whitespace collapsing and titles
//! - [`normalize`]: Paragraph wrapping of mixed block and inline content
//! - [`registry`]: Element registry, render engine and renderers
//! - [`resolver`]: Loading of referenced compound documents
//! - [`converter`]: Conversion entry points
//! - [`cli`]: Command-line interface

pub mod asciidoc;
pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod resolver;
pub mod xml;

pub use converter::{convert, convert_file, convert_fragment, convert_index};
pub use error::{ConverterError, Result};
